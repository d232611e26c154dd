//! Similarity Estimator: TF-IDF cosine similarity between the two raw
//! texts. Deliberately independent of the structured extraction — it
//! rewards lexical overlap that exact skill/keyword matching misses.

use std::collections::{BTreeSet, HashMap};

use crate::analysis::tokenize::retained_tokens;
use crate::analysis::vocabulary::Vocabulary;

/// Cosine similarity in [0, 1] over a TF-IDF space of unigrams and bigrams.
/// The two texts form the entire corpus, so IDF degenerates to a smoothed
/// document-frequency weight within the pair. Returns 0 when either text has
/// no retained terms after stop-word removal.
pub fn semantic_similarity(a: &str, b: &str, vocab: &Vocabulary) -> f64 {
    let counts_a = term_counts(a, vocab);
    let counts_b = term_counts(b, vocab);
    if counts_a.is_empty() || counts_b.is_empty() {
        return 0.0;
    }

    let terms: BTreeSet<&String> = counts_a.keys().chain(counts_b.keys()).collect();
    let mut dot = 0.0;
    let mut norm_a = 0.0;
    let mut norm_b = 0.0;
    for term in terms {
        let df = f64::from(counts_a.contains_key(term) as u8 + counts_b.contains_key(term) as u8);
        // Smoothed IDF over a two-document corpus.
        let idf = ((1.0 + 2.0) / (1.0 + df)).ln() + 1.0;
        let wa = f64::from(counts_a.get(term).copied().unwrap_or(0)) * idf;
        let wb = f64::from(counts_b.get(term).copied().unwrap_or(0)) * idf;
        dot += wa * wb;
        norm_a += wa * wa;
        norm_b += wb * wb;
    }
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }
    (dot / (norm_a * norm_b).sqrt()).clamp(0.0, 1.0)
}

/// Raw term frequencies of stop-word-filtered unigrams and bigrams.
fn term_counts(text: &str, vocab: &Vocabulary) -> HashMap<String, u32> {
    let retained = retained_tokens(text, vocab);
    let mut counts = HashMap::new();
    for token in &retained {
        *counts.entry(token.clone()).or_insert(0) += 1;
    }
    for pair in retained.windows(2) {
        *counts.entry(format!("{} {}", pair[0], pair[1])).or_insert(0) += 1;
    }
    counts
}
