//! Shared tokenization and keyword pipeline used by both fact extractors
//! and the similarity estimator.

use std::collections::BTreeSet;

use crate::analysis::vocabulary::Vocabulary;

/// Tokens shorter than this never become keywords.
pub const MIN_TOKEN_LEN: usize = 3;

/// Splits text into lowercase tokens. '+', '#', '.', and '/' stay inside
/// tokens so names like "c++", "c#", "node.js", and "ci/cd" survive intact.
pub fn tokenize(text: &str) -> Vec<String> {
    text.split(|c: char| !(c.is_alphanumeric() || matches!(c, '+' | '#' | '.' | '/')))
        .map(|raw| {
            raw.trim_matches(|c: char| matches!(c, '.' | '/'))
                .to_lowercase()
        })
        .filter(|t| !t.is_empty())
        .collect()
}

/// Tokens that survive the keyword filter: long enough, not a stop word,
/// not a bare number.
pub fn retained_tokens(text: &str, vocab: &Vocabulary) -> Vec<String> {
    tokenize(text)
        .into_iter()
        .filter(|t| {
            t.len() >= MIN_TOKEN_LEN
                && !vocab.is_stopword(t)
                && !t.chars().all(|c| c.is_ascii_digit())
        })
        .collect()
}

/// Stop-word-filtered unigram + bigram keyword set, case-normalized and
/// deduplicated. Bigrams are formed over the retained token sequence, the
/// same way the similarity estimator builds its term space.
pub fn extract_keywords(text: &str, vocab: &Vocabulary) -> BTreeSet<String> {
    let retained = retained_tokens(text, vocab);
    let mut keywords: BTreeSet<String> = retained.iter().cloned().collect();
    for pair in retained.windows(2) {
        keywords.insert(format!("{} {}", pair[0], pair[1]));
    }
    keywords
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_lowercases_and_splits() {
        let tokens = tokenize("Senior Rust Engineer, 2020");
        assert_eq!(tokens, vec!["senior", "rust", "engineer", "2020"]);
    }

    #[test]
    fn test_tokenize_keeps_symbol_names() {
        let tokens = tokenize("C++ / C# and Node.js (CI/CD)");
        assert!(tokens.contains(&"c++".to_string()));
        assert!(tokens.contains(&"c#".to_string()));
        assert!(tokens.contains(&"node.js".to_string()));
        assert!(tokens.contains(&"ci/cd".to_string()));
    }

    #[test]
    fn test_tokenize_strips_trailing_punctuation() {
        let tokens = tokenize("shipped features.");
        assert_eq!(tokens, vec!["shipped", "features"]);
    }

    #[test]
    fn test_retained_tokens_filters_stopwords_and_numbers() {
        let vocab = Vocabulary::builtin();
        let retained = retained_tokens("the team shipped 300 releases", &vocab);
        assert_eq!(retained, vec!["team", "shipped", "releases"]);
    }

    #[test]
    fn test_extract_keywords_includes_bigrams() {
        let vocab = Vocabulary::builtin();
        let keywords = extract_keywords("distributed systems engineering", &vocab);
        assert!(keywords.contains("distributed"));
        assert!(keywords.contains("distributed systems"));
        assert!(keywords.contains("systems engineering"));
    }

    #[test]
    fn test_extract_keywords_deduplicates() {
        let vocab = Vocabulary::builtin();
        let keywords = extract_keywords("rust rust rust", &vocab);
        assert!(keywords.contains("rust"));
        assert!(keywords.contains("rust rust"));
        assert_eq!(keywords.len(), 2);
    }
}
