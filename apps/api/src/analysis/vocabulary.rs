//! Reference skill vocabulary, stop-word list, and the pluggable skill matcher.
//!
//! Both lists are process-wide read-only state: built once at startup and
//! shared (`Arc`) across concurrent analysis calls.

use std::collections::BTreeSet;
use std::collections::HashSet;

use crate::analysis::tokenize::tokenize;

/// Curated reference vocabulary of skill names, stored case-normalized.
/// Extraction matches against this list; skills-section capture can add
/// names outside it.
const SKILL_VOCABULARY: &[&str] = &[
    // Programming languages
    "python",
    "java",
    "javascript",
    "typescript",
    "c++",
    "c#",
    "ruby",
    "go",
    "rust",
    "swift",
    "kotlin",
    "php",
    "scala",
    "perl",
    "r",
    "matlab",
    // Web technologies
    "html",
    "css",
    "react",
    "angular",
    "vue.js",
    "node.js",
    "express",
    "django",
    "flask",
    "spring",
    "asp.net",
    "jquery",
    "bootstrap",
    "sass",
    "graphql",
    "rest",
    // Databases
    "sql",
    "mysql",
    "postgresql",
    "mongodb",
    "oracle",
    "sqlite",
    "redis",
    "cassandra",
    "elasticsearch",
    "dynamodb",
    // Cloud & DevOps
    "aws",
    "azure",
    "gcp",
    "docker",
    "kubernetes",
    "jenkins",
    "ci/cd",
    "git",
    "github",
    "gitlab",
    "terraform",
    "ansible",
    "chef",
    "puppet",
    "linux",
    "unix",
    "bash",
    // Data science & ML
    "machine learning",
    "deep learning",
    "tensorflow",
    "pytorch",
    "keras",
    "pandas",
    "numpy",
    "scikit-learn",
    "data analysis",
    "statistics",
    "natural language processing",
    "computer vision",
    "spark",
    "hadoop",
    "kafka",
    // Process & soft skills
    "agile",
    "scrum",
    "jira",
    "confluence",
    "project management",
    "leadership",
    "communication",
    "teamwork",
    "problem solving",
    "analytical thinking",
];

const STOPWORDS: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "few",
    "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "me", "more", "most", "my", "myself", "no", "nor", "not", "now", "of",
    "off", "on", "once", "only", "or", "other", "our", "ours", "ourselves", "out", "over", "own",
    "same", "she", "should", "so", "some", "such", "than", "that", "the", "their", "theirs",
    "them", "themselves", "then", "there", "these", "they", "this", "those", "through", "to",
    "too", "under", "until", "up", "very", "was", "we", "were", "what", "when", "where", "which",
    "while", "who", "whom", "why", "will", "with", "would", "you", "your", "yours", "yourself",
    "yourselves",
];

/// Immutable lookup structure over the skill vocabulary and stop words.
pub struct Vocabulary {
    skills: Vec<&'static str>,
    stopwords: HashSet<&'static str>,
}

impl Vocabulary {
    /// Builds the vocabulary from the compiled-in reference lists.
    pub fn builtin() -> Self {
        Self {
            skills: SKILL_VOCABULARY.to_vec(),
            stopwords: STOPWORDS.iter().copied().collect(),
        }
    }

    pub fn skills(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.skills.iter().copied()
    }

    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(token)
    }
}

impl Default for Vocabulary {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Matching strategy for skill names. Pluggable so the vocabulary can grow
/// spelling variants and abbreviations without touching scoring logic.
pub trait SkillMatcher: Send + Sync {
    /// True when two case-normalized skill names should count as the same skill.
    fn matches(&self, a: &str, b: &str) -> bool;
}

/// Exact-normalized match with an edit-distance fallback for near-misses.
/// Short names ("go", "c#", "sql") must match exactly; fuzzing them would
/// conflate unrelated skills.
pub struct FuzzySkillMatcher {
    pub min_similarity: f64,
}

impl FuzzySkillMatcher {
    const FUZZY_MIN_LEN: usize = 4;
}

impl Default for FuzzySkillMatcher {
    fn default() -> Self {
        Self {
            min_similarity: 0.8,
        }
    }
}

impl SkillMatcher for FuzzySkillMatcher {
    fn matches(&self, a: &str, b: &str) -> bool {
        if a == b {
            return true;
        }
        if a.len() < Self::FUZZY_MIN_LEN || b.len() < Self::FUZZY_MIN_LEN {
            return false;
        }
        strsim::normalized_levenshtein(a, b) >= self.min_similarity
    }
}

/// Scans lowercased text for vocabulary skills: word-boundary phrase
/// containment first, then a fuzzy pass over single tokens to catch
/// spelling variants.
pub fn detect_skills(
    text: &str,
    vocab: &Vocabulary,
    matcher: &dyn SkillMatcher,
) -> BTreeSet<String> {
    let text_lower = text.to_lowercase();
    let tokens = tokenize(&text_lower);
    let mut found = BTreeSet::new();

    for skill in vocab.skills() {
        if contains_term(&text_lower, skill) {
            found.insert(skill.to_string());
            continue;
        }
        // Fuzzy fallback only for single-word names long enough to carry a typo.
        if !skill.contains(' ') && skill.len() >= 5 {
            if tokens.iter().any(|t| matcher.matches(t, skill)) {
                found.insert(skill.to_string());
            }
        }
    }
    found
}

/// Word-boundary containment check for a (possibly multi-word) term in
/// already-lowercased text. Prevents "r" from matching inside "rust" or
/// "java" inside "javascript".
pub fn contains_term(text_lower: &str, term: &str) -> bool {
    if term.is_empty() {
        return false;
    }
    let mut start = 0;
    while let Some(pos) = text_lower[start..].find(term) {
        let begin = start + pos;
        let end = begin + term.len();
        let before_ok = text_lower[..begin]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = text_lower[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        if before_ok && after_ok {
            return true;
        }
        start = end;
    }
    false
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '+' || c == '#'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_term_word_boundaries() {
        assert!(contains_term("proficient in rust and go", "rust"));
        assert!(contains_term("proficient in rust and go", "go"));
        assert!(!contains_term("javascript developer", "java"));
        assert!(!contains_term("hadoop pipelines", "go"));
    }

    #[test]
    fn test_contains_term_symbol_heavy_names() {
        assert!(contains_term("worked with c++ and c#.", "c++"));
        assert!(contains_term("worked with c++ and c#.", "c#"));
        assert!(!contains_term("worked with c++ and c#.", "c"));
    }

    #[test]
    fn test_contains_term_multi_word() {
        assert!(contains_term(
            "background in machine learning systems",
            "machine learning"
        ));
        assert!(!contains_term("machined learnings", "machine learning"));
    }

    #[test]
    fn test_detect_skills_exact() {
        let vocab = Vocabulary::builtin();
        let matcher = FuzzySkillMatcher::default();
        let found = detect_skills("Built APIs in Python with PostgreSQL and Docker", &vocab, &matcher);
        assert!(found.contains("python"));
        assert!(found.contains("postgresql"));
        assert!(found.contains("docker"));
        assert!(!found.contains("java"));
    }

    #[test]
    fn test_detect_skills_fuzzy_typo() {
        let vocab = Vocabulary::builtin();
        let matcher = FuzzySkillMatcher::default();
        let found = detect_skills("deployed workloads to kubernets clusters", &vocab, &matcher);
        assert!(found.contains("kubernetes"));
    }

    #[test]
    fn test_matcher_exact_for_short_names() {
        let matcher = FuzzySkillMatcher::default();
        assert!(matcher.matches("go", "go"));
        assert!(!matcher.matches("go", "got"));
        assert!(!matcher.matches("sql", "xql"));
    }

    #[test]
    fn test_matcher_fuzzy_above_threshold() {
        let matcher = FuzzySkillMatcher::default();
        assert!(matcher.matches("pyton", "python"));
        assert!(!matcher.matches("react", "redis"));
    }

    #[test]
    fn test_stopword_lookup() {
        let vocab = Vocabulary::builtin();
        assert!(vocab.is_stopword("the"));
        assert!(!vocab.is_stopword("engineer"));
    }
}
