//! Keyword extraction from titles.
//!
//! A [`KeywordNormalizer`] turns a raw title into the keyword list stored
//! alongside its embedding and matched by query filters. Filter matching is
//! exact string equality, so profiles and documents must be normalized by
//! the *same* normalizer - the engine enforces this by injecting one
//! normalizer used for both paths.
//!
//! The built-in [`StopwordNormalizer`] is intentionally simple: lowercase,
//! split on non-alphanumeric boundaries, drop noise tokens. Callers needing
//! lemmatization or language-aware tagging can plug in their own
//! implementation.

use std::collections::HashSet;

/// Extracts keywords from a title.
///
/// Implementations must be deterministic: the same title always yields the
/// same keyword list, in the same order. Order of first appearance matters
/// downstream - it breaks frequency ties when ranking profile keywords.
pub trait KeywordNormalizer: Send + Sync {
    /// Returns the keywords of `title`, in order of appearance.
    ///
    /// Repeated words are repeated in the output; frequency counting
    /// happens downstream.
    fn normalize(&self, title: &str) -> Vec<String>;
}

/// Default English stop words (common words from NLTK/sklearn lists).
const ENGLISH_STOP_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // pronouns
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves",
    "you", "your", "yours", "yourself", "yourselves",
    "he", "him", "his", "himself", "she", "her", "hers", "herself",
    "it", "its", "itself", "they", "them", "their", "theirs", "themselves",
    // question words
    "what", "which", "who", "whom", "whose", "why", "when", "where", "how",
    // prepositions
    "about", "above", "across", "after", "against", "along", "among", "around",
    "at", "before", "behind", "below", "beneath", "beside", "between", "beyond",
    "by", "down", "during", "for", "from", "in", "inside", "into", "near",
    "of", "off", "on", "onto", "out", "outside", "over", "through", "throughout",
    "to", "toward", "under", "underneath", "until", "up", "upon",
    "with", "within", "without",
    // conjunctions
    "and", "as", "because", "but", "if", "or", "since", "so",
    "than", "that", "though", "unless", "while",
    // auxiliary verbs
    "am", "is", "are", "was", "were", "be", "been", "being",
    "have", "has", "had", "having", "do", "does", "did", "doing",
    "would", "should", "could", "ought", "can", "may", "might", "must", "will", "shall",
    // determiners and adverbs
    "all", "any", "both", "each", "every", "few", "more", "most", "much",
    "neither", "no", "none", "not", "one", "other", "same", "several",
    "some", "such", "very", "too", "only", "own", "then", "there",
    "these", "this", "those", "just", "now", "here",
    // common verbs and fillers
    "again", "also", "another", "back", "even", "ever",
    "get", "give", "go", "got", "made", "make", "say", "see", "take", "way",
];

/// Stopword-based keyword normalizer.
///
/// Pipeline: lowercase, split on non-alphanumeric characters, then drop
/// tokens that contain a digit, are a single character, or are stop words.
/// Surviving tokens are returned in order of appearance, duplicates kept.
///
/// # Example
///
/// ```rust
/// use newsrec::{KeywordNormalizer, StopwordNormalizer};
///
/// let normalizer = StopwordNormalizer::english();
/// assert_eq!(
///     normalizer.normalize("Show HN: A faster Python import cache"),
///     vec!["show", "hn", "faster", "python", "import", "cache"]
/// );
/// ```
#[derive(Debug, Clone)]
pub struct StopwordNormalizer {
    /// Stop words, stored lowercase for case-insensitive matching.
    stop_words: HashSet<String>,
}

impl StopwordNormalizer {
    /// Creates a normalizer with a custom stop word set.
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let stop_words = words
            .into_iter()
            .map(|s| s.as_ref().to_lowercase())
            .collect();
        Self { stop_words }
    }

    /// Creates a normalizer with the default English stop word list.
    #[must_use]
    pub fn english() -> Self {
        Self::new(ENGLISH_STOP_WORDS)
    }

    fn keep(&self, token: &str) -> bool {
        if token.chars().count() < 2 {
            return false;
        }
        if token.chars().any(|c| c.is_ascii_digit()) {
            return false;
        }
        !self.stop_words.contains(token)
    }
}

impl Default for StopwordNormalizer {
    fn default() -> Self {
        Self::english()
    }
}

impl KeywordNormalizer for StopwordNormalizer {
    fn normalize(&self, title: &str) -> Vec<String> {
        title
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty() && self.keep(token))
            .map(str::to_string)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_splits() {
        let n = StopwordNormalizer::english();
        assert_eq!(
            n.normalize("Rust Compiler Internals"),
            vec!["rust", "compiler", "internals"]
        );
    }

    #[test]
    fn test_drops_stop_words() {
        let n = StopwordNormalizer::english();
        assert_eq!(
            n.normalize("The cat is on the mat"),
            vec!["cat", "mat"]
        );
    }

    #[test]
    fn test_drops_tokens_with_digits() {
        let n = StopwordNormalizer::english();
        assert_eq!(n.normalize("Python 3.12 release"), vec!["python", "release"]);
    }

    #[test]
    fn test_drops_single_char_tokens() {
        let n = StopwordNormalizer::english();
        assert_eq!(n.normalize("A B grade GPU"), vec!["grade", "gpu"]);
    }

    #[test]
    fn test_splits_on_punctuation() {
        let n = StopwordNormalizer::english();
        assert_eq!(
            n.normalize("Show HN: SQLite-backed queues, reconsidered"),
            vec!["show", "hn", "sqlite", "backed", "queues", "reconsidered"]
        );
    }

    #[test]
    fn test_keeps_duplicates_in_order() {
        let n = StopwordNormalizer::english();
        assert_eq!(
            n.normalize("cache rules everything: cache invalidation"),
            vec!["cache", "rules", "everything", "cache", "invalidation"]
        );
    }

    #[test]
    fn test_empty_and_all_noise_titles() {
        let n = StopwordNormalizer::english();
        assert!(n.normalize("").is_empty());
        assert!(n.normalize("1 2 3 !!!").is_empty());
    }

    #[test]
    fn test_deterministic() {
        let n = StopwordNormalizer::english();
        let title = "Why Rust compilers are slow";
        assert_eq!(n.normalize(title), n.normalize(title));
    }
}
