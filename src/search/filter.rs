//! Keyword filtering for similarity queries.
//!
//! [`KeywordFilter`] carries the "should" clauses of a query: a document
//! matches when it shares at least one keyword with the filter. Matching is
//! advisory rather than exclusive - matching documents are ranked ahead of
//! non-matching ones, but non-matching documents still fill the remaining
//! result slots. An empty filter matches nothing, which degrades the query
//! to pure vector similarity.

/// Filter criteria for similarity queries.
///
/// Built by the recommender from a user profile's top keywords. Keywords are
/// compared by exact string equality against each document's stored keyword
/// list, so both sides must come from the same normalizer.
///
/// # Example
///
/// ```rust
/// use newsrec::KeywordFilter;
///
/// let filter = KeywordFilter::new(vec!["python".into(), "cache".into()]);
/// assert!(filter.matches(&["cache".into(), "import".into()]));
/// assert!(!filter.matches(&["rust".into()]));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct KeywordFilter {
    /// Keywords a document should share at least one of.
    pub keywords: Vec<String>,
}

impl KeywordFilter {
    /// Creates a filter from a keyword list.
    pub fn new(keywords: Vec<String>) -> Self {
        Self { keywords }
    }

    /// Returns `true` when the filter has no keywords.
    ///
    /// An empty filter matches no document; queries treat it as "no filter"
    /// and rank by similarity alone.
    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// Returns `true` when `doc_keywords` shares at least one keyword with
    /// the filter.
    pub fn matches(&self, doc_keywords: &[String]) -> bool {
        self.keywords.iter().any(|kw| doc_keywords.contains(kw))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_on_single_shared_keyword() {
        let filter = KeywordFilter::new(vec!["python".into(), "cache".into()]);
        assert!(filter.matches(&["cache".into()]));
        assert!(filter.matches(&["python".into(), "cache".into()]));
    }

    #[test]
    fn test_no_shared_keyword_does_not_match() {
        let filter = KeywordFilter::new(vec!["python".into()]);
        assert!(!filter.matches(&["rust".into(), "compiler".into()]));
    }

    #[test]
    fn test_empty_filter_matches_nothing() {
        let filter = KeywordFilter::default();
        assert!(filter.is_empty());
        assert!(!filter.matches(&["python".into()]));
    }

    #[test]
    fn test_empty_document_keywords_never_match() {
        let filter = KeywordFilter::new(vec!["python".into()]);
        assert!(!filter.matches(&[]));
    }

    #[test]
    fn test_exact_string_equality() {
        let filter = KeywordFilter::new(vec!["Python".into()]);
        assert!(!filter.matches(&["python".into()]));
    }
}
