//! Document management module.
//!
//! A **document** is the core data type of the engine - one indexed corpus
//! item holding an id, an embedding vector, extracted keywords, and the
//! original title. Documents are written once during bootstrap and then
//! only read (collections are append-only; there is no update or delete).
//!
//! Validation happens at both ends of the store: [`validate_document`] runs
//! before anything is written, [`validate_payload`] runs again on every
//! payload read back by a query, so a schema violation can never silently
//! cross the write/read boundary.

pub mod types;

pub use types::{Document, DocumentPayload, ScoredDocument};

use crate::error::{NewsRecError, ValidationError};
use crate::store::schema::{MAX_KEYWORDS, MAX_KEYWORD_LENGTH, MAX_TITLE_SIZE};

/// Validates a [`Document`] before storage.
///
/// # Rules
///
/// - `vector`: length must equal the collection dimension; no NaN components
/// - `title`: non-empty, max 100 KB
/// - `keywords`: max 64, each non-empty and max 100 chars
pub(crate) fn validate_document(
    doc: &Document,
    collection_dimension: usize,
) -> Result<(), NewsRecError> {
    if doc.vector.len() != collection_dimension {
        return Err(
            ValidationError::dimension_mismatch(collection_dimension, doc.vector.len()).into(),
        );
    }

    if doc.vector.iter().any(|v| v.is_nan()) {
        return Err(ValidationError::invalid_field("vector", "contains NaN").into());
    }

    validate_payload(&doc.keywords, &doc.title)
}

/// Validates the payload schema shared by the write and query paths.
pub(crate) fn validate_payload(keywords: &[String], title: &str) -> Result<(), NewsRecError> {
    if title.is_empty() {
        return Err(ValidationError::required_field("title").into());
    }

    if title.len() > MAX_TITLE_SIZE {
        return Err(ValidationError::content_too_large(title.len(), MAX_TITLE_SIZE).into());
    }

    if keywords.len() > MAX_KEYWORDS {
        return Err(ValidationError::too_many_items("keywords", keywords.len(), MAX_KEYWORDS).into());
    }

    for (i, kw) in keywords.iter().enumerate() {
        if kw.is_empty() {
            return Err(ValidationError::invalid_field(
                "keywords",
                format!("keyword at index {} is empty", i),
            )
            .into());
        }
        let kw_chars = kw.chars().count();
        if kw_chars > MAX_KEYWORD_LENGTH {
            return Err(ValidationError::invalid_field(
                "keywords",
                format!(
                    "keyword at index {} exceeds max length of {} chars (got {})",
                    i, MAX_KEYWORD_LENGTH, kw_chars
                ),
            )
            .into());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_document() -> Document {
        Document::new(
            0u64,
            vec![0.1; 8],
            vec!["python".into(), "cache".into()],
            "Faster Python through lazy imports",
        )
    }

    #[test]
    fn test_valid_document_passes() {
        assert!(validate_document(&valid_document(), 8).is_ok());
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let doc = valid_document();
        let err = validate_document(&doc, 300).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_nan_vector_rejected() {
        let mut doc = valid_document();
        doc.vector[3] = f32::NAN;
        let err = validate_document(&doc, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_title_rejected() {
        let mut doc = valid_document();
        doc.title = String::new();
        let err = validate_document(&doc, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_title_too_large_rejected() {
        let mut doc = valid_document();
        doc.title = "x".repeat(MAX_TITLE_SIZE + 1);
        let err = validate_document(&doc, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_keywords_allowed() {
        let mut doc = valid_document();
        doc.keywords.clear();
        assert!(validate_document(&doc, 8).is_ok());
    }

    #[test]
    fn test_too_many_keywords_rejected() {
        let mut doc = valid_document();
        doc.keywords = (0..MAX_KEYWORDS + 1).map(|i| format!("kw-{}", i)).collect();
        let err = validate_document(&doc, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_empty_keyword_rejected() {
        let mut doc = valid_document();
        doc.keywords = vec![String::new()];
        let err = validate_document(&doc, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_keyword_too_long_rejected() {
        let mut doc = valid_document();
        doc.keywords = vec!["x".repeat(MAX_KEYWORD_LENGTH + 1)];
        let err = validate_document(&doc, 8).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_keyword_length_counts_chars_not_bytes() {
        // Multibyte keyword at the char limit: over the limit in bytes.
        let mut doc = valid_document();
        doc.keywords = vec!["é".repeat(MAX_KEYWORD_LENGTH)];
        assert!(validate_document(&doc, 8).is_ok());

        doc.keywords = vec!["é".repeat(MAX_KEYWORD_LENGTH + 1)];
        assert!(validate_document(&doc, 8).is_err());
    }
}
