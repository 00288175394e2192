//! Type definitions for indexed documents.

use serde::{Deserialize, Serialize};

use crate::types::{DocId, Embedding};

/// One indexed item: id, vector, keyword payload, title.
///
/// The vector length must equal the owning collection's embedding dimension;
/// this is checked on upsert. Keywords may be empty (the document then never
/// matches a keyword filter) and may contain source duplicates - filtering
/// treats them as a membership set.
#[derive(Clone, Debug, PartialEq)]
pub struct Document {
    /// Identifier: 0-based index into the ingestion batch.
    pub id: DocId,

    /// Embedding vector.
    pub vector: Embedding,

    /// Normalized keywords extracted from the title.
    pub keywords: Vec<String>,

    /// Original title text, stored verbatim for display.
    pub title: String,
}

impl Document {
    /// Creates a document from its batch index and parts.
    pub fn new(
        id: impl Into<DocId>,
        vector: Embedding,
        keywords: Vec<String>,
        title: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            vector,
            keywords,
            title: title.into(),
        }
    }

    /// Splits the document into its payload (stored in the documents table)
    /// and its vector (stored in the embeddings table).
    pub(crate) fn into_parts(self) -> (DocId, Embedding, DocumentPayload) {
        (
            self.id,
            self.vector,
            DocumentPayload {
                keywords: self.keywords,
                title: self.title,
            },
        )
    }
}

/// The externally visible payload schema of a stored document.
///
/// This struct IS the schema: it is serialized with bincode on write and
/// deserialized and re-validated on every query, so writer and reader can
/// never drift apart on field names or shape.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DocumentPayload {
    /// Normalized keywords used by the "should" filter.
    pub keywords: Vec<String>,

    /// Original title, verbatim.
    pub title: String,
}

/// One ranked query result: document id, similarity score, and payload.
///
/// Scores are 1.0 - cosine distance under the collection's fixed metric,
/// so higher is more similar; results are ordered by descending score
/// within each filter tier.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredDocument {
    /// Identifier of the matched document.
    pub id: DocId,

    /// Similarity score (higher is closer).
    pub score: f32,

    /// Original title.
    pub title: String,

    /// Stored keywords.
    pub keywords: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_into_parts() {
        let doc = Document::new(3u64, vec![0.1, 0.2], vec!["cache".into()], "a title");
        let (id, vector, payload) = doc.into_parts();
        assert_eq!(id, DocId::new(3));
        assert_eq!(vector, vec![0.1, 0.2]);
        assert_eq!(payload.keywords, vec!["cache".to_string()]);
        assert_eq!(payload.title, "a title");
    }

    #[test]
    fn test_payload_bincode_roundtrip() {
        let payload = DocumentPayload {
            keywords: vec!["python".into(), "cache".into()],
            title: "Faster Python through lazy imports".into(),
        };
        let bytes = bincode::serialize(&payload).unwrap();
        let restored: DocumentPayload = bincode::deserialize(&bytes).unwrap();
        assert_eq!(payload, restored);
    }
}
