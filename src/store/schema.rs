//! Database schema definitions and versioning.
//!
//! This module defines the table structure for the redb storage engine.
//! All table definitions are compile-time constants to ensure consistency.
//!
//! # Schema Versioning
//!
//! The schema version is stored in the metadata table. When opening an
//! existing store, we check the version and fail if it doesn't match.
//! Migration support will be added in a future release.
//!
//! # Table Layout
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │ METADATA_TABLE                                               │
//! │   Key: &str                                                  │
//! │   Value: &[u8] (bincode)                                     │
//! │   Entries: "store_metadata" -> StoreMetadata                 │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ COLLECTIONS_TABLE                                            │
//! │   Key: &str (collection name)                                │
//! │   Value: &[u8] (bincode-serialized CollectionRecord)         │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ DOCUMENTS_TABLE                                              │
//! │   Key: (&str, u64) (collection name, document id)            │
//! │   Value: &[u8] (bincode-serialized DocumentPayload)          │
//! └─────────────────────────────────────────────────────────────┘
//!
//! ┌─────────────────────────────────────────────────────────────┐
//! │ EMBEDDINGS_TABLE                                             │
//! │   Key: (&str, u64) (collection name, document id)            │
//! │   Value: &[u8] (raw little-endian f32 bytes)                 │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Tuple keys sort by collection name first, so all rows of one
//! collection form a contiguous range scanned with
//! `(name, 0)..=(name, u64::MAX)`.

use redb::TableDefinition;
use serde::{Deserialize, Serialize};

use crate::config::DistanceMetric;
use crate::error::{Result, StorageError};
use crate::types::Timestamp;

/// Current schema version.
///
/// Increment this when making breaking changes to the schema.
/// The store will refuse to open if versions don't match.
pub const SCHEMA_VERSION: u32 = 1;

/// Maximum title size in bytes (100 KB).
pub const MAX_TITLE_SIZE: usize = 100 * 1024;

/// Maximum number of keywords per document.
pub const MAX_KEYWORDS: usize = 64;

/// Maximum length of a single keyword, in chars.
pub const MAX_KEYWORD_LENGTH: usize = 100;

/// Key for the store metadata entry in [`METADATA_TABLE`].
pub const STORE_METADATA_KEY: &str = "store_metadata";

// ============================================================================
// Table Definitions
// ============================================================================

/// Metadata table for store-level information.
///
/// Stores schema version and creation time. Key is a string identifier,
/// value is serialized data.
pub const METADATA_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("metadata");

/// Collections table.
///
/// Key: collection name
/// Value: bincode-serialized CollectionRecord struct
pub const COLLECTIONS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("collections");

/// Documents table.
///
/// Key: (collection name, document id)
/// Value: bincode-serialized DocumentPayload struct (without embedding)
pub const DOCUMENTS_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("documents");

/// Embeddings table.
///
/// Stored separately from documents to keep the payload table compact.
/// Key: (collection name, document id)
/// Value: raw little-endian f32 bytes (dimension * 4 bytes)
pub const EMBEDDINGS_TABLE: TableDefinition<(&str, u64), &[u8]> =
    TableDefinition::new("embeddings");

// ============================================================================
// Store Metadata
// ============================================================================

/// Store metadata persisted in the metadata table.
///
/// Serialized with bincode and stored under [`STORE_METADATA_KEY`].
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreMetadata {
    /// Schema version for compatibility checking.
    pub schema_version: u32,

    /// Timestamp when the store was created.
    pub created_at: Timestamp,

    /// Last time the store was opened (updated on each open).
    pub last_opened_at: Timestamp,
}

impl StoreMetadata {
    /// Creates new metadata for a fresh store.
    pub fn new() -> Self {
        let now = Timestamp::now();
        Self {
            schema_version: SCHEMA_VERSION,
            created_at: now,
            last_opened_at: now,
        }
    }

    /// Updates the last_opened_at timestamp.
    pub fn touch(&mut self) {
        self.last_opened_at = Timestamp::now();
    }

    /// Checks if this metadata is compatible with the current schema.
    pub fn is_compatible(&self) -> bool {
        self.schema_version == SCHEMA_VERSION
    }
}

impl Default for StoreMetadata {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Collection Record
// ============================================================================

/// Per-collection configuration persisted in the collections table.
///
/// The dimension and metric are fixed at creation; every later upsert
/// and query is validated against them.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CollectionRecord {
    /// Collection name (also the table key).
    pub name: String,

    /// Embedding dimension all vectors in this collection must have.
    pub dimension: usize,

    /// Distance metric used for similarity search.
    pub metric: DistanceMetric,

    /// Timestamp when the collection was created.
    pub created_at: Timestamp,
}

impl CollectionRecord {
    /// Creates a record for a new collection.
    pub fn new(name: impl Into<String>, dimension: usize, metric: DistanceMetric) -> Self {
        Self {
            name: name.into(),
            dimension,
            metric,
            created_at: Timestamp::now(),
        }
    }
}

// ============================================================================
// Embedding Encoding Helpers
// ============================================================================

/// Encodes an embedding as raw little-endian f32 bytes.
#[inline]
pub fn encode_embedding(embedding: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(embedding.len() * 4);
    for v in embedding {
        bytes.extend_from_slice(&v.to_le_bytes());
    }
    bytes
}

/// Decodes raw little-endian f32 bytes back into an embedding.
///
/// Fails with [`StorageError::Corrupted`] when the byte length is not a
/// multiple of 4.
#[inline]
pub fn decode_embedding(bytes: &[u8]) -> Result<Vec<f32>> {
    if bytes.len() % 4 != 0 {
        return Err(StorageError::corrupted(format!(
            "Embedding byte length {} is not a multiple of 4",
            bytes.len()
        ))
        .into());
    }

    Ok(bytes
        .chunks_exact(4)
        .map(|chunk| {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(chunk);
            f32::from_le_bytes(buf)
        })
        .collect())
}
