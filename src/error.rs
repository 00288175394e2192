//! Error types for newsrec.
//!
//! newsrec uses a hierarchical error system:
//! - `NewsRecError` is the top-level error returned by all public APIs
//! - Specific error types (`StorageError`, `ValidationError`) provide detail
//!
//! # Error Handling Pattern
//! ```rust,ignore
//! use newsrec::{NewsRec, Config, Result};
//!
//! fn example(engine: NewsRec) -> Result<()> {
//!     // ... operations that may fail ...
//!     engine.close()?;
//!     Ok(())
//! }
//! ```
//!
//! The only fail-open site in the crate is `DocumentStore::is_empty`, which
//! maps `StorageError::Unavailable` to "empty" so an unreadable collection
//! triggers re-bootstrap instead of aborting. Every other failure propagates.

use thiserror::Error;

/// Result type alias for newsrec operations.
pub type Result<T> = std::result::Result<T, NewsRecError>;

/// Top-level error enum for all newsrec operations.
///
/// This is the only error type returned by public APIs.
/// Use pattern matching to handle specific error cases.
#[derive(Debug, Error)]
pub enum NewsRecError {
    /// Storage layer error (I/O, corruption, transactions).
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Input validation error.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Configuration error.
    #[error("Configuration error: {reason}")]
    Config {
        /// Description of what's wrong with the configuration.
        reason: String,
    },

    /// Requested entity not found.
    #[error("{0}")]
    NotFound(#[from] NotFoundError),

    /// General I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Embedding generation/validation error.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector index error (HNSW operations).
    #[error("Vector index error: {0}")]
    Vector(String),

    /// Title source (scraper) error.
    #[error("Title source error: {0}")]
    Source(String),
}

impl NewsRecError {
    /// Creates a configuration error with the given reason.
    pub fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Creates an embedding error with the given message.
    pub fn embedding(msg: impl Into<String>) -> Self {
        Self::Embedding(msg.into())
    }

    /// Creates a vector index error with the given message.
    pub fn vector(msg: impl Into<String>) -> Self {
        Self::Vector(msg.into())
    }

    /// Creates a title source error with the given message.
    pub fn source(msg: impl Into<String>) -> Self {
        Self::Source(msg.into())
    }

    /// Returns true if this is a "not found" error.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Returns true if this is a validation error.
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Returns true if this is a storage error.
    pub fn is_storage(&self) -> bool {
        matches!(self, Self::Storage(_))
    }

    /// Returns true if this is a vector index error.
    pub fn is_vector(&self) -> bool {
        matches!(self, Self::Vector(_))
    }

    /// Returns true if this is an embedding error.
    pub fn is_embedding(&self) -> bool {
        matches!(self, Self::Embedding(_))
    }
}

/// Storage-related errors.
///
/// These errors indicate problems with the underlying storage layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database file or data is corrupted.
    #[error("Store corrupted: {0}")]
    Corrupted(String),

    /// Backing store cannot be read at all.
    ///
    /// Consumed fail-open by `DocumentStore::is_empty` (treated as an empty
    /// collection, forcing re-bootstrap); propagated everywhere else.
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Database is locked by another process.
    #[error("Store is locked by another writer")]
    Locked,

    /// Transaction failed (commit, rollback, etc.).
    #[error("Transaction failed: {0}")]
    Transaction(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Error from the redb storage engine.
    #[error("Storage engine error: {0}")]
    Redb(String),

    /// Store schema version doesn't match expected version.
    #[error("Schema version mismatch: expected {expected}, found {found}")]
    SchemaVersionMismatch {
        /// Expected schema version.
        expected: u32,
        /// Actual schema version found in the store.
        found: u32,
    },
}

impl StorageError {
    /// Creates a corruption error with the given message.
    pub fn corrupted(msg: impl Into<String>) -> Self {
        Self::Corrupted(msg.into())
    }

    /// Creates an unavailable-store error with the given message.
    pub fn unavailable(msg: impl Into<String>) -> Self {
        Self::Unavailable(msg.into())
    }

    /// Creates a transaction error with the given message.
    pub fn transaction(msg: impl Into<String>) -> Self {
        Self::Transaction(msg.into())
    }

    /// Creates a serialization error with the given message.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Creates a redb error with the given message.
    pub fn redb(msg: impl Into<String>) -> Self {
        Self::Redb(msg.into())
    }
}

// Conversions from redb error types
impl From<redb::Error> for StorageError {
    fn from(err: redb::Error) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::DatabaseError> for StorageError {
    fn from(err: redb::DatabaseError) -> Self {
        StorageError::Redb(err.to_string())
    }
}

impl From<redb::TransactionError> for StorageError {
    fn from(err: redb::TransactionError) -> Self {
        StorageError::Transaction(err.to_string())
    }
}

impl From<redb::CommitError> for StorageError {
    fn from(err: redb::CommitError) -> Self {
        StorageError::Transaction(format!("Commit failed: {}", err))
    }
}

impl From<redb::TableError> for StorageError {
    fn from(err: redb::TableError) -> Self {
        StorageError::Redb(format!("Table error: {}", err))
    }
}

impl From<redb::StorageError> for StorageError {
    fn from(err: redb::StorageError) -> Self {
        StorageError::Redb(format!("Storage error: {}", err))
    }
}

// Convert bincode errors to StorageError
impl From<bincode::Error> for StorageError {
    fn from(err: bincode::Error) -> Self {
        StorageError::Serialization(err.to_string())
    }
}

// Also allow direct conversion to NewsRecError for convenience
impl From<redb::Error> for NewsRecError {
    fn from(err: redb::Error) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

impl From<redb::DatabaseError> for NewsRecError {
    fn from(err: redb::DatabaseError) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

impl From<redb::TransactionError> for NewsRecError {
    fn from(err: redb::TransactionError) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

impl From<redb::CommitError> for NewsRecError {
    fn from(err: redb::CommitError) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

impl From<redb::TableError> for NewsRecError {
    fn from(err: redb::TableError) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

impl From<redb::StorageError> for NewsRecError {
    fn from(err: redb::StorageError) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

impl From<bincode::Error> for NewsRecError {
    fn from(err: bincode::Error) -> Self {
        NewsRecError::Storage(StorageError::from(err))
    }
}

/// Validation errors for input data.
///
/// These errors indicate problems with data provided by the caller.
/// `DimensionMismatch` and `EmptyHistory` are the fatal configuration
/// errors of the engine: they indicate a setup bug, not a transient
/// condition, and always abort the operation.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Vector dimension doesn't match the collection's configured dimension.
    #[error("Embedding dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch {
        /// Expected dimension from collection configuration.
        expected: usize,
        /// Actual dimension provided.
        got: usize,
    },

    /// Profile building was attempted with no history items.
    ///
    /// The aggregate embedding is a mean over history vectors; a mean of
    /// zero vectors is undefined, so this is rejected up front.
    #[error("Cannot build a profile from an empty history")]
    EmptyHistory,

    /// A field has an invalid value.
    #[error("Invalid field '{field}': {reason}")]
    InvalidField {
        /// Name of the invalid field.
        field: String,
        /// Why the value is invalid.
        reason: String,
    },

    /// Content exceeds maximum allowed size.
    #[error("Content too large: {size} bytes (max: {max} bytes)")]
    ContentTooLarge {
        /// Actual content size in bytes.
        size: usize,
        /// Maximum allowed size in bytes.
        max: usize,
    },

    /// A required field is missing or empty.
    #[error("Required field missing: {field}")]
    RequiredField {
        /// Name of the missing field.
        field: String,
    },

    /// Too many items in a collection field.
    #[error("Too many items in '{field}': {count} (max: {max})")]
    TooManyItems {
        /// Name of the field.
        field: String,
        /// Actual count.
        count: usize,
        /// Maximum allowed.
        max: usize,
    },
}

impl ValidationError {
    /// Creates a dimension mismatch error.
    pub fn dimension_mismatch(expected: usize, got: usize) -> Self {
        Self::DimensionMismatch { expected, got }
    }

    /// Creates an invalid field error.
    pub fn invalid_field(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidField {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Creates a content too large error.
    pub fn content_too_large(size: usize, max: usize) -> Self {
        Self::ContentTooLarge { size, max }
    }

    /// Creates a required field error.
    pub fn required_field(field: impl Into<String>) -> Self {
        Self::RequiredField {
            field: field.into(),
        }
    }

    /// Creates a too many items error.
    pub fn too_many_items(field: impl Into<String>, count: usize, max: usize) -> Self {
        Self::TooManyItems {
            field: field.into(),
            count,
            max,
        }
    }
}

/// Not found errors for specific entity types.
#[derive(Debug, Error)]
pub enum NotFoundError {
    /// Collection with the given name not found.
    #[error("Collection not found: {0}")]
    Collection(String),

    /// Document with the given id not found.
    #[error("Document not found: {0}")]
    Document(u64),
}

impl NotFoundError {
    /// Creates a collection not found error.
    pub fn collection(name: impl Into<String>) -> Self {
        Self::Collection(name.into())
    }

    /// Creates a document not found error.
    pub fn document(id: u64) -> Self {
        Self::Document(id)
    }
}
