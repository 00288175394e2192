//! Storage layer abstractions for the recommendation engine.
//!
//! This module provides a trait-based abstraction over the document store,
//! allowing different backends to be used (e.g., redb, mock for testing).
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      NewsRec                                 │
//! │                         │                                    │
//! │                         ▼                                    │
//! │              ┌─────────────────────┐                        │
//! │              │   DocumentStore     │  ← Trait               │
//! │              └─────────────────────┘                        │
//! │                         ▲                                   │
//! │                         │                                   │
//! │                  ┌──────┴─────┐                             │
//! │                  │ RedbStore  │                             │
//! │                  └────────────┘                             │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The store owns both durability (redb as source of truth) and the
//! derived in-memory structures (HNSW index, keyword cache) that are
//! rebuilt from redb on every open.

pub mod redb;
pub mod schema;

pub use self::redb::RedbStore;
pub use schema::{CollectionRecord, StoreMetadata, SCHEMA_VERSION};

use std::path::Path;

use crate::config::{Config, DistanceMetric};
use crate::document::{Document, ScoredDocument};
use crate::error::Result;
use crate::search::KeywordFilter;

/// Document store trait for the recommendation engine.
///
/// This trait defines the contract that any storage backend must implement.
/// The primary implementation is [`RedbStore`].
///
/// # Thread Safety
///
/// Implementations must be `Send + Sync` to allow the engine to be shared
/// across threads. The store handles internal synchronization.
pub trait DocumentStore: Send + Sync {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Returns the store metadata.
    fn metadata(&self) -> &StoreMetadata;

    /// Closes the store, flushing any pending writes.
    ///
    /// This method consumes the store. After calling `close()`, the store
    /// cannot be used.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend supports reporting flush failures.
    /// Note: the current redb backend flushes on drop (infallible), so
    /// this always returns `Ok(())` for [`RedbStore`].
    fn close(self: Box<Self>) -> Result<()>;

    /// Returns the path to the store file, if applicable.
    ///
    /// Some implementations (like in-memory mocks) may not have a path.
    fn path(&self) -> Option<&Path>;

    // =========================================================================
    // Collection Operations
    // =========================================================================

    /// Returns `true` if the named collection exists.
    fn exists(&self, collection: &str) -> Result<bool>;

    /// Creates a collection if it does not exist yet.
    ///
    /// Returns `true` if the collection was created, `false` if it already
    /// existed. An existing collection is left untouched, but its stored
    /// dimension must match `dimension` or a validation error is returned -
    /// a dimension change requires a new collection.
    fn create_if_absent(
        &self,
        collection: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<bool>;

    /// Returns `true` when the collection holds no documents.
    ///
    /// This check fails open: a missing collection or a storage error is
    /// reported as empty (with a warning) so that callers deciding whether
    /// to bootstrap can proceed and surface the real error on the write
    /// path, where it is actionable.
    fn is_empty(&self, collection: &str) -> bool;

    /// Returns the number of documents in the collection.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the collection does not exist.
    fn count(&self, collection: &str) -> Result<usize>;

    /// Returns the embedding dimension of the collection.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the collection does not exist.
    fn dimension(&self, collection: &str) -> Result<usize>;

    // =========================================================================
    // Document Operations
    // =========================================================================

    /// Inserts a batch of documents into the collection.
    ///
    /// Every document is validated before anything is written; one invalid
    /// document rejects the whole batch. Payloads and embeddings are
    /// committed in a single transaction, then the in-memory index is
    /// updated. Re-upserting an existing id overwrites its stored payload
    /// and leaves the index untouched (idempotent for identical batches).
    fn upsert(&self, collection: &str, documents: Vec<Document>) -> Result<()>;

    /// Runs a filtered similarity query against the collection.
    ///
    /// Results come in two tiers: documents matching `filter` first
    /// (ordered by descending similarity), then non-matching documents
    /// filling the remaining slots (same order). An empty filter yields a
    /// single pure-similarity tier. At most `limit` results are returned;
    /// fewer (or none) when the collection is small or empty.
    ///
    /// Querying a missing collection returns an empty result, not an
    /// error. A query vector whose dimension differs from the collection's
    /// is a validation error.
    fn query(
        &self,
        collection: &str,
        vector: &[f32],
        filter: &KeywordFilter,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>>;
}

/// Opens the default document store at the given path.
///
/// Convenience wrapper used by the engine; returns the store boxed as the
/// trait object the engine holds.
pub fn open_store(path: impl AsRef<Path>, config: &Config) -> Result<Box<dyn DocumentStore>> {
    let store = RedbStore::open(path, config)?;
    Ok(Box::new(store))
}
