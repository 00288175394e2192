//! Vector index abstractions for similarity search.
//!
//! This module provides a trait-based abstraction over vector indexes,
//! allowing different ANN (Approximate Nearest Neighbor) backends. The
//! primary implementation uses [`hnsw_rs`] (pure Rust).
//!
//! Embeddings stored in redb are the **source of truth**. The HNSW index
//! is a derived, rebuildable structure: it is reconstructed from stored
//! embeddings every time a store is opened and never written to disk.

mod hnsw;

pub use hnsw::HnswIndex;

use crate::error::Result;

/// Vector index trait for approximate nearest neighbor search.
///
/// Implementations must be `Send + Sync` for use inside the store.
/// IDs are `usize` to align with hnsw_rs's `DataId` type; the store
/// assigns them densely (document id == internal id), so no id mapping
/// layer is needed.
///
/// All mutating methods take `&self` and use interior mutability. This
/// enables concurrent reads during search while writes are serialized
/// internally.
pub trait VectorIndex: Send + Sync {
    /// Inserts a single vector with the given ID.
    ///
    /// Re-inserting an existing ID is a no-op (idempotent).
    fn insert(&self, id: usize, embedding: &[f32]) -> Result<()>;

    /// Inserts a batch of vectors.
    ///
    /// More efficient than individual inserts for large batches
    /// due to reduced locking overhead and parallel insertion.
    fn insert_batch(&self, items: &[(&Vec<f32>, usize)]) -> Result<()>;

    /// Searches for the k nearest neighbors to the query vector.
    ///
    /// Returns `(id, distance)` pairs sorted by distance ascending
    /// (closest first). Distance metric is cosine distance:
    /// 0.0 = identical, 2.0 = opposite.
    fn search(&self, query: &[f32], k: usize, ef_search: usize) -> Result<Vec<(usize, f32)>>;

    /// Searches with a filter predicate applied during traversal.
    ///
    /// Only points where `filter(id)` returns `true` are considered.
    /// This is filter-during-traversal, NOT post-filtering - critical
    /// for maintaining result count when many points are filtered.
    fn search_filtered(
        &self,
        query: &[f32],
        k: usize,
        ef_search: usize,
        filter: &(dyn Fn(&usize) -> bool + Sync),
    ) -> Result<Vec<(usize, f32)>>;

    /// Returns the number of indexed vectors.
    fn len(&self) -> usize;

    /// Returns true if the index has no vectors.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
