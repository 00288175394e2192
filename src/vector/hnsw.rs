//! HNSW vector index implementation using hnsw_rs.
//!
//! Wraps `hnsw_rs::Hnsw<f32, DistCosine>` with dimension checks and an
//! idempotent-insert guard. Document ids are dense batch indexes and are
//! used directly as `hnsw_rs` internal ids, so no id-mapping layer exists.
//!
//! # Thread Safety
//!
//! The `hnsw_rs::Hnsw` graph uses `parking_lot::RwLock` internally,
//! so `insert()` takes `&self`. Our inserted-id set is protected by
//! `std::sync::RwLock`.

use std::collections::HashSet;
use std::sync::RwLock;

use anndists::dist::DistCosine;
use hnsw_rs::prelude::*;

use crate::config::HnswConfig;
use crate::error::{NewsRecError, Result};

use super::VectorIndex;

/// Newtype wrapper that bridges `&dyn Fn(&usize) -> bool` to `FilterT`.
///
/// The blanket impl `impl<F: Fn(&DataId) -> bool> FilterT for F` only
/// works for concrete types. When we have a `&dyn Fn` trait object (from the
/// `VectorIndex` trait's `search_filtered` method), we can't coerce it to
/// `&dyn FilterT` directly. This wrapper implements `FilterT` by delegating
/// to the wrapped closure trait object.
struct FilterBridge<'a>(&'a (dyn Fn(&usize) -> bool + Sync));

impl FilterT for FilterBridge<'_> {
    fn hnsw_filter(&self, id: &DataId) -> bool {
        (self.0)(id)
    }
}

/// HNSW vector index backed by `hnsw_rs`.
///
/// Each collection gets its own `HnswIndex` instance, providing
/// complete data isolation between collections.
///
/// The graph is never persisted: it is rebuilt from redb embeddings
/// via [`HnswIndex::rebuild_from_embeddings`] on every open.
pub struct HnswIndex {
    /// The underlying HNSW graph. Uses `'static` lifetime because
    /// all data is heap-owned (not memory-mapped).
    hnsw: Hnsw<'static, f32, DistCosine>,

    /// IDs already inserted, for idempotent re-insert.
    inserted: RwLock<HashSet<usize>>,

    /// Embedding dimension (must match all inserted vectors).
    dimension: usize,
}

impl HnswIndex {
    /// Creates a new empty HNSW index.
    ///
    /// # Arguments
    ///
    /// * `dimension` - Expected embedding dimension (validated on insert)
    /// * `config` - HNSW tuning parameters
    pub fn new(dimension: usize, config: &HnswConfig) -> Self {
        let hnsw = Hnsw::new(
            config.max_nb_connection,
            config.max_elements,
            config.max_layer,
            config.ef_construction,
            DistCosine,
        );

        Self {
            hnsw,
            inserted: RwLock::new(HashSet::new()),
            dimension,
        }
    }

    /// Rebuilds an index from a set of embeddings.
    ///
    /// Used during store open to reconstruct the HNSW graph from
    /// embeddings stored in redb (the source of truth). Uses parallel
    /// bulk insertion for the initial population.
    pub fn rebuild_from_embeddings(
        dimension: usize,
        config: &HnswConfig,
        embeddings: &[(usize, Vec<f32>)],
    ) -> Result<Self> {
        let index = Self::new(dimension, config);

        if embeddings.is_empty() {
            return Ok(index);
        }

        for (id, embedding) in embeddings {
            if embedding.len() != dimension {
                return Err(NewsRecError::vector(format!(
                    "Stored embedding for id {} has dimension {}, expected {}",
                    id,
                    embedding.len(),
                    dimension
                )));
            }
        }

        let batch: Vec<(&Vec<f32>, usize)> = embeddings
            .iter()
            .map(|(id, embedding)| (embedding, *id))
            .collect();

        {
            let mut inserted = index
                .inserted
                .write()
                .map_err(|_| NewsRecError::vector("Index state lock poisoned"))?;
            inserted.extend(embeddings.iter().map(|(id, _)| *id));
        }

        // Parallel bulk insert (uses rayon internally)
        index.hnsw.parallel_insert(&batch);

        Ok(index)
    }

    /// Returns the embedding dimension this index was created with.
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    fn check_dimension(&self, len: usize, what: &str) -> Result<()> {
        if len != self.dimension {
            return Err(NewsRecError::vector(format!(
                "{} dimension mismatch: expected {}, got {}",
                what, self.dimension, len
            )));
        }
        Ok(())
    }
}

impl VectorIndex for HnswIndex {
    fn insert(&self, id: usize, embedding: &[f32]) -> Result<()> {
        self.check_dimension(embedding.len(), "Embedding")?;

        let mut inserted = self
            .inserted
            .write()
            .map_err(|_| NewsRecError::vector("Index state lock poisoned"))?;

        // Skip if already inserted (idempotent)
        if !inserted.insert(id) {
            return Ok(());
        }

        // Drop the lock before calling hnsw insert (which acquires its own lock)
        drop(inserted);

        self.hnsw.insert((embedding, id));

        Ok(())
    }

    fn insert_batch(&self, items: &[(&Vec<f32>, usize)]) -> Result<()> {
        for (embedding, _) in items {
            self.check_dimension(embedding.len(), "Embedding")?;
        }

        let mut inserted = self
            .inserted
            .write()
            .map_err(|_| NewsRecError::vector("Index state lock poisoned"))?;

        let fresh: Vec<(&Vec<f32>, usize)> = items
            .iter()
            .filter(|(_, id)| inserted.insert(*id))
            .copied()
            .collect();

        drop(inserted);

        if !fresh.is_empty() {
            self.hnsw.parallel_insert(&fresh);
        }

        Ok(())
    }

    fn search(&self, query: &[f32], k: usize, ef_search: usize) -> Result<Vec<(usize, f32)>> {
        self.check_dimension(query.len(), "Query")?;

        let neighbours = self.hnsw.search(query, k, ef_search);
        Ok(neighbours
            .into_iter()
            .map(|n| (n.d_id, n.distance))
            .collect())
    }

    fn search_filtered(
        &self,
        query: &[f32],
        k: usize,
        ef_search: usize,
        filter: &(dyn Fn(&usize) -> bool + Sync),
    ) -> Result<Vec<(usize, f32)>> {
        self.check_dimension(query.len(), "Query")?;

        let bridge = FilterBridge(filter);
        let neighbours = self.hnsw.search_filter(query, k, ef_search, Some(&bridge));
        Ok(neighbours
            .into_iter()
            .map(|n| (n.d_id, n.distance))
            .collect())
    }

    fn len(&self) -> usize {
        self.inserted.read().map(|s| s.len()).unwrap_or(0)
    }
}
