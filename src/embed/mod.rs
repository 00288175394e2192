//! Embedding provider abstraction.
//!
//! The engine never computes embeddings itself - an [`Embedder`] is
//! injected by the caller and treated as an opaque text-to-vector function.
//! All vectors in a collection must come from the same embedder; mixing
//! models silently degrades similarity search, and the engine can only
//! catch the cases where the dimension differs.

use crate::error::Result;
use crate::types::Embedding;

/// Sentinel text used to probe an embedder's output dimension.
pub const PROBE_SENTINEL: &str = "test";

/// Text-to-vector embedding provider.
///
/// Implementations must be deterministic enough for retrieval: embedding
/// the same text twice should produce the same (or a nearly identical)
/// vector. The output dimension must be constant across calls.
pub trait Embedder: Send + Sync {
    /// Embeds a batch of texts, one vector per input, in input order.
    ///
    /// An empty batch returns an empty vector of embeddings.
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>>;

    /// Returns the embedder's output dimension by embedding a sentinel.
    ///
    /// The dimension is discovered at runtime rather than configured,
    /// so it can never disagree with what the embedder actually emits.
    fn probe_dimension(&self) -> Result<usize> {
        let embeddings = self.embed_batch(&[PROBE_SENTINEL])?;
        Ok(embeddings.first().map_or(0, Vec::len))
    }
}
