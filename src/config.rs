//! Configuration types for the recommendation engine.
//!
//! The [`Config`] struct controls engine behavior: the name of the backing
//! collection, how many profile keywords are extracted, the default number
//! of recommendations, and HNSW index tuning.
//!
//! # Example
//! ```rust
//! use newsrec::Config;
//!
//! // Use defaults (collection "news", K=4 keywords, 5 recommendations)
//! let config = Config::default();
//!
//! // Customize
//! let config = Config {
//!     top_keywords: 8,
//!     ..Default::default()
//! };
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Engine configuration options.
///
/// All fields have sensible defaults. Use struct update syntax to override
/// specific settings:
///
/// ```rust
/// use newsrec::Config;
///
/// let config = Config {
///     recommend_limit: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone, Debug)]
pub struct Config {
    /// Name of the collection the engine ingests into and queries.
    pub collection: String,

    /// Number of top-frequency keywords extracted into a user profile (K).
    pub top_keywords: usize,

    /// Default number of recommendations returned by
    /// [`recommend_for_history`](crate::NewsRec::recommend_for_history).
    pub recommend_limit: usize,

    /// HNSW index tuning parameters.
    pub hnsw: HnswConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection: "news".to_string(),
            // 4 keywords describe a short-horizon browsing profile well
            top_keywords: 4,
            recommend_limit: 5,
            hnsw: HnswConfig::default(),
        }
    }
}

impl Config {
    /// Creates a new Config with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates the configuration.
    ///
    /// Called automatically by `NewsRec::open()`. You can also call this
    /// explicitly to check configuration before attempting to open.
    ///
    /// # Errors
    /// Returns `ValidationError` if:
    /// - `collection` is empty
    /// - `recommend_limit` is 0
    /// - HNSW parameters are out of range (see [`HnswConfig::validate`])
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.collection.trim().is_empty() {
            return Err(ValidationError::required_field("collection"));
        }

        if self.recommend_limit == 0 {
            return Err(ValidationError::invalid_field(
                "recommend_limit",
                "must be greater than 0",
            ));
        }

        // top_keywords == 0 is allowed: it degenerates to an empty filter
        // and pure similarity ranking.

        self.hnsw.validate()
    }
}

/// HNSW index tuning parameters.
///
/// These map directly onto `hnsw_rs::Hnsw::new` arguments plus the
/// `ef` parameter used at search time. The defaults suit corpora of a few
/// thousand short documents.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HnswConfig {
    /// Maximum number of connections per graph node.
    pub max_nb_connection: usize,

    /// Size of the dynamic candidate list during construction.
    pub ef_construction: usize,

    /// Size of the dynamic candidate list during search.
    pub ef_search: usize,

    /// Maximum number of graph layers.
    pub max_layer: usize,

    /// Maximum number of elements the index can hold.
    pub max_elements: usize,
}

impl Default for HnswConfig {
    fn default() -> Self {
        Self {
            max_nb_connection: 16,
            ef_construction: 200,
            ef_search: 100,
            max_layer: 16,
            max_elements: 100_000,
        }
    }
}

impl HnswConfig {
    /// Validates the HNSW parameters.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.max_nb_connection == 0 {
            return Err(ValidationError::invalid_field(
                "hnsw.max_nb_connection",
                "must be greater than 0",
            ));
        }
        if self.ef_construction == 0 || self.ef_search == 0 {
            return Err(ValidationError::invalid_field(
                "hnsw.ef",
                "ef_construction and ef_search must be greater than 0",
            ));
        }
        if self.max_layer == 0 || self.max_layer > 16 {
            return Err(ValidationError::invalid_field(
                "hnsw.max_layer",
                "must be between 1 and 16",
            ));
        }
        if self.max_elements == 0 {
            return Err(ValidationError::invalid_field(
                "hnsw.max_elements",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

/// Distance metric for a collection's vector index.
///
/// Fixed at collection creation; all ranking is relative to this metric and
/// cannot change without rebuilding the index. Cosine is the only supported
/// metric.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DistanceMetric {
    /// Cosine similarity (scores reported as 1.0 - cosine distance).
    #[default]
    Cosine,
}

impl DistanceMetric {
    /// Stable name used in logs and stored collection records.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cosine => "cosine",
        }
    }
}
