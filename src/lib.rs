//! # newsrec
//!
//! Embedded content-based news recommender - ingest a corpus of titles,
//! build user profiles from reading history, and query ranked
//! recommendations with hybrid keyword-plus-similarity retrieval.
//!
//! newsrec owns storage and retrieval; embeddings and titles come from
//! injected providers, so the engine works with any embedding model and
//! any title source.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use newsrec::{Config, NewsRec, StaticTitles, StopwordNormalizer};
//!
//! // Open or create an engine
//! let engine = NewsRec::open(
//!     "./news.db",
//!     Config::default(),
//!     Box::new(my_embedder),
//!     Box::new(StopwordNormalizer::english()),
//! )?;
//!
//! // Populate the corpus (no-op when already populated)
//! engine.bootstrap(&StaticTitles::new(titles))?;
//!
//! // Recommend from a reading history
//! let picks = engine.recommend_for_history(&[
//!     "Faster Python through lazy imports",
//! ])?;
//!
//! // Clean up
//! engine.close()?;
//! ```
//!
//! ## Key Concepts
//!
//! ### Document
//!
//! A **document** is one indexed corpus item: an embedding vector, the
//! original title, and the keywords extracted from it. Documents live in
//! a named collection with a fixed embedding dimension.
//!
//! ### Profile
//!
//! A **profile** condenses a reading history into the mean of its
//! embeddings plus its most frequent keywords. Recommendation queries use
//! both: the mean embedding drives similarity, the keywords form a
//! "should" filter that ranks keyword-sharing documents first.
//!
//! ### Injected Providers
//!
//! The engine never computes embeddings or fetches titles itself. An
//! [`Embedder`] and a [`TitleSource`] are injected by the caller, and the
//! embedding dimension is discovered by probing the embedder at bootstrap.
//!
//! ## Thread Safety
//!
//! `NewsRec` is `Send + Sync` and can be shared across threads using
//! `Arc`. The storage layer uses MVCC for concurrent reads with exclusive
//! write locking.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_op_in_unsafe_fn)]

// ============================================================================
// Module declarations
// ============================================================================

mod config;
mod engine;
mod error;
mod types;

pub mod store;

// Domain modules
mod document;
mod ingest;
mod profile;
mod search;

/// Provider traits injected into the engine.
pub mod embed;
/// Keyword extraction from titles.
pub mod normalize;
/// Title acquisition for corpus bootstrap.
pub mod source;

/// Vector index module for HNSW-based approximate nearest neighbor search.
pub mod vector;

// ============================================================================
// Public API re-exports
// ============================================================================

// Main engine interface
pub use engine::NewsRec;

// Configuration
pub use config::{Config, DistanceMetric, HnswConfig};

// Error handling
pub use error::{NewsRecError, NotFoundError, Result, StorageError, ValidationError};

// Core types
pub use types::{DocId, Embedding, Timestamp};

// Domain types
pub use document::{Document, DocumentPayload, ScoredDocument};
pub use ingest::{BootstrapOutcome, IngestState};
pub use profile::{build_profile, mean_embedding, rank_keywords, UserProfile};

// Providers
pub use embed::{Embedder, PROBE_SENTINEL};
pub use normalize::{KeywordNormalizer, StopwordNormalizer};
pub use source::{StaticTitles, TitleSource};

// Search
pub use search::KeywordFilter;

// Storage (for advanced users)
pub use store::StoreMetadata;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Convenient imports for common newsrec usage.
///
/// ```rust
/// use newsrec::prelude::*;
/// ```
pub mod prelude {
    pub use crate::config::Config;
    pub use crate::embed::Embedder;
    pub use crate::engine::NewsRec;
    pub use crate::error::{NewsRecError, Result};
    pub use crate::ingest::{BootstrapOutcome, IngestState};
    pub use crate::normalize::{KeywordNormalizer, StopwordNormalizer};
    pub use crate::profile::UserProfile;
    pub use crate::source::{StaticTitles, TitleSource};
    pub use crate::types::{DocId, Timestamp};
}
