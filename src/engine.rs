//! Recommendation engine facade and lifecycle operations.
//!
//! The [`NewsRec`] struct is the primary interface of the crate. It wires
//! together the injected pieces - a document store, an embedding provider,
//! and a keyword normalizer - and exposes the three top-level operations:
//!
//! - Bootstrapping the corpus from a title source
//! - Building a user profile from reading history
//! - Querying ranked recommendations for a profile
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use newsrec::{Config, NewsRec, StaticTitles, StopwordNormalizer};
//!
//! let engine = NewsRec::open(
//!     "./news.db",
//!     Config::default(),
//!     Box::new(my_embedder),
//!     Box::new(StopwordNormalizer::english()),
//! )?;
//!
//! // Populate the corpus on first run; later runs are no-ops.
//! engine.bootstrap(&StaticTitles::new(titles))?;
//!
//! // Recommend from a reading history.
//! let picks = engine.recommend_for_history(&[
//!     "Faster Python through lazy imports",
//!     "Profiling Python allocations in production",
//! ])?;
//!
//! engine.close()?;
//! ```
//!
//! # Thread Safety
//!
//! `NewsRec` is `Send + Sync` and can be shared across threads using `Arc`.
//! The underlying storage uses MVCC for concurrent reads with exclusive
//! write locking.

use std::path::Path;

use tracing::{debug, info, instrument, warn};

use crate::config::{Config, DistanceMetric};
use crate::document::{Document, ScoredDocument};
use crate::embed::Embedder;
use crate::error::{NewsRecError, Result, ValidationError};
use crate::ingest::{BootstrapOutcome, IngestState};
use crate::normalize::KeywordNormalizer;
use crate::profile::{build_profile, UserProfile};
use crate::search::KeywordFilter;
use crate::source::TitleSource;
use crate::store::{open_store, DocumentStore, StoreMetadata};

/// The main recommendation engine handle.
///
/// Create an instance with [`NewsRec::open()`] and release it with
/// [`NewsRec::close()`].
///
/// # Ownership
///
/// `NewsRec` owns its store, embedder, and normalizer. When you call
/// `close()`, the engine is consumed and cannot be used afterward. This
/// ensures resources are properly released.
pub struct NewsRec {
    /// Document store (redb, or a mock for testing).
    store: Box<dyn DocumentStore>,

    /// Embedding provider, used for both corpus titles and histories.
    embedder: Box<dyn Embedder>,

    /// Keyword normalizer, shared by the index and query paths so filter
    /// matching compares like with like.
    normalizer: Box<dyn KeywordNormalizer>,

    /// Configuration used to open this engine.
    config: Config,
}

impl std::fmt::Debug for NewsRec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsRec")
            .field("config", &self.config)
            .field("path", &self.store.path())
            .finish_non_exhaustive()
    }
}

impl NewsRec {
    /// Opens or creates an engine backed by a store at the given path.
    ///
    /// The store file is created if it doesn't exist. The corpus
    /// collection itself is created lazily by [`NewsRec::bootstrap`],
    /// once the embedder's dimension is known.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration is invalid (see [`Config::validate`])
    /// - The store file is corrupted or locked by another process
    /// - The schema version doesn't match
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(
        path: impl AsRef<Path>,
        config: Config,
        embedder: Box<dyn Embedder>,
        normalizer: Box<dyn KeywordNormalizer>,
    ) -> Result<Self> {
        config.validate()?;

        info!("Opening recommendation engine");

        let store = open_store(&path, &config)?;

        info!(collection = %config.collection, "Engine opened successfully");

        Ok(Self {
            store,
            embedder,
            normalizer,
            config,
        })
    }

    /// Creates an engine over an already-open store.
    ///
    /// Intended for tests and embedders of alternative backends; most
    /// callers want [`NewsRec::open`].
    pub fn with_store(
        store: Box<dyn DocumentStore>,
        config: Config,
        embedder: Box<dyn Embedder>,
        normalizer: Box<dyn KeywordNormalizer>,
    ) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            store,
            embedder,
            normalizer,
            config,
        })
    }

    /// Closes the engine, consuming it.
    ///
    /// Flushes and releases the underlying store. After this call the
    /// engine cannot be used.
    pub fn close(self) -> Result<()> {
        info!("Closing recommendation engine");
        self.store.close()
    }

    /// Returns the configuration this engine was opened with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns the store metadata.
    pub fn metadata(&self) -> &StoreMetadata {
        self.store.metadata()
    }

    /// Returns the number of documents in the corpus collection.
    ///
    /// Zero when the collection hasn't been bootstrapped yet.
    pub fn corpus_size(&self) -> usize {
        match self.store.count(&self.config.collection) {
            Ok(n) => n,
            Err(e) if e.is_not_found() => 0,
            Err(e) => {
                warn!(error = %e, "Corpus count failed, reporting zero");
                0
            }
        }
    }

    // =========================================================================
    // Ingestion
    // =========================================================================

    /// Reports whether the corpus collection needs bootstrapping.
    ///
    /// The state is observed from the store, never remembered: a missing
    /// or empty collection needs bootstrap, a populated one is ready.
    pub fn ingest_state(&self) -> IngestState {
        if self.store.is_empty(&self.config.collection) {
            IngestState::NeedsBootstrap
        } else {
            IngestState::Ready
        }
    }

    /// Populates the corpus collection from a title source, if needed.
    ///
    /// Steps, on a store that needs bootstrap:
    ///
    /// 1. Fetch all titles from `source`
    /// 2. Probe the embedder's output dimension
    /// 3. Create the collection with that dimension (if absent)
    /// 4. Embed all titles in one batch
    /// 5. Extract keywords from each title
    /// 6. Upsert the documents, ids assigned from batch position
    ///
    /// On a store that is already populated, nothing is fetched and
    /// [`BootstrapOutcome::AlreadyPopulated`] is returned - bootstrap is
    /// idempotent. A source yielding zero titles still creates the
    /// (empty) collection and returns [`BootstrapOutcome::NothingToIngest`];
    /// the next bootstrap will try the source again.
    #[instrument(skip_all)]
    pub fn bootstrap(&self, source: &dyn TitleSource) -> Result<BootstrapOutcome> {
        if !self.ingest_state().needs_bootstrap() {
            debug!(collection = %self.config.collection, "Corpus already populated");
            return Ok(BootstrapOutcome::AlreadyPopulated);
        }

        info!(collection = %self.config.collection, "Bootstrapping corpus");

        let titles = source.fetch_all()?;

        let dimension = self.embedder.probe_dimension()?;
        if dimension == 0 {
            return Err(NewsRecError::embedding(
                "Embedder probe returned an empty vector",
            ));
        }

        self.store
            .create_if_absent(&self.config.collection, dimension, DistanceMetric::Cosine)?;

        // The collection exists either way; an empty fetch leaves it empty so
        // the next run attempts ingestion again.
        if titles.is_empty() {
            warn!("Title source returned no titles, corpus stays empty");
            return Ok(BootstrapOutcome::NothingToIngest);
        }

        let refs: Vec<&str> = titles.iter().map(String::as_str).collect();
        let embeddings = self.embedder.embed_batch(&refs)?;
        if embeddings.len() != titles.len() {
            return Err(NewsRecError::embedding(format!(
                "Embedder returned {} vectors for {} titles",
                embeddings.len(),
                titles.len()
            )));
        }

        let documents: Vec<Document> = titles
            .into_iter()
            .zip(embeddings)
            .enumerate()
            .map(|(id, (title, vector))| {
                let keywords = self.normalizer.normalize(&title);
                Document::new(id as u64, vector, keywords, title)
            })
            .collect();

        let count = documents.len();
        self.store.upsert(&self.config.collection, documents)?;

        info!(documents = count, dimension = dimension, "Corpus bootstrapped");
        Ok(BootstrapOutcome::Populated(count))
    }

    // =========================================================================
    // Profiles and Recommendations
    // =========================================================================

    /// Builds a user profile from a reading history of titles.
    ///
    /// The history is embedded and normalized with the same embedder and
    /// normalizer as the corpus, then condensed into a mean embedding and
    /// the top-K most frequent keywords (K from
    /// [`Config::top_keywords`]).
    ///
    /// # Errors
    ///
    /// An empty history is a validation error, as is dimension drift:
    /// either within the embedded history (a symptom of a
    /// non-deterministic embedder) or between the embedder and an
    /// existing corpus (a symptom of a changed embedding model).
    #[instrument(skip_all, fields(history_len = history.len()))]
    pub fn build_profile(&self, history: &[&str]) -> Result<UserProfile> {
        if history.is_empty() {
            return Err(ValidationError::EmptyHistory.into());
        }

        let embeddings = self.embedder.embed_batch(history)?;
        if embeddings.len() != history.len() {
            return Err(NewsRecError::embedding(format!(
                "Embedder returned {} vectors for {} history items",
                embeddings.len(),
                history.len()
            )));
        }

        // A profile built at the wrong dimension is unusable against the
        // corpus; catch the drift here rather than at query time.
        if self.store.exists(&self.config.collection)? {
            let expected = self.store.dimension(&self.config.collection)?;
            let got = embeddings.first().map_or(0, Vec::len);
            if got != expected {
                return Err(ValidationError::dimension_mismatch(expected, got).into());
            }
        }

        let keyword_lists: Vec<Vec<String>> = history
            .iter()
            .map(|title| self.normalizer.normalize(title))
            .collect();

        let profile = build_profile(&embeddings, &keyword_lists, self.config.top_keywords)?;

        debug!(
            top_keywords = ?profile.top_keywords,
            "Profile built"
        );
        Ok(profile)
    }

    /// Returns ranked recommendations for a profile.
    ///
    /// The profile's top keywords become the query's "should" filter:
    /// keyword-sharing documents rank ahead of the rest, which still fill
    /// any remaining slots. `limit` defaults to
    /// [`Config::recommend_limit`]. An empty result is valid - an empty
    /// or missing corpus recommends nothing.
    #[instrument(skip_all, fields(limit = ?limit))]
    pub fn recommend(
        &self,
        profile: &UserProfile,
        limit: Option<usize>,
    ) -> Result<Vec<ScoredDocument>> {
        let limit = limit.unwrap_or(self.config.recommend_limit);
        let filter = KeywordFilter::new(profile.top_keywords.clone());

        self.store
            .query(&self.config.collection, &profile.embedding, &filter, limit)
    }

    /// Builds a profile from `history` and recommends with the default
    /// limit. Convenience for the common end-to-end path.
    pub fn recommend_for_history(&self, history: &[&str]) -> Result<Vec<ScoredDocument>> {
        let profile = self.build_profile(history)?;
        self.recommend(&profile, None)
    }
}
