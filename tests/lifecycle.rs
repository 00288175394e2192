//! Integration tests for engine lifecycle operations.
//!
//! These tests verify the end-to-end behavior of:
//! - Opening new stores
//! - Reopening existing stores (index rebuild from disk)
//! - Configuration validation
//! - Proper resource cleanup on close

use newsrec::{
    BootstrapOutcome, Config, Embedder, Embedding, IngestState, NewsRec, Result, StaticTitles,
    StopwordNormalizer,
};
use std::path::Path;
use tempfile::tempdir;

/// Deterministic embedder: hashes each word into a small dense vector.
struct HashEmbedder {
    dimension: usize,
}

impl Embedder for HashEmbedder {
    fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
        Ok(texts
            .iter()
            .map(|text| {
                let mut v = vec![0.0f32; self.dimension];
                for word in text.split_whitespace() {
                    let h = word
                        .bytes()
                        .fold(0usize, |acc, b| acc.wrapping_mul(31).wrapping_add(b as usize));
                    v[h % self.dimension] += 1.0;
                }
                v
            })
            .collect())
    }
}

fn open_engine(path: &Path) -> NewsRec {
    NewsRec::open(
        path,
        Config::default(),
        Box::new(HashEmbedder { dimension: 32 }),
        Box::new(StopwordNormalizer::english()),
    )
    .unwrap()
}

fn corpus() -> StaticTitles {
    StaticTitles::new(vec![
        "Faster Python through lazy imports".into(),
        "Profiling Python allocations in production".into(),
        "Rust compiler internals explained".into(),
        "A tour of the Rust borrow checker".into(),
        "Why SQLite is enough for most apps".into(),
    ])
}

// ============================================================================
// Store Creation Tests
// ============================================================================

#[test]
fn test_open_creates_new_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("news.db");

    assert!(!path.exists(), "Store should not exist before open");

    let engine = open_engine(&path);

    assert!(path.exists(), "Store file should exist after open");
    assert_eq!(engine.ingest_state(), IngestState::NeedsBootstrap);
    assert_eq!(engine.corpus_size(), 0);

    engine.close().unwrap();
}

#[test]
fn test_open_with_default_config() {
    let dir = tempdir().unwrap();
    let engine = open_engine(&dir.path().join("news.db"));

    assert_eq!(engine.config().collection, "news");
    assert_eq!(engine.config().top_keywords, 4);
    assert_eq!(engine.config().recommend_limit, 5);

    engine.close().unwrap();
}

#[test]
fn test_open_rejects_invalid_config() {
    let dir = tempdir().unwrap();
    let config = Config {
        collection: String::new(),
        ..Default::default()
    };

    let result = NewsRec::open(
        dir.path().join("news.db"),
        config,
        Box::new(HashEmbedder { dimension: 32 }),
        Box::new(StopwordNormalizer::english()),
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().is_validation());
}

#[test]
fn test_open_rejects_zero_limit() {
    let dir = tempdir().unwrap();
    let config = Config {
        recommend_limit: 0,
        ..Default::default()
    };

    let result = NewsRec::open(
        dir.path().join("news.db"),
        config,
        Box::new(HashEmbedder { dimension: 32 }),
        Box::new(StopwordNormalizer::english()),
    );
    assert!(result.unwrap_err().is_validation());
}

// ============================================================================
// Reopen / Persistence Tests
// ============================================================================

#[test]
fn test_reopen_preserves_corpus() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("news.db");

    {
        let engine = open_engine(&path);
        assert_eq!(
            engine.bootstrap(&corpus()).unwrap(),
            BootstrapOutcome::Populated(5)
        );
        engine.close().unwrap();
    }

    // Reopen: the index is rebuilt from stored embeddings and the engine
    // is immediately ready.
    let engine = open_engine(&path);
    assert_eq!(engine.ingest_state(), IngestState::Ready);
    assert_eq!(engine.corpus_size(), 5);

    // Query works against the rebuilt index.
    let picks = engine
        .recommend_for_history(&["Python performance work"])
        .unwrap();
    assert!(!picks.is_empty());

    engine.close().unwrap();
}

#[test]
fn test_reopen_updates_metadata_timestamps() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("news.db");

    let created_at = {
        let engine = open_engine(&path);
        let created_at = engine.metadata().created_at;
        engine.close().unwrap();
        created_at
    };

    std::thread::sleep(std::time::Duration::from_millis(10));

    let engine = open_engine(&path);
    assert_eq!(engine.metadata().created_at, created_at);
    assert!(engine.metadata().last_opened_at > created_at);

    engine.close().unwrap();
}

#[test]
fn test_bootstrap_after_reopen_is_noop() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("news.db");

    {
        let engine = open_engine(&path);
        engine.bootstrap(&corpus()).unwrap();
        engine.close().unwrap();
    }

    let engine = open_engine(&path);
    assert_eq!(
        engine.bootstrap(&corpus()).unwrap(),
        BootstrapOutcome::AlreadyPopulated
    );
    assert_eq!(engine.corpus_size(), 5);

    engine.close().unwrap();
}
