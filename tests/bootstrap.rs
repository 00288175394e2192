//! Integration tests for corpus bootstrap.
//!
//! These tests verify:
//! - Idempotent bootstrap (populated stores are never re-fetched)
//! - Empty-source handling (corpus stays empty, next run retries)
//! - Dimension probing (collection dimension comes from the embedder)
//! - Embedder contract violations surfacing as errors

use newsrec::{
    BootstrapOutcome, Config, DocId, Embedder, Embedding, IngestState, NewsRec, NewsRecError,
    Result, StaticTitles, StopwordNormalizer,
};
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
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

/// Title source that counts how often it is consulted.
struct CountingSource {
    titles: Vec<String>,
    fetches: Arc<AtomicUsize>,
}

impl newsrec::TitleSource for CountingSource {
    fn fetch_all(&self) -> Result<Vec<String>> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        Ok(self.titles.clone())
    }
}

fn open_engine(path: &Path, dimension: usize) -> NewsRec {
    NewsRec::open(
        path,
        Config::default(),
        Box::new(HashEmbedder { dimension }),
        Box::new(StopwordNormalizer::english()),
    )
    .unwrap()
}

fn titles() -> Vec<String> {
    vec![
        "Faster Python through lazy imports".into(),
        "Rust compiler internals explained".into(),
        "Why SQLite is enough for most apps".into(),
    ]
}

#[test]
fn test_bootstrap_assigns_ids_from_batch_position() {
    let dir = tempdir().unwrap();
    let engine = open_engine(&dir.path().join("news.db"), 16);

    engine.bootstrap(&StaticTitles::new(titles())).unwrap();

    // Querying with the exact embedding of title 1 returns id 1 first.
    let picks = engine
        .recommend_for_history(&["Rust compiler internals explained"])
        .unwrap();
    assert_eq!(picks[0].id, DocId::new(1));
    assert_eq!(picks[0].title, "Rust compiler internals explained");
}

#[test]
fn test_populated_store_is_never_refetched() {
    let dir = tempdir().unwrap();
    let engine = open_engine(&dir.path().join("news.db"), 16);

    let fetches = Arc::new(AtomicUsize::new(0));
    let source = CountingSource {
        titles: titles(),
        fetches: Arc::clone(&fetches),
    };

    assert_eq!(
        engine.bootstrap(&source).unwrap(),
        BootstrapOutcome::Populated(3)
    );
    assert_eq!(
        engine.bootstrap(&source).unwrap(),
        BootstrapOutcome::AlreadyPopulated
    );
    assert_eq!(
        engine.bootstrap(&source).unwrap(),
        BootstrapOutcome::AlreadyPopulated
    );

    // Only the first run touched the source.
    assert_eq!(fetches.load(Ordering::SeqCst), 1);
}

#[test]
fn test_empty_source_retries_on_next_bootstrap() {
    let dir = tempdir().unwrap();
    let engine = open_engine(&dir.path().join("news.db"), 16);

    let fetches = Arc::new(AtomicUsize::new(0));
    let empty = CountingSource {
        titles: Vec::new(),
        fetches: Arc::clone(&fetches),
    };

    assert_eq!(
        engine.bootstrap(&empty).unwrap(),
        BootstrapOutcome::NothingToIngest
    );
    assert_eq!(engine.ingest_state(), IngestState::NeedsBootstrap);

    // Second run consults the source again.
    engine.bootstrap(&empty).unwrap();
    assert_eq!(fetches.load(Ordering::SeqCst), 2);

    // And a run with real titles succeeds.
    assert_eq!(
        engine.bootstrap(&StaticTitles::new(titles())).unwrap(),
        BootstrapOutcome::Populated(3)
    );
}

#[test]
fn test_collection_dimension_comes_from_probe() {
    let dir = tempdir().unwrap();
    let engine = open_engine(&dir.path().join("news.db"), 300);

    engine.bootstrap(&StaticTitles::new(titles())).unwrap();

    // Histories embedded at the same dimension query cleanly.
    let picks = engine.recommend_for_history(&["sqlite apps"]).unwrap();
    assert!(!picks.is_empty());
}

#[test]
fn test_profile_dimension_must_match_corpus() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("news.db");

    let engine = open_engine(&path, 16);
    engine.bootstrap(&StaticTitles::new(titles())).unwrap();
    engine.close().unwrap();

    // Reopening with a smaller embedder models a swapped embedding model.
    let engine = open_engine(&path, 8);
    let err = engine
        .build_profile(&["Faster Python through lazy imports"])
        .unwrap_err();
    assert!(err.is_validation(), "expected validation error, got {err}");
}

#[test]
fn test_zero_dimension_embedder_is_rejected() {
    struct EmptyEmbedder;

    impl Embedder for EmptyEmbedder {
        fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>> {
            Ok(texts.iter().map(|_| Vec::new()).collect())
        }
    }

    let dir = tempdir().unwrap();
    let engine = NewsRec::open(
        dir.path().join("news.db"),
        Config::default(),
        Box::new(EmptyEmbedder),
        Box::new(StopwordNormalizer::english()),
    )
    .unwrap();

    let err = engine
        .bootstrap(&StaticTitles::new(titles()))
        .unwrap_err();
    assert!(err.is_embedding());
}

#[test]
fn test_miscounting_embedder_is_rejected() {
    // Returns one vector regardless of batch size.
    struct MiscountingEmbedder;

    impl Embedder for MiscountingEmbedder {
        fn embed_batch(&self, _texts: &[&str]) -> Result<Vec<Embedding>> {
            Ok(vec![vec![0.5; 8]])
        }
    }

    let dir = tempdir().unwrap();
    let engine = NewsRec::open(
        dir.path().join("news.db"),
        Config::default(),
        Box::new(MiscountingEmbedder),
        Box::new(StopwordNormalizer::english()),
    )
    .unwrap();

    let err = engine
        .bootstrap(&StaticTitles::new(titles()))
        .unwrap_err();
    assert!(err.is_embedding());
}

#[test]
fn test_failing_source_propagates() {
    struct FailingSource;

    impl newsrec::TitleSource for FailingSource {
        fn fetch_all(&self) -> Result<Vec<String>> {
            Err(NewsRecError::source("connection reset"))
        }
    }

    let dir = tempdir().unwrap();
    let engine = open_engine(&dir.path().join("news.db"), 16);

    let err = engine.bootstrap(&FailingSource).unwrap_err();
    assert!(matches!(err, NewsRecError::Source(_)));
    assert_eq!(engine.ingest_state(), IngestState::NeedsBootstrap);
}
