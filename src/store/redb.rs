//! redb document store implementation.
//!
//! This module provides the primary storage backend using
//! [redb](https://docs.rs/redb), a pure Rust embedded key-value store.
//!
//! # Features
//!
//! - ACID transactions with MVCC
//! - Single-writer, multiple-reader concurrency
//! - Automatic crash recovery
//! - Zero external dependencies (pure Rust)
//!
//! # Derived State
//!
//! redb holds the durable truth: collection records, document payloads,
//! and raw embeddings. Each collection additionally carries derived
//! in-memory state - an HNSW index and a keyword cache - rebuilt from
//! redb on open and kept in sync on every upsert. Nothing derived is
//! ever written back to disk.

use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, RwLock};

use ::redb::{Database, ReadableTable};
use tracing::{debug, info, instrument, warn};

use super::schema::{
    decode_embedding, encode_embedding, CollectionRecord, StoreMetadata, COLLECTIONS_TABLE,
    DOCUMENTS_TABLE, EMBEDDINGS_TABLE, METADATA_TABLE, SCHEMA_VERSION, STORE_METADATA_KEY,
};
use super::DocumentStore;
use crate::config::{Config, DistanceMetric, HnswConfig};
use crate::document::types::DocumentPayload;
use crate::document::{validate_document, validate_payload, Document, ScoredDocument};
use crate::error::{NewsRecError, NotFoundError, Result, StorageError, ValidationError};
use crate::search::KeywordFilter;
use crate::types::DocId;
use crate::vector::{HnswIndex, VectorIndex};

/// Per-collection state: the persisted record plus derived structures.
struct CollectionState {
    /// Persisted collection configuration.
    record: CollectionRecord,

    /// Derived ANN index over the collection's embeddings.
    index: HnswIndex,

    /// Derived keyword cache, dense by document id. Lets the query path
    /// evaluate keyword filters during index traversal without touching
    /// redb per candidate.
    keywords: RwLock<Vec<Vec<String>>>,
}

/// redb document store.
///
/// Holds the redb database handle, cached metadata, and per-collection
/// derived state. Implements [`DocumentStore`] for use by the engine.
///
/// # Thread Safety
///
/// `RedbStore` is `Send + Sync`. redb handles internal synchronization
/// using MVCC for readers and exclusive locking for writers; the
/// collection map and keyword caches use `std::sync::RwLock`.
pub struct RedbStore {
    /// The redb database handle.
    db: Database,

    /// Cached store metadata.
    metadata: StoreMetadata,

    /// Path to the store file.
    path: PathBuf,

    /// HNSW tuning parameters, applied to every collection index.
    hnsw: HnswConfig,

    /// Per-collection derived state, keyed by collection name.
    collections: RwLock<HashMap<String, Arc<CollectionState>>>,
}

impl RedbStore {
    /// Opens or creates a store at the given path.
    ///
    /// A fresh file is initialized with empty tables and new metadata. An
    /// existing file is validated (schema version) and its collections'
    /// indexes are rebuilt from stored embeddings.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The store file is corrupted
    /// - The store is locked by another process
    /// - Schema version doesn't match
    #[instrument(skip(config), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, config: &Config) -> Result<Self> {
        let path = path.as_ref();
        let db_exists = path.exists();

        debug!(db_exists = db_exists, "Opening document store");

        let db = Self::create_database(path)?;

        if db_exists {
            Self::open_existing(db, path.to_path_buf(), config)
        } else {
            Self::initialize_new(db, path.to_path_buf(), config)
        }
    }

    /// Creates the redb database with appropriate settings.
    fn create_database(path: &Path) -> Result<Database> {
        let builder = Database::builder();

        // Note: redb doesn't expose a typed error variant for lock conflicts,
        // so we detect them via error message string matching. This may need
        // updating if redb changes its error messages in a future version.
        let db = builder.create(path).map_err(|e| {
            if e.to_string().contains("locked") {
                StorageError::Locked
            } else {
                StorageError::Redb(e.to_string())
            }
        })?;

        debug!("Store file opened successfully");
        Ok(db)
    }

    /// Initializes a new store with tables and metadata.
    #[instrument(skip(db, config), fields(path = %path.display()))]
    fn initialize_new(db: Database, path: PathBuf, config: &Config) -> Result<Self> {
        info!("Initializing new store");

        let metadata = StoreMetadata::new();

        // Create all tables and write metadata in a single transaction
        let write_txn = db.begin_write().map_err(StorageError::from)?;
        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = bincode::serialize(&metadata)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            meta_table.insert(STORE_METADATA_KEY, metadata_bytes.as_slice())?;

            // Remaining tables are created empty so later read transactions
            // can open them unconditionally.
            let _ = write_txn.open_table(COLLECTIONS_TABLE)?;
            let _ = write_txn.open_table(DOCUMENTS_TABLE)?;
            let _ = write_txn.open_table(EMBEDDINGS_TABLE)?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        info!(schema_version = SCHEMA_VERSION, "Store initialized");

        Ok(Self {
            db,
            metadata,
            path,
            hnsw: config.hnsw.clone(),
            collections: RwLock::new(HashMap::new()),
        })
    }

    /// Opens and validates an existing store, rebuilding derived state.
    #[instrument(skip(db, config), fields(path = %path.display()))]
    fn open_existing(db: Database, path: PathBuf, config: &Config) -> Result<Self> {
        info!("Opening existing store");

        let read_txn = db.begin_read().map_err(StorageError::from)?;

        let metadata = {
            let meta_table = read_txn.open_table(METADATA_TABLE).map_err(|e| {
                StorageError::corrupted(format!("Cannot open metadata table: {}", e))
            })?;

            let metadata_bytes = meta_table
                .get(STORE_METADATA_KEY)
                .map_err(StorageError::from)?
                .ok_or_else(|| StorageError::corrupted("Missing store metadata"))?;

            bincode::deserialize::<StoreMetadata>(metadata_bytes.value())
                .map_err(|e| StorageError::corrupted(format!("Invalid metadata format: {}", e)))?
        };

        drop(read_txn);

        if metadata.schema_version != SCHEMA_VERSION {
            warn!(
                expected = SCHEMA_VERSION,
                found = metadata.schema_version,
                "Schema version mismatch"
            );
            return Err(NewsRecError::Storage(StorageError::SchemaVersionMismatch {
                expected: SCHEMA_VERSION,
                found: metadata.schema_version,
            }));
        }

        // Update last_opened_at timestamp
        let mut metadata = metadata;
        metadata.touch();

        let write_txn = db.begin_write().map_err(StorageError::from)?;
        {
            let mut meta_table = write_txn.open_table(METADATA_TABLE)?;
            let metadata_bytes = bincode::serialize(&metadata)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            meta_table.insert(STORE_METADATA_KEY, metadata_bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        let collections = Self::rebuild_collections(&db, &config.hnsw)?;

        info!(
            schema_version = metadata.schema_version,
            collections = collections.len(),
            "Store opened successfully"
        );

        Ok(Self {
            db,
            metadata,
            path,
            hnsw: config.hnsw.clone(),
            collections: RwLock::new(collections),
        })
    }

    /// Rebuilds every collection's derived state from stored rows.
    fn rebuild_collections(
        db: &Database,
        hnsw: &HnswConfig,
    ) -> Result<HashMap<String, Arc<CollectionState>>> {
        let read_txn = db.begin_read().map_err(StorageError::from)?;
        let coll_table = read_txn.open_table(COLLECTIONS_TABLE)?;

        let mut records = Vec::new();
        for entry in coll_table.iter()? {
            let (_, value) = entry.map_err(StorageError::from)?;
            let record: CollectionRecord = bincode::deserialize(value.value())
                .map_err(|e| StorageError::corrupted(format!("Invalid collection record: {}", e)))?;
            records.push(record);
        }

        let doc_table = read_txn.open_table(DOCUMENTS_TABLE)?;
        let emb_table = read_txn.open_table(EMBEDDINGS_TABLE)?;

        let mut collections = HashMap::with_capacity(records.len());
        for record in records {
            let name = record.name.as_str();

            let mut embeddings: Vec<(usize, Vec<f32>)> = Vec::new();
            for entry in emb_table.range((name, 0u64)..=(name, u64::MAX))? {
                let (key, value) = entry.map_err(StorageError::from)?;
                let (_, id) = key.value();
                embeddings.push((id as usize, decode_embedding(value.value())?));
            }

            let mut keywords: Vec<Vec<String>> = vec![Vec::new(); embeddings.len()];
            for entry in doc_table.range((name, 0u64)..=(name, u64::MAX))? {
                let (key, value) = entry.map_err(StorageError::from)?;
                let (_, id) = key.value();
                let payload: DocumentPayload =
                    bincode::deserialize(value.value()).map_err(|e| {
                        StorageError::corrupted(format!("Invalid document payload: {}", e))
                    })?;
                let idx = id as usize;
                if idx >= keywords.len() {
                    keywords.resize(idx + 1, Vec::new());
                }
                keywords[idx] = payload.keywords;
            }

            let index = HnswIndex::rebuild_from_embeddings(record.dimension, hnsw, &embeddings)?;

            debug!(
                collection = name,
                documents = embeddings.len(),
                dimension = record.dimension,
                "Collection index rebuilt"
            );

            collections.insert(
                record.name.clone(),
                Arc::new(CollectionState {
                    record,
                    index,
                    keywords: RwLock::new(keywords),
                }),
            );
        }

        Ok(collections)
    }

    /// Returns the shared state for a collection, if it exists.
    fn collection(&self, name: &str) -> Result<Option<Arc<CollectionState>>> {
        let map = self
            .collections
            .read()
            .map_err(|_| StorageError::unavailable("Collection map lock poisoned"))?;
        Ok(map.get(name).cloned())
    }

    /// Fetches and validates one stored payload.
    fn read_payload(
        table: &impl ReadableTable<(&'static str, u64), &'static [u8]>,
        collection: &str,
        id: u64,
    ) -> Result<DocumentPayload> {
        let value = table
            .get((collection, id))?
            .ok_or_else(|| {
                StorageError::corrupted(format!(
                    "Indexed document {} has no stored payload in '{}'",
                    id, collection
                ))
            })?;

        let payload: DocumentPayload = bincode::deserialize(value.value())
            .map_err(|e| StorageError::corrupted(format!("Invalid document payload: {}", e)))?;

        // Payloads are validated again on the read path so a schema
        // violation can never silently cross the store boundary.
        validate_payload(&payload.keywords, &payload.title)?;

        Ok(payload)
    }
}

impl DocumentStore for RedbStore {
    // =========================================================================
    // Lifecycle
    // =========================================================================

    fn metadata(&self) -> &StoreMetadata {
        &self.metadata
    }

    #[instrument(skip(self))]
    fn close(self: Box<Self>) -> Result<()> {
        info!("Closing document store");

        // redb flushes all data durably on drop. Since `Database::drop` is
        // infallible, this method currently always returns Ok(()). The Result
        // return type is retained for API forward-compatibility if a future
        // storage backend can report flush errors.
        drop(self.db);

        info!("Document store closed");
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(&self.path)
    }

    // =========================================================================
    // Collection Operations
    // =========================================================================

    fn exists(&self, collection: &str) -> Result<bool> {
        Ok(self.collection(collection)?.is_some())
    }

    fn create_if_absent(
        &self,
        collection: &str,
        dimension: usize,
        metric: DistanceMetric,
    ) -> Result<bool> {
        if dimension == 0 {
            return Err(ValidationError::invalid_field("dimension", "must be non-zero").into());
        }

        let mut map = self
            .collections
            .write()
            .map_err(|_| StorageError::unavailable("Collection map lock poisoned"))?;

        if let Some(state) = map.get(collection) {
            if state.record.dimension != dimension {
                return Err(
                    ValidationError::dimension_mismatch(state.record.dimension, dimension).into(),
                );
            }
            debug!(collection = collection, "Collection already exists");
            return Ok(false);
        }

        let record = CollectionRecord::new(collection, dimension, metric);
        let bytes = bincode::serialize(&record)
            .map_err(|e| StorageError::serialization(e.to_string()))?;

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut table = write_txn.open_table(COLLECTIONS_TABLE)?;
            table.insert(collection, bytes.as_slice())?;
        }
        write_txn.commit().map_err(StorageError::from)?;

        let index = HnswIndex::new(dimension, &self.hnsw);
        map.insert(
            collection.to_string(),
            Arc::new(CollectionState {
                record,
                index,
                keywords: RwLock::new(Vec::new()),
            }),
        );

        info!(
            collection = collection,
            dimension = dimension,
            metric = metric.as_str(),
            "Collection created"
        );
        Ok(true)
    }

    fn is_empty(&self, collection: &str) -> bool {
        match self.count(collection) {
            Ok(n) => n == 0,
            Err(e) if e.is_not_found() => {
                debug!(collection = collection, "Collection missing, treating as empty");
                true
            }
            Err(e) => {
                // Fail open: report empty and let the write path surface
                // the real error where it is actionable.
                warn!(collection = collection, error = %e, "Emptiness check failed, treating as empty");
                true
            }
        }
    }

    fn count(&self, collection: &str) -> Result<usize> {
        let state = self
            .collection(collection)?
            .ok_or_else(|| NotFoundError::Collection(collection.to_string()))?;
        Ok(state.index.len())
    }

    fn dimension(&self, collection: &str) -> Result<usize> {
        let state = self
            .collection(collection)?
            .ok_or_else(|| NotFoundError::Collection(collection.to_string()))?;
        Ok(state.record.dimension)
    }

    // =========================================================================
    // Document Operations
    // =========================================================================

    #[instrument(skip(self, documents), fields(collection = collection, count = documents.len()))]
    fn upsert(&self, collection: &str, documents: Vec<Document>) -> Result<()> {
        let state = self
            .collection(collection)?
            .ok_or_else(|| NotFoundError::Collection(collection.to_string()))?;

        // Validate the whole batch before writing anything: one bad
        // document rejects the batch.
        for doc in &documents {
            validate_document(doc, state.record.dimension)?;
        }

        if documents.is_empty() {
            return Ok(());
        }

        let mut parts = Vec::with_capacity(documents.len());
        for doc in documents {
            let (id, vector, payload) = doc.into_parts();
            let payload_bytes = bincode::serialize(&payload)
                .map_err(|e| StorageError::serialization(e.to_string()))?;
            parts.push((id, vector, payload.keywords, payload_bytes));
        }

        let write_txn = self.db.begin_write().map_err(StorageError::from)?;
        {
            let mut doc_table = write_txn.open_table(DOCUMENTS_TABLE)?;
            let mut emb_table = write_txn.open_table(EMBEDDINGS_TABLE)?;
            for (id, vector, _, payload_bytes) in &parts {
                doc_table.insert((collection, id.as_u64()), payload_bytes.as_slice())?;
                emb_table.insert(
                    (collection, id.as_u64()),
                    encode_embedding(vector).as_slice(),
                )?;
            }
        }
        write_txn.commit().map_err(StorageError::from)?;

        // Update derived state only after the commit succeeded, so the
        // index never references rows that didn't make it to disk.
        {
            let mut keywords = state
                .keywords
                .write()
                .map_err(|_| StorageError::unavailable("Keyword cache lock poisoned"))?;
            for (id, _, kws, _) in &parts {
                let idx = id.as_usize();
                if idx >= keywords.len() {
                    keywords.resize(idx + 1, Vec::new());
                }
                keywords[idx] = kws.clone();
            }
        }

        let batch: Vec<(&Vec<f32>, usize)> = parts
            .iter()
            .map(|(id, vector, _, _)| (vector, id.as_usize()))
            .collect();
        state.index.insert_batch(&batch)?;

        debug!(documents = parts.len(), "Documents upserted");
        Ok(())
    }

    #[instrument(skip(self, vector, filter), fields(collection = collection, limit = limit))]
    fn query(
        &self,
        collection: &str,
        vector: &[f32],
        filter: &KeywordFilter,
        limit: usize,
    ) -> Result<Vec<ScoredDocument>> {
        let Some(state) = self.collection(collection)? else {
            debug!(collection = collection, "Query against missing collection");
            return Ok(Vec::new());
        };

        if vector.len() != state.record.dimension {
            return Err(
                ValidationError::dimension_mismatch(state.record.dimension, vector.len()).into(),
            );
        }

        if limit == 0 || state.index.is_empty() {
            return Ok(Vec::new());
        }

        let ef_search = self.hnsw.ef_search;

        // Two-tier retrieval: documents sharing a filter keyword first
        // (by ascending distance), then the nearest non-matching documents
        // filling the remaining slots. An empty filter collapses to pure
        // similarity search.
        let mut hits: Vec<(usize, f32)> = if filter.is_empty() {
            state.index.search(vector, limit, ef_search)?
        } else {
            let keywords = state
                .keywords
                .read()
                .map_err(|_| StorageError::unavailable("Keyword cache lock poisoned"))?;

            let predicate = |id: &usize| -> bool {
                keywords.get(*id).is_some_and(|kws| filter.matches(kws))
            };
            let matched = state
                .index
                .search_filtered(vector, limit, ef_search, &predicate)?;

            let mut hits = matched;
            if hits.len() < limit {
                let seen: HashSet<usize> = hits.iter().map(|(id, _)| *id).collect();
                let fill = state
                    .index
                    .search(vector, limit + seen.len(), ef_search)?;
                for (id, dist) in fill {
                    if hits.len() == limit {
                        break;
                    }
                    if !seen.contains(&id) {
                        hits.push((id, dist));
                    }
                }
            }
            hits
        };

        hits.truncate(limit);

        let read_txn = self.db.begin_read().map_err(StorageError::from)?;
        let doc_table = read_txn.open_table(DOCUMENTS_TABLE)?;

        let mut results = Vec::with_capacity(hits.len());
        for (id, distance) in hits {
            let payload = Self::read_payload(&doc_table, collection, id as u64)?;
            results.push(ScoredDocument {
                id: DocId::new(id as u64),
                score: 1.0 - distance,
                title: payload.title,
                keywords: payload.keywords,
            });
        }

        debug!(results = results.len(), "Query complete");
        Ok(results)
    }
}

// RedbStore is auto Send + Sync: Database, StoreMetadata, PathBuf, and the
// RwLock-guarded maps are all Send + Sync.

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn default_config() -> Config {
        Config::default()
    }

    fn make_embedding(seed: f32, dim: usize) -> Vec<f32> {
        (0..dim).map(|i| (seed * 0.1 + i as f32 * 0.01).sin()).collect()
    }

    fn make_document(id: u64, dim: usize, keywords: &[&str]) -> Document {
        Document::new(
            id,
            make_embedding(id as f32, dim),
            keywords.iter().map(|s| s.to_string()).collect(),
            format!("title {}", id),
        )
    }

    #[test]
    fn test_open_creates_new_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        assert!(!path.exists());

        let store = RedbStore::open(&path, &default_config()).unwrap();

        assert!(path.exists());
        assert_eq!(store.metadata().schema_version, SCHEMA_VERSION);

        Box::new(store).close().unwrap();
    }

    #[test]
    fn test_open_existing_store() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        let store = RedbStore::open(&path, &default_config()).unwrap();
        let created_at = store.metadata().created_at;
        Box::new(store).close().unwrap();

        std::thread::sleep(std::time::Duration::from_millis(10));
        let store = RedbStore::open(&path, &default_config()).unwrap();

        // created_at should be preserved, last_opened_at updated
        assert_eq!(store.metadata().created_at, created_at);
        assert!(store.metadata().last_opened_at > created_at);

        Box::new(store).close().unwrap();
    }

    #[test]
    fn test_create_if_absent_is_idempotent() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();

        assert!(store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap());
        assert!(!store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap());
        assert!(store.exists("news").unwrap());
        assert_eq!(store.dimension("news").unwrap(), 8);
    }

    #[test]
    fn test_create_if_absent_rejects_dimension_change() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();

        store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap();
        let err = store
            .create_if_absent("news", 16, DistanceMetric::Cosine)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_is_empty_fails_open_for_missing_collection() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();

        assert!(store.is_empty("nonexistent"));
    }

    #[test]
    fn test_upsert_and_query() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();
        store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap();

        let docs: Vec<Document> = (0..10)
            .map(|id| make_document(id, 8, &["python"]))
            .collect();
        store.upsert("news", docs).unwrap();

        assert_eq!(store.count("news").unwrap(), 10);
        assert!(!store.is_empty("news"));

        let query = make_embedding(3.0, 8);
        let results = store
            .query("news", &query, &KeywordFilter::default(), 5)
            .unwrap();
        assert_eq!(results.len(), 5);
        assert_eq!(results[0].id, DocId::new(3));
        assert_eq!(results[0].title, "title 3");
        // Scores descend within the tier.
        for pair in results.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_query_prefers_keyword_matches() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();
        store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap();

        // Even ids tagged "python", odd ids tagged "rust".
        let docs: Vec<Document> = (0..10)
            .map(|id| {
                let kw = if id % 2 == 0 { "python" } else { "rust" };
                make_document(id, 8, &[kw])
            })
            .collect();
        store.upsert("news", docs).unwrap();

        let query = make_embedding(0.0, 8);
        let filter = KeywordFilter::new(vec!["rust".into()]);
        let results = store.query("news", &query, &filter, 6).unwrap();
        assert_eq!(results.len(), 6);

        // The matching tier (5 odd ids) comes first, then one fill document.
        for doc in &results[..5] {
            assert_eq!(doc.keywords, vec!["rust".to_string()]);
        }
        assert_eq!(results[5].keywords, vec!["python".to_string()]);
    }

    #[test]
    fn test_query_missing_collection_returns_empty() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();

        let results = store
            .query("nonexistent", &make_embedding(0.0, 8), &KeywordFilter::default(), 5)
            .unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn test_query_dimension_mismatch_is_error() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();
        store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap();

        let err = store
            .query("news", &make_embedding(0.0, 4), &KeywordFilter::default(), 5)
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_upsert_rejects_bad_batch_atomically() {
        let dir = tempdir().unwrap();
        let store =
            RedbStore::open(dir.path().join("test.db"), &default_config()).unwrap();
        store
            .create_if_absent("news", 8, DistanceMetric::Cosine)
            .unwrap();

        let mut docs = vec![make_document(0, 8, &["python"])];
        docs.push(make_document(1, 4, &["python"])); // wrong dimension

        let err = store.upsert("news", docs).unwrap_err();
        assert!(err.is_validation());
        // Nothing from the batch was written.
        assert_eq!(store.count("news").unwrap(), 0);
    }

    #[test]
    fn test_reopen_rebuilds_index_from_disk() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.db");

        {
            let store = RedbStore::open(&path, &default_config()).unwrap();
            store
                .create_if_absent("news", 8, DistanceMetric::Cosine)
                .unwrap();
            let docs: Vec<Document> = (0..10)
                .map(|id| make_document(id, 8, &["python"]))
                .collect();
            store.upsert("news", docs).unwrap();
            Box::new(store).close().unwrap();
        }

        let store = RedbStore::open(&path, &default_config()).unwrap();
        assert_eq!(store.count("news").unwrap(), 10);

        let results = store
            .query("news", &make_embedding(7.0, 8), &KeywordFilter::default(), 3)
            .unwrap();
        assert_eq!(results[0].id, DocId::new(7));

        // Keyword cache was rebuilt too.
        let filter = KeywordFilter::new(vec!["python".into()]);
        let filtered = store
            .query("news", &make_embedding(7.0, 8), &filter, 3)
            .unwrap();
        assert_eq!(filtered.len(), 3);
    }
}
