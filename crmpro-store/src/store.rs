//! The document store: whole-document load and save over a backend.

use crate::backend::{MemoryBackend, StorageBackend};
use crate::document::StoreDocument;
use crate::error::StoreResult;
use crate::seed::default_document;
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

/// Storage key used when none is configured.
pub const DEFAULT_STORAGE_KEY: &str = "cloud_industrie_data";

type SeedFn = Arc<dyn Fn() -> StoreDocument + Send + Sync>;

/// Reads and writes the single JSON document that backs the mock database.
///
/// There is no cache: every `load` goes to the backend, so the backend is the
/// only source of truth. `save` overwrites unconditionally.
pub struct DocumentStore {
    backend: Arc<dyn StorageBackend>,
    key: String,
    seed: SeedFn,
    write_lock: Mutex<()>,
}

impl DocumentStore {
    /// Creates a store over `backend` under `key`, seeded with the default fixtures.
    pub fn new(backend: Arc<dyn StorageBackend>, key: impl Into<String>) -> Self {
        Self::with_seed(backend, key, || {
            default_document(chrono::Utc::now().date_naive())
        })
    }

    /// Creates a store with a custom seed document.
    pub fn with_seed(
        backend: Arc<dyn StorageBackend>,
        key: impl Into<String>,
        seed: impl Fn() -> StoreDocument + Send + Sync + 'static,
    ) -> Self {
        Self {
            backend,
            key: key.into(),
            seed: Arc::new(seed),
            write_lock: Mutex::new(()),
        }
    }

    /// In-memory store under the default key (for testing).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryBackend::new()), DEFAULT_STORAGE_KEY)
    }

    /// Storage key of the document.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Returns the current document, reseeding if it is absent or unparsable.
    pub fn load(&self) -> StoreResult<StoreDocument> {
        match self.backend.get_item(&self.key)? {
            Some(raw) => match serde_json::from_str::<StoreDocument>(&raw) {
                Ok(document) => return Ok(document),
                Err(e) => {
                    warn!(key = %self.key, error = %e, "stored document is corrupted, reseeding");
                }
            },
            None => debug!(key = %self.key, "no stored document, seeding"),
        }
        self.reseed()
    }

    /// Serializes and overwrites the stored document.
    pub fn save(&self, document: &StoreDocument) -> StoreResult<()> {
        let raw = serde_json::to_string(document)?;
        self.backend.set_item(&self.key, &raw)
    }

    /// Load, apply `f`, save. Concurrent `mutate` calls on this store are
    /// serialized; the document is saved even if `f` changed nothing.
    pub fn mutate<R>(&self, f: impl FnOnce(&mut StoreDocument) -> R) -> StoreResult<R> {
        let _guard = self.lock_writes();
        let mut document = self.load()?;
        let result = f(&mut document);
        self.save(&document)?;
        Ok(result)
    }

    /// Discards the stored document and writes a fresh seed.
    pub fn reset(&self) -> StoreResult<StoreDocument> {
        let _guard = self.lock_writes();
        self.backend.remove_item(&self.key)?;
        info!(key = %self.key, "store reset to seed data");
        self.reseed()
    }

    fn reseed(&self) -> StoreResult<StoreDocument> {
        let document = (self.seed)();
        self.save(&document)?;
        Ok(document)
    }

    fn lock_writes(&self) -> MutexGuard<'_, ()> {
        self.write_lock.lock().unwrap_or_else(|poisoned| {
            warn!("[DocumentStore] recovering from poisoned write lock");
            poisoned.into_inner()
        })
    }
}

impl std::fmt::Debug for DocumentStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentStore").field("key", &self.key).finish_non_exhaustive()
    }
}
