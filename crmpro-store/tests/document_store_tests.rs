use chrono::NaiveDate;
use crmpro_store::seed::default_document;
use crmpro_store::{
    Collection, DocumentStore, FileBackend, MemoryBackend, StorageBackend, StoreDocument,
    StoreError, DEFAULT_STORAGE_KEY,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tempfile::tempdir;

fn fixed_seed() -> StoreDocument {
    default_document(NaiveDate::from_ymd_opt(2025, 3, 1).unwrap())
}

fn memory_store() -> (Arc<MemoryBackend>, DocumentStore) {
    let backend = Arc::new(MemoryBackend::new());
    let store = DocumentStore::with_seed(backend.clone(), DEFAULT_STORAGE_KEY, fixed_seed);
    (backend, store)
}

// ── Reseeding ────────────────────────────────────────────────────

#[test]
fn missing_document_is_seeded_and_persisted() {
    let (backend, store) = memory_store();
    assert!(backend.get_item(DEFAULT_STORAGE_KEY).unwrap().is_none());

    let doc = store.load().unwrap();
    assert_eq!(doc, fixed_seed());
    assert!(backend.get_item(DEFAULT_STORAGE_KEY).unwrap().is_some());
}

#[test]
fn corrupted_document_is_reseeded() {
    let (backend, store) = memory_store();
    backend.set_item(DEFAULT_STORAGE_KEY, "{not json").unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc, fixed_seed());

    let raw = backend.get_item(DEFAULT_STORAGE_KEY).unwrap().unwrap();
    assert!(serde_json::from_str::<StoreDocument>(&raw).is_ok());
}

#[test]
fn reseed_is_idempotent() {
    let (backend, store) = memory_store();
    backend.set_item(DEFAULT_STORAGE_KEY, "garbage").unwrap();

    let first = store.load().unwrap();
    let raw_after_first = backend.get_item(DEFAULT_STORAGE_KEY).unwrap();
    let second = store.load().unwrap();
    let raw_after_second = backend.get_item(DEFAULT_STORAGE_KEY).unwrap();

    assert_eq!(first, second);
    assert_eq!(raw_after_first, raw_after_second);
}

#[test]
fn default_seed_is_populated() {
    let store = DocumentStore::in_memory();
    let doc = store.load().unwrap();
    assert!(!doc.products.is_empty());
    assert!(!doc.customers.is_empty());
    assert!(!doc.deals.is_empty());
    assert!(!doc.tasks.is_empty());
    assert!(!doc.sales.is_empty());
    assert!(!doc.recommendations.is_empty());
    assert!(doc.session.is_none());
}

// ── Save / mutate ────────────────────────────────────────────────

#[test]
fn save_is_visible_to_next_load() {
    let (_backend, store) = memory_store();
    let mut doc = store.load().unwrap();
    doc.products.clear();
    store.save(&doc).unwrap();

    assert!(store.load().unwrap().products.is_empty());
}

#[test]
fn mutate_persists_changes_and_returns_value() {
    let (_backend, store) = memory_store();
    let len = store
        .mutate(|doc| {
            doc.tasks.truncate(1);
            doc.tasks.len()
        })
        .unwrap();

    assert_eq!(len, 1);
    assert_eq!(store.load().unwrap().collection(Collection::Tasks).len(), 1);
}

#[test]
fn last_writer_wins() {
    let (_backend, store) = memory_store();
    let mut a = store.load().unwrap();
    let mut b = a.clone();

    a.customers.truncate(1);
    b.customers.truncate(2);
    store.save(&a).unwrap();
    store.save(&b).unwrap();

    assert_eq!(store.load().unwrap().customers.len(), 2);
}

#[test]
fn reset_restores_seed() {
    let (_backend, store) = memory_store();
    store.mutate(|doc| doc.products.clear()).unwrap();

    let doc = store.reset().unwrap();
    assert_eq!(doc, fixed_seed());
    assert_eq!(store.load().unwrap(), fixed_seed());
}

#[test]
fn partial_document_fills_defaults() {
    let (backend, store) = memory_store();
    backend
        .set_item(DEFAULT_STORAGE_KEY, r#"{"products":[{"id":"p1"}]}"#)
        .unwrap();

    let doc = store.load().unwrap();
    assert_eq!(doc.products.len(), 1);
    assert_eq!(doc.products[0]["id"], json!("p1"));
    assert!(doc.customers.is_empty());
}

// ── File backend ─────────────────────────────────────────────────

#[test]
fn file_backend_roundtrip() {
    let dir = tempdir().unwrap();
    let backend = Arc::new(FileBackend::new(dir.path().join("nested")));
    let store = DocumentStore::with_seed(backend.clone(), "crm_data", fixed_seed);

    store.mutate(|doc| doc.deals.truncate(2)).unwrap();
    assert!(dir.path().join("nested").join("crm_data.json").exists());

    let reopened = DocumentStore::with_seed(backend, "crm_data", fixed_seed);
    assert_eq!(reopened.load().unwrap().deals.len(), 2);
}

#[test]
fn file_backend_corruption_reseeds() {
    let dir = tempdir().unwrap();
    std::fs::write(dir.path().join("crm_data.json"), "[1, 2").unwrap();

    let store = DocumentStore::with_seed(Arc::new(FileBackend::new(dir.path())), "crm_data", fixed_seed);
    assert_eq!(store.load().unwrap(), fixed_seed());
}

#[test]
fn file_backend_remove_missing_is_ok() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path());
    backend.remove_item("nothing_here").unwrap();
}

#[test]
fn file_backend_rejects_path_keys() {
    let dir = tempdir().unwrap();
    let backend = FileBackend::new(dir.path());
    let err = backend.set_item("../escape", "{}").unwrap_err();
    assert!(matches!(err, StoreError::InvalidKey(_)));
}
