//! Persistent store for the CRMPro mock backend.
//!
//! The whole mock database is one JSON document kept under a fixed key in a
//! string key-value backend, the same shape a browser keeps in local storage.
//!
//! # Architecture
//!
//! - [`StorageBackend`] abstracts the key-value medium ([`MemoryBackend`],
//!   [`FileBackend`])
//! - [`DocumentStore`] loads and saves the whole [`StoreDocument`]; an absent
//!   or corrupted document is replaced by the [`seed`] fixtures
//! - Writes are whole-document read-modify-write ([`DocumentStore::mutate`]);
//!   there are no partial writes and no transactions

mod backend;
mod document;
mod error;
pub mod seed;
mod store;

pub use backend::{FileBackend, MemoryBackend, StorageBackend};
pub use document::{Collection, Singleton, StoreDocument};
pub use error::{StoreError, StoreResult};
pub use store::{DocumentStore, DEFAULT_STORAGE_KEY};
