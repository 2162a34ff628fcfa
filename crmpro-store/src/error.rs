//! Error types for the document store.

use thiserror::Error;

/// All errors that can occur while reading or writing the store.
///
/// A document that fails to parse is not an error: the store reseeds it.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid storage key: {0}")]
    InvalidKey(String),
}

pub type StoreResult<T> = Result<T, StoreError>;
