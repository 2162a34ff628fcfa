//! Errors carried in query responses.

use crmpro_store::StoreError;
use serde::Serialize;
use thiserror::Error;

/// The `error` half of a [`crate::Response`].
///
/// Emulated queries never fail on their own: a miss is `data: None`. These
/// variants only surface conditions a hosted database would also report.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "snake_case")]
pub enum ResponseError {
    /// The storage backend failed to read or write the document.
    #[error("storage error: {0}")]
    Storage(String),

    /// An insert or update payload did not serialize to JSON objects.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),
}

impl From<StoreError> for ResponseError {
    fn from(e: StoreError) -> Self {
        Self::Storage(e.to_string())
    }
}

/// Unknown table name passed to [`crate::Table`]'s `FromStr`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown table: {0}")]
pub struct UnknownTable(pub String);
