//! Auth simulator error types.

use crmpro_store::StoreError;
use thiserror::Error;

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// Errors surfaced by the auth simulator.
///
/// Credentials are never rejected; only the backing store can fail.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
