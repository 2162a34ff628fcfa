//! Client error types.

use crmpro_auth::AuthError;
use crmpro_store::StoreError;
use thiserror::Error;

pub type ClientResult<T> = Result<T, ClientError>;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("remote backend at {url} is not available in this build")]
    RemoteUnsupported { url: String },

    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("auth error: {0}")]
    Auth(#[from] AuthError),
}
