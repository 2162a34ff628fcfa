//! The `{ data, error }` envelope every query resolves to.

use crate::error::ResponseError;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Query outcome. `data` is `None` on a miss; `error` is `None` unless the
/// storage backend itself failed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Response<T> {
    pub data: Option<T>,
    pub error: Option<ResponseError>,
}

impl<T> Response<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn err(error: impl Into<ResponseError>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
        }
    }

    pub fn from_option(data: Option<T>) -> Self {
        Self { data, error: None }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Response<U> {
        Response {
            data: self.data.map(f),
            error: self.error,
        }
    }
}

impl<T: Serialize> Response<T> {
    /// Decodes `data` into a typed value, e.g. `Vec<Task>` or `Customer`.
    pub fn decode<U: DeserializeOwned>(&self) -> Result<Option<U>, serde_json::Error> {
        self.data
            .as_ref()
            .map(|data| serde_json::to_value(data).and_then(serde_json::from_value))
            .transpose()
    }
}
