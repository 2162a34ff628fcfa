//! Core types for the CRMPro mock backend.
//!
//! Everything here is a plain record: the auth identity (`User`, `Session`),
//! the per-user singletons (`Profile`, `Dashboard`, `Stats`) and the domain
//! collections (products, customers, deals, tasks, sales, recommendations).
//!
//! Collections are persisted as dynamic [`Record`] rows so the query emulator
//! can filter, sort and patch arbitrary columns. The typed structs are used to
//! build fixtures and to decode query results.

mod auth;
mod clock;
mod domain;
mod ids;
mod user_data;

pub use auth::{AuthChangeEvent, Session, User};
pub use clock::{format_timestamp, Clock};
pub use domain::{Customer, Deal, Product, Recommendation, Sale, Task};
pub use ids::new_id;
pub use user_data::{Dashboard, Profile, Stats};

/// A dynamic row: one JSON object per record.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// Serialize a typed value into a [`Record`].
///
/// Fails if the value does not serialize to a JSON object.
pub fn to_record<T: serde::Serialize>(value: &T) -> Result<Record, serde_json::Error> {
    match serde_json::to_value(value)? {
        serde_json::Value::Object(map) => Ok(map),
        _ => Err(serde::ser::Error::custom("value is not a JSON object")),
    }
}

/// Decode a [`Record`] into a typed value.
pub fn from_record<T: serde::de::DeserializeOwned>(
    record: &Record,
) -> Result<T, serde_json::Error> {
    serde_json::from_value(serde_json::Value::Object(record.clone()))
}
