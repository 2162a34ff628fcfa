//! Query-builder emulator for the CRMPro mock backend.
//!
//! Mirrors the chained `from(table).select(..).eq(..).order(..)` surface of a
//! hosted database client, executed against the single JSON document held by
//! [`crmpro_store::DocumentStore`]. Every builder implements `IntoFuture`:
//!
//! ```ignore
//! let ctx = QueryContext::new(store, clock);
//! let recent = ctx.from("sales").select("*").gte("sale_date", "2025-06-01").order("sale_date", false).limit(10).await;
//! let task = ctx.from("tasks").insert(json!({ "title": "Call back" })).select().single().await;
//! ```
//!
//! Responses always carry `error: None` unless the storage backend fails.

mod builder;
mod error;
mod filter;
mod functions;
mod response;
mod table;

pub use builder::{
    DeleteBuilder, DeleteSelect, InsertBuilder, InsertSelect, QueryBuilder, QueryContext,
    SelectBuilder, UpdateBuilder, UpdateSelect,
};
pub use error::{ResponseError, UnknownTable};
pub use filter::{compare_values, Filter, FilterOperator, Order, SortDirection};
pub use functions::{FunctionsClient, AI_RECOMMENDATIONS};
pub use response::Response;
pub use table::{Table, TableKind};
