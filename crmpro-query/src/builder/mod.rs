//! Chainable query builders.
//!
//! Each builder only records configuration. Awaiting it (every builder
//! implements `IntoFuture`) or calling an async terminal such as `single()`
//! runs the query against the store in one step.

/// Filter methods shared by select, update and delete builders.
macro_rules! filter_methods {
    () => {
        /// Keep rows where `column` equals `value` exactly.
        pub fn eq(self, column: &str, value: impl Into<serde_json::Value>) -> Self {
            self.filter(column, $crate::filter::FilterOperator::Eq, value)
        }

        pub fn neq(self, column: &str, value: impl Into<serde_json::Value>) -> Self {
            self.filter(column, $crate::filter::FilterOperator::Neq, value)
        }

        pub fn gt(self, column: &str, value: impl Into<serde_json::Value>) -> Self {
            self.filter(column, $crate::filter::FilterOperator::Gt, value)
        }

        /// Inclusive lower bound; dates and numbers compare by value.
        pub fn gte(self, column: &str, value: impl Into<serde_json::Value>) -> Self {
            self.filter(column, $crate::filter::FilterOperator::Gte, value)
        }

        pub fn lt(self, column: &str, value: impl Into<serde_json::Value>) -> Self {
            self.filter(column, $crate::filter::FilterOperator::Lt, value)
        }

        /// Inclusive upper bound; dates and numbers compare by value.
        pub fn lte(self, column: &str, value: impl Into<serde_json::Value>) -> Self {
            self.filter(column, $crate::filter::FilterOperator::Lte, value)
        }

        pub fn filter(
            mut self,
            column: &str,
            operator: $crate::filter::FilterOperator,
            value: impl Into<serde_json::Value>,
        ) -> Self {
            self.filters
                .push($crate::filter::Filter::new(column, operator, value));
            self
        }
    };
}

mod delete;
mod insert;
mod select;
mod update;

pub use delete::{DeleteBuilder, DeleteSelect};
pub use insert::{InsertBuilder, InsertSelect};
pub use select::SelectBuilder;
pub use update::{UpdateBuilder, UpdateSelect};

use crate::table::Table;
use crmpro_store::DocumentStore;
use crmpro_types::{Clock, Record};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::warn;

/// Shared handles every builder executes against.
#[derive(Debug, Clone)]
pub struct QueryContext {
    pub(crate) store: Arc<DocumentStore>,
    pub(crate) clock: Arc<Clock>,
}

impl QueryContext {
    pub fn new(store: Arc<DocumentStore>, clock: Arc<Clock>) -> Self {
        Self { store, clock }
    }

    pub fn store(&self) -> &Arc<DocumentStore> {
        &self.store
    }

    /// Starts a query on `table`.
    pub fn from(&self, table: &str) -> QueryBuilder {
        QueryBuilder::new(self.clone(), table)
    }
}

/// Resolved table, or the unknown name that was requested.
#[derive(Debug, Clone)]
pub(crate) enum Target {
    Known(Table),
    Unknown(String),
}

impl Target {
    fn parse(name: &str) -> Self {
        match name.parse::<Table>() {
            Ok(table) => Self::Known(table),
            Err(e) => {
                warn!(table = name, "{e}, returning empty result");
                Self::Unknown(name.to_string())
            }
        }
    }
}

/// Entry point returned by `from(table)`.
#[derive(Debug, Clone)]
pub struct QueryBuilder {
    ctx: QueryContext,
    target: Target,
}

impl QueryBuilder {
    pub(crate) fn new(ctx: QueryContext, table: &str) -> Self {
        Self {
            ctx,
            target: Target::parse(table),
        }
    }

    /// The resolved table, if the name was known.
    pub fn table(&self) -> Option<Table> {
        match &self.target {
            Target::Known(table) => Some(*table),
            Target::Unknown(_) => None,
        }
    }

    /// Read rows. `columns` is `*` or a comma-separated projection.
    pub fn select(self, columns: &str) -> SelectBuilder {
        SelectBuilder::new(self.ctx, self.target, columns)
    }

    /// Insert one record (a JSON object) or many (a JSON array of objects).
    pub fn insert<T: Serialize>(self, values: T) -> InsertBuilder {
        InsertBuilder::new(self.ctx, self.target, &values)
    }

    /// Shallow-merge `patch` into the first matching row.
    pub fn update<T: Serialize>(self, patch: T) -> UpdateBuilder {
        UpdateBuilder::new(self.ctx, self.target, &patch)
    }

    /// Remove every matching row.
    pub fn delete(self) -> DeleteBuilder {
        DeleteBuilder::new(self.ctx, self.target)
    }
}

/// Serialize an insert/update payload into rows: one object, or an array of
/// objects.
pub(crate) fn payload_records<T: Serialize + ?Sized>(values: &T) -> Result<Vec<Record>, String> {
    match serde_json::to_value(values).map_err(|e| e.to_string())? {
        Value::Object(record) => Ok(vec![record]),
        Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                Value::Object(record) => Ok(record),
                other => Err(format!("expected a JSON object, got {other}")),
            })
            .collect(),
        other => Err(format!("expected a JSON object or array, got {other}")),
    }
}
