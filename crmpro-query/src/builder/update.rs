use super::{payload_records, QueryContext, Target};
use crate::error::ResponseError;
use crate::filter::{matches_all, Filter};
use crate::response::Response;
use crate::table::TableKind;
use crmpro_types::Record;
use serde::Serialize;
use serde_json::Value;
use std::future::{ready, IntoFuture, Ready};
use std::sync::Arc;
use tracing::{debug, error, warn};

/// `from(table).update(patch)`.
///
/// On collections the patch is merged into the first row matching the
/// filters; with no filters nothing is updated. Singletons are updated
/// whenever present.
#[derive(Debug, Clone)]
pub struct UpdateBuilder {
    ctx: QueryContext,
    target: Target,
    patch: Result<Record, String>,
    filters: Vec<Filter>,
}

impl UpdateBuilder {
    pub(crate) fn new<T: Serialize + ?Sized>(ctx: QueryContext, target: Target, patch: &T) -> Self {
        let patch = payload_records(patch).and_then(|records| match <[Record; 1]>::try_from(records) {
            Ok([record]) => Ok(record),
            Err(records) => Err(format!("update expects one object, got {}", records.len())),
        });
        Self {
            ctx,
            target,
            patch,
            filters: Vec::new(),
        }
    }

    filter_methods!();

    /// Return the updated row.
    pub fn select(self) -> UpdateSelect {
        UpdateSelect { update: self }
    }

    fn execute(self) -> Response<Record> {
        let mut patch = match self.patch {
            Ok(patch) => patch,
            Err(message) => {
                warn!(error = %message, "rejecting update payload");
                return Response::err(ResponseError::InvalidPayload(message));
            }
        };
        let table = match self.target {
            Target::Known(table) => table,
            Target::Unknown(_) => return Response::empty(),
        };
        let kind = table.kind();
        if matches!(kind, TableKind::Collection(_)) && self.filters.is_empty() {
            warn!(%table, "update without filters ignored");
            return Response::empty();
        }

        // Identity and creation time are owned by the store.
        patch.remove("id");
        patch.remove("created_at");

        let clock = Arc::clone(&self.ctx.clock);
        let filters = self.filters;
        let result = self.ctx.store.mutate(move |document| -> Option<Record> {
            let row = match kind {
                TableKind::Singleton(singleton) => document.singleton_mut(singleton).as_mut()?,
                TableKind::Collection(collection) => document
                    .collection_mut(collection)
                    .iter_mut()
                    .find(|row| matches_all(&filters, row))?,
            };
            let previous = row
                .get("updated_at")
                .and_then(Value::as_str)
                .map(str::to_string);
            row.extend(patch);
            row.insert(
                "updated_at".into(),
                Value::String(clock.timestamp_after(previous.as_deref())),
            );
            Some(row.clone())
        });

        match result {
            Ok(updated) => {
                debug!(%table, matched = updated.is_some(), "update");
                Response::from_option(updated)
            }
            Err(e) => {
                error!(%table, error = %e, "update failed to save store");
                Response::err(e)
            }
        }
    }
}

impl IntoFuture for UpdateBuilder {
    type Output = Response<Record>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let response = self.execute();
        ready(Response {
            data: None,
            error: response.error,
        })
    }
}

/// `update(patch)...select()`.
#[derive(Debug, Clone)]
pub struct UpdateSelect {
    update: UpdateBuilder,
}

impl UpdateSelect {
    /// The updated row, or `None` when nothing matched.
    pub async fn single(self) -> Response<Record> {
        self.update.execute()
    }
}

impl IntoFuture for UpdateSelect {
    type Output = Response<Vec<Record>>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let Response { data, error } = self.update.execute();
        let data = error.is_none().then(|| data.into_iter().collect());
        ready(Response { data, error })
    }
}
