use super::{payload_records, QueryContext, Target};
use crate::error::ResponseError;
use crate::response::Response;
use crate::table::TableKind;
use crmpro_store::Singleton;
use crmpro_types::{new_id, Record};
use serde::Serialize;
use serde_json::Value;
use std::future::{ready, IntoFuture, Ready};
use tracing::{debug, error, warn};

/// `from(table).insert(values)`. Awaiting it resolves with `data: None`;
/// chain [`InsertBuilder::select`] to get the stored rows back.
#[derive(Debug, Clone)]
pub struct InsertBuilder {
    ctx: QueryContext,
    target: Target,
    payload: Result<Vec<Record>, String>,
}

impl InsertBuilder {
    pub(crate) fn new<T: Serialize + ?Sized>(ctx: QueryContext, target: Target, values: &T) -> Self {
        Self {
            ctx,
            target,
            payload: payload_records(values),
        }
    }

    /// Return the inserted rows, with their generated ids and timestamps.
    pub fn select(self) -> InsertSelect {
        InsertSelect { insert: self }
    }

    fn execute(self) -> Response<Vec<Record>> {
        let records = match self.payload {
            Ok(records) => records,
            Err(message) => {
                warn!(error = %message, "rejecting insert payload");
                return Response::err(ResponseError::InvalidPayload(message));
            }
        };
        let table = match self.target {
            Target::Known(table) => table,
            Target::Unknown(_) => return Response::ok(Vec::new()),
        };
        let kind = table.kind();
        if kind == TableKind::Singleton(Singleton::Profile) {
            warn!(%table, "profiles are created on sign-in, insert ignored");
            return Response::ok(Vec::new());
        }

        let clock = &self.ctx.clock;
        let stamped: Vec<Record> = records
            .into_iter()
            .map(|mut record| {
                let now = clock.timestamp();
                record.insert("id".into(), Value::String(new_id()));
                record.insert("created_at".into(), Value::String(now.clone()));
                record.insert("updated_at".into(), Value::String(now));
                record
            })
            .collect();

        let result = self.ctx.store.mutate(|document| match kind {
            TableKind::Collection(collection) => {
                document.collection_mut(collection).extend(stamped.iter().cloned());
            }
            TableKind::Singleton(singleton) => {
                if let Some(last) = stamped.last() {
                    *document.singleton_mut(singleton) = Some(last.clone());
                }
            }
        });

        match result {
            Ok(()) => {
                debug!(%table, rows = stamped.len(), "insert");
                Response::ok(stamped)
            }
            Err(e) => {
                error!(%table, error = %e, "insert failed to save store");
                Response::err(e)
            }
        }
    }
}

impl IntoFuture for InsertBuilder {
    type Output = Response<Vec<Record>>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        let response = self.execute();
        ready(Response {
            data: None,
            error: response.error,
        })
    }
}

/// `insert(values).select()`.
#[derive(Debug, Clone)]
pub struct InsertSelect {
    insert: InsertBuilder,
}

impl InsertSelect {
    /// The first inserted row.
    pub async fn single(self) -> Response<Record> {
        let response = self.insert.execute();
        Response {
            data: response.data.and_then(|rows| rows.into_iter().next()),
            error: response.error,
        }
    }
}

impl IntoFuture for InsertSelect {
    type Output = Response<Vec<Record>>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        ready(self.insert.execute())
    }
}
