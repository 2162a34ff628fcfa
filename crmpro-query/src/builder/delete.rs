use super::{QueryContext, Target};
use crate::filter::{matches_all, Filter};
use crate::response::Response;
use crate::table::TableKind;
use crmpro_types::Record;
use std::future::{ready, IntoFuture, Ready};
use tracing::{debug, error, warn};

/// `from(table).delete()`. Removes every row matching all filters and keeps
/// the relative order of the rest. Singleton tables are never deleted.
#[derive(Debug, Clone)]
pub struct DeleteBuilder {
    ctx: QueryContext,
    target: Target,
    filters: Vec<Filter>,
}

impl DeleteBuilder {
    pub(crate) fn new(ctx: QueryContext, target: Target) -> Self {
        Self {
            ctx,
            target,
            filters: Vec::new(),
        }
    }

    filter_methods!();

    /// Return the removed rows.
    pub fn select(self) -> DeleteSelect {
        DeleteSelect { delete: self }
    }

    fn execute(self) -> Response<Vec<Record>> {
        let table = match self.target {
            Target::Known(table) => table,
            Target::Unknown(_) => return Response::ok(Vec::new()),
        };
        let collection = match table.kind() {
            TableKind::Collection(collection) => collection,
            TableKind::Singleton(_) => {
                warn!(%table, "singleton tables cannot be deleted");
                return Response::ok(Vec::new());
            }
        };
        if self.filters.is_empty() {
            warn!(%table, "delete without filters ignored");
            return Response::ok(Vec::new());
        }

        let filters = self.filters;
        let result = self.ctx.store.mutate(move |document| {
            let rows = document.collection_mut(collection);
            let (removed, kept): (Vec<Record>, Vec<Record>) = std::mem::take(rows)
                .into_iter()
                .partition(|row| matches_all(&filters, row));
            *rows = kept;
            removed
        });

        match result {
            Ok(removed) => {
                debug!(%table, removed = removed.len(), "delete");
                Response::ok(removed)
            }
            Err(e) => {
                error!(%table, error = %e, "delete failed to save store");
                Response::err(e)
            }
        }
    }
}

impl IntoFuture for DeleteBuilder {
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

/// `delete()...select()`.
#[derive(Debug, Clone)]
pub struct DeleteSelect {
    delete: DeleteBuilder,
}

impl IntoFuture for DeleteSelect {
    type Output = Response<Vec<Record>>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        ready(self.delete.execute())
    }
}
