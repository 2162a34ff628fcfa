use super::{QueryContext, Target};
use crate::filter::{apply_order, matches_all, parse_columns, project, Filter, Order, SortDirection, Window};
use crate::response::Response;
use crate::table::TableKind;
use crmpro_types::Record;
use std::future::{ready, IntoFuture, Ready};
use tracing::{debug, error};

/// `from(table).select(columns)` with optional filters, ordering and window.
#[derive(Debug, Clone)]
pub struct SelectBuilder {
    ctx: QueryContext,
    target: Target,
    columns: Option<Vec<String>>,
    filters: Vec<Filter>,
    orders: Vec<Order>,
    window: Option<Window>,
}

impl SelectBuilder {
    pub(crate) fn new(ctx: QueryContext, target: Target, columns: &str) -> Self {
        Self {
            ctx,
            target,
            columns: parse_columns(columns),
            filters: Vec::new(),
            orders: Vec::new(),
            window: None,
        }
    }

    filter_methods!();

    /// Sort by `column`. Later calls add tie-breakers.
    pub fn order(mut self, column: &str, ascending: bool) -> Self {
        let direction = if ascending {
            SortDirection::Asc
        } else {
            SortDirection::Desc
        };
        self.orders.push(Order {
            column: column.to_string(),
            direction,
        });
        self
    }

    /// Keep at most `count` rows, after sorting.
    pub fn limit(mut self, count: usize) -> Self {
        self.window = Some(Window::Limit(count));
        self
    }

    /// Keep rows `from..=to` (zero-based, inclusive), after sorting.
    pub fn range(mut self, from: usize, to: usize) -> Self {
        self.window = Some(Window::Range { from, to });
        self
    }

    /// First row, or `None`. On singleton tables, the singleton regardless of filters.
    pub async fn single(self) -> Response<Record> {
        self.execute_single()
    }

    /// Same contract as [`SelectBuilder::single`].
    pub async fn maybe_single(self) -> Response<Record> {
        self.execute_single()
    }

    fn execute_single(&self) -> Response<Record> {
        let response = self.execute();
        Response {
            data: response.data.and_then(|rows| rows.into_iter().next()),
            error: response.error,
        }
    }

    fn execute(&self) -> Response<Vec<Record>> {
        let table = match &self.target {
            Target::Known(table) => *table,
            Target::Unknown(_) => return Response::ok(Vec::new()),
        };

        let document = match self.ctx.store.load() {
            Ok(document) => document,
            Err(e) => {
                error!(%table, error = %e, "select failed to load store");
                return Response::err(e);
            }
        };

        let rows = match table.kind() {
            TableKind::Singleton(singleton) => {
                document.singleton(singleton).cloned().into_iter().collect()
            }
            TableKind::Collection(collection) => {
                let mut rows: Vec<Record> = document
                    .collection(collection)
                    .iter()
                    .filter(|row| matches_all(&self.filters, row))
                    .cloned()
                    .collect();
                apply_order(&mut rows, &self.orders);
                match self.window {
                    Some(window) => window.apply(rows),
                    None => rows,
                }
            }
        };

        debug!(%table, rows = rows.len(), "select");
        Response::ok(project(rows, self.columns.as_deref()))
    }
}

impl IntoFuture for SelectBuilder {
    type Output = Response<Vec<Record>>;
    type IntoFuture = Ready<Self::Output>;

    fn into_future(self) -> Self::IntoFuture {
        ready(self.execute())
    }
}
