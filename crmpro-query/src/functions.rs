//! Emulated edge functions.

use crate::builder::QueryContext;
use crate::response::Response;
use serde_json::{json, Value};
use tracing::{debug, error, warn};

/// Name of the only function the mock answers.
pub const AI_RECOMMENDATIONS: &str = "ai-recommendations";

/// `functions()` handle. Only `ai-recommendations` is emulated; it answers
/// from the stored recommendations collection.
#[derive(Debug, Clone)]
pub struct FunctionsClient {
    ctx: QueryContext,
}

impl FunctionsClient {
    pub fn new(ctx: QueryContext) -> Self {
        Self { ctx }
    }

    /// Invokes `name`. Unknown functions resolve with `data: None`.
    pub async fn invoke(&self, name: &str) -> Response<Value> {
        if name != AI_RECOMMENDATIONS {
            warn!(function = name, "no mock for function");
            return Response::empty();
        }
        match self.ctx.store().load() {
            Ok(document) => {
                debug!(function = name, count = document.recommendations.len(), "invoke");
                Response::ok(json!({ "recommendations": document.recommendations }))
            }
            Err(e) => {
                error!(function = name, error = %e, "invoke failed to load store");
                Response::err(e)
            }
        }
    }
}
