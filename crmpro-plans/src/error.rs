//! Plan lookup errors.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("unknown plan: {0}")]
    UnknownPlan(String),

    #[error("unknown feature: {0}")]
    UnknownFeature(String),
}

pub type PlanResult<T> = Result<T, PlanError>;
