//! Workflow error types.

use entities::TaskStatus;
use org_store::StoreError;
use thiserror::Error;

/// Errors returned by engine operations.
///
/// `NotFound`, `Forbidden`, `Conflict`/`InvalidTransition` and `Invalid`
/// are recoverable-by-caller outcomes. Only `Store` carries a genuine
/// infrastructure failure and propagates unchanged.
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// Referenced user/project/team/task absent.
    #[error("{entity_type} not found: {id}")]
    NotFound {
        entity_type: &'static str,
        id: String,
    },

    /// Authorization predicate false or actor role mismatch.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Concurrent-write conflict or otherwise unsatisfiable precondition.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid source state for the requested transition.
    #[error("Invalid status transition from {from:?} to {to:?}")]
    InvalidTransition { from: TaskStatus, to: TaskStatus },

    /// Malformed input, e.g. a missing mandatory rejection reason.
    #[error("Invalid input: {0}")]
    Invalid(String),

    /// Infrastructure failure from the underlying store.
    #[error(transparent)]
    Store(StoreError),
}

impl WorkflowError {
    /// Creates a not found error.
    pub fn not_found(entity_type: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            entity_type,
            id: id.to_string(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(reason: impl Into<String>) -> Self {
        Self::Forbidden(reason.into())
    }

    /// Creates a conflict error.
    pub fn conflict(reason: impl Into<String>) -> Self {
        Self::Conflict(reason.into())
    }

    /// Creates an invalid input error.
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::Invalid(reason.into())
    }

    /// Returns true for conflict-class outcomes, including rejected
    /// status transitions.
    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_) | Self::InvalidTransition { .. })
    }
}

impl From<StoreError> for WorkflowError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { entity_type, id } => Self::NotFound { entity_type, id },
            StoreError::VersionConflict { entity_type, id } => {
                Self::Conflict(format!("{entity_type} {id} was modified concurrently"))
            }
            other => Self::Store(other),
        }
    }
}

/// Result type for engine operations.
pub type WorkflowResult<T> = Result<T, WorkflowError>;
