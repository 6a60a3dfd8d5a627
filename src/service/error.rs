//! Outcome taxonomy of resource service operations.

use thiserror::Error;

use crate::domain::{RecordId, ValidationError};
use crate::infrastructure::RepositoryError;

/// Failure of a resource service operation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ServiceError {
    /// Input failed one or more field constraints.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// No record with this id exists (never created, or already deleted).
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// The record store could not complete the operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(#[from] RepositoryError),
}

impl ServiceError {
    /// Creates a `NotFound` for an id of record kind `kind`.
    #[must_use]
    pub fn not_found(kind: &'static str, id: &RecordId) -> Self {
        Self::NotFound {
            kind,
            id: id.to_string(),
        }
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}
