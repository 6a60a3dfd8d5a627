//! Record store abstraction.
//!
//! Every backend stores whole documents keyed by [`RecordId`]. Operations
//! return boxed `'static` futures so a repository can sit behind
//! `Arc<dyn RecordRepository<R>>` and be shared across request handlers.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::domain::{Record, RecordId};

// =============================================================================
// Repository Error
// =============================================================================

/// Errors that can occur during repository operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RepositoryError {
    /// Database connection or query error.
    #[error("Database error: {0}")]
    DatabaseError(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

/// Future returned by every repository operation.
pub type RepositoryFuture<T> = BoxFuture<'static, Result<T, RepositoryError>>;

// =============================================================================
// Record Repository
// =============================================================================

/// Persistent collection of one record type.
///
/// `update` is the only read-modify-write operation and must be atomic per
/// record: a concurrent update of the same id observes either the state
/// before or after this one, never a mix of both patches.
pub trait RecordRepository<R: Record>: Send + Sync {
    /// Stores a freshly created record.
    fn insert(&self, record: &R) -> RepositoryFuture<()>;

    /// Finds a record by its id.
    fn find_by_id(&self, id: &RecordId) -> RepositoryFuture<Option<R>>;

    /// Lists all records in [`Record::listing_order`].
    fn list(&self) -> RepositoryFuture<Vec<R>>;

    /// Merges `patch` into the stored record and returns the result.
    ///
    /// Returns `Ok(None)` if no record has this id.
    fn update(&self, id: &RecordId, patch: &R::Patch) -> RepositoryFuture<Option<R>>;

    /// Deletes a record. Returns `true` if a record was removed.
    fn delete(&self, id: &RecordId) -> RepositoryFuture<bool>;

    /// Returns the number of stored records.
    fn count(&self) -> RepositoryFuture<u64>;
}
