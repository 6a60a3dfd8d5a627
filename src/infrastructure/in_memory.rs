//! In-memory record store.
//!
//! Records live in a `HashMap` behind `Arc<tokio::sync::RwLock<...>>`.
//! Suitable for tests and local development; contents are lost on restart.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::{Record, RecordId, sort_for_listing};
use crate::infrastructure::{RecordRepository, RepositoryError, RepositoryFuture};

/// In-memory implementation of [`RecordRepository`].
///
/// # Example
///
/// ```ignore
/// let repository = InMemoryRecordRepository::<Todo>::new();
/// repository.insert(&todo).await?;
/// let found = repository.find_by_id(&todo.id).await?;
/// ```
#[derive(Debug)]
pub struct InMemoryRecordRepository<R> {
    records: Arc<RwLock<HashMap<RecordId, R>>>,
}

impl<R> InMemoryRecordRepository<R> {
    /// Creates a new empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

impl<R> Clone for InMemoryRecordRepository<R> {
    fn clone(&self) -> Self {
        Self {
            records: Arc::clone(&self.records),
        }
    }
}

impl<R> Default for InMemoryRecordRepository<R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Record> RecordRepository<R> for InMemoryRecordRepository<R> {
    fn insert(&self, record: &R) -> RepositoryFuture<()> {
        let records = Arc::clone(&self.records);
        let record = record.clone();

        Box::pin(async move {
            let mut guard = records.write().await;
            if guard.contains_key(record.id()) {
                return Err(RepositoryError::DatabaseError(format!(
                    "duplicate {} id {}",
                    R::KIND,
                    record.id()
                )));
            }
            guard.insert(record.id().clone(), record);
            Ok(())
        })
    }

    fn find_by_id(&self, id: &RecordId) -> RepositoryFuture<Option<R>> {
        let records = Arc::clone(&self.records);
        let id = id.clone();

        Box::pin(async move { Ok(records.read().await.get(&id).cloned()) })
    }

    fn list(&self) -> RepositoryFuture<Vec<R>> {
        let records = Arc::clone(&self.records);

        Box::pin(async move {
            let mut listed: Vec<R> = records.read().await.values().cloned().collect();
            sort_for_listing(&mut listed);
            Ok(listed)
        })
    }

    fn update(&self, id: &RecordId, patch: &R::Patch) -> RepositoryFuture<Option<R>> {
        let records = Arc::clone(&self.records);
        let id = id.clone();
        let patch = patch.clone();

        Box::pin(async move {
            // Write guard spans read, merge and write.
            let mut guard = records.write().await;
            let Some(current) = guard.get(&id).cloned() else {
                return Ok(None);
            };
            let updated = current.apply(&patch);
            guard.insert(id, updated.clone());
            Ok(Some(updated))
        })
    }

    fn delete(&self, id: &RecordId) -> RepositoryFuture<bool> {
        let records = Arc::clone(&self.records);
        let id = id.clone();

        Box::pin(async move { Ok(records.write().await.remove(&id).is_some()) })
    }

    fn count(&self) -> RepositoryFuture<u64> {
        let records = Arc::clone(&self.records);

        Box::pin(async move { Ok(records.read().await.len() as u64) })
    }
}
