//! `PostgreSQL` record store.
//!
//! Records are stored as JSONB documents, one table per record type. Listing
//! sorts in Rust with [`Record::listing_order`] so that both backends return
//! identical orderings regardless of database collation.
//!
//! # Table Schema
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS todos (
//!     id UUID PRIMARY KEY,
//!     data JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//!
//! CREATE TABLE IF NOT EXISTS contacts (
//!     id UUID PRIMARY KEY,
//!     data JSONB NOT NULL,
//!     created_at TIMESTAMPTZ NOT NULL
//! );
//! ```

use std::marker::PhantomData;

use sqlx::PgPool;

use crate::domain::{Record, RecordId, sort_for_listing};
use crate::infrastructure::{RecordRepository, RepositoryError, RepositoryFuture};

fn database_error(error: &sqlx::Error) -> RepositoryError {
    RepositoryError::DatabaseError(error.to_string())
}

fn serialization_error(error: &serde_json::Error) -> RepositoryError {
    RepositoryError::SerializationError(error.to_string())
}

/// Converts a record into the JSONB document stored in `data`.
fn encode<R: Record>(record: &R) -> Result<serde_json::Value, RepositoryError> {
    serde_json::to_value(record).map_err(|error| serialization_error(&error))
}

/// Rebuilds a record from its stored JSONB document.
fn decode<R: Record>(data: serde_json::Value) -> Result<R, RepositoryError> {
    serde_json::from_value(data).map_err(|error| serialization_error(&error))
}

/// Creates the table backing `R` if it does not exist yet.
///
/// # Errors
///
/// Returns `RepositoryError::DatabaseError` if the statement fails.
pub async fn ensure_table<R: Record>(pool: &PgPool) -> Result<(), RepositoryError> {
    let statement = format!(
        "CREATE TABLE IF NOT EXISTS {} (\
             id UUID PRIMARY KEY, \
             data JSONB NOT NULL, \
             created_at TIMESTAMPTZ NOT NULL\
         )",
        R::COLLECTION
    );

    sqlx::query(&statement)
        .execute(pool)
        .await
        .map_err(|error| database_error(&error))?;

    Ok(())
}

/// `PostgreSQL` implementation of [`RecordRepository`].
pub struct PostgresRecordRepository<R> {
    pool: PgPool,
    marker: PhantomData<fn() -> R>,
}

impl<R> PostgresRecordRepository<R> {
    /// Creates a repository over the given connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self {
            pool,
            marker: PhantomData,
        }
    }
}

impl<R> Clone for PostgresRecordRepository<R> {
    fn clone(&self) -> Self {
        Self::new(self.pool.clone())
    }
}

impl<R> std::fmt::Debug for PostgresRecordRepository<R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("PostgresRecordRepository")
            .field("pool", &self.pool)
            .finish()
    }
}

impl<R: Record> RecordRepository<R> for PostgresRecordRepository<R> {
    fn insert(&self, record: &R) -> RepositoryFuture<()> {
        let pool = self.pool.clone();
        let record = record.clone();

        Box::pin(async move {
            let data = encode(&record)?;
            let statement = format!(
                "INSERT INTO {} (id, data, created_at) VALUES ($1, $2, $3)",
                R::COLLECTION
            );

            sqlx::query(&statement)
                .bind(record.id().as_uuid())
                .bind(&data)
                .bind(record.created_at().as_datetime())
                .execute(&pool)
                .await
                .map_err(|error| database_error(&error))?;

            Ok(())
        })
    }

    fn find_by_id(&self, id: &RecordId) -> RepositoryFuture<Option<R>> {
        let pool = self.pool.clone();
        let id = id.clone();

        Box::pin(async move {
            let statement = format!("SELECT data FROM {} WHERE id = $1", R::COLLECTION);
            let row: Option<(serde_json::Value,)> = sqlx::query_as(&statement)
                .bind(id.as_uuid())
                .fetch_optional(&pool)
                .await
                .map_err(|error| database_error(&error))?;

            row.map(|(data,)| decode(data)).transpose()
        })
    }

    fn list(&self) -> RepositoryFuture<Vec<R>> {
        let pool = self.pool.clone();

        Box::pin(async move {
            let statement = format!("SELECT data FROM {} ORDER BY created_at ASC", R::COLLECTION);
            let rows: Vec<(serde_json::Value,)> = sqlx::query_as(&statement)
                .fetch_all(&pool)
                .await
                .map_err(|error| database_error(&error))?;

            let mut records = rows
                .into_iter()
                .map(|(data,)| decode(data))
                .collect::<Result<Vec<R>, _>>()?;
            sort_for_listing(&mut records);

            Ok(records)
        })
    }

    fn update(&self, id: &RecordId, patch: &R::Patch) -> RepositoryFuture<Option<R>> {
        let pool = self.pool.clone();
        let id = id.clone();
        let patch = patch.clone();

        Box::pin(async move {
            let mut transaction = pool.begin().await.map_err(|error| database_error(&error))?;

            // Row lock held until commit.
            let select = format!("SELECT data FROM {} WHERE id = $1 FOR UPDATE", R::COLLECTION);
            let row: Option<(serde_json::Value,)> = sqlx::query_as(&select)
                .bind(id.as_uuid())
                .fetch_optional(&mut *transaction)
                .await
                .map_err(|error| database_error(&error))?;

            let Some((data,)) = row else {
                return Ok(None);
            };

            let current: R = decode(data)?;
            let updated = current.apply(&patch);
            let updated_data = encode(&updated)?;

            let update = format!("UPDATE {} SET data = $1 WHERE id = $2", R::COLLECTION);
            sqlx::query(&update)
                .bind(&updated_data)
                .bind(id.as_uuid())
                .execute(&mut *transaction)
                .await
                .map_err(|error| database_error(&error))?;

            transaction
                .commit()
                .await
                .map_err(|error| database_error(&error))?;

            Ok(Some(updated))
        })
    }

    fn delete(&self, id: &RecordId) -> RepositoryFuture<bool> {
        let pool = self.pool.clone();
        let id = id.clone();

        Box::pin(async move {
            let statement = format!("DELETE FROM {} WHERE id = $1", R::COLLECTION);
            let result = sqlx::query(&statement)
                .bind(id.as_uuid())
                .execute(&pool)
                .await
                .map_err(|error| database_error(&error))?;

            Ok(result.rows_affected() > 0)
        })
    }

    fn count(&self) -> RepositoryFuture<u64> {
        let pool = self.pool.clone();

        Box::pin(async move {
            let statement = format!("SELECT COUNT(*) FROM {}", R::COLLECTION);
            let (count,): (i64,) = sqlx::query_as(&statement)
                .fetch_one(&pool)
                .await
                .map_err(|error| database_error(&error))?;

            Ok(u64::try_from(count).unwrap_or_default())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Contact, ContactInput, Mode, Timestamp, Todo, TodoInput};
    use rstest::rstest;
    use serde_json::json;

    fn todo(json: serde_json::Value) -> Todo {
        let input: TodoInput = serde_json::from_value(json).unwrap();
        let patch = Todo::validate(input, Mode::Create).unwrap();
        Todo::materialize(RecordId::generate(), Timestamp::now(), &patch)
    }

    #[rstest]
    #[case(json!({ "title": "Buy milk" }))]
    #[case(json!({ "title": "File taxes", "dueDate": "2026-04-15", "priority": "urgent" }))]
    fn test_todo_document_roundtrip(#[case] input: serde_json::Value) {
        let original = todo(input);

        let data = encode(&original).unwrap();
        let restored: Todo = decode(data).unwrap();

        assert_eq!(restored, original);
    }

    #[rstest]
    fn test_todo_document_uses_wire_names() {
        let original = todo(json!({ "title": "Buy milk", "dueDate": "2026-04-15" }));

        let data = encode(&original).unwrap();

        assert_eq!(data["title"], "Buy milk");
        assert_eq!(data["status"], "pending");
        assert!(data["dueDate"].is_string());
        assert_eq!(data["imageUrl"], serde_json::Value::Null);
    }

    #[rstest]
    fn test_contact_document_roundtrip() {
        let input: ContactInput =
            serde_json::from_value(json!({ "name": "Ada", "email": "ada@example.com" })).unwrap();
        let patch = Contact::validate(input, Mode::Create).unwrap();
        let original = Contact::materialize(RecordId::generate(), Timestamp::now(), &patch);

        let restored: Contact = decode(encode(&original).unwrap()).unwrap();

        assert_eq!(restored, original);
    }

    #[rstest]
    fn test_decode_rejects_document_of_wrong_shape() {
        let result: Result<Todo, _> = decode(json!({ "title": 42 }));

        assert!(matches!(result, Err(RepositoryError::SerializationError(_))));
    }
}
