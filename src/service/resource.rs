//! Resource service: the create / list / get / patch / delete operations
//! shared by every record type.
//!
//! The service is stateless. It validates input against the record schema,
//! hands validated work to the store, and turns store results into
//! [`ServiceError`] outcomes. Nothing is retried and nothing is swallowed.

use std::sync::Arc;

use crate::domain::{Contact, Mode, Record, RecordId, Timestamp, Todo};
use crate::infrastructure::RecordRepository;

use super::ServiceError;

/// Service for todo records.
pub type TodoService = ResourceService<Todo>;

/// Service for contact records.
pub type ContactService = ResourceService<Contact>;

/// Stateless operations over one record type.
pub struct ResourceService<R: Record> {
    repository: Arc<dyn RecordRepository<R>>,
}

impl<R: Record> Clone for ResourceService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

impl<R: Record> std::fmt::Debug for ResourceService<R> {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("ResourceService")
            .field("kind", &R::KIND)
            .finish_non_exhaustive()
    }
}

impl<R: Record> ResourceService<R> {
    #[must_use]
    pub fn new(repository: Arc<dyn RecordRepository<R>>) -> Self {
        Self { repository }
    }

    /// Validates `input` in create mode and stores the materialized record.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if a required field is missing or a field
    ///   is invalid; nothing is stored.
    /// - `ServiceError::StoreUnavailable` if the store fails.
    pub async fn create(&self, input: R::Input) -> Result<R, ServiceError> {
        let patch = R::validate(input, Mode::Create)?;
        let record = R::materialize(RecordId::generate(), Timestamp::now(), &patch);

        self.repository.insert(&record).await?;

        tracing::debug!(kind = R::KIND, id = %record.id(), "Record created");
        Ok(record)
    }

    /// Returns every record in listing order.
    ///
    /// # Errors
    ///
    /// Returns `ServiceError::StoreUnavailable` if the store fails.
    pub async fn list(&self) -> Result<Vec<R>, ServiceError> {
        Ok(self.repository.list().await?)
    }

    /// Returns the record with the given id.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if no record has this id. A string that is
    ///   not a well-formed id names no record.
    /// - `ServiceError::StoreUnavailable` if the store fails.
    pub async fn get(&self, id: &str) -> Result<R, ServiceError> {
        let record_id = Self::parse_id(id)?;

        self.repository
            .find_by_id(&record_id)
            .await?
            .ok_or_else(|| ServiceError::not_found(R::KIND, &record_id))
    }

    /// Applies a partial update.
    ///
    /// The whole input is validated before the store is touched, so a
    /// rejected field leaves the record unchanged. The merge itself runs
    /// atomically inside the store.
    ///
    /// # Errors
    ///
    /// - `ServiceError::Validation` if any supplied field is invalid.
    /// - `ServiceError::NotFound` if no record has this id.
    /// - `ServiceError::StoreUnavailable` if the store fails.
    pub async fn update(&self, id: &str, input: R::Input) -> Result<R, ServiceError> {
        let record_id = Self::parse_id(id)?;
        let patch = R::validate(input, Mode::Patch)?;

        let updated = self
            .repository
            .update(&record_id, &patch)
            .await?
            .ok_or_else(|| ServiceError::not_found(R::KIND, &record_id))?;

        tracing::debug!(kind = R::KIND, id = %record_id, "Record updated");
        Ok(updated)
    }

    /// Deletes a record. Deleting the same id twice fails the second time.
    ///
    /// # Errors
    ///
    /// - `ServiceError::NotFound` if no record has this id.
    /// - `ServiceError::StoreUnavailable` if the store fails.
    pub async fn delete(&self, id: &str) -> Result<(), ServiceError> {
        let record_id = Self::parse_id(id)?;

        if !self.repository.delete(&record_id).await? {
            return Err(ServiceError::not_found(R::KIND, &record_id));
        }

        tracing::debug!(kind = R::KIND, id = %record_id, "Record deleted");
        Ok(())
    }

    fn parse_id(id: &str) -> Result<RecordId, ServiceError> {
        RecordId::parse(id).ok_or_else(|| ServiceError::NotFound {
            kind: R::KIND,
            id: id.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ContactInput, Priority, TodoInput, TodoStatus};
    use crate::infrastructure::InMemoryRecordRepository;
    use rstest::{fixture, rstest};

    #[fixture]
    fn todos() -> TodoService {
        TodoService::new(Arc::new(InMemoryRecordRepository::<Todo>::new()))
    }

    #[fixture]
    fn contacts() -> ContactService {
        ContactService::new(Arc::new(InMemoryRecordRepository::<Contact>::new()))
    }

    fn input(json: &str) -> TodoInput {
        serde_json::from_str(json).unwrap()
    }

    #[rstest]
    #[tokio::test]
    async fn test_buy_milk_lifecycle(todos: TodoService) {
        let created = todos.create(TodoInput::titled("Buy milk")).await.unwrap();
        assert_eq!(created.title, "Buy milk");
        assert_eq!(created.status, TodoStatus::Pending);
        assert_eq!(created.priority, Priority::Medium);

        let id = created.id.to_string();
        let updated = todos
            .update(&id, TodoInput::with_status(TodoStatus::Completed))
            .await
            .unwrap();
        assert_eq!(
            updated,
            Todo {
                status: TodoStatus::Completed,
                ..created
            }
        );

        todos.delete(&id).await.unwrap();
        assert!(todos.get(&id).await.unwrap_err().is_not_found());
    }

    #[rstest]
    #[tokio::test]
    async fn test_failed_create_persists_nothing(todos: TodoService) {
        let error = todos.create(input(r#"{"notes":"no title"}"#)).await.unwrap_err();

        assert!(error.is_validation());
        assert!(todos.list().await.unwrap().is_empty());
    }

    #[rstest]
    #[tokio::test]
    async fn test_invalid_status_leaves_record_unchanged(todos: TodoService) {
        let created = todos.create(TodoInput::titled("Buy milk")).await.unwrap();
        let id = created.id.to_string();

        let error = todos
            .update(&id, input(r#"{"title":"Buy bread","status":"archived"}"#))
            .await
            .unwrap_err();

        assert!(matches!(&error, ServiceError::Validation(validation) if validation.names("status")));
        assert_eq!(todos.get(&id).await.unwrap(), created);
    }

    #[rstest]
    #[tokio::test]
    async fn test_second_delete_is_not_found(todos: TodoService) {
        let created = todos.create(TodoInput::titled("Buy milk")).await.unwrap();
        let id = created.id.to_string();

        assert!(todos.delete(&id).await.is_ok());
        assert!(todos.delete(&id).await.unwrap_err().is_not_found());
    }

    #[rstest]
    #[case("not-a-uuid")]
    #[case("0190b8a2-7b7e-7cc0-8d9a-1f2e3d4c5b6a")]
    #[tokio::test]
    async fn test_unknown_ids_are_not_found(todos: TodoService, #[case] id: &str) {
        assert!(todos.get(id).await.unwrap_err().is_not_found());
        assert!(todos.delete(id).await.unwrap_err().is_not_found());
        assert!(
            todos
                .update(id, TodoInput::titled("x"))
                .await
                .unwrap_err()
                .is_not_found()
        );
    }

    #[rstest]
    #[tokio::test]
    async fn test_update_of_missing_record_validates_first(todos: TodoService) {
        let error = todos
            .update(
                "0190b8a2-7b7e-7cc0-8d9a-1f2e3d4c5b6a",
                input(r#"{"priority":"whenever"}"#),
            )
            .await
            .unwrap_err();

        assert!(error.is_validation());
    }

    #[rstest]
    #[tokio::test]
    async fn test_contacts_list_by_name(contacts: ContactService) {
        contacts.create(ContactInput::named("Bob")).await.unwrap();
        contacts.create(ContactInput::named("Ada")).await.unwrap();

        let names: Vec<String> = contacts
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|contact| contact.name)
            .collect();

        assert_eq!(names, vec!["Ada", "Bob"]);
    }

    #[rstest]
    #[tokio::test]
    async fn test_todos_list_in_creation_order(todos: TodoService) {
        for title in ["first", "second", "third"] {
            todos.create(TodoInput::titled(title)).await.unwrap();
        }

        let first = todos.list().await.unwrap();
        let second = todos.list().await.unwrap();

        let titles: Vec<&str> = first.iter().map(|todo| todo.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert_eq!(first, second);
    }
}
