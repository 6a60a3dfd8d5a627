//! Shared application state.

use axum::extract::FromRef;

use crate::infrastructure::Repositories;
use crate::service::{ContactService, TodoService};

/// State handed to every handler. Handlers extract the service they need
/// through `State<TodoService>` / `State<ContactService>`.
#[derive(Debug, Clone, FromRef)]
pub struct AppState {
    pub todos: TodoService,
    pub contacts: ContactService,
}

impl AppState {
    /// Wires services onto initialized repositories.
    #[must_use]
    pub fn new(repositories: Repositories) -> Self {
        Self {
            todos: TodoService::new(repositories.todo_repository),
            contacts: ContactService::new(repositories.contact_repository),
        }
    }

    /// State backed by fresh in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(Repositories::in_memory())
    }
}
