//! Data Transfer Objects for API responses.
//!
//! Request bodies deserialize straight into the domain input types
//! ([`crate::domain::TodoInput`], [`crate::domain::ContactInput`]) because
//! those already track field presence.

use serde::{Deserialize, Serialize};

use crate::domain::{Contact, Priority, Todo, TodoStatus};

// =============================================================================
// Todo DTOs
// =============================================================================

/// Response DTO for a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: Priority,
    /// RFC 3339 timestamp.
    pub due_date: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl From<&Todo> for TodoResponse {
    fn from(todo: &Todo) -> Self {
        Self {
            id: todo.id.to_string(),
            title: todo.title.clone(),
            description: todo.description.clone(),
            status: todo.status,
            priority: todo.priority,
            due_date: todo.due_date.map(|due_date| due_date.to_string()),
            notes: todo.notes.clone(),
            image_url: todo.image_url.clone(),
            created_at: todo.created_at.to_string(),
        }
    }
}

// =============================================================================
// Contact DTOs
// =============================================================================

/// Response DTO for a contact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    /// RFC 3339 timestamp.
    pub created_at: String,
}

impl From<&Contact> for ContactResponse {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.to_string(),
            name: contact.name.clone(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
            notes: contact.notes.clone(),
            image_url: contact.image_url.clone(),
            created_at: contact.created_at.to_string(),
        }
    }
}

// =============================================================================
// Misc DTOs
// =============================================================================

/// Plain confirmation body, e.g. `{"message": "Todo deleted"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response DTO for the liveness probe.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub message: String,
    pub version: String,
}
