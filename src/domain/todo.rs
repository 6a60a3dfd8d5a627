//! Todo domain model.
//!
//! A todo carries a status governed by a small state machine (every
//! transition allowed, no terminal state) and a priority. Both are closed
//! enumerations validated through the shared schema.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use super::field::FieldPatch;
use super::record::{Record, RecordId, Timestamp};
use super::schema::{Choice, FieldRule, Mode, ValidationError, Validator};

// =============================================================================
// Enums
// =============================================================================

/// The status of a todo.
///
/// Any state may move to any other state, including itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    /// Not done yet. Initial state of every todo.
    #[default]
    Pending,
    /// Done.
    Completed,
    /// Deferred to a later date.
    Postponed,
}

impl TodoStatus {
    /// Moves to `next`. Every transition is permitted.
    #[must_use]
    pub const fn transition_to(self, next: Self) -> Self {
        next
    }

    /// The status a completion toggle moves to.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Completed => Self::Pending,
            Self::Pending | Self::Postponed => Self::Completed,
        }
    }
}

impl Choice for TodoStatus {
    const VARIANTS: &'static [Self] = &[Self::Pending, Self::Completed, Self::Postponed];

    fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Postponed => "postponed",
        }
    }
}

/// Priority level of a todo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Urgent,
}

impl Choice for Priority {
    const VARIANTS: &'static [Self] = &[Self::Low, Self::Medium, Self::High, Self::Urgent];

    fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Urgent => "urgent",
        }
    }
}

// =============================================================================
// Schema
// =============================================================================

pub const TITLE: FieldRule = FieldRule::required("title");
pub const DESCRIPTION: FieldRule = FieldRule::optional("description");
pub const STATUS: FieldRule = FieldRule::optional("status");
pub const PRIORITY: FieldRule = FieldRule::optional("priority");
pub const DUE_DATE: FieldRule = FieldRule::optional("dueDate");
pub const NOTES: FieldRule = FieldRule::optional("notes");
pub const IMAGE_URL: FieldRule = FieldRule::optional("imageUrl");

// =============================================================================
// Todo
// =============================================================================

/// A persisted todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: RecordId,
    pub title: String,
    pub description: Option<String>,
    pub status: TodoStatus,
    pub priority: Priority,
    pub due_date: Option<Timestamp>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub created_at: Timestamp,
}

/// Raw todo fields as received from a caller.
///
/// Enumerations and dates arrive as strings so that an invalid value is
/// reported as a field error rather than a malformed body. Unknown keys,
/// `id` and `createdAt` included, are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TodoInput {
    #[serde(default)]
    pub title: FieldPatch<String>,
    #[serde(default)]
    pub description: FieldPatch<String>,
    #[serde(default)]
    pub status: FieldPatch<String>,
    #[serde(default)]
    pub priority: FieldPatch<String>,
    #[serde(default)]
    pub due_date: FieldPatch<String>,
    #[serde(default)]
    pub notes: FieldPatch<String>,
    #[serde(default)]
    pub image_url: FieldPatch<String>,
}

impl TodoInput {
    /// Input carrying only a title.
    #[must_use]
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: FieldPatch::Value(title.into()),
            ..Self::default()
        }
    }

    /// Input carrying only a status.
    #[must_use]
    pub fn with_status(status: TodoStatus) -> Self {
        Self {
            status: FieldPatch::Value(status.as_str().to_string()),
            ..Self::default()
        }
    }
}

/// Validated todo changes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TodoPatch {
    pub title: Option<String>,
    pub description: FieldPatch<String>,
    pub status: Option<TodoStatus>,
    pub priority: Option<Priority>,
    pub due_date: FieldPatch<Timestamp>,
    pub notes: FieldPatch<String>,
    pub image_url: FieldPatch<String>,
}

impl Record for Todo {
    type Input = TodoInput;
    type Patch = TodoPatch;

    const KIND: &'static str = "Todo";
    const COLLECTION: &'static str = "todos";

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    fn validate(input: TodoInput, mode: Mode) -> Result<TodoPatch, ValidationError> {
        let mut validator = Validator::new(mode);

        let patch = TodoPatch {
            title: validator.text(&TITLE, input.title).into_value(),
            description: validator.text(&DESCRIPTION, input.description),
            status: validator.choice(&STATUS, input.status),
            priority: validator.choice(&PRIORITY, input.priority),
            due_date: validator.date(&DUE_DATE, input.due_date),
            notes: validator.text(&NOTES, input.notes),
            image_url: validator.text(&IMAGE_URL, input.image_url),
        };

        validator.finish(patch)
    }

    fn materialize(id: RecordId, created_at: Timestamp, patch: &TodoPatch) -> Self {
        Self {
            id,
            title: String::new(),
            description: None,
            status: TodoStatus::default(),
            priority: Priority::default(),
            due_date: None,
            notes: None,
            image_url: None,
            created_at,
        }
        .apply(patch)
    }

    fn apply(self, patch: &TodoPatch) -> Self {
        Self {
            title: patch.title.clone().unwrap_or(self.title),
            description: patch.description.merge_into(self.description),
            status: patch
                .status
                .map_or(self.status, |next| self.status.transition_to(next)),
            priority: patch.priority.unwrap_or(self.priority),
            due_date: patch.due_date.merge_into(self.due_date),
            notes: patch.notes.merge_into(self.notes),
            image_url: patch.image_url.merge_into(self.image_url),
            ..self
        }
    }

    fn listing_order(&self, other: &Self) -> Ordering {
        self.created_at
            .cmp(&other.created_at)
            .then_with(|| self.id.cmp(&other.id))
    }
}
