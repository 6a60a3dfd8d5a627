//! Todo handlers: `/api/todos` and `/api/todos/{id}`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{MessageResponse, TodoResponse};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use crate::domain::TodoInput;
use crate::service::TodoService;

/// Lists every todo, oldest first.
///
/// # Response
///
/// - **200 OK**: array of todos
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the store fails.
pub async fn list_todos(
    State(service): State<TodoService>,
) -> Result<Json<Vec<TodoResponse>>, ApiErrorResponse> {
    let todos = service.list().await?;

    Ok(Json(todos.iter().map(TodoResponse::from).collect()))
}

/// Creates a todo.
///
/// # Request Body
///
/// ```json
/// {
///   "title": "Buy milk",
///   "description": "optional",
///   "status": "pending|completed|postponed",
///   "priority": "low|medium|high|urgent",
///   "dueDate": "2026-03-01",
///   "notes": "optional",
///   "imageUrl": "optional"
/// }
/// ```
///
/// Only `title` is required. `status` defaults to `pending`, `priority` to
/// `medium`.
///
/// # Response
///
/// - **201 Created**: the stored todo, including its generated `id`
/// - **400 Bad Request**: malformed body or validation error
/// - **500 Internal Server Error**: store failure
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for invalid input or store failures.
pub async fn create_todo(
    State(service): State<TodoService>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Result<(StatusCode, Json<TodoResponse>), ApiErrorResponse> {
    let todo = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(TodoResponse::from(&todo))))
}

/// Gets a todo by id.
///
/// # Response
///
/// - **200 OK**: the todo
/// - **404 Not Found**: no todo has this id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the todo is missing or the store fails.
pub async fn get_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let todo = service.get(&id).await?;

    Ok(Json(TodoResponse::from(&todo)))
}

/// Partially updates a todo.
///
/// Only keys present in the body change. `null` or `""` clears an optional
/// field; `id` and `createdAt` are ignored.
///
/// # Request Body
///
/// ```json
/// { "status": "completed" }
/// ```
///
/// # Response
///
/// - **200 OK**: the updated todo
/// - **400 Bad Request**: malformed body or validation error (record unchanged)
/// - **404 Not Found**: no todo has this id
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for invalid input, a missing todo, or store failures.
pub async fn update_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<TodoInput>,
) -> Result<Json<TodoResponse>, ApiErrorResponse> {
    let todo = service.update(&id, input).await?;

    Ok(Json(TodoResponse::from(&todo)))
}

/// Deletes a todo.
///
/// # Response
///
/// - **200 OK**: `{"message": "Todo deleted"}`
/// - **404 Not Found**: no todo has this id (including an already deleted one)
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the todo is missing or the store fails.
pub async fn delete_todo(
    State(service): State<TodoService>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    service.delete(&id).await?;

    Ok(Json(MessageResponse::new("Todo deleted")))
}
