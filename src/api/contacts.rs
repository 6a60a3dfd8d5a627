//! Contact handlers: `/api/contacts` and `/api/contacts/{id}`.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::dto::{ContactResponse, MessageResponse};
use super::error::ApiErrorResponse;
use super::extract::JsonBody;
use crate::domain::ContactInput;
use crate::service::ContactService;

/// Lists every contact ordered by name.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the store fails.
pub async fn list_contacts(
    State(service): State<ContactService>,
) -> Result<Json<Vec<ContactResponse>>, ApiErrorResponse> {
    let contacts = service.list().await?;

    Ok(Json(contacts.iter().map(ContactResponse::from).collect()))
}

/// Creates a contact. Only `name` is required.
///
/// # Request Body
///
/// ```json
/// {
///   "name": "Ada Lovelace",
///   "email": "ada@example.com",
///   "phone": "555-0100",
///   "notes": "optional",
///   "imageUrl": "optional"
/// }
/// ```
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for invalid input or store failures.
pub async fn create_contact(
    State(service): State<ContactService>,
    JsonBody(input): JsonBody<ContactInput>,
) -> Result<(StatusCode, Json<ContactResponse>), ApiErrorResponse> {
    let contact = service.create(input).await?;

    Ok((StatusCode::CREATED, Json(ContactResponse::from(&contact))))
}

/// Gets a contact by id.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the contact is missing or the store fails.
pub async fn get_contact(
    State(service): State<ContactService>,
    Path(id): Path<String>,
) -> Result<Json<ContactResponse>, ApiErrorResponse> {
    let contact = service.get(&id).await?;

    Ok(Json(ContactResponse::from(&contact)))
}

/// Partially updates a contact. `""` clears an optional field.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] for invalid input, a missing contact, or store failures.
pub async fn update_contact(
    State(service): State<ContactService>,
    Path(id): Path<String>,
    JsonBody(input): JsonBody<ContactInput>,
) -> Result<Json<ContactResponse>, ApiErrorResponse> {
    let contact = service.update(&id, input).await?;

    Ok(Json(ContactResponse::from(&contact)))
}

/// Deletes a contact.
///
/// # Errors
///
/// Returns [`ApiErrorResponse`] if the contact is missing or the store fails.
pub async fn delete_contact(
    State(service): State<ContactService>,
    Path(id): Path<String>,
) -> Result<Json<MessageResponse>, ApiErrorResponse> {
    service.delete(&id).await?;

    Ok(Json(MessageResponse::new("Contact deleted")))
}
