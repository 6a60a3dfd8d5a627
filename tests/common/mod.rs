//! Common test helpers for integration tests.
//!
//! # Note
//!
//! `#![allow(dead_code)]` is needed because every integration test file is
//! compiled as its own crate and uses only part of these helpers.

#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use todo_contacts_api::api::{AppState, create_router};
use todo_contacts_api::domain::{Record, RecordId};
use todo_contacts_api::infrastructure::{
    RecordRepository, Repositories, RepositoryError, RepositoryFuture,
};

// =============================================================================
// AppState Creation Helpers
// =============================================================================

/// Creates a test `AppState` with in-memory repositories.
pub fn create_test_app_state() -> AppState {
    AppState::in_memory()
}

/// Creates an `AppState` whose store fails every operation.
pub fn create_failing_app_state() -> AppState {
    AppState::new(Repositories {
        todo_repository: Arc::new(FailingRepository),
        contact_repository: Arc::new(FailingRepository),
    })
}

/// Creates a router over fresh in-memory state.
pub fn create_test_router() -> Router {
    create_router(create_test_app_state())
}

// =============================================================================
// Request Helpers
// =============================================================================

/// Sends one request through `router` and returns status and JSON body.
pub async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

/// Sends a raw body with the given content type.
pub async fn send_raw(
    router: &Router,
    method: Method,
    uri: &str,
    content_type: &str,
    body: &str,
) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", content_type)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Creates a todo through the API and returns its JSON.
pub async fn create_todo(router: &Router, body: Value) -> Value {
    let (status, json) = send(router, Method::POST, "/api/todos", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json
}

/// Creates a contact through the API and returns its JSON.
pub async fn create_contact(router: &Router, body: Value) -> Value {
    let (status, json) = send(router, Method::POST, "/api/contacts", Some(body)).await;
    assert_eq!(status, StatusCode::CREATED, "unexpected body: {json}");
    json
}

// =============================================================================
// Failing Repository
// =============================================================================

/// Repository that fails every call, standing in for an unreachable store.
pub struct FailingRepository;

fn unavailable<T: Send + 'static>() -> RepositoryFuture<T> {
    Box::pin(async {
        Err(RepositoryError::DatabaseError(
            "connection refused (os error 111) at db.internal:5432".to_string(),
        ))
    })
}

impl<R: Record> RecordRepository<R> for FailingRepository {
    fn insert(&self, _record: &R) -> RepositoryFuture<()> {
        unavailable()
    }

    fn find_by_id(&self, _id: &RecordId) -> RepositoryFuture<Option<R>> {
        unavailable()
    }

    fn list(&self) -> RepositoryFuture<Vec<R>> {
        unavailable()
    }

    fn update(&self, _id: &RecordId, _patch: &R::Patch) -> RepositoryFuture<Option<R>> {
        unavailable()
    }

    fn delete(&self, _id: &RecordId) -> RepositoryFuture<bool> {
        unavailable()
    }

    fn count(&self) -> RepositoryFuture<u64> {
        unavailable()
    }
}
