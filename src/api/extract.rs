//! Request extractors with JSON error bodies.

use axum::extract::FromRequest;

use super::error::ApiErrorResponse;

/// `axum::Json` whose rejections render as [`ApiErrorResponse`] (400 with a
/// JSON `message`) instead of axum's plain-text bodies.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiErrorResponse))]
pub struct JsonBody<T>(pub T);
