//! HTTP API layer.
//!
//! Exposes the resource services over axum. Handlers parse requests, call a
//! service, and map outcomes to status codes through [`ApiErrorResponse`].

pub mod contacts;
pub mod dto;
pub mod error;
pub mod extract;
pub mod routes;
pub mod state;
pub mod todos;

pub use dto::{ContactResponse, HealthResponse, MessageResponse, TodoResponse};
pub use error::{ApiError, ApiErrorResponse};
pub use extract::JsonBody;
pub use routes::create_router;
pub use state::AppState;
