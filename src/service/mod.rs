//! Resource service layer.

pub mod error;
pub mod resource;

pub use error::ServiceError;
pub use resource::{ContactService, ResourceService, TodoService};
