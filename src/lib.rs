//! Todo and contact CRUD service.
//!
//! Layers, leaf first:
//!
//! - [`domain`]: records, presence-tracking patches and per-entity schemas
//! - [`infrastructure`]: record store backends (in-memory, `PostgreSQL`)
//! - [`service`]: validation, defaults, patch merge and outcome taxonomy
//! - [`api`]: axum handlers and router
//! - [`server`]: listener configuration and graceful shutdown

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod server;
pub mod service;
