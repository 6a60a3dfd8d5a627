//! Repository factory for runtime backend selection.
//!
//! Builds the single store handle shared by the services. The handle is
//! created once at startup; a failure here is fatal for the process.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `DATABASE_MAX_CONNECTIONS`: pool size (default: 5)
//!
//! # Example
//!
//! ```ignore
//! let config = RepositoryConfig::from_env()?;
//! let repositories = RepositoryFactory::new(config).create().await?;
//! let todos = repositories.todo_repository.list().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use super::postgres::ensure_table;
use super::{InMemoryRecordRepository, PostgresRecordRepository, RecordRepository};
use crate::domain::{Contact, Todo};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

// =============================================================================
// Configuration Types
// =============================================================================

/// Storage backend for records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local storage. Suitable for testing and development.
    #[default]
    InMemory,
    /// `PostgreSQL` storage for production use.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    /// Parses a storage mode from a string.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidStorageMode` if the string is not recognized.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "in_memory" | "inmemory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_string())),
        }
    }
}

/// Configuration for [`RepositoryFactory`].
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL (required when `storage_mode` is `Postgres`).
    pub database_url: Option<String>,
    pub max_connections: u32,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
        }
    }
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from process environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if a variable holds an invalid value or
    /// `DATABASE_URL` is missing when `STORAGE_MODE=postgres`.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Creates a configuration from an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// See [`RepositoryConfig::from_env`].
    pub fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigurationError> {
        // Empty or whitespace-only values count as unset.
        let read = |name: &str| {
            lookup(name)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let storage_mode = read("STORAGE_MODE")
            .map(|value| value.parse::<StorageMode>())
            .transpose()?
            .unwrap_or_default();

        let max_connections = read("DATABASE_MAX_CONNECTIONS")
            .map(|value| match value.parse::<u32>() {
                Ok(count) if count > 0 => Ok(count),
                _ => Err(ConfigurationError::InvalidMaxConnections(value)),
            })
            .transpose()?
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        let config = Self {
            storage_mode,
            database_url: read("DATABASE_URL"),
            max_connections,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::MissingDatabaseUrl` if `PostgreSQL` is
    /// selected without a connection URL.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

/// Builder for `RepositoryConfig`.
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    database_url: Option<String>,
    max_connections: Option<u32>,
}

impl RepositoryConfigBuilder {
    #[must_use]
    pub const fn storage_mode(mut self, mode: StorageMode) -> Self {
        self.storage_mode = mode;
        self
    }

    #[must_use]
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    #[must_use]
    pub const fn max_connections(mut self, count: u32) -> Self {
        self.max_connections = Some(count);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the configuration is invalid.
    pub fn build(self) -> Result<RepositoryConfig, ConfigurationError> {
        let config = RepositoryConfig {
            storage_mode: self.storage_mode,
            database_url: self.database_url,
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Invalid store configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    #[error("Invalid DATABASE_MAX_CONNECTIONS: '{0}'. Expected a positive integer")]
    InvalidMaxConnections(String),

    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    #[error("Schema initialization error: {0}")]
    Schema(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Initialized store handles, one per record type.
#[derive(Clone)]
pub struct Repositories {
    pub todo_repository: Arc<dyn RecordRepository<Todo>>,
    pub contact_repository: Arc<dyn RecordRepository<Contact>>,
}

impl Repositories {
    /// Fresh in-memory repositories.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            todo_repository: Arc::new(InMemoryRecordRepository::<Todo>::new()),
            contact_repository: Arc::new(InMemoryRecordRepository::<Contact>::new()),
        }
    }

    /// `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            todo_repository: Arc::new(PostgresRecordRepository::<Todo>::new(pool.clone())),
            contact_repository: Arc::new(PostgresRecordRepository::<Contact>::new(pool.clone())),
        }
    }
}

impl std::fmt::Debug for Repositories {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter
            .debug_struct("Repositories")
            .field("todo_repository", &"Arc<dyn RecordRepository<Todo>>")
            .field("contact_repository", &"Arc<dyn RecordRepository<Contact>>")
            .finish()
    }
}

/// Creates repository instances based on configuration.
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates all repositories, connecting to the database if needed.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the connection or table creation fails.
    pub async fn create(&self) -> Result<Repositories, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Repositories::in_memory()),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;

                ensure_table::<Todo>(&pool)
                    .await
                    .map_err(|error| FactoryError::Schema(error.to_string()))?;
                ensure_table::<Contact>(&pool)
                    .await
                    .map_err(|error| FactoryError::Schema(error.to_string()))?;

                Ok(Repositories::postgres(&pool))
            }
        }
    }

    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .database_url
            .as_ref()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;

        PgPoolOptions::new()
            .max_connections(self.config.max_connections)
            .connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================
