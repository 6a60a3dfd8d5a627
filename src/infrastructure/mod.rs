//! Infrastructure module: record store backends and their factory.

pub mod factory;
pub mod in_memory;
pub mod postgres;
pub mod repository;

pub use factory::{
    ConfigurationError, FactoryError, Repositories, RepositoryConfig, RepositoryConfigBuilder,
    RepositoryFactory, StorageMode,
};
pub use in_memory::InMemoryRecordRepository;
pub use postgres::PostgresRecordRepository;
pub use repository::{RecordRepository, RepositoryError, RepositoryFuture};
