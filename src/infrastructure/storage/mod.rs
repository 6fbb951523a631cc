//! Storage infrastructure - backend configuration and selection

mod factory;
mod postgres;

pub use factory::{StorageConfig, StorageType, UserRepositoryFactory};
pub use postgres::PostgresConfig;
