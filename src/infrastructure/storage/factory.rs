//! Storage factory for startup backend selection

use std::str::FromStr;
use std::sync::Arc;

use serde::Deserialize;
use tracing::{info, warn};

use crate::domain::user::UserRepository;
use crate::domain::DomainError;
use crate::infrastructure::user::{InMemoryUserRepository, PostgresUserRepository};

use super::postgres::PostgresConfig;

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum StorageType {
    /// In-memory storage, lost on restart
    #[default]
    InMemory,
    /// PostgreSQL storage
    Postgres,
}

impl FromStr for StorageType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "memory" | "inmemory" | "in-memory" | "in_memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" | "pg" => Ok(Self::Postgres),
            other => Err(DomainError::storage(format!(
                "Unknown storage backend '{}'",
                other
            ))),
        }
    }
}

impl TryFrom<String> for StorageType {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Storage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    /// Which backend to wire in at startup
    pub backend: StorageType,
    /// Connection settings, used when `backend` is postgres
    pub postgres: PostgresConfig,
    /// Use the in-memory backend if PostgreSQL cannot be reached
    pub fallback_to_memory: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageType::InMemory,
            postgres: PostgresConfig::default(),
            fallback_to_memory: true,
        }
    }
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::default()
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig) -> Self {
        Self {
            backend: StorageType::Postgres,
            postgres: config,
            fallback_to_memory: false,
        }
    }

    pub fn with_fallback_to_memory(mut self, fallback: bool) -> Self {
        self.fallback_to_memory = fallback;
        self
    }
}

/// Builds the user repository chosen by configuration
#[derive(Debug)]
pub struct UserRepositoryFactory;

impl UserRepositoryFactory {
    /// Creates the configured repository
    pub async fn create(config: &StorageConfig) -> Result<Arc<dyn UserRepository>, DomainError> {
        match config.backend {
            StorageType::InMemory => {
                info!("Using in-memory user repository");
                Ok(Arc::new(InMemoryUserRepository::new()))
            }
            StorageType::Postgres => match Self::create_postgres(&config.postgres).await {
                Ok(repository) => {
                    info!("Using PostgreSQL user repository");
                    Ok(repository)
                }
                Err(e) if config.fallback_to_memory => {
                    warn!(error = %e, "PostgreSQL unavailable, falling back to in-memory user repository");
                    Ok(Arc::new(InMemoryUserRepository::new()))
                }
                Err(e) => Err(e),
            },
        }
    }

    /// Creates a PostgreSQL-backed repository
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> Result<Arc<dyn UserRepository>, DomainError> {
        let pool = config.connect().await?;
        let repository = PostgresUserRepository::new(pool).await?;
        Ok(Arc::new(repository))
    }
}
