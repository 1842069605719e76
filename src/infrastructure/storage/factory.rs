//! Runtime store selection and the store's process lifetime

use std::str::FromStr;
use std::sync::Arc;

use sqlx::postgres::PgPool;
use tracing::info;

use crate::domain::product::ProductRepository;
use crate::domain::DomainError;

use super::in_memory::InMemoryProductRepository;
use super::postgres::{validate_table_name, PostgresConfig, PostgresProductRepository};

/// Supported storage types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageType {
    /// In-memory storage (for testing/development)
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
            other => Err(DomainError::configuration(format!(
                "unknown storage backend '{}'",
                other
            ))),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone)]
pub enum StorageConfig {
    /// In-memory storage configuration
    InMemory,
    /// PostgreSQL storage configuration
    Postgres {
        config: PostgresConfig,
        table_name: String,
    },
}

impl StorageConfig {
    /// Creates an in-memory storage configuration
    pub fn in_memory() -> Self {
        Self::InMemory
    }

    /// Creates a PostgreSQL storage configuration
    pub fn postgres(config: PostgresConfig, table_name: impl Into<String>) -> Self {
        Self::Postgres {
            config,
            table_name: table_name.into(),
        }
    }

    /// Returns the storage type
    pub fn storage_type(&self) -> StorageType {
        match self {
            Self::InMemory => StorageType::InMemory,
            Self::Postgres { .. } => StorageType::Postgres,
        }
    }
}

/// An opened product store
///
/// Acquired once at startup and handed to the catalog; `close` releases the
/// underlying connections and must run before the process exits.
pub struct ProductStore {
    repository: Arc<dyn ProductRepository>,
    pool: Option<PgPool>,
}

impl std::fmt::Debug for ProductStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductStore")
            .field("pooled", &self.pool.is_some())
            .finish()
    }
}

impl ProductStore {
    /// Opens the configured store, creating the Postgres table if needed
    pub async fn open(config: &StorageConfig) -> Result<Self, DomainError> {
        let store = match config {
            StorageConfig::InMemory => Self::in_memory(),
            StorageConfig::Postgres { config, table_name } => {
                validate_table_name(table_name)?;
                let pool = config.connect().await?;
                let repository = PostgresProductRepository::new(pool.clone(), table_name.as_str())?;
                repository.ensure_table().await?;

                Self {
                    repository: Arc::new(repository),
                    pool: Some(pool),
                }
            }
        };

        info!(backend = ?config.storage_type(), "Connected to the database");
        Ok(store)
    }

    /// Wraps a fresh in-memory store
    pub fn in_memory() -> Self {
        Self::from_repository(Arc::new(InMemoryProductRepository::new()))
    }

    /// Wraps an already constructed repository that owns no pooled resources
    pub fn from_repository(repository: Arc<dyn ProductRepository>) -> Self {
        Self {
            repository,
            pool: None,
        }
    }

    pub fn repository(&self) -> Arc<dyn ProductRepository> {
        Arc::clone(&self.repository)
    }

    /// Releases pooled connections
    pub async fn close(self) {
        if let Some(pool) = self.pool {
            pool.close().await;
            info!("Database connections closed");
        }
    }
}
