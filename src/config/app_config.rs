use serde::Deserialize;

use crate::domain::DomainError;
use crate::infrastructure::storage::{PostgresConfig, StorageConfig, StorageType, DEFAULT_TABLE};

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub logging: LoggingConfig,
    pub storage: StorageSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

/// Store selection and connection pool settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StorageSettings {
    /// `memory` or `postgres`
    pub backend: String,
    /// Falls back to `DATABASE_URL` when unset
    pub database_url: Option<String>,
    pub table: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout_secs: u64,
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::default(),
        }
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        let pool = PostgresConfig::default();

        Self {
            backend: "memory".to_string(),
            database_url: None,
            table: DEFAULT_TABLE.to_string(),
            max_connections: pool.max_connections,
            min_connections: pool.min_connections,
            connect_timeout_secs: pool.connect_timeout_secs,
            idle_timeout_secs: pool.idle_timeout_secs,
        }
    }
}

impl StorageSettings {
    /// Resolves the settings into a store configuration
    ///
    /// `env_url` is consulted only when no `database_url` is configured.
    pub fn to_storage_config(&self, env_url: Option<String>) -> Result<StorageConfig, DomainError> {
        match self.backend.parse::<StorageType>()? {
            StorageType::InMemory => Ok(StorageConfig::in_memory()),
            StorageType::Postgres => {
                let url = self.database_url.clone().or(env_url).ok_or_else(|| {
                    DomainError::configuration(
                        "storage.database_url or DATABASE_URL is required for the postgres backend",
                    )
                })?;

                let pool = PostgresConfig::new(url)
                    .with_max_connections(self.max_connections)
                    .with_min_connections(self.min_connections)
                    .with_connect_timeout(self.connect_timeout_secs)
                    .with_idle_timeout(self.idle_timeout_secs);

                Ok(StorageConfig::postgres(pool, self.table.clone()))
            }
        }
    }
}

impl AppConfig {
    /// Loads `config/default`, `config/local` and `APP__*` variables
    ///
    /// A value that fails to parse is an error; it never falls back to defaults.
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::load_with_env(Self::environment())
    }

    fn environment() -> config::Environment {
        config::Environment::with_prefix("APP")
            .separator("__")
            .try_parsing(true)
    }

    fn load_with_env(env: config::Environment) -> Result<Self, config::ConfigError> {
        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name("config/local").required(false))
            .add_source(env)
            .build()?;

        config.try_deserialize()
    }

    /// Store configuration, reading `DATABASE_URL` from the environment as a fallback
    pub fn storage_config(&self) -> Result<StorageConfig, DomainError> {
        self.storage
            .to_storage_config(std::env::var("DATABASE_URL").ok())
    }
}
