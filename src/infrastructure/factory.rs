//! Repository factory for runtime backend selection.
//!
//! Both binaries pick their wish store here, switching between the
//! in-memory stub and `PostgreSQL` from environment configuration.
//!
//! # Environment Variables
//!
//! - `STORAGE_MODE`: `in_memory` (default) | `postgres`
//! - `DATABASE_URL`: `PostgreSQL` connection URL (required when `STORAGE_MODE=postgres`)
//! - `WISHES_TABLE`: table holding the wishes (default: `wishes`)
//!
//! # Example
//!
//! ```ignore
//! use wish_wall::infrastructure::{RepositoryConfig, RepositoryFactory};
//!
//! let config = RepositoryConfig::from_env()?;
//! let repository = RepositoryFactory::new(config).create().await?;
//! ```

use std::env;
use std::str::FromStr;
use std::sync::Arc;

use sqlx::PgPool;
use thiserror::Error;

use super::{InMemoryWishRepository, PostgresWishRepository, WishRepository};

/// Table used when `WISHES_TABLE` is unset.
pub const DEFAULT_TABLE_NAME: &str = "wishes";

/// True for a plain unquoted SQL identifier.
fn is_identifier(name: &str) -> bool {
    let mut characters = name.chars();
    characters
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && characters.all(|character| character.is_ascii_alphanumeric() || character == '_')
}

// =============================================================================
// Configuration Types
// =============================================================================

/// Backend holding the wishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local map. Contents vanish on restart.
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

/// Configuration for the repository factory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryConfig {
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL (required when `storage_mode` is `Postgres`).
    pub database_url: Option<String>,
    /// Table holding the wishes. Only used by `PostgreSQL`.
    pub table_name: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            storage_mode: StorageMode::default(),
            database_url: None,
            table_name: DEFAULT_TABLE_NAME.to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Creates a new configuration builder.
    #[must_use]
    pub fn builder() -> RepositoryConfigBuilder {
        RepositoryConfigBuilder::default()
    }

    /// Creates a configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if:
    /// - `STORAGE_MODE` contains an invalid value
    /// - `DATABASE_URL` is missing when `STORAGE_MODE=postgres`
    /// - `WISHES_TABLE` is not a plain SQL identifier
    pub fn from_env() -> Result<Self, ConfigurationError> {
        let storage_mode = match env::var("STORAGE_MODE") {
            Ok(value) => value.parse()?,
            Err(env::VarError::NotPresent) => StorageMode::default(),
            Err(env::VarError::NotUnicode(_)) => {
                return Err(ConfigurationError::InvalidStorageMode(
                    "<non-UTF-8 value>".to_string(),
                ));
            }
        };

        // Empty or whitespace-only counts as unset
        let database_url = env::var("DATABASE_URL")
            .ok()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty());

        let table_name = env::var("WISHES_TABLE")
            .ok()
            .map(|name| name.trim().to_string())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string());

        let config = Self {
            storage_mode,
            database_url,
            table_name,
        };

        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::MissingDatabaseUrl` if `PostgreSQL` is selected
    ///   without a URL
    /// - `ConfigurationError::InvalidValue` if the table name is not a plain
    ///   SQL identifier
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        // The name is spliced into SQL text.
        if !is_identifier(&self.table_name) {
            return Err(ConfigurationError::InvalidValue {
                key: "WISHES_TABLE".to_string(),
                message: format!("'{}' is not a valid table name", self.table_name),
            });
        }
        Ok(())
    }
}

/// Builder for `RepositoryConfig`.
///
/// ```ignore
/// let config = RepositoryConfig::builder()
///     .storage_mode(StorageMode::Postgres)
///     .database_url("postgres://localhost/wishes")
///     .build()?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct RepositoryConfigBuilder {
    storage_mode: StorageMode,
    database_url: Option<String>,
    table_name: Option<String>,
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
    pub fn table_name(mut self, name: impl Into<String>) -> Self {
        self.table_name = Some(name.into());
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
            table_name: self
                .table_name
                .unwrap_or_else(|| DEFAULT_TABLE_NAME.to_string()),
        };

        config.validate()?;
        Ok(config)
    }
}

// =============================================================================
// Error Types
// =============================================================================

/// Errors raised while reading configuration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error("Invalid storage mode: '{0}'. Expected 'in_memory' or 'postgres'")]
    InvalidStorageMode(String),

    #[error("DATABASE_URL environment variable is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A server setting could not be parsed.
    #[error("Invalid value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors that can occur during factory initialization.
#[derive(Debug, Error)]
pub enum FactoryError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    #[error("Database connection error: {0}")]
    DatabaseConnection(String),

    /// The connection succeeded but the table could not be created.
    #[error("Schema initialization error: {0}")]
    Schema(String),
}

// =============================================================================
// Repository Factory
// =============================================================================

/// Creates the wish store selected by a [`RepositoryConfig`].
#[derive(Debug, Clone)]
pub struct RepositoryFactory {
    config: RepositoryConfig,
}

impl RepositoryFactory {
    #[must_use]
    pub const fn new(config: RepositoryConfig) -> Self {
        Self { config }
    }

    /// Creates a new repository factory from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError::Configuration` if environment configuration is invalid.
    pub fn from_env() -> Result<Self, FactoryError> {
        let config = RepositoryConfig::from_env()?;
        Ok(Self::new(config))
    }

    /// Creates the wish repository.
    ///
    /// For `PostgreSQL` this connects a pool and creates the configured
    /// table and its indexes when they are absent.
    ///
    /// # Errors
    ///
    /// Returns `FactoryError` if the connection or schema setup fails.
    pub async fn create(&self) -> Result<Arc<dyn WishRepository>, FactoryError> {
        match self.config.storage_mode {
            StorageMode::InMemory => Ok(Arc::new(InMemoryWishRepository::new())),
            StorageMode::Postgres => {
                let pool = self.create_postgres_pool().await?;
                let repository = PostgresWishRepository::new(pool, &self.config.table_name);
                repository
                    .ensure_schema()
                    .await
                    .map_err(|error| FactoryError::Schema(error.to_string()))?;
                Ok(Arc::new(repository))
            }
        }
    }

    async fn create_postgres_pool(&self) -> Result<PgPool, FactoryError> {
        let database_url = self
            .config
            .database_url
            .as_ref()
            .ok_or(ConfigurationError::MissingDatabaseUrl)?;

        PgPool::connect(database_url)
            .await
            .map_err(|error| FactoryError::DatabaseConnection(error.to_string()))
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("in_memory", StorageMode::InMemory)]
    #[case("inmemory", StorageMode::InMemory)]
    #[case("memory", StorageMode::InMemory)]
    #[case("IN_MEMORY", StorageMode::InMemory)]
    #[case("postgres", StorageMode::Postgres)]
    #[case("postgresql", StorageMode::Postgres)]
    #[case("pg", StorageMode::Postgres)]
    #[case(" POSTGRES ", StorageMode::Postgres)]
    fn test_storage_mode_from_str_valid(#[case] input: &str, #[case] expected: StorageMode) {
        assert_eq!(input.parse::<StorageMode>(), Ok(expected));
    }

    #[rstest]
    #[case("invalid")]
    #[case("dynamodb")]
    #[case("")]
    fn test_storage_mode_from_str_invalid(#[case] input: &str) {
        assert_eq!(
            input.parse::<StorageMode>(),
            Err(ConfigurationError::InvalidStorageMode(input.to_string()))
        );
    }

    #[rstest]
    fn test_default_config_is_in_memory() {
        let config = RepositoryConfig::default();
        assert_eq!(config.storage_mode, StorageMode::InMemory);
        assert!(config.validate().is_ok());
    }

    #[rstest]
    fn test_builder_requires_database_url_for_postgres() {
        let result = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .build();
        assert_eq!(result, Err(ConfigurationError::MissingDatabaseUrl));
    }

    #[rstest]
    fn test_builder_with_postgres_url() {
        let config = RepositoryConfig::builder()
            .storage_mode(StorageMode::Postgres)
            .database_url("postgres://localhost/wishes")
            .build()
            .unwrap();
        assert_eq!(
            config.database_url.as_deref(),
            Some("postgres://localhost/wishes")
        );
    }

    #[rstest]
    fn test_default_table_name() {
        assert_eq!(RepositoryConfig::default().table_name, "wishes");
        assert_eq!(
            RepositoryConfig::builder().build().unwrap().table_name,
            DEFAULT_TABLE_NAME
        );
    }

    #[rstest]
    #[case("wall_2024")]
    #[case("_staging")]
    fn test_builder_accepts_identifier_table_name(#[case] name: &str) {
        let config = RepositoryConfig::builder().table_name(name).build().unwrap();
        assert_eq!(config.table_name, name);
    }

    #[rstest]
    #[case("")]
    #[case("2024_wall")]
    #[case("wishes; DROP TABLE users")]
    #[case("wish-wall")]
    fn test_builder_rejects_unsafe_table_name(#[case] name: &str) {
        let result = RepositoryConfig::builder().table_name(name).build();
        assert!(matches!(
            result,
            Err(ConfigurationError::InvalidValue { ref key, .. }) if key == "WISHES_TABLE"
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn test_factory_creates_in_memory_repository() {
        let factory = RepositoryFactory::new(RepositoryConfig::default());
        let repository = factory.create().await.unwrap();
        assert!(repository.scan_active().await.unwrap().is_empty());
    }

    #[rstest]
    fn test_factory_error_wraps_configuration_error() {
        let error = FactoryError::from(ConfigurationError::MissingDatabaseUrl);
        assert!(error.to_string().starts_with("Configuration error:"));
    }
}
