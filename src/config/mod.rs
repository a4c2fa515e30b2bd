//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `CLIENT_GALLERY` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use client_gallery::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Storage backend: {:?}", config.storage);
//! ```

mod database;
mod error;
mod logging;

pub use database::{DatabaseConfig, MAX_POOL_SIZE};
pub use error::{ConfigError, ValidationError};
pub use logging::{LogFormat, LoggingConfig};

use serde::Deserialize;

/// Where repositories keep their data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// Process-local maps, lost on exit
    #[default]
    Memory,
    /// PostgreSQL via `database.url`
    Postgres,
}

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Storage backend for the repositories
    #[serde(default)]
    pub storage: StorageBackend,

    /// Database configuration (PostgreSQL connection)
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Log level and output format
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `CLIENT_GALLERY` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `CLIENT_GALLERY__STORAGE=postgres` -> `storage = postgres`
    /// - `CLIENT_GALLERY__DATABASE__URL=...` -> `database.url = ...`
    /// - `CLIENT_GALLERY__LOGGING__FORMAT=json` -> `logging.format = json`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("CLIENT_GALLERY")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// The database section is only checked when the PostgreSQL backend is
    /// selected.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.storage == StorageBackend::Postgres {
            self.database.validate()?;
        }
        self.logging.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 5] = [
        "CLIENT_GALLERY__STORAGE",
        "CLIENT_GALLERY__DATABASE__URL",
        "CLIENT_GALLERY__DATABASE__MAX_CONNECTIONS",
        "CLIENT_GALLERY__LOGGING__LEVEL",
        "CLIENT_GALLERY__LOGGING__FORMAT",
    ];

    /// Helper to clear environment variables after testing
    fn clear_env() {
        for var in VARS {
            env::remove_var(var);
        }
    }

    #[test]
    fn test_defaults_without_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.storage, StorageBackend::Memory);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.format, LogFormat::Pretty);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_postgres_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLIENT_GALLERY__STORAGE", "postgres");
        env::set_var("CLIENT_GALLERY__DATABASE__URL", "postgresql://test@localhost/gallery");
        env::set_var("CLIENT_GALLERY__DATABASE__MAX_CONNECTIONS", "4");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.storage, StorageBackend::Postgres);
        assert_eq!(config.database.url, "postgresql://test@localhost/gallery");
        assert_eq!(config.database.max_connections, 4);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_postgres_requires_database_url() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLIENT_GALLERY__STORAGE", "postgres");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(matches!(
            config.validate(),
            Err(ValidationError::MissingRequired(_))
        ));
    }

    #[test]
    fn test_logging_from_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        env::set_var("CLIENT_GALLERY__LOGGING__LEVEL", "debug");
        env::set_var("CLIENT_GALLERY__LOGGING__FORMAT", "json");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.logging.level, "debug");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_log_level_fails_validation() {
        let config = AppConfig {
            logging: LoggingConfig {
                level: "loud".to_string(),
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
