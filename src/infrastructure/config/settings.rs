//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all service settings.
//! Configuration is loaded from a TOML file; every section is optional and
//! falls back to defaults. Two environment variables override the file:
//! `INVENTORY_DATABASE_URL` and `INVENTORY_BIND`.
//!
//! # Example
//!
//! ```no_run
//! use inventory::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing_subscriber::EnvFilter;

use super::database::{DatabaseConfig, StorageConfig};
use super::logging::LoggingConfig;
use super::pagination::PaginationConfig;
use super::server::ServerConfig;
use crate::error::{ConfigError, Result};

/// Environment variable overriding `database.url`.
pub const DATABASE_URL_ENV: &str = "INVENTORY_DATABASE_URL";

/// Environment variable overriding `server.bind`.
pub const BIND_ENV: &str = "INVENTORY_BIND";

/// Main service configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// HTTP listener.
    pub server: ServerConfig,
    /// SQLite connection settings.
    pub database: DatabaseConfig,
    /// Which store backs the service.
    pub storage: StorageConfig,
    /// Listing page sizes.
    pub pagination: PaginationConfig,
    /// Logging and tracing configuration.
    pub logging: LoggingConfig,
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// Applies environment overrides, then validates.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The TOML content is malformed
    /// - Validation fails (e.g., an unparseable bind address)
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let mut config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|key| std::env::var(key).ok());
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` if given, otherwise start from defaults.
    ///
    /// Defaults still receive environment overrides and validation.
    ///
    /// # Errors
    /// Same as [`Config::load`].
    #[allow(clippy::result_large_err)]
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Self::parse_toml(""),
        }
    }

    /// Overwrite settings from environment-style lookups.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(DATABASE_URL_ENV).filter(|v| !v.is_empty()) {
            self.database.url = url;
        }
        if let Some(bind) = lookup(BIND_ENV).filter(|v| !v.is_empty()) {
            self.server.bind = bind;
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    /// Returns [`ConfigError::MissingField`] or [`ConfigError::InvalidValue`]
    /// for the first offending setting.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.server.socket_addr()?;

        if self.database.url.trim().is_empty() {
            return Err(ConfigError::MissingField {
                field: "database.url",
            }
            .into());
        }
        if self.database.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.max_connections",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.pagination.default_size == 0 {
            return Err(ConfigError::InvalidValue {
                field: "pagination.default_size",
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }
        if self.pagination.max_size < self.pagination.default_size {
            return Err(ConfigError::InvalidValue {
                field: "pagination.max_size",
                reason: format!(
                    "must be at least default_size ({})",
                    self.pagination.default_size
                ),
            }
            .into());
        }
        if !LoggingConfig::FORMATS.contains(&self.logging.format.as_str()) {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: format!("must be one of {:?}", LoggingConfig::FORMATS),
            }
            .into());
        }
        if let Err(e) = EnvFilter::try_new(&self.logging.level) {
            return Err(ConfigError::InvalidValue {
                field: "logging.level",
                reason: e.to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Initialize the global tracing subscriber from `[logging]`.
    pub fn init_logging(&self) {
        self.logging.init();
    }

    /// Render the effective configuration as TOML.
    ///
    /// # Errors
    /// Returns [`Error::Parse`](crate::error::Error::Parse) if serialization fails.
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::error::Error::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::config::database::StorageBackend;

    fn parse(content: &str) -> Result<Config> {
        let mut config: Config = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.apply_overrides(|_| None);
        config.validate()?;
        Ok(config)
    }

    #[test]
    fn empty_file_gives_defaults() {
        let config = parse("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.server.bind, "127.0.0.1:8080");
        assert_eq!(config.storage.backend, StorageBackend::Sqlite);
        assert_eq!(config.pagination.max_size, 100);
    }

    #[test]
    fn sections_override_defaults() {
        let config = parse(
            r#"
[server]
bind = "0.0.0.0:9000"

[database]
url = "/var/lib/inventory.db"
max_connections = 8

[storage]
backend = "memory"

[pagination]
default_size = 5
max_size = 10

[logging]
level = "debug"
format = "json"
"#,
        )
        .unwrap();

        assert_eq!(config.server.bind, "0.0.0.0:9000");
        assert_eq!(config.database.url, "/var/lib/inventory.db");
        assert_eq!(config.database.max_connections, 8);
        assert_eq!(config.database.busy_timeout_ms, 5_000);
        assert_eq!(config.storage.backend, StorageBackend::Memory);
        assert_eq!(config.pagination.default_size, 5);
        assert_eq!(config.logging.format, "json");
    }

    #[test]
    fn overrides_replace_file_values() {
        let mut config = Config::default();
        config.apply_overrides(|key| match key {
            DATABASE_URL_ENV => Some("other.db".to_string()),
            BIND_ENV => Some("127.0.0.1:3000".to_string()),
            _ => None,
        });
        assert_eq!(config.database.url, "other.db");
        assert_eq!(config.server.bind, "127.0.0.1:3000");
    }

    #[test]
    fn empty_override_is_ignored() {
        let mut config = Config::default();
        config.apply_overrides(|_| Some(String::new()));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn invalid_bind_is_rejected() {
        let err = parse("[server]\nbind = \"localhost\"").unwrap_err();
        assert!(err.to_string().contains("server.bind"), "{err}");
    }

    #[test]
    fn max_size_below_default_is_rejected() {
        let err = parse("[pagination]\ndefault_size = 50\nmax_size = 10").unwrap_err();
        assert!(err.to_string().contains("pagination.max_size"), "{err}");
    }

    #[test]
    fn unknown_log_format_is_rejected() {
        let err = parse("[logging]\nformat = \"xml\"").unwrap_err();
        assert!(err.to_string().contains("logging.format"), "{err}");
    }

    #[test]
    fn unknown_backend_fails_to_parse() {
        let err = parse("[storage]\nbackend = \"postgres\"").unwrap_err();
        assert!(err.to_string().starts_with("failed to parse config"), "{err}");
    }

    #[test]
    fn effective_config_renders_as_toml() {
        let rendered = Config::default().to_toml().unwrap();
        assert!(rendered.contains("[database]"));
        assert_eq!(parse(&rendered).unwrap(), Config::default());
    }
}
