//! Storage backend and SQLite database configuration.

use serde::{Deserialize, Serialize};

use crate::adapter::outbound::sqlite::database::connection::PoolOptions;

/// Which record store the server runs on.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    /// SQLite database through a Diesel connection pool.
    #[default]
    Sqlite,
    /// Process-local tables; contents are lost on exit.
    Memory,
}

impl std::fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite => write!(f, "sqlite"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

/// `[storage]` section.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackend,
}

/// `[database]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file, or `:memory:`.
    pub url: String,
    /// Upper bound on pooled connections.
    pub max_connections: u32,
    /// How long a connection waits on a locked database.
    pub busy_timeout_ms: u64,
}

impl DatabaseConfig {
    #[must_use]
    pub fn pool_options(&self) -> PoolOptions {
        PoolOptions {
            max_size: self.max_connections,
            busy_timeout_ms: self.busy_timeout_ms,
        }
    }
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "inventory.db".into(),
            max_connections: 5,
            busy_timeout_ms: 5_000,
        }
    }
}
