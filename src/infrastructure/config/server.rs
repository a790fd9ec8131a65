//! HTTP server configuration.

use std::net::SocketAddr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address to listen on, e.g. `127.0.0.1:8080`.
    pub bind: String,
}

impl ServerConfig {
    /// Parse the configured bind address.
    ///
    /// # Errors
    /// Returns [`ConfigError::InvalidValue`] if `bind` is not a socket address.
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        self.bind.parse().map_err(|e: std::net::AddrParseError| {
            ConfigError::InvalidValue {
                field: "server.bind",
                reason: format!("'{}': {e}", self.bind),
            }
            .into()
        })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".into(),
        }
    }
}
