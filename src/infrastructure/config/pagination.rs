//! Listing page size policy.

use serde::{Deserialize, Serialize};

/// Page sizes for listing endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct PaginationConfig {
    /// Size used when a request does not name one.
    pub default_size: u32,
    /// Requested sizes above this are clamped to it.
    pub max_size: u32,
}

impl PaginationConfig {
    /// Resolve a requested page size. Zero is passed through for the
    /// page request to reject.
    #[must_use]
    pub fn resolve(&self, requested: Option<u32>) -> u32 {
        requested.unwrap_or(self.default_size).min(self.max_size)
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_size: 20,
            max_size: 100,
        }
    }
}
