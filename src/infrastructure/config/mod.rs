//! Service configuration.
//!
//! [`settings::Config`] is the root; each submodule owns one TOML section.

pub mod database;
pub mod logging;
pub mod pagination;
pub mod server;
pub mod settings;
