//! Infrastructure: configuration and service bootstrap.

pub mod bootstrap;
pub mod config;
