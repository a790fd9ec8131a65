//! Inbound adapters (driving side): REST API and command line.

pub mod cli;
pub mod http;
