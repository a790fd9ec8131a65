//! Inventory - product and category records over REST.
//!
//! Products and categories are stored with a version token. Updates follow
//! an optimistic protocol: fetch, merge the request into the fetched record,
//! then commit only if the stored version is unchanged. A lost race is
//! reported as a conflict and never overwrites the other writer's change.
//! Listings combine optional filters, multi-key sorting and page windows.
//!
//! # Architecture
//!
//! - [`domain`] - Records, validated payloads, filter predicates, pages
//! - [`port`] - The [`port::outbound::store::RecordStore`] trait the use cases depend on
//! - [`application`] - Use cases, including the optimistic update loop
//! - [`adapter`] - axum HTTP and clap CLI on the inbound side; SQLite
//!   (Diesel) and in-memory stores on the outbound side
//! - [`infrastructure`] - Configuration and service bootstrap
//! - [`error`] - Error types for the crate
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use inventory::adapter::inbound::http::router::{router, ApiState};
//! use inventory::adapter::outbound::memory::MemoryStore;
//! use inventory::infrastructure::config::pagination::PaginationConfig;
//!
//! let app = router(ApiState::new(
//!     Arc::new(MemoryStore::new()),
//!     PaginationConfig::default(),
//! ));
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;
