//! SQLite persistence adapter.
//!
//! Provides the SQLite-backed [`store::SqliteStore`] together with the
//! connection pool, embedded migrations and Diesel schema it runs on.

pub mod database;
pub mod store;
