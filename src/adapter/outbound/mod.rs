//! Outbound adapters (driven side): record store implementations.

pub mod memory;
pub mod sqlite;
