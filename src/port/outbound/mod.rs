//! Outbound ports (driven side): interfaces implemented by outbound adapters.
//!
//! The only infrastructure dependency of the inventory core is its record
//! store.

pub mod store;
