//! Application services (use cases).
//!
//! These services orchestrate domain logic over the record store port.
//! [`inventory::Inventory`] bundles them around one shared store.

pub mod assignment;
pub mod category;
pub mod inventory;
pub mod product;
pub mod update;
