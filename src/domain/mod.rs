//! Storage-agnostic domain types.
//!
//! Records ([`product::Product`], [`category::Category`]), their validated
//! creation and patch payloads, filter predicates, and pagination types.
//! Nothing here knows about SQL or HTTP.

pub mod category;
pub mod error;
pub mod id;
pub mod money;
pub mod page;
pub mod predicate;
pub mod product;
pub mod record;
