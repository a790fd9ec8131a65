//! Domain validation errors for core domain types.
//!
//! This module defines errors that occur when domain invariants are violated.
//! They are returned by `try_new` constructors, by patch application, and by
//! the page request parser. The HTTP layer reports all of them as client
//! errors.
//!
//! # Examples
//!
//! ```
//! use inventory::domain::error::DomainError;
//! use inventory::domain::product::NewProduct;
//! use rust_decimal::Decimal;
//!
//! let result = NewProduct::try_new("Widget", None, Decimal::ZERO, 3);
//! assert!(matches!(result, Err(DomainError::NonPositivePrice { .. })));
//! ```

use thiserror::Error;

use super::record::EntityKind;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Names must contain at least one non-whitespace character.
    #[error("{entity} name is required")]
    BlankName {
        /// The record type whose name was blank.
        entity: EntityKind,
    },

    /// A field required for creation was not supplied.
    #[error("{field} is required")]
    MissingField {
        /// Wire name of the missing field.
        field: &'static str,
    },

    /// Prices must be strictly positive.
    #[error("Price must be greater than 0, got {price}")]
    NonPositivePrice {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// Prices are stored in minor units and cannot carry more precision.
    #[error("Price {price} has more than {max_scale} decimal places")]
    PriceScale {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
        /// Maximum number of fractional digits.
        max_scale: u32,
    },

    /// Prices must fit the stored minor-unit range.
    #[error("Price {price} is too large")]
    PriceOutOfRange {
        /// The invalid price that was provided.
        price: rust_decimal::Decimal,
    },

    /// Stock quantities cannot be negative.
    #[error("Quantity must be zero or positive, got {quantity}")]
    NegativeQuantity {
        /// The invalid quantity that was provided.
        quantity: i32,
    },

    /// Page size must be positive.
    #[error("page size must be greater than 0")]
    ZeroPageSize,

    /// Sort referenced a property the record does not have.
    #[error("no sortable property '{property}' on {entity}")]
    UnknownSortProperty {
        /// The record type being listed.
        entity: EntityKind,
        /// The rejected property name.
        property: String,
    },

    /// Sort direction was neither `asc` nor `desc`.
    #[error("invalid sort direction '{direction}'")]
    InvalidSortDirection {
        /// The rejected direction.
        direction: String,
    },

    /// A query parameter could not be parsed.
    #[error("invalid value '{value}' for parameter {parameter}")]
    InvalidParameter {
        /// The parameter name.
        parameter: String,
        /// The raw value that failed to parse.
        value: String,
    },

    /// The request body could not be decoded.
    #[error("malformed request body: {0}")]
    MalformedBody(String),
}
