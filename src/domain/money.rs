//! Monetary types for price representation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use super::error::DomainError;

/// Price represented as a Decimal for precision.
pub type Price = Decimal;

/// Number of fractional digits a price may carry.
pub const PRICE_SCALE: u32 = 2;

const MINOR_UNITS_PER_MAJOR: i64 = 100;

/// Validate a price: strictly positive with at most [`PRICE_SCALE`] fractional digits.
///
/// # Errors
/// Returns [`DomainError::NonPositivePrice`], [`DomainError::PriceScale`], or
/// [`DomainError::PriceOutOfRange`] when the amount has no `i64` minor-unit form.
pub fn validate_price(price: Price) -> Result<Price, DomainError> {
    if price <= Decimal::ZERO {
        return Err(DomainError::NonPositivePrice { price });
    }
    if price.normalize().scale() > PRICE_SCALE {
        return Err(DomainError::PriceScale {
            price,
            max_scale: PRICE_SCALE,
        });
    }
    if to_minor_units(price).is_none() {
        return Err(DomainError::PriceOutOfRange { price });
    }
    Ok(price)
}

/// Convert a validated price into integer minor units (cents).
///
/// Returns `None` when the amount does not fit in an `i64`.
#[must_use]
pub fn to_minor_units(price: Price) -> Option<i64> {
    price
        .checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))?
        .trunc()
        .to_i64()
}

/// Convert integer minor units back into a price.
#[must_use]
pub fn from_minor_units(units: i64) -> Price {
    Decimal::new(units, PRICE_SCALE)
}

/// Smallest minor-unit amount that is `>= bound`, saturating at the `i64` range.
#[must_use]
pub fn minor_units_ceil(bound: Price) -> i64 {
    saturate(scaled(bound).map(|units| units.ceil()), bound)
}

/// Largest minor-unit amount that is `<= bound`, saturating at the `i64` range.
#[must_use]
pub fn minor_units_floor(bound: Price) -> i64 {
    saturate(scaled(bound).map(|units| units.floor()), bound)
}

fn scaled(amount: Price) -> Option<Decimal> {
    amount.checked_mul(Decimal::from(MINOR_UNITS_PER_MAJOR))
}

fn saturate(units: Option<Decimal>, sign_of: Decimal) -> i64 {
    units.and_then(|u| u.to_i64()).unwrap_or(if sign_of.is_sign_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
