//! Database model types for Diesel ORM.

use diesel::prelude::*;

use super::schema::{categories, products};
use crate::domain::category::{Category, NewCategory};
use crate::domain::id::{CategoryId, ProductId};
use crate::domain::money::{from_minor_units, to_minor_units};
use crate::domain::product::{NewProduct, Product};
use crate::error::{Error, Result};

/// Database row for a product.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = products)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct ProductRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub quantity: i32,
    pub version: i64,
    pub category_id: Option<i64>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: from_minor_units(row.price_cents),
            quantity: row.quantity,
            version: row.version,
            category_id: row.category_id.map(CategoryId::new),
        }
    }
}

/// Database row for a product (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = products)]
pub struct NewProductRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price_cents: i64,
    pub quantity: i32,
    pub version: i64,
}

impl<'a> NewProductRow<'a> {
    /// Build an insert row for a validated draft.
    ///
    /// # Errors
    /// Returns [`Error::Parse`] if the price has no minor-unit form.
    pub fn from_draft(draft: &'a NewProduct) -> Result<Self> {
        Ok(Self {
            name: draft.name(),
            description: draft.description(),
            price_cents: price_cents(draft.price())?,
            quantity: draft.quantity(),
            version: 0,
        })
    }
}

/// Database row for a category.
#[derive(Queryable, Selectable, Debug, Clone)]
#[diesel(table_name = categories)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CategoryRow {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub version: i64,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::new(row.id),
            name: row.name,
            description: row.description,
            version: row.version,
        }
    }
}

/// Database row for a category (insertable).
#[derive(Insertable, Debug, Clone)]
#[diesel(table_name = categories)]
pub struct NewCategoryRow<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub version: i64,
}

impl<'a> From<&'a NewCategory> for NewCategoryRow<'a> {
    fn from(draft: &'a NewCategory) -> Self {
        Self {
            name: draft.name(),
            description: draft.description(),
            version: 0,
        }
    }
}

/// Minor units for a price column.
///
/// # Errors
/// Returns [`Error::Parse`] if the price overflows `i64` cents.
pub fn price_cents(price: rust_decimal::Decimal) -> Result<i64> {
    to_minor_units(price).ok_or_else(|| Error::Parse(format!("price {price} out of range")))
}
