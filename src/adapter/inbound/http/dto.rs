//! Request and response bodies.
//!
//! Field names are camelCase on the wire. Prices are JSON numbers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::category::{Category, CategoryPatch, NewCategory};
use crate::domain::error::DomainError;
use crate::domain::product::{NewProduct, Product, ProductPatch};

/// Product as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    #[serde(with = "rust_decimal::serde::float")]
    pub price: Decimal,
    pub quantity: i32,
    pub version: i64,
    pub category_id: Option<i64>,
}

impl From<Product> for ProductDto {
    fn from(product: Product) -> Self {
        Self {
            id: product.id.get(),
            name: product.name,
            description: product.description,
            price: product.price,
            quantity: product.quantity,
            version: product.version,
            category_id: product.category_id.map(|id| id.get()),
        }
    }
}

/// Category as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryDto {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
    pub version: i64,
}

impl From<Category> for CategoryDto {
    fn from(category: Category) -> Self {
        Self {
            id: category.id.get(),
            name: category.name,
            description: category.description,
            version: category.version,
        }
    }
}

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// Every field is optional on the wire; creation checks for the required
/// ones, updates treat absent fields as unchanged. Unknown fields such as
/// `id` or `version` are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub quantity: Option<i32>,
}

impl ProductRequest {
    /// Validate as a creation payload.
    ///
    /// # Errors
    /// Returns [`DomainError::MissingField`] or the draft's validation error.
    pub fn into_draft(self) -> Result<NewProduct, DomainError> {
        let name = self.name.ok_or(DomainError::MissingField { field: "name" })?;
        let price = self.price.ok_or(DomainError::MissingField { field: "price" })?;
        let quantity = self
            .quantity
            .ok_or(DomainError::MissingField { field: "quantity" })?;
        NewProduct::try_new(name, self.description, price, quantity)
    }

    #[must_use]
    pub fn into_patch(self) -> ProductPatch {
        ProductPatch {
            name: self.name,
            description: self.description,
            price: self.price,
            quantity: self.quantity,
        }
    }
}

/// Body of `POST /categories` and `PUT /categories/{id}`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

impl CategoryRequest {
    /// # Errors
    /// Returns [`DomainError::MissingField`] or [`DomainError::BlankName`].
    pub fn into_draft(self) -> Result<NewCategory, DomainError> {
        let name = self.name.ok_or(DomainError::MissingField { field: "name" })?;
        NewCategory::try_new(name, self.description)
    }

    #[must_use]
    pub fn into_patch(self) -> CategoryPatch {
        CategoryPatch {
            name: self.name,
            description: self.description,
        }
    }
}

/// Body of `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
}
