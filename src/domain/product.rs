//! Product records and their filter conditions.

use super::error::DomainError;
use super::id::{CategoryId, ProductId};
use super::money::{validate_price, Price};
use super::page::SortField;
use super::predicate::{Condition, Predicate};
use super::record::{validate_name, EntityKind, Record};

/// A stocked product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: Option<String>,
    pub price: Price,
    pub quantity: i32,
    pub version: i64,
    /// Owning category; `None` means uncategorized.
    pub category_id: Option<CategoryId>,
}

impl Product {
    /// Merge a partial update. Omitted fields keep their persisted values.
    ///
    /// # Errors
    /// Returns a [`DomainError`] if a supplied value violates an invariant;
    /// the product is left untouched in that case.
    pub fn apply(&mut self, patch: ProductPatch) -> Result<(), DomainError> {
        let name = patch
            .name
            .map(|name| validate_name(EntityKind::Product, name))
            .transpose()?;
        let price = patch.price.map(validate_price).transpose()?;
        let quantity = patch.quantity.map(validate_quantity).transpose()?;

        if let Some(name) = name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = Some(description);
        }
        if let Some(price) = price {
            self.price = price;
        }
        if let Some(quantity) = quantity {
            self.quantity = quantity;
        }
        Ok(())
    }
}

impl Record for Product {
    type Id = ProductId;
    type Draft = NewProduct;
    type Condition = ProductCondition;
    type SortField = ProductSortField;

    const KIND: EntityKind = EntityKind::Product;

    fn id(&self) -> ProductId {
        self.id
    }

    fn version(&self) -> i64 {
        self.version
    }

    fn set_version(&mut self, version: i64) {
        self.version = version;
    }
}

/// Validated payload for creating a product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    name: String,
    description: Option<String>,
    price: Price,
    quantity: i32,
}

impl NewProduct {
    /// Validate and build a creation payload.
    ///
    /// # Errors
    /// Returns a [`DomainError`] for a blank name, a non-positive or
    /// over-precise price, or a negative quantity.
    pub fn try_new(
        name: impl Into<String>,
        description: Option<String>,
        price: Price,
        quantity: i32,
    ) -> Result<Self, DomainError> {
        Ok(Self {
            name: validate_name(EntityKind::Product, name.into())?,
            description,
            price: validate_price(price)?,
            quantity: validate_quantity(quantity)?,
        })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    #[must_use]
    pub fn price(&self) -> Price {
        self.price
    }

    #[must_use]
    pub fn quantity(&self) -> i32 {
        self.quantity
    }
}

/// Partial update for a product. `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<Price>,
    pub quantity: Option<i32>,
}

fn validate_quantity(quantity: i32) -> Result<i32, DomainError> {
    if quantity < 0 {
        return Err(DomainError::NegativeQuantity { quantity });
    }
    Ok(quantity)
}

/// A single product filter condition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductCondition {
    /// Case-insensitive substring match on the name.
    NameContains(String),
    /// `price >= bound`.
    MinPrice(Price),
    /// `price <= bound`.
    MaxPrice(Price),
    /// `quantity >= bound`.
    MinQuantity(i32),
    /// `quantity <= bound`.
    MaxQuantity(i32),
    /// Product belongs to the category.
    InCategory(CategoryId),
}

impl Condition<Product> for ProductCondition {
    fn matches(&self, product: &Product) -> bool {
        match self {
            Self::NameContains(needle) => product
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
            Self::MinPrice(bound) => product.price >= *bound,
            Self::MaxPrice(bound) => product.price <= *bound,
            Self::MinQuantity(bound) => product.quantity >= *bound,
            Self::MaxQuantity(bound) => product.quantity <= *bound,
            Self::InCategory(category) => product.category_id == Some(*category),
        }
    }
}

/// Optional product filters; each present value narrows the listing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductFilter {
    pub name: Option<String>,
    pub min_price: Option<Price>,
    pub max_price: Option<Price>,
    pub min_quantity: Option<i32>,
    pub max_quantity: Option<i32>,
    pub category_id: Option<CategoryId>,
}

impl ProductFilter {
    /// AND together one condition per present filter.
    #[must_use]
    pub fn to_predicate(&self) -> Predicate<ProductCondition> {
        Predicate::Always
            .and_maybe(self.name.clone().map(ProductCondition::NameContains))
            .and_maybe(self.min_price.map(ProductCondition::MinPrice))
            .and_maybe(self.max_price.map(ProductCondition::MaxPrice))
            .and_maybe(self.min_quantity.map(ProductCondition::MinQuantity))
            .and_maybe(self.max_quantity.map(ProductCondition::MaxQuantity))
            .and_maybe(self.category_id.map(ProductCondition::InCategory))
    }
}

/// Sortable product properties.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductSortField {
    Id,
    Name,
    Price,
    Quantity,
    Version,
}

impl SortField for ProductSortField {
    const ENTITY: EntityKind = EntityKind::Product;

    fn from_name(name: &str) -> Option<Self> {
        match name {
            "id" => Some(Self::Id),
            "name" => Some(Self::Name),
            "price" => Some(Self::Price),
            "quantity" => Some(Self::Quantity),
            "version" => Some(Self::Version),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Price => "price",
            Self::Quantity => "quantity",
            Self::Version => "version",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn widget() -> Product {
        Product {
            id: ProductId::new(1),
            name: "Blue Widget".to_string(),
            description: Some("A widget".to_string()),
            price: dec!(9.99),
            quantity: 3,
            version: 0,
            category_id: None,
        }
    }

    #[test]
    fn try_new_rejects_negative_quantity() {
        let err = NewProduct::try_new("Widget", None, dec!(1), -1).unwrap_err();
        assert_eq!(err, DomainError::NegativeQuantity { quantity: -1 });
    }

    #[test]
    fn try_new_rejects_blank_name() {
        let err = NewProduct::try_new("   ", None, dec!(1), 0).unwrap_err();
        assert!(matches!(err, DomainError::BlankName { .. }));
    }

    #[test]
    fn apply_keeps_omitted_fields() {
        let mut product = widget();
        product
            .apply(ProductPatch {
                quantity: Some(5),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(product.quantity, 5);
        assert_eq!(product.name, "Blue Widget");
        assert_eq!(product.price, dec!(9.99));
        assert_eq!(product.description.as_deref(), Some("A widget"));
    }

    #[test]
    fn apply_is_all_or_nothing() {
        let mut product = widget();
        let result = product.apply(ProductPatch {
            name: Some("Renamed".to_string()),
            price: Some(dec!(-2)),
            ..Default::default()
        });

        assert!(result.is_err());
        assert_eq!(product, widget());
    }

    #[test]
    fn empty_filter_builds_unconstrained_predicate() {
        let predicate = ProductFilter::default().to_predicate();
        assert_eq!(predicate, Predicate::Always);
        assert!(predicate.matches(&widget()));
    }

    #[test]
    fn name_filter_is_case_insensitive_substring() {
        let filter = ProductFilter {
            name: Some("WIDG".to_string()),
            ..Default::default()
        };
        assert!(filter.to_predicate().matches(&widget()));

        let filter = ProductFilter {
            name: Some("gadget".to_string()),
            ..Default::default()
        };
        assert!(!filter.to_predicate().matches(&widget()));
    }

    #[test]
    fn price_range_includes_both_bounds() {
        let filter = ProductFilter {
            min_price: Some(dec!(10)),
            max_price: Some(dec!(20)),
            ..Default::default()
        };
        let predicate = filter.to_predicate();

        let priced = |price| Product {
            price,
            ..widget()
        };
        assert!(predicate.matches(&priced(dec!(10))));
        assert!(predicate.matches(&priced(dec!(20))));
        assert!(predicate.matches(&priced(dec!(15.50))));
        assert!(!predicate.matches(&priced(dec!(9.99))));
        assert!(!predicate.matches(&priced(dec!(20.01))));
    }

    #[test]
    fn every_present_filter_contributes_a_condition() {
        let filter = ProductFilter {
            name: Some("w".to_string()),
            min_price: Some(dec!(1)),
            max_price: Some(dec!(2)),
            min_quantity: Some(0),
            max_quantity: Some(9),
            category_id: Some(CategoryId::new(7)),
        };
        assert_eq!(filter.to_predicate().conditions().len(), 6);
    }

    #[test]
    fn quantity_and_category_conditions() {
        let mut product = widget();
        product.category_id = Some(CategoryId::new(7));

        assert!(ProductCondition::MinQuantity(3).matches(&product));
        assert!(!ProductCondition::MaxQuantity(2).matches(&product));
        assert!(ProductCondition::InCategory(CategoryId::new(7)).matches(&product));
        assert!(!ProductCondition::InCategory(CategoryId::new(8)).matches(&product));
    }
}
