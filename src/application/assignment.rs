//! Product to category assignment.
//!
//! A product's category must exist at the instant it is assigned. The
//! product write itself goes through the optimistic update protocol, so an
//! assignment racing another product update fails with a conflict rather
//! than overwriting it.

use std::sync::Arc;

use tracing::info;

use super::update::update_with;
use crate::domain::category::Category;
use crate::domain::id::{CategoryId, ProductId};
use crate::domain::page::{Page, PageRequest};
use crate::domain::product::{Product, ProductFilter, ProductSortField};
use crate::domain::record::EntityKind;
use crate::error::{Error, Result};
use crate::port::outbound::store::{InventoryStore, RecordStore};

/// Links products to categories and reads a category's live product view.
pub struct CategoryAssignment<S> {
    store: Arc<S>,
}

impl<S> Clone for CategoryAssignment<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: InventoryStore> CategoryAssignment<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    async fn require_category(&self, id: CategoryId) -> Result<Category> {
        RecordStore::<Category>::get(self.store.as_ref(), id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Category, id))
    }

    /// Point a product at a category, replacing any previous assignment.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if either record is missing, or
    /// [`Error::ConcurrentModification`] if the product changed meanwhile.
    pub async fn assign(&self, product_id: ProductId, category_id: CategoryId) -> Result<Product> {
        let product = RecordStore::<Product>::get(self.store.as_ref(), product_id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Product, product_id))?;
        self.require_category(category_id).await?;

        let product = update_with::<Product, _, _>(self.store.as_ref(), product.id, |product| {
            product.category_id = Some(category_id);
            Ok(())
        })
        .await?;
        info!(
            product_id = %product_id,
            category_id = %category_id,
            version = product.version,
            "Category assigned"
        );
        Ok(product)
    }

    /// Clear a product's category.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the product is missing, or
    /// [`Error::ConcurrentModification`] if it changed meanwhile.
    pub async fn unassign(&self, product_id: ProductId) -> Result<Product> {
        let product = update_with::<Product, _, _>(self.store.as_ref(), product_id, |product| {
            product.category_id = None;
            Ok(())
        })
        .await?;
        info!(product_id = %product_id, version = product.version, "Category unassigned");
        Ok(product)
    }

    /// Products currently in a category, narrowed by `filter`.
    ///
    /// Any `category_id` already on `filter` is replaced.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if the category is missing.
    pub async fn products_of(
        &self,
        category_id: CategoryId,
        filter: ProductFilter,
        request: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>> {
        self.require_category(category_id).await?;
        let filter = ProductFilter {
            category_id: Some(category_id),
            ..filter
        };
        let result =
            RecordStore::<Product>::query(self.store.as_ref(), &filter.to_predicate(), request)
                .await?;
        Ok(Page::new(result.items, request, result.total))
    }
}
