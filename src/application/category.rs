//! Category use cases.

use std::sync::Arc;

use tracing::info;

use super::update::update_with;
use crate::domain::category::{
    Category, CategoryFilter, CategoryPatch, CategorySortField, NewCategory,
};
use crate::domain::id::CategoryId;
use crate::domain::page::{Page, PageRequest};
use crate::domain::record::EntityKind;
use crate::error::{Error, Result};
use crate::port::outbound::store::RecordStore;

/// Create, read, update, delete and list categories.
pub struct CategoryService<S> {
    store: Arc<S>,
}

impl<S> Clone for CategoryService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore<Category>> CategoryService<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// # Errors
    /// Returns an error if the store rejects the insert.
    pub async fn create(&self, draft: NewCategory) -> Result<Category> {
        let category = self.store.insert(&draft).await?;
        info!(category_id = %category.id, name = %category.name, "Category created");
        Ok(category)
    }

    /// # Errors
    /// Returns [`Error::NotFound`] if no category has `id`.
    pub async fn get(&self, id: CategoryId) -> Result<Category> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Category, id))
    }

    /// # Errors
    /// Returns an error if the store query fails.
    pub async fn list(
        &self,
        filter: &CategoryFilter,
        request: &PageRequest<CategorySortField>,
    ) -> Result<Page<Category>> {
        let result = self.store.query(&filter.to_predicate(), request).await?;
        Ok(Page::new(result.items, request, result.total))
    }

    /// # Errors
    /// Returns [`Error::NotFound`], a validation error, or
    /// [`Error::ConcurrentModification`].
    pub async fn update(&self, id: CategoryId, patch: CategoryPatch) -> Result<Category> {
        let category = update_with(self.store.as_ref(), id, |category: &mut Category| {
            category.apply(patch).map_err(Error::from)
        })
        .await?;
        info!(category_id = %id, version = category.version, "Category updated");
        Ok(category)
    }

    /// Delete a category together with every product in it.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no category has `id`.
    pub async fn delete(&self, id: CategoryId) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::not_found(EntityKind::Category, id));
        }
        info!(category_id = %id, "Category deleted with its products");
        Ok(())
    }
}
