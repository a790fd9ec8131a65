//! Product use cases.

use std::sync::Arc;

use tracing::info;

use super::update::update_with;
use crate::domain::id::ProductId;
use crate::domain::page::{Page, PageRequest};
use crate::domain::product::{NewProduct, Product, ProductFilter, ProductPatch, ProductSortField};
use crate::domain::record::EntityKind;
use crate::error::{Error, Result};
use crate::port::outbound::store::RecordStore;

/// Create, read, update, delete and list products.
pub struct ProductService<S> {
    store: Arc<S>,
}

impl<S> Clone for ProductService<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: RecordStore<Product>> ProductService<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Store a new product with version 0.
    ///
    /// # Errors
    /// Returns an error if the store rejects the insert.
    pub async fn create(&self, draft: NewProduct) -> Result<Product> {
        let product = self.store.insert(&draft).await?;
        info!(product_id = %product.id, name = %product.name, "Product created");
        Ok(product)
    }

    /// Fetch one product.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no product has `id`.
    pub async fn get(&self, id: ProductId) -> Result<Product> {
        self.store
            .get(id)
            .await?
            .ok_or_else(|| Error::not_found(EntityKind::Product, id))
    }

    /// List products matching every present filter, one page at a time.
    ///
    /// # Errors
    /// Returns an error if the store query fails.
    pub async fn list(
        &self,
        filter: &ProductFilter,
        request: &PageRequest<ProductSortField>,
    ) -> Result<Page<Product>> {
        let result = self.store.query(&filter.to_predicate(), request).await?;
        Ok(Page::new(result.items, request, result.total))
    }

    /// Apply a partial update through the optimistic update protocol.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`], a validation error, or
    /// [`Error::ConcurrentModification`].
    pub async fn update(&self, id: ProductId, patch: ProductPatch) -> Result<Product> {
        let product = update_with(self.store.as_ref(), id, |product: &mut Product| {
            product.apply(patch).map_err(Error::from)
        })
        .await?;
        info!(product_id = %id, version = product.version, "Product updated");
        Ok(product)
    }

    /// Delete a product.
    ///
    /// # Errors
    /// Returns [`Error::NotFound`] if no product has `id`.
    pub async fn delete(&self, id: ProductId) -> Result<()> {
        if !self.store.delete(id).await? {
            return Err(Error::not_found(EntityKind::Product, id));
        }
        info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::outbound::memory::MemoryStore;
    use crate::domain::page::SortOrder;
    use rust_decimal_macros::dec;

    fn service() -> ProductService<MemoryStore> {
        ProductService::new(Arc::new(MemoryStore::new()))
    }

    fn draft(name: &str, price: rust_decimal::Decimal, quantity: i32) -> NewProduct {
        NewProduct::try_new(name, None, price, quantity).unwrap()
    }

    #[tokio::test]
    async fn widget_lifecycle() {
        let products = service();

        let created = products.create(draft("Widget", dec!(9.99), 3)).await.unwrap();
        assert_eq!(created.id, ProductId::new(1));
        assert_eq!(created.version, 0);
        assert_eq!(products.get(created.id).await.unwrap(), created);

        let updated = products
            .update(
                created.id,
                ProductPatch {
                    quantity: Some(5),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.name, "Widget");
        assert_eq!(updated.price, dec!(9.99));
        assert_eq!(updated.quantity, 5);
        assert_eq!(updated.version, 1);

        products.delete(created.id).await.unwrap();
        let err = products.get(created.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 1, .. }));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let err = service().delete(ProductId::new(3)).await.unwrap_err();
        assert_eq!(err.to_string(), "Product not found with id 3");
    }

    #[tokio::test]
    async fn empty_filter_lists_everything() {
        let products = service();
        for name in ["a", "b", "c"] {
            products.create(draft(name, dec!(1), 1)).await.unwrap();
        }

        let request = PageRequest::unsorted(0, 20).unwrap();
        let page = products
            .list(&ProductFilter::default(), &request)
            .await
            .unwrap();
        assert_eq!(page.content.len(), 3);
        assert_eq!(page.total_elements, 3);
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn price_range_is_inclusive() {
        let products = service();
        for (name, price) in [
            ("cheap", dec!(9.99)),
            ("low", dec!(10)),
            ("mid", dec!(15)),
            ("high", dec!(20)),
            ("dear", dec!(20.01)),
        ] {
            products.create(draft(name, price, 1)).await.unwrap();
        }

        let filter = ProductFilter {
            min_price: Some(dec!(10)),
            max_price: Some(dec!(20)),
            ..Default::default()
        };
        let request =
            PageRequest::new(0, 10, vec![SortOrder::asc(ProductSortField::Price)]).unwrap();
        let page = products.list(&filter, &request).await.unwrap();

        let names: Vec<_> = page.content.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["low", "mid", "high"]);
    }

    #[tokio::test]
    async fn pages_report_totals_across_windows() {
        let products = service();
        for i in 0..5 {
            products
                .create(draft(&format!("item-{i}"), dec!(1), i))
                .await
                .unwrap();
        }

        let request = PageRequest::unsorted(2, 2).unwrap();
        let page = products
            .list(&ProductFilter::default(), &request)
            .await
            .unwrap();
        assert_eq!(page.content.len(), 1);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_elements, 5);
        assert_eq!(page.total_pages, 3);
    }
}
