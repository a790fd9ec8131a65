//! The use-case bundle handed to inbound adapters.

use std::sync::Arc;

use super::assignment::CategoryAssignment;
use super::category::CategoryService;
use super::product::ProductService;
use crate::port::outbound::store::InventoryStore;

/// All inventory use cases over one store.
pub struct Inventory<S> {
    products: ProductService<S>,
    categories: CategoryService<S>,
    assignment: CategoryAssignment<S>,
}

impl<S: InventoryStore> Inventory<S> {
    #[must_use]
    pub fn new(store: Arc<S>) -> Self {
        Self {
            products: ProductService::new(Arc::clone(&store)),
            categories: CategoryService::new(Arc::clone(&store)),
            assignment: CategoryAssignment::new(store),
        }
    }

    #[must_use]
    pub fn products(&self) -> &ProductService<S> {
        &self.products
    }

    #[must_use]
    pub fn categories(&self) -> &CategoryService<S> {
        &self.categories
    }

    #[must_use]
    pub fn assignment(&self) -> &CategoryAssignment<S> {
        &self.assignment
    }
}
