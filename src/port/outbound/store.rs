//! Persistence ports for products and categories.
//!
//! [`RecordStore`] is written once and implemented per record type. Every
//! mutating call is atomic: on error the stored state is unchanged.

use std::future::Future;

use crate::domain::category::Category;
use crate::domain::page::PageRequest;
use crate::domain::predicate::Predicate;
use crate::domain::product::Product;
use crate::domain::record::Record;
use crate::error::Result;

/// Matching records for one page plus the match count before windowing.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult<T> {
    pub items: Vec<T>,
    pub total: u64,
}

/// Storage operations for one record type.
pub trait RecordStore<T: Record>: Send + Sync {
    /// Get a record by ID.
    fn get(&self, id: T::Id) -> impl Future<Output = Result<Option<T>>> + Send;

    /// Insert a new record. The store assigns the id and version 0.
    fn insert(&self, draft: &T::Draft) -> impl Future<Output = Result<T>> + Send;

    /// Persist every mutable field of `record` and bump its version.
    ///
    /// Succeeds only while the persisted version still equals
    /// `record.version()`; otherwise fails with
    /// [`Error::VersionConflict`](crate::error::Error::VersionConflict), or
    /// [`Error::NotFound`](crate::error::Error::NotFound) if the row is gone.
    fn save(&self, record: &T) -> impl Future<Output = Result<T>> + Send;

    /// Delete a record by ID. Returns false if it did not exist.
    ///
    /// Deleting a category also deletes every product referencing it.
    fn delete(&self, id: T::Id) -> impl Future<Output = Result<bool>> + Send;

    /// Apply predicate, then sort (ties broken by ascending id), then the page window.
    fn query(
        &self,
        predicate: &Predicate<T::Condition>,
        request: &PageRequest<T::SortField>,
    ) -> impl Future<Output = Result<QueryResult<T>>> + Send;
}

/// A store holding both product and category tables.
pub trait InventoryStore: RecordStore<Product> + RecordStore<Category> + 'static {}

impl<S> InventoryStore for S where S: RecordStore<Product> + RecordStore<Category> + 'static {}
