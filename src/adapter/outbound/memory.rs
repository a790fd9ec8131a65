//! In-memory record store.
//!
//! Keeps both tables behind a single lock so a category delete and its
//! product cascade are one atomic step. Used by tests and by the `memory`
//! storage backend.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use parking_lot::RwLock;

use crate::domain::category::{Category, CategoryCondition, CategorySortField, NewCategory};
use crate::domain::id::{CategoryId, ProductId};
use crate::domain::page::{Direction, PageRequest, SortField, SortOrder};
use crate::domain::predicate::{Condition, Predicate};
use crate::domain::product::{NewProduct, Product, ProductCondition, ProductSortField};
use crate::domain::record::Record;
use crate::error::{Error, Result};
use crate::port::outbound::store::{QueryResult, RecordStore};

#[derive(Debug, Default)]
struct Tables {
    products: BTreeMap<ProductId, Product>,
    categories: BTreeMap<CategoryId, Category>,
    last_product_id: i64,
    last_category_id: i64,
}

/// In-memory store for both record types.
#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// Check the version token and bump it, mirroring the SQL conditional update.
fn commit_versioned<T: Record>(slot: Option<&mut T>, record: &T) -> Result<T> {
    let Some(current) = slot else {
        return Err(Error::not_found(T::KIND, record.id()));
    };
    if current.version() != record.version() {
        return Err(Error::VersionConflict {
            entity: T::KIND,
            id: record.id().into(),
            expected: record.version(),
            actual: current.version(),
        });
    }
    let mut next = record.clone();
    next.set_version(record.version() + 1);
    *current = next.clone();
    Ok(next)
}

fn window<'a, T, C, F>(
    rows: impl Iterator<Item = &'a T>,
    predicate: &Predicate<C>,
    request: &PageRequest<F>,
    compare: impl Fn(F, &T, &T) -> Ordering,
) -> QueryResult<T>
where
    T: Record + 'a,
    C: Condition<T>,
    F: SortField,
{
    let mut matched: Vec<&T> = rows.filter(|row| predicate.matches(*row)).collect();
    // Rows arrive in id order and the sort is stable, so id is the final tie-breaker.
    matched.sort_by(|a, b| {
        request
            .sort()
            .iter()
            .map(|SortOrder { field, direction }| {
                let ordering = compare(*field, a, b);
                match direction {
                    Direction::Asc => ordering,
                    Direction::Desc => ordering.reverse(),
                }
            })
            .find(|ordering| ordering.is_ne())
            .unwrap_or(Ordering::Equal)
    });

    let total = matched.len() as u64;
    let offset = usize::try_from(request.offset()).unwrap_or(usize::MAX);
    let items = matched
        .into_iter()
        .skip(offset)
        .take(request.size() as usize)
        .cloned()
        .collect();
    QueryResult { items, total }
}

fn compare_products(field: ProductSortField, a: &Product, b: &Product) -> Ordering {
    match field {
        ProductSortField::Id => a.id.cmp(&b.id),
        ProductSortField::Name => a.name.cmp(&b.name),
        ProductSortField::Price => a.price.cmp(&b.price),
        ProductSortField::Quantity => a.quantity.cmp(&b.quantity),
        ProductSortField::Version => a.version.cmp(&b.version),
    }
}

fn compare_categories(field: CategorySortField, a: &Category, b: &Category) -> Ordering {
    match field {
        CategorySortField::Id => a.id.cmp(&b.id),
        CategorySortField::Name => a.name.cmp(&b.name),
        CategorySortField::Version => a.version.cmp(&b.version),
    }
}

impl RecordStore<Product> for MemoryStore {
    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        Ok(self.tables.read().products.get(&id).cloned())
    }

    async fn insert(&self, draft: &NewProduct) -> Result<Product> {
        let mut tables = self.tables.write();
        tables.last_product_id += 1;
        let product = Product {
            id: ProductId::new(tables.last_product_id),
            name: draft.name().to_string(),
            description: draft.description().map(str::to_string),
            price: draft.price(),
            quantity: draft.quantity(),
            version: 0,
            category_id: None,
        };
        tables.products.insert(product.id, product.clone());
        Ok(product)
    }

    async fn save(&self, product: &Product) -> Result<Product> {
        let mut tables = self.tables.write();
        commit_versioned(tables.products.get_mut(&product.id), product)
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        Ok(self.tables.write().products.remove(&id).is_some())
    }

    async fn query(
        &self,
        predicate: &Predicate<ProductCondition>,
        request: &PageRequest<ProductSortField>,
    ) -> Result<QueryResult<Product>> {
        let tables = self.tables.read();
        Ok(window(
            tables.products.values(),
            predicate,
            request,
            compare_products,
        ))
    }
}

impl RecordStore<Category> for MemoryStore {
    async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        Ok(self.tables.read().categories.get(&id).cloned())
    }

    async fn insert(&self, draft: &NewCategory) -> Result<Category> {
        let mut tables = self.tables.write();
        tables.last_category_id += 1;
        let category = Category {
            id: CategoryId::new(tables.last_category_id),
            name: draft.name().to_string(),
            description: draft.description().map(str::to_string),
            version: 0,
        };
        tables.categories.insert(category.id, category.clone());
        Ok(category)
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let mut tables = self.tables.write();
        commit_versioned(tables.categories.get_mut(&category.id), category)
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let mut tables = self.tables.write();
        if tables.categories.remove(&id).is_none() {
            return Ok(false);
        }
        tables
            .products
            .retain(|_, product| product.category_id != Some(id));
        Ok(true)
    }

    async fn query(
        &self,
        predicate: &Predicate<CategoryCondition>,
        request: &PageRequest<CategorySortField>,
    ) -> Result<QueryResult<Category>> {
        let tables = self.tables.read();
        Ok(window(
            tables.categories.values(),
            predicate,
            request,
            compare_categories,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::product::ProductFilter;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    async fn seed(store: &MemoryStore, name: &str, price: Decimal, qty: i32) -> Product {
        let draft = NewProduct::try_new(name, None, price, qty).unwrap();
        RecordStore::<Product>::insert(store, &draft).await.unwrap()
    }

    async fn seed_category(store: &MemoryStore, name: &str) -> Category {
        let draft = NewCategory::try_new(name, None).unwrap();
        RecordStore::<Category>::insert(store, &draft).await.unwrap()
    }

    #[tokio::test]
    async fn insert_assigns_sequential_ids_and_version_zero() {
        let store = MemoryStore::new();
        let first = seed(&store, "Widget", dec!(9.99), 3).await;
        let second = seed(&store, "Gadget", dec!(1.00), 1).await;

        assert_eq!(first.id, ProductId::new(1));
        assert_eq!(second.id, ProductId::new(2));
        assert_eq!(first.version, 0);
        assert_eq!(first.category_id, None);
    }

    #[tokio::test]
    async fn save_bumps_version() {
        let store = MemoryStore::new();
        let mut product = seed(&store, "Widget", dec!(9.99), 3).await;
        product.quantity = 5;

        let saved = RecordStore::<Product>::save(&store, &product).await.unwrap();
        assert_eq!(saved.version, 1);
        assert_eq!(saved.quantity, 5);

        let stored = RecordStore::<Product>::get(&store, product.id).await.unwrap();
        assert_eq!(stored, Some(saved));
    }

    #[tokio::test]
    async fn save_with_stale_version_conflicts() {
        let store = MemoryStore::new();
        let original = seed(&store, "Widget", dec!(9.99), 3).await;

        let mut first = original.clone();
        first.quantity = 10;
        RecordStore::<Product>::save(&store, &first).await.unwrap();

        let mut second = original;
        second.quantity = 20;
        let err = RecordStore::<Product>::save(&store, &second)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::VersionConflict {
                expected: 0,
                actual: 1,
                ..
            }
        ));

        let stored = RecordStore::<Product>::get(&store, first.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.quantity, 10);
    }

    #[tokio::test]
    async fn save_missing_row_is_not_found() {
        let store = MemoryStore::new();
        let category = Category {
            id: CategoryId::new(42),
            name: "Ghost".to_string(),
            description: None,
            version: 0,
        };
        let err = RecordStore::<Category>::save(&store, &category)
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound { id: 42, .. }));
    }

    #[tokio::test]
    async fn deleting_category_cascades_to_its_products() {
        let store = MemoryStore::new();
        let tools = seed_category(&store, "Tools").await;
        let toys = seed_category(&store, "Toys").await;

        let mut drill = seed(&store, "Drill", dec!(50), 1).await;
        drill.category_id = Some(tools.id);
        RecordStore::<Product>::save(&store, &drill).await.unwrap();
        let mut ball = seed(&store, "Ball", dec!(2), 9).await;
        ball.category_id = Some(toys.id);
        RecordStore::<Product>::save(&store, &ball).await.unwrap();
        let loose = seed(&store, "Loose", dec!(1), 1).await;

        assert!(RecordStore::<Category>::delete(&store, tools.id).await.unwrap());
        assert!(!RecordStore::<Category>::delete(&store, tools.id).await.unwrap());

        assert!(RecordStore::<Product>::get(&store, drill.id).await.unwrap().is_none());
        assert!(RecordStore::<Product>::get(&store, ball.id).await.unwrap().is_some());
        assert!(RecordStore::<Product>::get(&store, loose.id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn query_filters_then_sorts_then_windows() {
        let store = MemoryStore::new();
        for (name, price) in [
            ("Alpha", dec!(5)),
            ("Bravo", dec!(15)),
            ("Charlie", dec!(12)),
            ("Delta", dec!(20)),
            ("Echo", dec!(25)),
        ] {
            seed(&store, name, price, 1).await;
        }

        let filter = ProductFilter {
            min_price: Some(dec!(10)),
            max_price: Some(dec!(20)),
            ..Default::default()
        };
        let request =
            PageRequest::new(0, 2, vec![SortOrder::desc(ProductSortField::Price)]).unwrap();
        let result = RecordStore::<Product>::query(&store, &filter.to_predicate(), &request)
            .await
            .unwrap();

        assert_eq!(result.total, 3);
        let names: Vec<_> = result.items.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["Delta", "Bravo"]);
    }

    #[tokio::test]
    async fn ties_break_on_ascending_id() {
        let store = MemoryStore::new();
        for name in ["c", "a", "b"] {
            seed(&store, name, dec!(3), 7).await;
        }

        let request =
            PageRequest::new(0, 10, vec![SortOrder::asc(ProductSortField::Quantity)]).unwrap();
        let result = RecordStore::<Product>::query(&store, &Predicate::Always, &request)
            .await
            .unwrap();
        let ids: Vec<_> = result.items.iter().map(|p| p.id.get()).collect();
        assert_eq!(ids, [1, 2, 3]);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty_but_counts_matches() {
        let store = MemoryStore::new();
        seed_category(&store, "Tools").await;
        seed_category(&store, "Toys").await;

        let request = PageRequest::<CategorySortField>::unsorted(5, 10).unwrap();
        let result = RecordStore::<Category>::query(&store, &Predicate::Always, &request)
            .await
            .unwrap();
        assert!(result.items.is_empty());
        assert_eq!(result.total, 2);
    }
}
