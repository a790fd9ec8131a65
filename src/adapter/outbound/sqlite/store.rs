//! SQLite record store implementation.
//!
//! Provides persistent storage for products and categories using SQLite
//! and Diesel ORM. Saves are conditional updates on `(id, version)`, so a
//! concurrent writer is detected at commit time without holding locks
//! across requests.

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::adapter::outbound::sqlite::database::connection::{fold_case, DbPool};
use crate::adapter::outbound::sqlite::database::model::{
    price_cents, CategoryRow, NewCategoryRow, NewProductRow, ProductRow,
};
use crate::adapter::outbound::sqlite::database::schema::{categories, products};
use crate::domain::category::{Category, CategoryCondition, CategorySortField, NewCategory};
use crate::domain::id::{CategoryId, ProductId};
use crate::domain::money::{minor_units_ceil, minor_units_floor};
use crate::domain::page::{Direction, PageRequest, SortField};
use crate::domain::predicate::Predicate;
use crate::domain::product::{NewProduct, Product, ProductCondition, ProductSortField};
use crate::domain::record::EntityKind;
use crate::error::{Error, Result};
use crate::port::outbound::store::{QueryResult, RecordStore};

/// Helper struct for querying last_insert_rowid().
#[derive(QueryableByName)]
struct LastInsertRowId {
    #[diesel(sql_type = diesel::sql_types::BigInt)]
    #[diesel(column_name = "id")]
    id: i64,
}

macro_rules! order_by {
    ($query:expr, $column:expr, $direction:expr) => {
        match $direction {
            Direction::Asc => $query.then_order_by($column.asc()),
            Direction::Desc => $query.then_order_by($column.desc()),
        }
    };
}

/// `%needle%` for a case-insensitive LIKE, with wildcards in the needle escaped.
fn contains_pattern(needle: &str) -> String {
    let mut pattern = String::with_capacity(needle.len() + 2);
    pattern.push('%');
    for c in needle.to_lowercase().chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

fn window_bounds<F: SortField>(request: &PageRequest<F>) -> (i64, i64) {
    let offset = i64::try_from(request.offset()).unwrap_or(i64::MAX);
    (offset, i64::from(request.size()))
}

fn filter_products<'a>(
    mut query: products::BoxedQuery<'a, Sqlite>,
    predicate: &Predicate<ProductCondition>,
) -> products::BoxedQuery<'a, Sqlite> {
    for condition in predicate.conditions() {
        query = match condition {
            ProductCondition::NameContains(needle) => query.filter(
                fold_case(products::name)
                    .like(contains_pattern(needle))
                    .escape('\\'),
            ),
            ProductCondition::MinPrice(bound) => {
                query.filter(products::price_cents.ge(minor_units_ceil(*bound)))
            }
            ProductCondition::MaxPrice(bound) => {
                query.filter(products::price_cents.le(minor_units_floor(*bound)))
            }
            ProductCondition::MinQuantity(bound) => query.filter(products::quantity.ge(*bound)),
            ProductCondition::MaxQuantity(bound) => query.filter(products::quantity.le(*bound)),
            ProductCondition::InCategory(id) => query.filter(products::category_id.eq(id.get())),
        };
    }
    query
}

fn filter_categories<'a>(
    mut query: categories::BoxedQuery<'a, Sqlite>,
    predicate: &Predicate<CategoryCondition>,
) -> categories::BoxedQuery<'a, Sqlite> {
    for condition in predicate.conditions() {
        query = match condition {
            CategoryCondition::NameContains(needle) => query.filter(
                fold_case(categories::name)
                    .like(contains_pattern(needle))
                    .escape('\\'),
            ),
        };
    }
    query
}

/// SQLite-backed store for products and categories.
pub struct SqliteStore {
    /// Database connection pool.
    pool: DbPool,
}

impl SqliteStore {
    /// Create a new SQLite store with the given connection pool.
    #[must_use]
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(
        &self,
    ) -> Result<diesel::r2d2::PooledConnection<diesel::r2d2::ConnectionManager<SqliteConnection>>>
    {
        self.pool
            .get()
            .map_err(|e| Error::Connection(e.to_string()))
    }
}

/// Classify a conditional update that touched no row.
fn missed_update(entity: EntityKind, id: i64, expected: i64, current: Option<i64>) -> Error {
    match current {
        None => Error::not_found(entity, id),
        Some(actual) => Error::VersionConflict {
            entity,
            id,
            expected,
            actual,
        },
    }
}

impl RecordStore<Product> for SqliteStore {
    async fn get(&self, id: ProductId) -> Result<Option<Product>> {
        let mut conn = self.conn()?;

        let row: Option<ProductRow> = products::table
            .find(id.get())
            .select(ProductRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(Product::from))
    }

    async fn insert(&self, draft: &NewProduct) -> Result<Product> {
        let row = NewProductRow::from_draft(draft)?;
        let mut conn = self.conn()?;

        let inserted = conn.transaction(|conn| {
            diesel::insert_into(products::table)
                .values(&row)
                .execute(conn)?;

            let id = diesel::sql_query("SELECT last_insert_rowid() AS id")
                .get_result::<LastInsertRowId>(conn)?
                .id;

            products::table
                .find(id)
                .select(ProductRow::as_select())
                .first(conn)
        });

        inserted
            .map(Product::from)
            .map_err(|e| Error::Database(e.to_string()))
    }

    async fn save(&self, product: &Product) -> Result<Product> {
        let id = product.id.get();
        let cents = price_cents(product.price)?;
        let mut conn = self.conn()?;

        let saved = conn.transaction::<ProductRow, Error, _>(|conn| {
            let updated = diesel::update(
                products::table
                    .filter(products::id.eq(id))
                    .filter(products::version.eq(product.version)),
            )
            .set((
                products::name.eq(&product.name),
                products::description.eq(product.description.as_deref()),
                products::price_cents.eq(cents),
                products::quantity.eq(product.quantity),
                products::category_id.eq(product.category_id.map(CategoryId::get)),
                products::version.eq(products::version + 1),
            ))
            .execute(conn)?;

            if updated == 0 {
                let current = products::table
                    .find(id)
                    .select(products::version)
                    .first::<i64>(conn)
                    .optional()?;
                return Err(missed_update(
                    EntityKind::Product,
                    id,
                    product.version,
                    current,
                ));
            }

            Ok(products::table
                .find(id)
                .select(ProductRow::as_select())
                .first(conn)?)
        })?;

        Ok(Product::from(saved))
    }

    async fn delete(&self, id: ProductId) -> Result<bool> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(products::table.find(id.get()))
            .execute(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn query(
        &self,
        predicate: &Predicate<ProductCondition>,
        request: &PageRequest<ProductSortField>,
    ) -> Result<QueryResult<Product>> {
        let mut conn = self.conn()?;

        let total: i64 = filter_products(products::table.into_boxed(), predicate)
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut query = filter_products(products::table.into_boxed(), predicate);
        for order in request.sort() {
            query = match order.field {
                ProductSortField::Id => order_by!(query, products::id, order.direction),
                ProductSortField::Name => order_by!(query, products::name, order.direction),
                ProductSortField::Price => {
                    order_by!(query, products::price_cents, order.direction)
                }
                ProductSortField::Quantity => {
                    order_by!(query, products::quantity, order.direction)
                }
                ProductSortField::Version => order_by!(query, products::version, order.direction),
            };
        }
        let (offset, limit) = window_bounds(request);

        let rows: Vec<ProductRow> = query
            .then_order_by(products::id.asc())
            .offset(offset)
            .limit(limit)
            .select(ProductRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(QueryResult {
            items: rows.into_iter().map(Product::from).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}

impl RecordStore<Category> for SqliteStore {
    async fn get(&self, id: CategoryId) -> Result<Option<Category>> {
        let mut conn = self.conn()?;

        let row: Option<CategoryRow> = categories::table
            .find(id.get())
            .select(CategoryRow::as_select())
            .first(&mut conn)
            .optional()
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(row.map(Category::from))
    }

    async fn insert(&self, draft: &NewCategory) -> Result<Category> {
        let row = NewCategoryRow::from(draft);
        let mut conn = self.conn()?;

        let inserted = conn.transaction(|conn| {
            diesel::insert_into(categories::table)
                .values(&row)
                .execute(conn)?;

            let id = diesel::sql_query("SELECT last_insert_rowid() AS id")
                .get_result::<LastInsertRowId>(conn)?
                .id;

            categories::table
                .find(id)
                .select(CategoryRow::as_select())
                .first(conn)
        });

        inserted
            .map(Category::from)
            .map_err(|e| Error::Database(e.to_string()))
    }

    async fn save(&self, category: &Category) -> Result<Category> {
        let id = category.id.get();
        let mut conn = self.conn()?;

        let saved = conn.transaction::<CategoryRow, Error, _>(|conn| {
            let updated = diesel::update(
                categories::table
                    .filter(categories::id.eq(id))
                    .filter(categories::version.eq(category.version)),
            )
            .set((
                categories::name.eq(&category.name),
                categories::description.eq(category.description.as_deref()),
                categories::version.eq(categories::version + 1),
            ))
            .execute(conn)?;

            if updated == 0 {
                let current = categories::table
                    .find(id)
                    .select(categories::version)
                    .first::<i64>(conn)
                    .optional()?;
                return Err(missed_update(
                    EntityKind::Category,
                    id,
                    category.version,
                    current,
                ));
            }

            Ok(categories::table
                .find(id)
                .select(CategoryRow::as_select())
                .first(conn)?)
        })?;

        Ok(Category::from(saved))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool> {
        let mut conn = self.conn()?;

        // Products go first so the cascade holds even where foreign keys are off.
        let deleted = conn
            .transaction(|conn| {
                diesel::delete(products::table.filter(products::category_id.eq(id.get())))
                    .execute(conn)?;
                diesel::delete(categories::table.find(id.get())).execute(conn)
            })
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(deleted > 0)
    }

    async fn query(
        &self,
        predicate: &Predicate<CategoryCondition>,
        request: &PageRequest<CategorySortField>,
    ) -> Result<QueryResult<Category>> {
        let mut conn = self.conn()?;

        let total: i64 = filter_categories(categories::table.into_boxed(), predicate)
            .count()
            .get_result(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        let mut query = filter_categories(categories::table.into_boxed(), predicate);
        for order in request.sort() {
            query = match order.field {
                CategorySortField::Id => order_by!(query, categories::id, order.direction),
                CategorySortField::Name => order_by!(query, categories::name, order.direction),
                CategorySortField::Version => {
                    order_by!(query, categories::version, order.direction)
                }
            };
        }
        let (offset, limit) = window_bounds(request);

        let rows: Vec<CategoryRow> = query
            .then_order_by(categories::id.asc())
            .offset(offset)
            .limit(limit)
            .select(CategoryRow::as_select())
            .load(&mut conn)
            .map_err(|e| Error::Database(e.to_string()))?;

        Ok(QueryResult {
            items: rows.into_iter().map(Category::from).collect(),
            total: u64::try_from(total).unwrap_or_default(),
        })
    }
}
