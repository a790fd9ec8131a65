//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support, and per-connection
//! pragmas for SQLite databases.

use std::time::Duration;

use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use tracing::info;

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

/// Database URL for a private in-memory database.
pub const IN_MEMORY: &str = ":memory:";

diesel::define_sql_function! {
    /// Unicode lowercase, registered on every pooled connection.
    ///
    /// SQLite's built-in `lower()` only folds ASCII.
    fn fold_case(x: diesel::sql_types::Text) -> diesel::sql_types::Text;
}

/// Pool sizing and per-connection settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolOptions {
    pub max_size: u32,
    pub busy_timeout_ms: u64,
}

impl Default for PoolOptions {
    fn default() -> Self {
        Self {
            max_size: 5,
            busy_timeout_ms: 5_000,
        }
    }
}

/// Applies pragmas to every connection the pool opens.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas {
    busy_timeout_ms: u64,
}

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(
        &self,
        conn: &mut SqliteConnection,
    ) -> std::result::Result<(), diesel::r2d2::Error> {
        configure_sqlite_connection(conn, self.busy_timeout_ms)
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Create a connection pool for the given database URL.
///
/// Every `:memory:` connection is its own database, so such pools hold a
/// single connection.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_url: &str, options: PoolOptions) -> Result<DbPool> {
    let max_size = if database_url == IN_MEMORY {
        1
    } else {
        options.max_size
    };
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .max_size(max_size)
        .connection_timeout(Duration::from_secs(10))
        .connection_customizer(Box::new(SqlitePragmas {
            busy_timeout_ms: options.busy_timeout_ms,
        }))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    for version in &applied {
        info!(migration = %version, "Applied migration");
    }
    Ok(())
}

/// Configure SQLite connection pragmas and register [`fold_case`].
///
/// Foreign keys are switched on so the products table's `ON DELETE CASCADE`
/// backs up the store's explicit cascade.
///
/// # Errors
/// Returns an error if a pragma or the function registration fails.
pub fn configure_sqlite_connection(
    conn: &mut SqliteConnection,
    busy_timeout_ms: u64,
) -> std::result::Result<(), diesel::result::Error> {
    diesel::sql_query(format!("PRAGMA busy_timeout = {busy_timeout_ms}")).execute(conn)?;
    diesel::sql_query("PRAGMA foreign_keys = ON").execute(conn)?;
    fold_case_utils::register_impl(conn, |text: String| text.to_lowercase())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(diesel::QueryableByName)]
    struct TableName {
        #[diesel(sql_type = diesel::sql_types::Text)]
        name: String,
    }

    #[derive(diesel::QueryableByName)]
    struct BusyTimeout {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        timeout: i64,
    }

    #[derive(diesel::QueryableByName)]
    struct ForeignKeys {
        #[diesel(sql_type = diesel::sql_types::BigInt)]
        foreign_keys: i64,
    }

    fn memory_pool() -> DbPool {
        create_pool(IN_MEMORY, PoolOptions::default()).unwrap()
    }

    #[test]
    fn memory_pool_holds_one_connection() {
        let pool = memory_pool();
        assert_eq!(pool.max_size(), 1);
    }

    #[test]
    fn run_migrations_creates_tables() {
        let pool = memory_pool();
        run_migrations(&pool).unwrap();

        let mut conn = pool.get().unwrap();
        let tables: Vec<String> = diesel::sql_query(
            "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations' ORDER BY name",
        )
        .load::<TableName>(&mut conn)
        .unwrap()
        .into_iter()
        .map(|t| t.name)
        .collect();

        assert_eq!(tables, ["categories", "products"]);
    }

    #[test]
    fn run_migrations_is_idempotent() {
        let pool = memory_pool();
        run_migrations(&pool).unwrap();
        run_migrations(&pool).unwrap();
    }

    #[test]
    fn pragmas_are_applied_on_acquire() {
        let pool = create_pool(
            IN_MEMORY,
            PoolOptions {
                max_size: 1,
                busy_timeout_ms: 1_234,
            },
        )
        .unwrap();
        let mut conn = pool.get().unwrap();

        let busy = diesel::sql_query("PRAGMA busy_timeout")
            .get_result::<BusyTimeout>(&mut conn)
            .unwrap();
        assert_eq!(busy.timeout, 1_234);

        let fk = diesel::sql_query("PRAGMA foreign_keys")
            .get_result::<ForeignKeys>(&mut conn)
            .unwrap();
        assert_eq!(fk.foreign_keys, 1);
    }

    #[test]
    fn fold_case_lowercases_beyond_ascii() {
        let pool = memory_pool();
        let mut conn = pool.get().unwrap();

        let folded: String = diesel::select(fold_case("ÉCLAIR Straße"))
            .get_result(&mut conn)
            .unwrap();
        assert_eq!(folded, "éclair straße");
    }
}
