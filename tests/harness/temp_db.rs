use std::path::{Path, PathBuf};

use inventory::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool, PoolOptions,
};
use inventory::adapter::outbound::sqlite::store::SqliteStore;
use tempfile::TempDir;

/// Temporary on-disk SQLite database for integration tests.
///
/// The directory, and the database with it, is removed on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("inventory-{name}.db"));

        let url = path.to_string_lossy().to_string();
        let options = PoolOptions {
            max_size: 4,
            ..PoolOptions::default()
        };
        let pool = create_pool(&url, options).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }
}
