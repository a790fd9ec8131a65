//! Wiring from configuration to a running HTTP service.

use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tracing::info;

use crate::adapter::inbound::http::router::{router, ApiState};
use crate::adapter::outbound::memory::MemoryStore;
use crate::adapter::outbound::sqlite::database::connection::{create_pool, run_migrations};
use crate::adapter::outbound::sqlite::store::SqliteStore;
use crate::error::Result;
use crate::infrastructure::config::database::{DatabaseConfig, StorageBackend};
use crate::infrastructure::config::settings::Config;

/// Open the SQLite pool and bring the schema up to date.
///
/// # Errors
/// Returns an error if the pool cannot be built or a migration fails.
pub fn open_sqlite(database: &DatabaseConfig) -> Result<SqliteStore> {
    let pool = create_pool(&database.url, database.pool_options())?;
    run_migrations(&pool)?;
    info!(url = %database.url, "SQLite store ready");
    Ok(SqliteStore::new(pool))
}

/// Build the router over the configured store.
///
/// # Errors
/// Returns an error if the SQLite store cannot be opened.
pub fn build_app(config: &Config) -> Result<Router> {
    let router = match config.storage.backend {
        StorageBackend::Sqlite => {
            let store = open_sqlite(&config.database)?;
            router(ApiState::new(Arc::new(store), config.pagination))
        }
        StorageBackend::Memory => {
            info!("Using in-memory store; data is lost on exit");
            router(ApiState::new(
                Arc::new(MemoryStore::new()),
                config.pagination,
            ))
        }
    };
    Ok(router)
}

/// Serve until Ctrl-C.
///
/// # Errors
/// Returns an error if the bind address is invalid or the listener fails.
pub async fn serve(config: Config) -> Result<()> {
    let addr = config.server.socket_addr()?;
    let app = build_app(&config)?;

    let listener = TcpListener::bind(addr).await?;
    info!(
        addr = %listener.local_addr()?,
        backend = %config.storage.backend,
        "Inventory service listening"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Inventory service stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutdown signal received");
    }
}
