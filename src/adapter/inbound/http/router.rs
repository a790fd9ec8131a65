//! Route table, shared state and the health probe.

use std::sync::Arc;

use axum::routing::{delete, get, put};
use axum::{middleware, Json, Router};

use super::dto::HealthResponse;
use super::{category, logging, product};
use crate::application::inventory::Inventory;
use crate::infrastructure::config::pagination::PaginationConfig;
use crate::port::outbound::store::InventoryStore;

/// Shared handler state.
pub struct ApiState<S> {
    pub inventory: Arc<Inventory<S>>,
    pub pagination: PaginationConfig,
}

impl<S> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            inventory: Arc::clone(&self.inventory),
            pagination: self.pagination,
        }
    }
}

impl<S: InventoryStore> ApiState<S> {
    #[must_use]
    pub fn new(store: Arc<S>, pagination: PaginationConfig) -> Self {
        Self {
            inventory: Arc::new(Inventory::new(store)),
            pagination,
        }
    }
}

/// Build the full router over `state`.
pub fn router<S: InventoryStore>(state: ApiState<S>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route(
            "/products",
            get(product::list::<S>).post(product::create::<S>),
        )
        .route(
            "/products/:id",
            get(product::fetch::<S>)
                .put(product::update::<S>)
                .delete(product::remove::<S>),
        )
        .route(
            "/products/:id/category/:category_id",
            put(product::assign_category::<S>),
        )
        .route(
            "/products/:id/category",
            delete(product::unassign_category::<S>),
        )
        .route(
            "/categories",
            get(category::list::<S>).post(category::create::<S>),
        )
        .route(
            "/categories/:id",
            get(category::fetch::<S>)
                .put(category::update::<S>)
                .delete(category::remove::<S>),
        )
        .route("/categories/:id/products", get(category::products::<S>))
        .layer(middleware::from_fn(logging::log_requests))
        .with_state(state)
}

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
    })
}
