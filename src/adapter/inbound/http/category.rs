//! `/categories` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{CategoryDto, CategoryRequest, ProductDto};
use super::error::ApiError;
use super::params::{path_id, QueryParams};
use super::product::body;
use super::router::ApiState;
use crate::domain::category::CategorySortField;
use crate::domain::error::DomainError;
use crate::domain::id::CategoryId;
use crate::domain::page::Page;
use crate::domain::product::ProductSortField;
use crate::port::outbound::store::InventoryStore;

type ApiResult<T> = Result<T, ApiError>;

fn category_id(raw: &str) -> Result<CategoryId, DomainError> {
    path_id("id", raw).map(CategoryId::new)
}

/// `POST /categories`
pub async fn create<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CategoryDto>)> {
    let draft = body(payload)?.into_draft()?;
    let category = state.inventory.categories().create(draft).await?;
    Ok((StatusCode::CREATED, Json(category.into())))
}

/// `GET /categories`
pub async fn list<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Page<CategoryDto>>> {
    let params = QueryParams::parse(query.as_deref());
    let request = params.page_request::<CategorySortField>(&state.pagination)?;
    let page = state
        .inventory
        .categories()
        .list(&params.category_filter(), &request)
        .await?;
    Ok(Json(page.map(CategoryDto::from)))
}

/// `GET /categories/{id}`
pub async fn fetch<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<CategoryDto>> {
    let category = state.inventory.categories().get(category_id(&id)?).await?;
    Ok(Json(category.into()))
}

/// `GET /categories/{id}/products`
pub async fn products<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Page<ProductDto>>> {
    let id = category_id(&id)?;
    let params = QueryParams::parse(query.as_deref());
    let filter = params.product_filter()?;
    let request = params.page_request::<ProductSortField>(&state.pagination)?;
    let page = state
        .inventory
        .assignment()
        .products_of(id, filter, &request)
        .await?;
    Ok(Json(page.map(ProductDto::from)))
}

/// `PUT /categories/{id}`
pub async fn update<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<CategoryRequest>, JsonRejection>,
) -> ApiResult<Json<CategoryDto>> {
    let id = category_id(&id)?;
    let patch = body(payload)?.into_patch();
    let category = state.inventory.categories().update(id, patch).await?;
    Ok(Json(category.into()))
}

/// `DELETE /categories/{id}`
pub async fn remove<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state
        .inventory
        .categories()
        .delete(category_id(&id)?)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
