//! `/products` handlers.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use axum::Json;

use super::dto::{ProductDto, ProductRequest};
use super::error::ApiError;
use super::params::{path_id, QueryParams};
use super::router::ApiState;
use crate::domain::error::DomainError;
use crate::domain::id::{CategoryId, ProductId};
use crate::domain::page::Page;
use crate::domain::product::ProductSortField;
use crate::port::outbound::store::InventoryStore;

type ApiResult<T> = Result<T, ApiError>;

pub(super) fn body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, DomainError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| DomainError::MalformedBody(rejection.body_text()))
}

fn product_id(raw: &str) -> Result<ProductId, DomainError> {
    path_id("id", raw).map(ProductId::new)
}

/// `POST /products`
pub async fn create<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ProductDto>)> {
    let draft = body(payload)?.into_draft()?;
    let product = state.inventory.products().create(draft).await?;
    Ok((StatusCode::CREATED, Json(product.into())))
}

/// `GET /products`
pub async fn list<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    RawQuery(query): RawQuery,
) -> ApiResult<Json<Page<ProductDto>>> {
    let params = QueryParams::parse(query.as_deref());
    let filter = params.product_filter()?;
    let request = params.page_request::<ProductSortField>(&state.pagination)?;
    let page = state.inventory.products().list(&filter, &request).await?;
    Ok(Json(page.map(ProductDto::from)))
}

/// `GET /products/{id}`
pub async fn fetch<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDto>> {
    let product = state.inventory.products().get(product_id(&id)?).await?;
    Ok(Json(product.into()))
}

/// `PUT /products/{id}`
pub async fn update<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
    payload: Result<Json<ProductRequest>, JsonRejection>,
) -> ApiResult<Json<ProductDto>> {
    let id = product_id(&id)?;
    let patch = body(payload)?.into_patch();
    let product = state.inventory.products().update(id, patch).await?;
    Ok(Json(product.into()))
}

/// `DELETE /products/{id}`
pub async fn remove<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    state.inventory.products().delete(product_id(&id)?).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `PUT /products/{productId}/category/{categoryId}`
pub async fn assign_category<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path((id, category_id)): Path<(String, String)>,
) -> ApiResult<Json<ProductDto>> {
    let id = product_id(&id)?;
    let category_id = CategoryId::new(path_id("categoryId", &category_id)?);
    let product = state.inventory.assignment().assign(id, category_id).await?;
    Ok(Json(product.into()))
}

/// `DELETE /products/{productId}/category`
pub async fn unassign_category<S: InventoryStore>(
    State(state): State<ApiState<S>>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProductDto>> {
    let product = state
        .inventory
        .assignment()
        .unassign(product_id(&id)?)
        .await?;
    Ok(Json(product.into()))
}
