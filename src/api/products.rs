//! Product endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Router,
};
use tracing::debug;

use crate::api::state::AppState;
use crate::api::types::{ApiError, Json, Query};
use crate::domain::{NewProduct, PageResult, PaginationRequest, Product, ProductId, UpdateProduct};

pub fn create_products_router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products).post(create_product))
        .route(
            "/{id}",
            get(get_product).patch(update_product).delete(remove_product),
        )
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    Json(input): Json<NewProduct>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    debug!(name = %input.name, "Creating product");

    let product = state.catalog.create(input).await?;

    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /products?page=&limit=
pub async fn list_products(
    State(state): State<AppState>,
    Query(pagination): Query<PaginationRequest>,
) -> Result<Json<PageResult<Product>>, ApiError> {
    debug!(?pagination, "Listing products");

    let page = state.catalog.find_all(&pagination).await?;

    Ok(Json(page))
}

/// GET /products/{id}
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    debug!(id, "Getting product");

    let product = state.catalog.find_one(ProductId::new(id)).await?;

    Ok(Json(product))
}

/// PATCH /products/{id}
pub async fn update_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(patch): Json<UpdateProduct>,
) -> Result<Json<Product>, ApiError> {
    debug!(id, "Updating product");

    let product = state.catalog.update(ProductId::new(id), patch).await?;

    Ok(Json(product))
}

/// DELETE /products/{id}
pub async fn remove_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Product>, ApiError> {
    debug!(id, "Removing product");

    let product = state.catalog.remove(ProductId::new(id)).await?;

    Ok(Json(product))
}
