//! # Product Routes
//!
//! CRUD over the product catalogue.
//!
//! ```text
//! GET    /api/products        → [Product]
//! POST   /api/products        → 201 Product
//! GET    /api/products/{id}   → Product | 404
//! PUT    /api/products/{id}   → Product | 404      (partial update)
//! DELETE /api/products/{id}   → 204 | 404
//! ```

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use tracing::info;

use crate::error::{ApiError, ApiResult};
use crate::AppState;
use till_core::{NewProduct, Product, ProductUpdate};

pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    let products = state.db.products().list().await?;
    Ok(Json(products))
}

pub async fn get_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = path?;
    state
        .db
        .products()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Product", id))
}

pub async fn create_product(
    State(state): State<AppState>,
    payload: Result<Json<NewProduct>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Product>)> {
    let Json(new_product) = payload?;

    let product = state.db.products().insert(&new_product).await?;
    info!(id = product.id, name = %product.name, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ProductUpdate>, JsonRejection>,
) -> ApiResult<Json<Product>> {
    let Path(id) = path?;
    let Json(update) = payload?;

    let product = state.db.products().update(id, &update).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = path?;
    state.db.products().delete(id).await?;
    info!(id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}
