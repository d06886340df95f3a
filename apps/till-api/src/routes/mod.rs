//! # Route Handlers
//!
//! HTTP handlers grouped by resource.
//!
//! ## Handler Pattern
//! Every handler:
//! 1. Extracts its input (path, query, JSON body)
//! 2. Calls a repository through `state.db`
//! 3. Returns `ApiResult<T>`; errors render as `{ code, message }`
//!
//! JSON body and query rejections are taken as `Result<_, _>` and converted
//! with `?`, so malformed input gets the same error shape as domain errors.

pub mod checkout;
pub mod health;
pub mod product;
pub mod report;
pub mod transaction;

use axum::routing::{get, post};
use axum::Router;

use crate::AppState;

/// Builds the router for every resource.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        .route(
            "/api/products",
            get(product::list_products).post(product::create_product),
        )
        .route(
            "/api/products/{id}",
            get(product::get_product)
                .put(product::update_product)
                .delete(product::delete_product),
        )
        .route("/api/checkout", post(checkout::checkout))
        .route("/api/transactions", get(transaction::list_transactions))
        .route("/api/transactions/{id}", get(transaction::get_transaction))
        .route("/api/reports", get(report::sales_report))
}
