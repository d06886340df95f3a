//! # Checkout Route
//!
//! ```text
//! POST /api/checkout { "items": [ { "product_id": 1, "quantity": 2 } ] }
//!      │
//!      ▼
//! TransactionRepository::checkout(items, state.stock_policy)
//!      │
//!      ├── Ok(tx)                    → 201 Transaction
//!      ├── Validation                → 400
//!      ├── ProductNotFound           → 404
//!      └── InsufficientStock         → 409
//! ```
//!
//! Every failure leaves stock and the transaction tables untouched.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use tracing::debug;

use crate::error::ApiResult;
use crate::AppState;
use till_core::{CheckoutRequest, Transaction};

pub async fn checkout(
    State(state): State<AppState>,
    payload: Result<Json<CheckoutRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Transaction>)> {
    let Json(request) = payload?;

    debug!(items = request.items.len(), "Checkout requested");

    let transaction = state
        .db
        .transactions()
        .checkout(&request.items, state.stock_policy)
        .await?;

    Ok((StatusCode::CREATED, Json(transaction)))
}
