//! Transaction lookups for receipts and the audit view.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use till_core::{Transaction, TransactionSummary};

/// Default page size for `GET /api/transactions`.
const DEFAULT_LIMIT: u32 = 50;

/// Upper bound on `limit`; larger values are clamped.
const MAX_LIMIT: u32 = 500;

#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    pub limit: Option<u32>,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Json<Vec<TransactionSummary>>> {
    let Query(query) = query?;
    let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);

    let summaries = state.db.transactions().list_recent(limit).await?;
    Ok(Json(summaries))
}

pub async fn get_transaction(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Transaction>> {
    let Path(id) = path?;
    let transaction = state.db.transactions().get_by_id(id).await?;
    Ok(Json(transaction))
}
