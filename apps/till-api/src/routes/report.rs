//! # Sales Report Route
//!
//! ```text
//! GET /api/reports                                        → today
//! GET /api/reports?start_date=2026-10-01&end_date=2026-10-19 → inclusive range
//! GET /api/reports?start_date=2026-10-01                  → 400 (end_date required)
//! ```

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::ApiResult;
use crate::AppState;
use till_core::{ReportWindow, SalesReport};

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

pub async fn sales_report(
    State(state): State<AppState>,
    query: Result<Query<ReportQuery>, QueryRejection>,
) -> ApiResult<Json<SalesReport>> {
    let Query(query) = query?;
    let repo = state.db.transactions();

    let report = match ReportWindow::from_bounds(query.start_date, query.end_date)? {
        ReportWindow::Today => repo.today_report().await?,
        ReportWindow::Range { start, end } => repo.report_by_date_range(start, end).await?,
    };

    Ok(Json(report))
}
