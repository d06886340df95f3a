//! # Till API
//!
//! JSON HTTP server for the till: product management, checkout and sales
//! reports.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           Till API Routes                               │
//! │                                                                         │
//! │  ┌────────────────────┐  ┌────────────────────┐  ┌──────────────────┐  │
//! │  │  Products          │  │  Checkout          │  │  Reports         │  │
//! │  │                    │  │                    │  │                  │  │
//! │  │ GET    /products   │  │ POST /checkout     │  │ GET /reports     │  │
//! │  │ POST   /products   │  │                    │  │  ?start_date     │  │
//! │  │ GET    /{id}       │  │ GET /transactions  │  │  &end_date       │  │
//! │  │ PUT    /{id}       │  │ GET /transactions/ │  │                  │  │
//! │  │ DELETE /{id}       │  │         {id}       │  │                  │  │
//! │  └────────────────────┘  └────────────────────┘  └──────────────────┘  │
//! │                                                                         │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │  AppState { db: Database, stock_policy }  →  till-db → SQLite     │  │
//! │  └──────────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration
//! Environment variables (an optional `.env` file is loaded first):
//! - `DB_CONN` - SQLite connection string or file path (required)
//! - `PORT` - HTTP port (default: 8080)
//! - `DB_MAX_CONNECTIONS` - Pool size (default: 5)
//! - `ALLOW_NEGATIVE_STOCK` - Let checkouts oversell (default: false)
//! - `RUST_LOG` - Log filter (default: `info,till=debug,sqlx=warn`)

pub mod config;
pub mod error;
pub mod routes;

use axum::Router;
use till_core::StockPolicy;
use till_db::Database;
use tower_http::trace::TraceLayer;

// Re-exports
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult, ErrorCode};

/// Shared application state.
///
/// Cloned into every handler; `Database` is a pool handle so clones share
/// connections.
#[derive(Debug, Clone)]
pub struct AppState {
    pub db: Database,
    pub stock_policy: StockPolicy,
}

impl AppState {
    pub fn new(db: Database, stock_policy: StockPolicy) -> Self {
        AppState { db, stock_policy }
    }
}

/// Builds the full HTTP application with request tracing.
pub fn app(state: AppState) -> Router {
    routes::router()
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
