//! # till-core: Pure Business Logic for Till POS
//!
//! This crate contains the checkout math, report assembly, domain types and
//! validation rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Till POS Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  till-api (axum HTTP server)                    │   │
//! │  │    /api/products, /api/checkout, /api/reports, /health          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │ checkout  │  │ validation│  │   │
//! │  │   │  Product  │  │   Money   │  │  Draft    │  │   rules   │  │   │
//! │  │   │ Tx/Detail │  │           │  │  report   │  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    till-db (Database Layer)                     │   │
//! │  │         SQLite queries, migrations, atomic checkout            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Transaction, SalesReport, ...)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`checkout`] - Pricing and stock rules applied to each checkout line
//! - [`report`] - Sales report assembly from aggregate rows
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::checkout::CheckoutDraft;
//!
//! let mut draft = CheckoutDraft::new();
//! draft.add_line(1, "Coffee", 1000, 2).unwrap();
//! draft.add_line(2, "Bagel", 500, 1).unwrap();
//!
//! assert_eq!(draft.total().minor_units(), 2500);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod checkout;
pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use checkout::{CheckoutDraft, DraftLine, StockPolicy};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use report::ReportWindow;
pub use types::*;
