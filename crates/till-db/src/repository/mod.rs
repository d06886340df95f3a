//! # Repository Module
//!
//! Database repository implementations for Till POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  db.transactions().checkout(&items, policy)                     │
//! │       ▼                                                                 │
//! │  TransactionRepository                                                 │
//! │  ├── checkout(&self, items, policy)     (one SQL transaction)          │
//! │  ├── get_by_id(&self, id)                                              │
//! │  ├── today_report(&self)                                               │
//! │  └── report_by_date_range(&self, start, end)                           │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`product::ProductRepository`] - Product CRUD and stock adjustments
//! - [`transaction::TransactionRepository`] - Checkout and sales reports

pub mod product;
pub mod transaction;
