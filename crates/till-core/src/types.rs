//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────────┐   │
//! │  │    Product      │   │   Transaction   │   │  TransactionDetail  │   │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────────  │   │
//! │  │  id             │   │  id             │   │  transaction_id     │   │
//! │  │  name           │   │  total_amount   │   │  product_id         │   │
//! │  │  price          │   │  created_at     │   │  product_name       │   │
//! │  │  stock          │   │  details ───────┼──►│  quantity, subtotal │   │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────────┘   │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐                             │
//! │  │ CheckoutRequest │   │  SalesReport    │                             │
//! │  │  items: [       │   │  total_revenue  │                             │
//! │  │   CheckoutItem ]│   │  count, top     │                             │
//! │  └─────────────────┘   └─────────────────┘                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are database-generated integers. All amounts are integer
//! minor currency units.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    pub id: i64,

    /// Display name, snapshotted onto transaction details at checkout.
    pub name: String,

    /// Unit price in minor currency units.
    pub price: i64,

    /// Units on hand. Decremented by checkout.
    pub stock: i64,
}

/// Input for creating a product.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct NewProduct {
    pub name: String,
    pub price: i64,
    #[serde(default)]
    pub stock: i64,
}

/// Partial product update. Absent fields keep their current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<i64>,
    #[serde(default)]
    pub stock: Option<i64>,
}

// =============================================================================
// Checkout Input
// =============================================================================

/// One requested line of a checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutItem {
    pub product_id: i64,
    pub quantity: i64,
}

/// A checkout request: lines are processed in the given order.
#[derive(Debug, Clone, Default, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CheckoutRequest {
    #[serde(default)]
    pub items: Vec<CheckoutItem>,
}

// =============================================================================
// Transaction
// =============================================================================

/// A completed purchase.
///
/// ## Invariant
/// `total_amount` always equals the sum of `details[*].subtotal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Transaction {
    pub id: i64,
    pub total_amount: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub details: Vec<TransactionDetail>,
}

impl Transaction {
    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_minor_units(self.total_amount)
    }

    /// Sum of line subtotals; equals `total()` for every stored transaction.
    pub fn details_total(&self) -> Money {
        self.details.iter().map(TransactionDetail::subtotal).sum()
    }
}

/// A line item of a transaction.
/// Uses snapshot pattern to freeze product data at time of purchase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionDetail {
    pub id: i64,
    pub transaction_id: i64,
    pub product_id: i64,
    /// Product name at time of purchase (frozen).
    pub product_name: String,
    pub quantity: i64,
    /// quantity × unit price at time of purchase.
    pub subtotal: i64,
}

impl TransactionDetail {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_minor_units(self.subtotal)
    }
}

/// Transaction header without its lines, for listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TransactionSummary {
    pub id: i64,
    pub total_amount: i64,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
    pub item_count: i64,
}

// =============================================================================
// Sales Report
// =============================================================================

/// Best-selling product within a report window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct TopProduct {
    pub product_id: i64,
    pub name: String,
    pub quantity_sold: i64,
}

/// Aggregated sales over a report window. Derived, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesReport {
    pub total_revenue: i64,
    pub total_transaction_count: i64,
    /// `None` when no transaction details fall in the window.
    pub top_product: Option<TopProduct>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(id: i64, quantity: i64, subtotal: i64) -> TransactionDetail {
        TransactionDetail {
            id,
            transaction_id: 1,
            product_id: id,
            product_name: format!("Product {id}"),
            quantity,
            subtotal,
        }
    }

    #[test]
    fn test_details_total() {
        let tx = Transaction {
            id: 1,
            total_amount: 2500,
            created_at: Utc::now(),
            details: vec![detail(1, 2, 2000), detail(2, 1, 500)],
        };
        assert_eq!(tx.details_total(), tx.total());
    }

    #[test]
    fn test_checkout_request_wire_shape() {
        let req: CheckoutRequest = serde_json::from_str(
            r#"{ "items": [ { "product_id": 1, "quantity": 2 }, { "product_id": 2, "quantity": 1 } ] }"#,
        )
        .unwrap();
        assert_eq!(
            req.items,
            vec![
                CheckoutItem { product_id: 1, quantity: 2 },
                CheckoutItem { product_id: 2, quantity: 1 },
            ]
        );
    }

    #[test]
    fn test_empty_report_serializes_null_top_product() {
        let json = serde_json::to_value(SalesReport::default()).unwrap();
        assert_eq!(json["total_revenue"], 0);
        assert_eq!(json["total_transaction_count"], 0);
        assert!(json["top_product"].is_null());
    }

    #[test]
    fn test_product_update_defaults_to_no_change() {
        let update: ProductUpdate = serde_json::from_str(r#"{ "price": 1200 }"#).unwrap();
        assert_eq!(update.price, Some(1200));
        assert!(update.name.is_none());
        assert!(update.stock.is_none());
    }
}
