//! # Checkout Math
//!
//! The pure half of a checkout: pricing each line, accumulating the total and
//! deciding whether a stock level is acceptable. The storage half (row
//! locking, stock decrement, inserts, commit/rollback) lives in `till-db`.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Checkout Flow                                  │
//! │                                                                         │
//! │  validate_checkout_items(items)        ← till-core::validation         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                  ← till-db                      │
//! │       │                                                                 │
//! │       ▼  for each item, in order                                        │
//! │  decrement stock, read name/price       ← till-db                      │
//! │  StockPolicy::check_remaining()         ← THIS MODULE                  │
//! │  CheckoutDraft::add_line()              ← THIS MODULE                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  INSERT transaction + details, COMMIT   ← till-db                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::TransactionDetail;

// =============================================================================
// Stock Policy
// =============================================================================

/// What a checkout does when a line would take stock below zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockPolicy {
    /// Reject the line with `InsufficientStock` and abort the checkout.
    #[default]
    Enforce,
    /// Decrement regardless; stock may go negative (back-orders).
    AllowNegative,
}

impl StockPolicy {
    /// Checks the stock level left after decrementing `requested` units.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::StockPolicy;
    ///
    /// assert!(StockPolicy::Enforce.check_remaining(1, "Tea", 0, 5).is_ok());
    /// assert!(StockPolicy::Enforce.check_remaining(1, "Tea", -2, 5).is_err());
    /// assert!(StockPolicy::AllowNegative.check_remaining(1, "Tea", -2, 5).is_ok());
    /// ```
    pub fn check_remaining(
        &self,
        product_id: i64,
        name: &str,
        remaining: i64,
        requested: i64,
    ) -> CoreResult<()> {
        match self {
            StockPolicy::AllowNegative => Ok(()),
            StockPolicy::Enforce if remaining >= 0 => Ok(()),
            StockPolicy::Enforce => Err(CoreError::InsufficientStock {
                product_id,
                name: name.to_string(),
                available: remaining.saturating_add(requested),
                requested,
            }),
        }
    }
}

// =============================================================================
// Checkout Draft
// =============================================================================

/// A priced checkout line, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftLine {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub subtotal: Money,
}

impl DraftLine {
    /// Converts the line into a stored detail once ids are known.
    pub fn into_detail(self, id: i64, transaction_id: i64) -> TransactionDetail {
        TransactionDetail {
            id,
            transaction_id,
            product_id: self.product_id,
            product_name: self.product_name,
            quantity: self.quantity,
            subtotal: self.subtotal.minor_units(),
        }
    }
}

/// Accumulates checkout lines in order and keeps the running total.
///
/// The total is only ever changed together with a pushed line, so
/// `total() == Σ lines[*].subtotal` holds at all times.
#[derive(Debug, Clone, Default)]
pub struct CheckoutDraft {
    lines: Vec<DraftLine>,
    total: Money,
}

impl CheckoutDraft {
    /// Creates an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Prices one line at `unit_price` (minor units) and appends it.
    ///
    /// ## Errors
    /// `AmountOverflow` if the subtotal or the running total overflows.
    pub fn add_line(
        &mut self,
        product_id: i64,
        product_name: impl Into<String>,
        unit_price: i64,
        quantity: i64,
    ) -> CoreResult<&DraftLine> {
        let subtotal = Money::from_minor_units(unit_price)
            .checked_multiply_quantity(quantity)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: format!("subtotal of product {product_id}"),
            })?;

        let total = self
            .total
            .checked_add(subtotal)
            .ok_or_else(|| CoreError::AmountOverflow {
                context: "checkout total".to_string(),
            })?;

        self.total = total;
        self.lines.push(DraftLine {
            product_id,
            product_name: product_name.into(),
            quantity,
            subtotal,
        });

        Ok(&self.lines[self.lines.len() - 1])
    }

    /// Running total of all lines.
    pub fn total(&self) -> Money {
        self.total
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[DraftLine] {
        &self.lines
    }

    /// Consumes the draft, yielding the total and the lines.
    pub fn into_parts(self) -> (Money, Vec<DraftLine>) {
        (self.total, self.lines)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_worked_example() {
        let mut draft = CheckoutDraft::new();
        draft.add_line(1, "A", 1000, 2).unwrap();
        draft.add_line(2, "B", 500, 1).unwrap();

        assert_eq!(draft.total().minor_units(), 2500);
        let subtotals: Vec<i64> = draft.lines().iter().map(|l| l.subtotal.minor_units()).collect();
        assert_eq!(subtotals, vec![2000, 500]);
    }

    #[test]
    fn test_line_carries_snapshot() {
        let mut draft = CheckoutDraft::new();
        let line = draft.add_line(3, "Bagel", 275, 4).unwrap().clone();

        assert_eq!(
            line,
            DraftLine {
                product_id: 3,
                product_name: "Bagel".to_string(),
                quantity: 4,
                subtotal: Money::from_minor_units(1100),
            }
        );
    }

    #[test]
    fn test_total_matches_sum_of_lines() {
        let mut draft = CheckoutDraft::new();
        for (i, (price, qty)) in [(199, 3), (0, 10), (2550, 1), (1, 999)].iter().enumerate() {
            draft.add_line(i as i64, "x", *price, *qty).unwrap();
        }
        let sum: Money = draft.lines().iter().map(|l| l.subtotal).sum();
        assert_eq!(draft.total(), sum);
    }

    #[test]
    fn test_same_product_twice_keeps_separate_lines() {
        let mut draft = CheckoutDraft::new();
        draft.add_line(1, "A", 300, 1).unwrap();
        draft.add_line(1, "A", 300, 2).unwrap();
        assert_eq!(draft.lines().len(), 2);
        assert_eq!(draft.total().minor_units(), 900);
    }

    #[test]
    fn test_overflow_leaves_draft_untouched() {
        let mut draft = CheckoutDraft::new();
        draft.add_line(1, "A", 100, 1).unwrap();

        let err = draft.add_line(2, "B", i64::MAX, 2).unwrap_err();
        assert!(matches!(err, CoreError::AmountOverflow { .. }));
        assert_eq!(draft.lines().len(), 1);
        assert_eq!(draft.total().minor_units(), 100);
    }

    #[test]
    fn test_into_detail() {
        let mut draft = CheckoutDraft::new();
        draft.add_line(5, "Muffin", 350, 2).unwrap();
        let (_, lines) = draft.into_parts();

        let detail = lines.into_iter().next().unwrap().into_detail(11, 3);
        assert_eq!(detail.id, 11);
        assert_eq!(detail.transaction_id, 3);
        assert_eq!(detail.product_name, "Muffin");
        assert_eq!(detail.subtotal, 700);
    }

    #[test]
    fn test_stock_policy() {
        let err = StockPolicy::Enforce
            .check_remaining(4, "Scone", -1, 3)
            .unwrap_err();
        match err {
            CoreError::InsufficientStock {
                product_id,
                available,
                requested,
                ..
            } => {
                assert_eq!(product_id, 4);
                assert_eq!(available, 2);
                assert_eq!(requested, 3);
            }
            other => panic!("unexpected error: {other:?}"),
        }

        assert!(StockPolicy::AllowNegative.check_remaining(4, "Scone", -1, 3).is_ok());
        assert_eq!(StockPolicy::default(), StockPolicy::Enforce);
    }
}
