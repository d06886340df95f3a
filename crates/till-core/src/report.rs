//! # Sales Report Windows
//!
//! Describes which transactions a sales report covers and assembles the
//! report from the two aggregate queries run by `till-db`.
//!
//! ## Windows
//! ```text
//! ReportWindow::Today                  date(created_at) == store's current date
//! ReportWindow::Range { start, end }   start <= date(created_at) <= end
//! ```
//!
//! `Range { d, d }` with `d` equal to the store's date covers exactly the
//! same transactions as `Today`.

use chrono::NaiveDate;

use crate::error::ValidationError;
use crate::types::{SalesReport, TopProduct};

/// The set of calendar days a report aggregates over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportWindow {
    /// The store clock's current calendar date.
    Today,
    /// Inclusive calendar date range.
    Range { start: NaiveDate, end: NaiveDate },
}

impl ReportWindow {
    /// Builds an inclusive range window.
    ///
    /// ## Example
    /// ```rust
    /// use chrono::NaiveDate;
    /// use till_core::ReportWindow;
    ///
    /// let d = NaiveDate::from_ymd_opt(2026, 10, 19).unwrap();
    /// assert!(ReportWindow::range(d, d).is_ok());
    /// assert!(ReportWindow::range(d.succ_opt().unwrap(), d).is_err());
    /// ```
    pub fn range(start: NaiveDate, end: NaiveDate) -> Result<Self, ValidationError> {
        if start > end {
            return Err(ValidationError::InvalidRange {
                start: start.to_string(),
                end: end.to_string(),
            });
        }
        Ok(ReportWindow::Range { start, end })
    }

    /// Builds a window from optional query parameters.
    ///
    /// Both absent means today; both present means a range; one without the
    /// other is rejected.
    pub fn from_bounds(
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Result<Self, ValidationError> {
        match (start, end) {
            (None, None) => Ok(ReportWindow::Today),
            (Some(start), Some(end)) => ReportWindow::range(start, end),
            (None, Some(_)) => Err(ValidationError::Required {
                field: "start_date".to_string(),
            }),
            (Some(_), None) => Err(ValidationError::Required {
                field: "end_date".to_string(),
            }),
        }
    }
}

impl SalesReport {
    /// Combines the totals query and the top-product query into one report.
    ///
    /// A top product with zero quantity is treated as absent.
    pub fn assemble(
        total_revenue: i64,
        total_transaction_count: i64,
        top_product: Option<TopProduct>,
    ) -> Self {
        SalesReport {
            total_revenue,
            total_transaction_count,
            top_product: top_product.filter(|p| p.quantity_sold > 0),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, d).unwrap()
    }

    #[test]
    fn test_from_bounds() {
        assert_eq!(ReportWindow::from_bounds(None, None).unwrap(), ReportWindow::Today);
        assert_eq!(
            ReportWindow::from_bounds(Some(day(1)), Some(day(19))).unwrap(),
            ReportWindow::Range {
                start: day(1),
                end: day(19)
            }
        );
        assert!(matches!(
            ReportWindow::from_bounds(Some(day(1)), None),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            ReportWindow::from_bounds(Some(day(20)), Some(day(19))),
            Err(ValidationError::InvalidRange { .. })
        ));
    }

    #[test]
    fn test_assemble_drops_zero_quantity_top_product() {
        let report = SalesReport::assemble(
            0,
            0,
            Some(TopProduct {
                product_id: 1,
                name: "Ghost".to_string(),
                quantity_sold: 0,
            }),
        );
        assert_eq!(report, SalesReport::default());
    }

    #[test]
    fn test_assemble_keeps_top_product() {
        let top = TopProduct {
            product_id: 1,
            name: "A".to_string(),
            quantity_sold: 2,
        };
        let report = SalesReport::assemble(2500, 1, Some(top.clone()));
        assert_eq!(report.total_revenue, 2500);
        assert_eq!(report.total_transaction_count, 1);
        assert_eq!(report.top_product, Some(top));
    }
}
