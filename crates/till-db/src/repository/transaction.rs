//! # Transaction Repository
//!
//! Checkout and sales reporting.
//!
//! ## Checkout Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       checkout(items, policy)                           │
//! │                                                                         │
//! │  validate_checkout_items(items)          (no database access yet)      │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │  ├── for each item, in order:                                          │
//! │  │     UPDATE products SET stock = stock - qty                         │
//! │  │       WHERE id = ? RETURNING id, name, price, stock                 │
//! │  │     ├── no row          → ProductNotFound      ─┐                   │
//! │  │     ├── stock < 0       → InsufficientStock    ─┤ (Enforce only)    │
//! │  │     └── draft.add_line(name, price, qty)        │                   │
//! │  ├── INSERT transactions (total, now)               │                   │
//! │  ├── INSERT transaction_details × n                 │                   │
//! │  └── COMMIT                                         ▼                   │
//! │                                          tx dropped → ROLLBACK         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Either every stock decrement, the transaction row and all its details
//! are committed together, or none of them are.
//!
//! ## Reports
//! Both report operations run the same two aggregate queries over a date
//! window; `today_report()` is `report_by_date_range(today, today)` with
//! "today" taken from the database clock (UTC).

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};
use till_core::validation::validate_checkout_items;
use till_core::{
    CheckoutDraft, CheckoutItem, CoreError, Product, ReportWindow, SalesReport, StockPolicy,
    TopProduct, Transaction, TransactionDetail, TransactionSummary,
};

/// Repository for transactions: checkout writes and report reads.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    pool: SqlitePool,
}

impl TransactionRepository {
    /// Creates a new TransactionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        TransactionRepository { pool }
    }

    // =========================================================================
    // Checkout
    // =========================================================================

    /// Converts a list of requested items into a persisted transaction.
    ///
    /// Items are processed in the given order; the same product may appear
    /// more than once and is decremented once per line. Prices and names are
    /// read in the same statement that decrements stock, so a line is always
    /// priced from the row it decremented.
    ///
    /// ## Errors
    /// * `Domain(Validation)` - empty list or a quantity `<= 0`
    /// * `Domain(ProductNotFound)` - an item references an unknown product
    /// * `Domain(InsufficientStock)` - stock would go negative under `Enforce`
    /// * any storage error
    ///
    /// On every error nothing is persisted.
    pub async fn checkout(
        &self,
        items: &[CheckoutItem],
        policy: StockPolicy,
    ) -> DbResult<Transaction> {
        validate_checkout_items(items)?;

        debug!(items = items.len(), ?policy, "Starting checkout");

        let mut tx = self.pool.begin().await?;
        let mut draft = CheckoutDraft::new();

        for item in items {
            let product = sqlx::query_as::<_, Product>(
                r#"
                UPDATE products
                SET stock = stock - ?2
                WHERE id = ?1
                RETURNING id, name, price, stock
                "#,
            )
            .bind(item.product_id)
            .bind(item.quantity)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::ProductNotFound(item.product_id))?;

            policy.check_remaining(product.id, &product.name, product.stock, item.quantity)?;
            draft.add_line(product.id, product.name, product.price, item.quantity)?;
        }

        let (total, lines) = draft.into_parts();
        let created_at = Utc::now();

        let transaction_id = sqlx::query(
            r#"
            INSERT INTO transactions (total_amount, created_at)
            VALUES (?1, ?2)
            "#,
        )
        .bind(total.minor_units())
        .bind(created_at)
        .execute(&mut *tx)
        .await?
        .last_insert_rowid();

        let mut details = Vec::with_capacity(lines.len());
        for line in lines {
            let detail_id = sqlx::query(
                r#"
                INSERT INTO transaction_details (
                    transaction_id, product_id, product_name, quantity, subtotal
                ) VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(transaction_id)
            .bind(line.product_id)
            .bind(&line.product_name)
            .bind(line.quantity)
            .bind(line.subtotal.minor_units())
            .execute(&mut *tx)
            .await?
            .last_insert_rowid();

            details.push(line.into_detail(detail_id, transaction_id));
        }

        tx.commit().await.map_err(|e| {
            warn!(error = %e, "Checkout commit failed");
            DbError::TransactionFailed(e.to_string())
        })?;

        info!(
            transaction_id,
            total = %total,
            lines = details.len(),
            "Checkout committed"
        );

        Ok(Transaction {
            id: transaction_id,
            total_amount: total.minor_units(),
            created_at,
            details,
        })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Gets a transaction with its details (ordered by detail id).
    ///
    /// ## Errors
    /// `Domain(TransactionNotFound)` when no transaction has this id.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Transaction> {
        let header: Option<(i64, i64, DateTime<Utc>)> = sqlx::query_as(
            r#"
            SELECT id, total_amount, created_at
            FROM transactions
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        let (id, total_amount, created_at) =
            header.ok_or(CoreError::TransactionNotFound(id))?;

        let details = sqlx::query_as::<_, TransactionDetail>(
            r#"
            SELECT id, transaction_id, product_id, product_name, quantity, subtotal
            FROM transaction_details
            WHERE transaction_id = ?1
            ORDER BY id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Transaction {
            id,
            total_amount,
            created_at,
            details,
        })
    }

    /// Lists the most recent transactions, newest first, without details.
    pub async fn list_recent(&self, limit: u32) -> DbResult<Vec<TransactionSummary>> {
        let summaries = sqlx::query_as::<_, TransactionSummary>(
            r#"
            SELECT
                t.id AS id,
                t.total_amount AS total_amount,
                t.created_at AS created_at,
                COUNT(td.id) AS item_count
            FROM transactions t
            LEFT JOIN transaction_details td ON td.transaction_id = t.id
            GROUP BY t.id
            ORDER BY t.id DESC
            LIMIT ?1
            "#,
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = summaries.len(), limit, "Listed recent transactions");
        Ok(summaries)
    }

    // =========================================================================
    // Reports
    // =========================================================================

    /// Sales report for the current calendar date (UTC).
    pub async fn today_report(&self) -> DbResult<SalesReport> {
        self.report(ReportWindow::Today).await
    }

    /// Sales report for an inclusive calendar date range.
    ///
    /// ## Errors
    /// `Domain(Validation(InvalidRange))` when `start > end`.
    pub async fn report_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> DbResult<SalesReport> {
        let window = ReportWindow::range(start, end)?;
        self.report(window).await
    }

    /// Runs the totals and top-product queries for a window.
    ///
    /// ```text
    /// Today              → ?1 = NULL, ?2 = NULL → both default to date('now')
    /// Range{start, end}  → ?1 = start, ?2 = end
    /// ```
    async fn report(&self, window: ReportWindow) -> DbResult<SalesReport> {
        let (start, end) = match window {
            ReportWindow::Today => (None, None),
            ReportWindow::Range { start, end } => (Some(start), Some(end)),
        };

        debug!(?window, "Building sales report");

        let (total_revenue, total_transaction_count): (i64, i64) = sqlx::query_as(
            r#"
            SELECT COALESCE(SUM(t.total_amount), 0), COUNT(*)
            FROM transactions t
            WHERE date(t.created_at)
                BETWEEN COALESCE(?1, date('now')) AND COALESCE(?2, date('now'))
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_one(&self.pool)
        .await?;

        // Ties on quantity go to the lowest product id. The name is the
        // product's current one, or the sale-time snapshot once deleted.
        let top_product = sqlx::query_as::<_, TopProduct>(
            r#"
            SELECT
                td.product_id AS product_id,
                COALESCE(p.name, MAX(td.product_name)) AS name,
                SUM(td.quantity) AS quantity_sold
            FROM transaction_details td
            JOIN transactions t ON t.id = td.transaction_id
            LEFT JOIN products p ON p.id = td.product_id
            WHERE date(t.created_at)
                BETWEEN COALESCE(?1, date('now')) AND COALESCE(?2, date('now'))
            GROUP BY td.product_id
            ORDER BY quantity_sold DESC, td.product_id ASC
            LIMIT 1
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_optional(&self.pool)
        .await?;

        Ok(SalesReport::assemble(
            total_revenue,
            total_transaction_count,
            top_product,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
