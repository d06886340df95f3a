//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - CRUD operations
//! - Stock adjustments (restock / manual corrections)
//!
//! Checkout never goes through this repository: it decrements stock inside
//! its own transaction (see [`super::transaction`]).

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use till_core::validation::{validate_new_product, validate_product_update};
use till_core::{NewProduct, Product, ProductUpdate};

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let coffee = repo.insert(&NewProduct { name: "Coffee".into(), price: 1000, stock: 10 }).await?;
/// let same = repo.get_by_id(coffee.id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists all products ordered by id.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock
            FROM products
            ORDER BY id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Listed products");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT id, name, price, stock
            FROM products
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product.
    ///
    /// The name is trimmed before it is stored.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Inserted product with its generated id
    /// * `Err(DbError::Domain(Validation))` - Empty name, negative price or stock
    pub async fn insert(&self, product: &NewProduct) -> DbResult<Product> {
        validate_new_product(product)?;

        let name = product.name.trim();
        debug!(name = %name, price = product.price, "Inserting product");

        let inserted = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price, stock)
            VALUES (?1, ?2, ?3)
            RETURNING id, name, price, stock
            "#,
        )
        .bind(name)
        .bind(product.price)
        .bind(product.stock)
        .fetch_one(&self.pool)
        .await?;

        Ok(inserted)
    }

    /// Applies a partial update. Fields left as `None` keep their value.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The product after the update
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn update(&self, id: i64, update: &ProductUpdate) -> DbResult<Product> {
        validate_product_update(update)?;

        debug!(id, "Updating product");

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products SET
                name = COALESCE(?2, name),
                price = COALESCE(?3, price),
                stock = COALESCE(?4, stock)
            WHERE id = ?1
            RETURNING id, name, price, stock
            "#,
        )
        .bind(id)
        .bind(update.name.as_deref().map(str::trim))
        .bind(update.price)
        .bind(update.stock)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Adjusts product stock by a delta.
    ///
    /// ## Delta Pattern
    /// ```text
    /// ❌ Absolute update races with checkouts:
    ///    UPDATE products SET stock = 7 WHERE id = ?
    ///
    /// ✅ Delta update composes with them:
    ///    UPDATE products SET stock = stock + 5 WHERE id = ?
    /// ```
    ///
    /// ## Arguments
    /// * `id` - Product ID
    /// * `delta` - Change in stock (positive for restocking, negative for write-offs)
    pub async fn update_stock(&self, id: i64, delta: i64) -> DbResult<Product> {
        debug!(id, delta, "Updating stock");

        let updated = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET stock = stock + ?2
            WHERE id = ?1
            RETURNING id, name, price, stock
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(&self.pool)
        .await?;

        updated.ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Deletes a product.
    ///
    /// Past transaction details keep their product id and name snapshot.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Database, DbConfig};
    use till_core::{CoreError, ValidationError};

    async fn setup() -> ProductRepository {
        Database::new(DbConfig::in_memory()).await.unwrap().products()
    }

    fn new_product(name: &str, price: i64, stock: i64) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            price,
            stock,
        }
    }

    #[tokio::test]
    async fn test_insert_and_get() {
        let repo = setup().await;

        let coffee = repo.insert(&new_product("  Coffee ", 1000, 10)).await.unwrap();
        assert_eq!(coffee.name, "Coffee");
        assert_eq!(coffee.price, 1000);
        assert_eq!(coffee.stock, 10);

        let fetched = repo.get_by_id(coffee.id).await.unwrap();
        assert_eq!(fetched, Some(coffee));

        assert_eq!(repo.get_by_id(999).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_insert_rejects_invalid_product() {
        let repo = setup().await;

        let err = repo.insert(&new_product("   ", 1000, 1)).await.unwrap_err();
        assert!(matches!(
            err,
            DbError::Domain(CoreError::Validation(ValidationError::Required { .. }))
        ));

        let err = repo.insert(&new_product("Tea", -1, 1)).await.unwrap_err();
        assert!(matches!(err, DbError::Domain(CoreError::Validation(_))));

        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = setup().await;

        let a = repo.insert(&new_product("A", 100, 1)).await.unwrap();
        let b = repo.insert(&new_product("B", 200, 2)).await.unwrap();

        let ids: Vec<i64> = repo.list().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![a.id, b.id]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_partial_update() {
        let repo = setup().await;
        let tea = repo.insert(&new_product("Tea", 300, 4)).await.unwrap();

        let update = ProductUpdate {
            price: Some(350),
            ..Default::default()
        };
        let updated = repo.update(tea.id, &update).await.unwrap();

        assert_eq!(updated.name, "Tea");
        assert_eq!(updated.price, 350);
        assert_eq!(updated.stock, 4);
    }

    #[tokio::test]
    async fn test_update_missing_product() {
        let repo = setup().await;

        let err = repo.update(42, &ProductUpdate::default()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_update_stock_delta() {
        let repo = setup().await;
        let tea = repo.insert(&new_product("Tea", 300, 4)).await.unwrap();

        assert_eq!(repo.update_stock(tea.id, 6).await.unwrap().stock, 10);
        assert_eq!(repo.update_stock(tea.id, -3).await.unwrap().stock, 7);
        assert!(repo.update_stock(999, 1).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete() {
        let repo = setup().await;
        let tea = repo.insert(&new_product("Tea", 300, 4)).await.unwrap();

        repo.delete(tea.id).await.unwrap();
        assert_eq!(repo.get_by_id(tea.id).await.unwrap(), None);
        assert!(repo.delete(tea.id).await.unwrap_err().is_not_found());
    }
}
