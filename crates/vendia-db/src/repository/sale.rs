//! # Sale Repository (Stock Ledger)
//!
//! The only code path through which sales mutate `products.quantity`;
//! nothing outside this repository ever decrements stock for a sale or
//! restores it on reversal.
//!
//! ## Ledger Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Stock Ledger                              │
//! │                                                                 │
//! │  register(product_id, qty, method)      ── one transaction ──   │
//! │    1. load product            (missing → ProductNotFound)       │
//! │    2. stock check             (short → InsufficientStock,       │
//! │                                nothing written)                 │
//! │    3. snapshot unit_price, compute total_price                  │
//! │    4. products.quantity -= qty                                  │
//! │    5. INSERT sale (sold_at = now UTC)                           │
//! │                                                                 │
//! │  reverse(sale_id)                       ── one transaction ──   │
//! │    1. load sale               (missing → SaleNotFound)          │
//! │    2. products.quantity += sale.quantity                        │
//! │       (vanished product → zero rows matched, tolerated)         │
//! │    3. DELETE sale                                               │
//! │                                                                 │
//! │  Invariant: product.quantity ==                                 │
//! │      initial_quantity − Σ(active sale quantities)  ≥ 0          │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `unit_price` is a snapshot: later product price changes never touch
//! recorded sales.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;
use vendia_core::money;
use vendia_core::validation::{validate_payment_method, validate_sale_quantity};
use vendia_core::{CoreError, Page, Product, Sale, SaleWithProduct, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const SELECT_SALE: &str =
    "SELECT id, product_id, quantity, unit_price, total_price, payment_method, sold_at FROM sales";

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Registers a sale, decrementing the product's stock.
    ///
    /// Atomic: the stock decrement and the sale insert either both happen
    /// or neither does. On `InsufficientStock` no state changes and the
    /// error carries the available amount.
    ///
    /// ## Errors
    /// * `Validation` - non-positive quantity, empty payment method
    /// * `ProductNotFound` - unknown product id
    /// * `InsufficientStock` - requested quantity exceeds stock on hand
    pub async fn register(
        &self,
        product_id: i64,
        quantity: i64,
        payment_method: &str,
    ) -> StoreResult<Sale> {
        validate_sale_quantity(quantity)?;
        let payment_method = validate_payment_method(payment_method)?;

        debug!(product_id = %product_id, quantity = %quantity, method = %payment_method, "Registering sale");

        let mut tx = self.pool.begin().await?;

        let product: Option<Product> = sqlx::query_as(
            "SELECT id, name, quantity, price, created_at FROM products WHERE id = ?1",
        )
        .bind(product_id)
        .fetch_optional(&mut *tx)
        .await?;

        let Some(product) = product else {
            return Err(CoreError::ProductNotFound(product_id).into());
        };

        if product.quantity < quantity {
            // dropping the transaction rolls everything back
            return Err(CoreError::InsufficientStock {
                name: product.name,
                available: product.quantity,
                requested: quantity,
            }
            .into());
        }

        let unit_price = product.price;
        let total_price = money::line_total(unit_price, quantity);
        let sold_at = Utc::now();

        sqlx::query("UPDATE products SET quantity = quantity - ?2 WHERE id = ?1")
            .bind(product_id)
            .bind(quantity)
            .execute(&mut *tx)
            .await?;

        let result = sqlx::query(
            "INSERT INTO sales (product_id, quantity, unit_price, total_price, payment_method, sold_at) \
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        )
        .bind(product_id)
        .bind(quantity)
        .bind(unit_price)
        .bind(total_price)
        .bind(&payment_method)
        .bind(sold_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let id = result.last_insert_rowid();
        debug!(id = %id, total_price = %total_price, "Sale registered");

        Ok(Sale {
            id,
            product_id,
            quantity,
            unit_price,
            total_price,
            payment_method,
            sold_at,
        })
    }

    /// Reverses (deletes) a sale, restoring the product's stock.
    ///
    /// Atomic: the stock increment and the sale removal are one unit. If
    /// the referenced product no longer exists the sale is still removed —
    /// the quantity update simply matches zero rows. That situation cannot
    /// arise through this crate's own operations (products with sales are
    /// not deletable) and is tolerated rather than treated as an error.
    ///
    /// ## Errors
    /// * `SaleNotFound` - unknown sale id
    pub async fn reverse(&self, sale_id: i64) -> StoreResult<()> {
        debug!(sale_id = %sale_id, "Reversing sale");

        let mut tx = self.pool.begin().await?;

        let sale: Option<Sale> = sqlx::query_as(&format!("{SELECT_SALE} WHERE id = ?1"))
            .bind(sale_id)
            .fetch_optional(&mut *tx)
            .await?;

        let Some(sale) = sale else {
            return Err(CoreError::SaleNotFound(sale_id).into());
        };

        sqlx::query("UPDATE products SET quantity = quantity + ?2 WHERE id = ?1")
            .bind(sale.product_id)
            .bind(sale.quantity)
            .execute(&mut *tx)
            .await?;

        sqlx::query("DELETE FROM sales WHERE id = ?1")
            .bind(sale_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(sale_id = %sale_id, product_id = %sale.product_id, restored = %sale.quantity, "Sale reversed");
        Ok(())
    }

    /// Gets a sale by id.
    ///
    /// ## Errors
    /// * `SaleNotFound` - unknown sale id
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Sale> {
        let sale: Option<Sale> = sqlx::query_as(&format!("{SELECT_SALE} WHERE id = ?1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        sale.ok_or_else(|| CoreError::SaleNotFound(id).into())
    }

    /// Lists sales newest first, each joined with its product's name.
    ///
    /// Pages are 1-indexed; a page past the end returns empty items.
    pub async fn list(&self, page: i64, page_size: i64) -> StoreResult<Page<SaleWithProduct>> {
        let page = page.max(1);
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };
        let offset = (page - 1) * page_size;

        debug!(page = %page, page_size = %page_size, "Listing sales");

        let total_items: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        let items: Vec<SaleWithProduct> = sqlx::query_as(
            "SELECT s.id, s.product_id, p.name AS product_name, s.quantity, \
                    s.unit_price, s.total_price, s.payment_method, s.sold_at \
             FROM sales s \
             INNER JOIN products p ON p.id = s.product_id \
             ORDER BY s.sold_at DESC, s.id DESC \
             LIMIT ?1 OFFSET ?2",
        )
        .bind(page_size)
        .bind(offset)
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, page, page_size, total_items))
    }

    /// Counts the sales referencing a product — the dependent-sales check
    /// backing product deletion.
    pub async fn count_for_product(&self, product_id: i64) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = ?1")
            .bind(product_id)
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
    use crate::error::StoreError;
    use crate::pool::{Database, DbConfig};

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    #[tokio::test]
    async fn test_register_sale_decrements_stock_and_snapshots_price() {
        let db = test_db().await;

        let keyboard = db
            .products()
            .create("Mechanical Keyboard", 5, 150.0)
            .await
            .unwrap();

        let sale = db.sales().register(keyboard.id, 2, "Cash").await.unwrap();
        assert_eq!(sale.unit_price, 150.0);
        assert_eq!(sale.total_price, 300.0);
        assert_eq!(sale.quantity, 2);

        let product = db.products().get_by_id(keyboard.id).await.unwrap();
        assert_eq!(product.quantity, 3);
    }

    #[tokio::test]
    async fn test_insufficient_stock_mutates_nothing() {
        let db = test_db().await;

        let keyboard = db
            .products()
            .create("Mechanical Keyboard", 5, 150.0)
            .await
            .unwrap();
        db.sales().register(keyboard.id, 2, "Cash").await.unwrap();

        let err = db.sales().register(keyboard.id, 10, "Cash").await.unwrap_err();
        match err {
            StoreError::Domain(CoreError::InsufficientStock {
                name,
                available,
                requested,
            }) => {
                assert_eq!(name, "Mechanical Keyboard");
                assert_eq!(available, 3);
                assert_eq!(requested, 10);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }

        // no partial state: stock and sale count unchanged
        let product = db.products().get_by_id(keyboard.id).await.unwrap();
        assert_eq!(product.quantity, 3);
        assert_eq!(db.sales().count_for_product(keyboard.id).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_input() {
        let db = test_db().await;
        let product = db.products().create("Mouse", 5, 80.0).await.unwrap();

        assert!(matches!(
            db.sales().register(product.id, 0, "Cash").await,
            Err(StoreError::Domain(CoreError::Validation(_)))
        ));
        assert!(matches!(
            db.sales().register(product.id, 1, "  ").await,
            Err(StoreError::Domain(CoreError::Validation(_)))
        ));
        assert!(matches!(
            db.sales().register(999, 1, "Cash").await,
            Err(StoreError::Domain(CoreError::ProductNotFound(999)))
        ));
    }

    #[tokio::test]
    async fn test_reverse_restores_stock_and_removes_sale() {
        let db = test_db().await;

        let keyboard = db
            .products()
            .create("Mechanical Keyboard", 5, 150.0)
            .await
            .unwrap();
        let sale = db.sales().register(keyboard.id, 2, "Cash").await.unwrap();

        db.sales().reverse(sale.id).await.unwrap();

        let product = db.products().get_by_id(keyboard.id).await.unwrap();
        assert_eq!(product.quantity, 5);

        let listing = db.sales().list(1, 10).await.unwrap();
        assert!(listing.items.is_empty());

        assert!(matches!(
            db.sales().reverse(sale.id).await,
            Err(StoreError::Domain(CoreError::SaleNotFound(_)))
        ));
    }

    #[tokio::test]
    async fn test_snapshot_survives_price_change() {
        let db = test_db().await;

        let monitor = db
            .products()
            .create("Ultra-Wide Monitor", 3, 1200.0)
            .await
            .unwrap();
        let sale = db.sales().register(monitor.id, 1, "Pix").await.unwrap();

        db.products()
            .update(monitor.id, "Ultra-Wide Monitor", 2, 999.0)
            .await
            .unwrap();

        let stored = db.sales().get_by_id(sale.id).await.unwrap();
        assert_eq!(stored.unit_price, 1200.0);
        assert_eq!(stored.total_price, 1200.0);
    }

    #[tokio::test]
    async fn test_product_with_sales_cannot_be_deleted() {
        let db = test_db().await;

        let mouse = db.products().create("Gaming Mouse", 12, 80.0).await.unwrap();
        let sale = db.sales().register(mouse.id, 1, "Debit Card").await.unwrap();

        let err = db.products().delete(mouse.id).await.unwrap_err();
        assert!(matches!(
            err,
            StoreError::Domain(CoreError::HasDependentSales { sale_count: 1, .. })
        ));

        // after reversal the product is sale-free and deletable
        db.sales().reverse(sale.id).await.unwrap();
        db.products().delete(mouse.id).await.unwrap();
    }

    #[tokio::test]
    async fn test_quantity_tracks_active_sales() {
        let db = test_db().await;

        let widget = db.products().create("Widget", 10, 2.5).await.unwrap();
        let s1 = db.sales().register(widget.id, 3, "Cash").await.unwrap();
        let s2 = db.sales().register(widget.id, 4, "Cash").await.unwrap();
        assert_eq!(db.products().get_by_id(widget.id).await.unwrap().quantity, 3);

        db.sales().reverse(s1.id).await.unwrap();
        assert_eq!(db.products().get_by_id(widget.id).await.unwrap().quantity, 6);

        db.sales().reverse(s2.id).await.unwrap();
        assert_eq!(db.products().get_by_id(widget.id).await.unwrap().quantity, 10);
    }

    #[tokio::test]
    async fn test_list_newest_first_with_product_name() {
        let db = test_db().await;

        let keyboard = db
            .products()
            .create("Mechanical Keyboard", 10, 150.0)
            .await
            .unwrap();
        let first = db.sales().register(keyboard.id, 1, "Cash").await.unwrap();
        let second = db.sales().register(keyboard.id, 2, "Pix").await.unwrap();

        let page = db.sales().list(1, 10).await.unwrap();
        assert_eq!(page.total_items, 2);
        // newest first; id breaks same-timestamp ties
        assert_eq!(page.items[0].id, second.id);
        assert_eq!(page.items[1].id, first.id);
        assert_eq!(page.items[0].product_name, "Mechanical Keyboard");

        let beyond = db.sales().list(5, 10).await.unwrap();
        assert!(beyond.items.is_empty());
        assert_eq!(beyond.total_items, 2);
    }
}
