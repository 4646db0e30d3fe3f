//! # Product Repository
//!
//! The entity store for products: creation, update, deletion, lookup,
//! and the paginated searchable listing.
//!
//! ## Name Uniqueness
//! Uniqueness is checked with a case-sensitive exact match on the
//! trimmed name (the UNIQUE index is the backstop); the listing search
//! matches case-insensitive substrings. "Keyboard" and "keyboard" are
//! two distinct names, but searching "key" finds both.
//!
//! ## Deletion
//! A product with at least one recorded sale can never be deleted. The
//! existence check, the dependent-sales count, and the DELETE run inside
//! one transaction.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::StoreResult;
use vendia_core::validation::{validate_price, validate_product_name, validate_product_quantity};
use vendia_core::{CoreError, Page, Product, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};

const SELECT_PRODUCT: &str = "SELECT id, name, quantity, price, created_at FROM products";

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let product = repo.create("Mechanical Keyboard", 5, 150.0).await?;
/// let page = repo.list(1, 10, Some("keyboard")).await?;
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

    /// Creates a product.
    ///
    /// ## Errors
    /// * `Validation` - empty/over-long name, negative quantity or price
    /// * `DuplicateName` - another product already has this exact name
    pub async fn create(&self, name: &str, quantity: i64, price: f64) -> StoreResult<Product> {
        let name = validate_product_name(name)?;
        validate_product_quantity(quantity)?;
        validate_price(price)?;

        debug!(name = %name, "Creating product");

        let taken: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE name = ?1")
            .bind(&name)
            .fetch_optional(&self.pool)
            .await?;
        if taken.is_some() {
            return Err(CoreError::DuplicateName(name).into());
        }

        let created_at = Utc::now();
        let result = sqlx::query(
            "INSERT INTO products (name, quantity, price, created_at) VALUES (?1, ?2, ?3, ?4)",
        )
        .bind(&name)
        .bind(quantity)
        .bind(price)
        .bind(created_at)
        .execute(&self.pool)
        .await?;

        let id = result.last_insert_rowid();
        debug!(id = %id, name = %name, "Product created");

        Ok(Product {
            id,
            name,
            quantity,
            price,
            created_at,
        })
    }

    /// Gets a product by id.
    ///
    /// ## Errors
    /// * `ProductNotFound` - no product with this id
    pub async fn get_by_id(&self, id: i64) -> StoreResult<Product> {
        let product: Option<Product> =
            sqlx::query_as(&format!("{SELECT_PRODUCT} WHERE id = ?1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;

        product.ok_or_else(|| CoreError::ProductNotFound(id).into())
    }

    /// Updates a product's name, quantity, and price. `created_at` is
    /// immutable and never touched.
    ///
    /// ## Errors
    /// * `ProductNotFound` - no product with this id
    /// * `Validation` - same rules as `create`
    /// * `DuplicateName` - the name belongs to a *different* product
    ///   (the record being updated is excluded from the check)
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        quantity: i64,
        price: f64,
    ) -> StoreResult<Product> {
        let name = validate_product_name(name)?;
        validate_product_quantity(quantity)?;
        validate_price(price)?;

        debug!(id = %id, "Updating product");

        let existing = self.get_by_id(id).await?;

        let taken: Option<i64> =
            sqlx::query_scalar("SELECT id FROM products WHERE name = ?1 AND id <> ?2")
                .bind(&name)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
        if taken.is_some() {
            return Err(CoreError::DuplicateName(name).into());
        }

        sqlx::query("UPDATE products SET name = ?2, quantity = ?3, price = ?4 WHERE id = ?1")
            .bind(id)
            .bind(&name)
            .bind(quantity)
            .bind(price)
            .execute(&self.pool)
            .await?;

        Ok(Product {
            id,
            name,
            quantity,
            price,
            created_at: existing.created_at,
        })
    }

    /// Deletes a product, provided no sale references it.
    ///
    /// The existence check, the dependent-sales count, and the DELETE are
    /// one transaction, so a sale registered concurrently cannot slip
    /// between the check and the removal.
    ///
    /// ## Errors
    /// * `ProductNotFound` - no product with this id
    /// * `HasDependentSales` - at least one sale references the product
    pub async fn delete(&self, id: i64) -> StoreResult<()> {
        debug!(id = %id, "Deleting product");

        let mut tx = self.pool.begin().await?;

        let exists: Option<i64> = sqlx::query_scalar("SELECT id FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?;
        if exists.is_none() {
            return Err(CoreError::ProductNotFound(id).into());
        }

        let sale_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM sales WHERE product_id = ?1")
                .bind(id)
                .fetch_one(&mut *tx)
                .await?;
        if sale_count > 0 {
            return Err(CoreError::HasDependentSales { id, sale_count }.into());
        }

        sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        debug!(id = %id, "Product deleted");
        Ok(())
    }

    /// Lists products, paginated and optionally filtered by a
    /// case-insensitive substring of the name.
    ///
    /// Pages are 1-indexed; a page past the end returns empty items.
    /// `page_size` is clamped to `[1, MAX_PAGE_SIZE]`, defaulting when
    /// out of range.
    pub async fn list(
        &self,
        page: i64,
        page_size: i64,
        search: Option<&str>,
    ) -> StoreResult<Page<Product>> {
        let page = page.max(1);
        let page_size = if page_size < 1 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };
        let offset = (page - 1) * page_size;

        let pattern = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| format!("%{s}%"));

        debug!(page = %page, page_size = %page_size, search = ?pattern, "Listing products");

        let mut count_builder =
            QueryBuilder::<Sqlite>::new("SELECT COUNT(*) FROM products WHERE 1=1");
        let mut list_builder = QueryBuilder::<Sqlite>::new(SELECT_PRODUCT);
        list_builder.push(" WHERE 1=1");

        if let Some(pattern) = &pattern {
            // SQLite LIKE is case-insensitive, matching the search
            // contract (uniqueness, by contrast, uses exact `=`)
            count_builder.push(" AND name LIKE ");
            count_builder.push_bind(pattern.clone());
            list_builder.push(" AND name LIKE ");
            list_builder.push_bind(pattern.clone());
        }

        let total_items: i64 = count_builder
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await?;

        list_builder.push(" ORDER BY name LIMIT ");
        list_builder.push_bind(page_size);
        list_builder.push(" OFFSET ");
        list_builder.push_bind(offset);

        let items: Vec<Product> = list_builder
            .build_query_as()
            .fetch_all(&self.pool)
            .await?;

        Ok(Page::new(items, page, page_size, total_items))
    }

    /// Counts all products (diagnostics, used by the seeder).
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
