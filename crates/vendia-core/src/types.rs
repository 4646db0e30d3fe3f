//! # Domain Types
//!
//! Core domain types used throughout Vendia.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Domain Types                             │
//! │                                                                 │
//! │  ┌────────────────┐        ┌────────────────────┐               │
//! │  │    Product     │ 1    * │       Sale         │               │
//! │  │  ────────────  │◄───────│  ────────────────  │               │
//! │  │  id (i64)      │        │  id (i64)          │               │
//! │  │  name (unique) │        │  product_id (FK)   │               │
//! │  │  quantity      │        │  quantity          │               │
//! │  │  price         │        │  unit_price (snap) │               │
//! │  │  created_at    │        │  total_price       │               │
//! │  └────────────────┘        │  payment_method    │               │
//! │                            │  sold_at           │               │
//! │                            └────────────────────┘               │
//! │                                                                 │
//! │  Report DTOs: StockSummary, SalesSummary, MonthlySales,         │
//! │  ProductSales, PaymentMethodRevenue, DashboardReport            │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Snapshot Invariant
//! `Sale.unit_price` is frozen at registration time and `Sale.total_price`
//! always equals `unit_price × quantity`. Neither is ever recomputed, even
//! when the owning product's price changes later.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// =============================================================================
// Product
// =============================================================================

/// A stocked item with name, quantity on hand, and unit price.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Store-generated identity.
    pub id: i64,

    /// Display name; trimmed, globally unique (case-sensitive).
    pub name: String,

    /// Units on hand. Never negative.
    pub quantity: i64,

    /// Current unit price.
    pub price: f64,

    /// Set once at creation, immutable thereafter.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    /// Current stock value of this product (quantity × price).
    #[inline]
    pub fn stock_value(&self) -> f64 {
        self.quantity as f64 * self.price
    }
}

// =============================================================================
// Sale
// =============================================================================

/// An immutable record of a stock-decrementing transaction against one
/// product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: i64,
    pub product_id: i64,
    /// Units sold. Always positive.
    pub quantity: i64,
    /// Product price at sale time (frozen).
    pub unit_price: f64,
    /// unit_price × quantity, stored at registration.
    pub total_price: f64,
    /// Free-form label; reporting groups by literal value.
    pub payment_method: String,
    /// Sole axis for report filtering and time-bucketing.
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

/// A sale joined with its product's name, as served to the sale history
/// listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleWithProduct {
    pub id: i64,
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    pub unit_price: f64,
    pub total_price: f64,
    pub payment_method: String,
    #[ts(as = "String")]
    pub sold_at: DateTime<Utc>,
}

// =============================================================================
// Pagination
// =============================================================================

/// One page of a listing, with the totals the dashboard's pager needs.
///
/// Pages are 1-indexed. A page past the end of the result set yields an
/// empty `items` list, not an error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub current_page: i64,
    pub total_pages: i64,
    pub total_items: i64,
}

impl<T> Page<T> {
    /// Builds a page envelope. `total_pages` is the ceiling of
    /// `total_items / page_size` (0 when the result set is empty).
    pub fn new(items: Vec<T>, current_page: i64, page_size: i64, total_items: i64) -> Self {
        let total_pages = if total_items == 0 {
            0
        } else {
            (total_items + page_size - 1) / page_size
        };

        Page {
            items,
            current_page,
            total_pages,
            total_items,
        }
    }
}

// =============================================================================
// Report DTOs
// =============================================================================

/// Stock overview across all products. Not affected by report filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct StockSummary {
    /// Number of registered products.
    pub product_count: i64,
    /// Σ(quantity × price) over all products, rounded to 2 decimals.
    pub stock_value: f64,
}

/// Count and revenue of the (filtered) sale set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SalesSummary {
    pub sale_count: i64,
    /// Σ(total_price) over matching sales, rounded to 2 decimals.
    pub total_revenue: f64,
}

/// One calendar-month bucket of sales revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MonthlySales {
    /// Sortable bucket key, `"YYYY-MM"`.
    pub month: String,
    /// Human-readable label, e.g. `"Aug 2026"`.
    pub label: String,
    pub total: f64,
}

/// Revenue attributed to one product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductSales {
    pub product: String,
    pub total: f64,
}

/// Revenue attributed to one payment method.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentMethodRevenue {
    pub payment_method: String,
    pub total: f64,
}

/// The consolidated report the dashboard consumes: all five views in one
/// response object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DashboardReport {
    pub stock: StockSummary,
    pub sales: SalesSummary,
    pub sales_by_month: Vec<MonthlySales>,
    pub sales_by_product: Vec<ProductSales>,
    pub revenue_by_payment_method: Vec<PaymentMethodRevenue>,
}

// =============================================================================
// Unit Tests
// =============================================================================
