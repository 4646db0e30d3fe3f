//! # Report Repository
//!
//! The six aggregate report views, all computed over one filtered view of
//! the sale set.
//!
//! ## Query Composition
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                   Report Query Builder                          │
//! │                                                                 │
//! │  base query (per shape)                                         │
//! │    "SELECT ... FROM sales s [JOIN products p ...] WHERE 1=1"    │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  push_sale_filters(builder, filter)   ← shared by every shape   │
//! │    AND s.sold_at >= :start                                      │
//! │    AND s.sold_at <= :end                                        │
//! │    AND s.payment_method = :method                               │
//! │    AND s.product_id = :product                                  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  GROUP BY / ORDER BY (per shape)                                │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each shape's base SQL includes its join (when it needs one) exactly
//! once, and the shared helper appends each predicate exactly once, so no
//! combination of filters can duplicate either.
//!
//! `SUM` accumulates at full precision; totals are rounded to 2 decimals
//! exactly once, when the DTO rows are built. The stock summary operates
//! over products and ignores sale filters entirely.

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::StoreResult;
use vendia_core::money::round_currency;
use vendia_core::report::month_label;
use vendia_core::{
    DashboardReport, MonthlySales, PaymentMethodRevenue, ProductSales, ReportFilter, SalesSummary,
    StockSummary,
};

/// Repository for the aggregate report queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

/// Appends the shared AND-composed predicates to a report query.
/// Every report shape funnels through this, so filter semantics cannot
/// drift between views.
fn push_sale_filters<'qb>(builder: &mut QueryBuilder<'qb, Sqlite>, filter: &ReportFilter) {
    if let Some(start) = filter.start {
        builder.push(" AND s.sold_at >= ");
        builder.push_bind(start);
    }
    if let Some(end) = filter.end {
        builder.push(" AND s.sold_at <= ");
        builder.push_bind(end);
    }
    if let Some(method) = &filter.payment_method {
        builder.push(" AND s.payment_method = ");
        builder.push_bind(method.clone());
    }
    if let Some(product_id) = filter.product_id {
        builder.push(" AND s.product_id = ");
        builder.push_bind(product_id);
    }
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Stock overview: product count and total stock value over ALL
    /// products. Sale filters do not apply here.
    pub async fn stock_summary(&self) -> StoreResult<StockSummary> {
        let (product_count, stock_value): (i64, f64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(quantity * price), 0.0) FROM products",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(StockSummary {
            product_count,
            stock_value: round_currency(stock_value),
        })
    }

    /// Count and total revenue of the matching sales.
    pub async fn sales_summary(&self, filter: &ReportFilter) -> StoreResult<SalesSummary> {
        debug!(filter = ?filter, "Computing sales summary");

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT COUNT(*), COALESCE(SUM(s.total_price), 0.0) FROM sales s WHERE 1=1",
        );
        push_sale_filters(&mut builder, filter);

        let (sale_count, total_revenue): (i64, f64) =
            builder.build_query_as().fetch_one(&self.pool).await?;

        Ok(SalesSummary {
            sale_count,
            total_revenue: round_currency(total_revenue),
        })
    }

    /// Matching sales grouped by the calendar month of `sold_at`,
    /// chronologically ascending. One row per `(year, month)` bucket.
    pub async fn sales_by_month(&self, filter: &ReportFilter) -> StoreResult<Vec<MonthlySales>> {
        debug!(filter = ?filter, "Computing sales by month");

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT strftime('%Y-%m', s.sold_at) AS month, SUM(s.total_price) AS total \
             FROM sales s WHERE 1=1",
        );
        push_sale_filters(&mut builder, filter);
        builder.push(" GROUP BY month ORDER BY month ASC");

        let rows: Vec<(String, f64)> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(month, total)| MonthlySales {
                label: month_label(&month),
                month,
                total: round_currency(total),
            })
            .collect())
    }

    /// Matching sales grouped by product name, highest revenue first.
    pub async fn sales_by_product(&self, filter: &ReportFilter) -> StoreResult<Vec<ProductSales>> {
        debug!(filter = ?filter, "Computing sales by product");

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT p.name AS product, SUM(s.total_price) AS total \
             FROM sales s INNER JOIN products p ON p.id = s.product_id WHERE 1=1",
        );
        push_sale_filters(&mut builder, filter);
        builder.push(" GROUP BY p.name ORDER BY total DESC");

        let rows: Vec<(String, f64)> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(product, total)| ProductSales {
                product,
                total: round_currency(total),
            })
            .collect())
    }

    /// Matching sales grouped by payment-method literal, highest revenue
    /// first.
    pub async fn revenue_by_payment_method(
        &self,
        filter: &ReportFilter,
    ) -> StoreResult<Vec<PaymentMethodRevenue>> {
        debug!(filter = ?filter, "Computing revenue by payment method");

        let mut builder = QueryBuilder::<Sqlite>::new(
            "SELECT s.payment_method, SUM(s.total_price) AS total \
             FROM sales s WHERE 1=1",
        );
        push_sale_filters(&mut builder, filter);
        builder.push(" GROUP BY s.payment_method ORDER BY total DESC");

        let rows: Vec<(String, f64)> = builder.build_query_as().fetch_all(&self.pool).await?;

        Ok(rows
            .into_iter()
            .map(|(payment_method, total)| PaymentMethodRevenue {
                payment_method,
                total: round_currency(total),
            })
            .collect())
    }

    /// The consolidated report the dashboard consumes: all five views in
    /// one response. The sale views share the same filter; the stock
    /// summary is always unfiltered.
    pub async fn dashboard(&self, filter: &ReportFilter) -> StoreResult<DashboardReport> {
        debug!(filter = ?filter, "Assembling dashboard report");

        let stock = self.stock_summary().await?;
        let sales = self.sales_summary(filter).await?;
        let sales_by_month = self.sales_by_month(filter).await?;
        let sales_by_product = self.sales_by_product(filter).await?;
        let revenue_by_payment_method = self.revenue_by_payment_method(filter).await?;

        Ok(DashboardReport {
            stock,
            sales,
            sales_by_month,
            sales_by_product,
            revenue_by_payment_method,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use chrono::NaiveDate;
    use vendia_core::PAYMENT_FILTER_ALL;

    async fn test_db() -> Database {
        Database::new(DbConfig::in_memory()).await.unwrap()
    }

    /// Pins a sale's sold_at to noon UTC on the given date, so tests can
    /// exercise date filters and month buckets deterministically.
    async fn set_sold_at(db: &Database, sale_id: i64, date: &str) {
        let sold_at = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
            .and_utc();
        sqlx::query("UPDATE sales SET sold_at = ?1 WHERE id = ?2")
            .bind(sold_at)
            .bind(sale_id)
            .execute(db.pool())
            .await
            .unwrap();
    }

    /// Two products; four sales across two months, two payment methods:
    ///   kb ×2 @150 = 300.00  (Cash,  2026-03-10)
    ///   kb ×1 @150 = 150.00  (Pix,   2026-03-20)
    ///   ms ×2 @80  = 160.00  (Cash,  2026-04-05)
    ///   ms ×1 @80  =  80.00  (Pix,   2026-04-25)
    async fn seeded_db() -> (Database, i64, i64) {
        let db = test_db().await;

        let kb = db
            .products()
            .create("Mechanical Keyboard", 10, 150.0)
            .await
            .unwrap();
        let ms = db.products().create("Gaming Mouse", 12, 80.0).await.unwrap();

        let s1 = db.sales().register(kb.id, 2, "Cash").await.unwrap();
        let s2 = db.sales().register(kb.id, 1, "Pix").await.unwrap();
        let s3 = db.sales().register(ms.id, 2, "Cash").await.unwrap();
        let s4 = db.sales().register(ms.id, 1, "Pix").await.unwrap();

        set_sold_at(&db, s1.id, "2026-03-10").await;
        set_sold_at(&db, s2.id, "2026-03-20").await;
        set_sold_at(&db, s3.id, "2026-04-05").await;
        set_sold_at(&db, s4.id, "2026-04-25").await;

        (db, kb.id, ms.id)
    }

    #[tokio::test]
    async fn test_stock_summary_ignores_filters() {
        let (db, ..) = seeded_db().await;

        // after the sales: kb 7 × 150 + ms 9 × 80 = 1050 + 720
        let summary = db.reports().stock_summary().await.unwrap();
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.stock_value, 1770.0);
    }

    #[tokio::test]
    async fn test_stock_summary_empty_store() {
        let db = test_db().await;
        let summary = db.reports().stock_summary().await.unwrap();
        assert_eq!(summary.product_count, 0);
        assert_eq!(summary.stock_value, 0.0);
    }

    #[tokio::test]
    async fn test_sales_summary_unfiltered() {
        let (db, ..) = seeded_db().await;

        let summary = db.reports().sales_summary(&ReportFilter::none()).await.unwrap();
        assert_eq!(summary.sale_count, 4);
        assert_eq!(summary.total_revenue, 690.0);
    }

    #[tokio::test]
    async fn test_todos_is_equivalent_to_no_payment_filter() {
        let (db, ..) = seeded_db().await;

        let all = ReportFilter::from_params(None, None, Some(PAYMENT_FILTER_ALL), None);
        let none = ReportFilter::none();

        let with_sentinel = db.reports().sales_summary(&all).await.unwrap();
        let without = db.reports().sales_summary(&none).await.unwrap();
        assert_eq!(with_sentinel, without);
    }

    #[tokio::test]
    async fn test_payment_method_filter_is_exact() {
        let (db, ..) = seeded_db().await;

        let filter = ReportFilter::from_params(None, None, Some("Cash"), None);
        let summary = db.reports().sales_summary(&filter).await.unwrap();
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.total_revenue, 460.0);

        // payment methods are literal values, not case-folded
        let filter = ReportFilter::from_params(None, None, Some("cash"), None);
        let summary = db.reports().sales_summary(&filter).await.unwrap();
        assert_eq!(summary.sale_count, 0);
    }

    #[tokio::test]
    async fn test_date_range_filter() {
        let (db, ..) = seeded_db().await;

        // March only
        let march =
            ReportFilter::from_params(Some("2026-03-01"), Some("2026-03-31"), None, None);
        let summary = db.reports().sales_summary(&march).await.unwrap();
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.total_revenue, 450.0);

        // open-ended lower bound
        let from_april = ReportFilter::from_params(Some("2026-04-01"), None, None, None);
        let summary = db.reports().sales_summary(&from_april).await.unwrap();
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.total_revenue, 240.0);

        // boundary day is inclusive on both ends
        let exact_day =
            ReportFilter::from_params(Some("2026-03-10"), Some("2026-03-10"), None, None);
        let summary = db.reports().sales_summary(&exact_day).await.unwrap();
        assert_eq!(summary.sale_count, 1);
        assert_eq!(summary.total_revenue, 300.0);
    }

    #[tokio::test]
    async fn test_malformed_date_is_ignored_not_fatal() {
        let (db, ..) = seeded_db().await;

        let filter = ReportFilter::from_params(Some("31/03/2026"), None, None, None);
        let summary = db.reports().sales_summary(&filter).await.unwrap();
        assert_eq!(summary.sale_count, 4);
    }

    #[tokio::test]
    async fn test_product_filter_composes_with_dates() {
        let (db, kb_id, _) = seeded_db().await;

        let filter =
            ReportFilter::from_params(Some("2026-03-01"), Some("2026-03-31"), None, Some(kb_id));
        let summary = db.reports().sales_summary(&filter).await.unwrap();
        assert_eq!(summary.sale_count, 2);
        assert_eq!(summary.total_revenue, 450.0);

        let filter = ReportFilter::from_params(
            Some("2026-04-01"),
            Some("2026-04-30"),
            Some("Pix"),
            Some(kb_id),
        );
        let summary = db.reports().sales_summary(&filter).await.unwrap();
        assert_eq!(summary.sale_count, 0);
        assert_eq!(summary.total_revenue, 0.0);
    }

    #[tokio::test]
    async fn test_sales_by_month_buckets_and_order() {
        let (db, ..) = seeded_db().await;

        let rows = db.reports().sales_by_month(&ReportFilter::none()).await.unwrap();
        assert_eq!(rows.len(), 2);

        // chronological ascending, same-month sales in one bucket
        assert_eq!(rows[0].month, "2026-03");
        assert_eq!(rows[0].label, "Mar 2026");
        assert_eq!(rows[0].total, 450.0);
        assert_eq!(rows[1].month, "2026-04");
        assert_eq!(rows[1].label, "Apr 2026");
        assert_eq!(rows[1].total, 240.0);
    }

    #[tokio::test]
    async fn test_sales_by_product_ordering() {
        let (db, ..) = seeded_db().await;

        let rows = db.reports().sales_by_product(&ReportFilter::none()).await.unwrap();
        assert_eq!(rows.len(), 2);

        // descending by revenue: keyboard 450 over mouse 240
        assert_eq!(rows[0].product, "Mechanical Keyboard");
        assert_eq!(rows[0].total, 450.0);
        assert_eq!(rows[1].product, "Gaming Mouse");
        assert_eq!(rows[1].total, 240.0);

        // the product filter composes with the join
        let filter = ReportFilter::from_params(None, None, None, None);
        let cash = ReportFilter {
            payment_method: Some("Cash".to_string()),
            ..filter
        };
        let rows = db.reports().sales_by_product(&cash).await.unwrap();
        assert_eq!(rows[0].total, 300.0);
        assert_eq!(rows[1].total, 160.0);
    }

    #[tokio::test]
    async fn test_revenue_by_payment_method_ordering() {
        let (db, ..) = seeded_db().await;

        let rows = db
            .reports()
            .revenue_by_payment_method(&ReportFilter::none())
            .await
            .unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].payment_method, "Cash");
        assert_eq!(rows[0].total, 460.0);
        assert_eq!(rows[1].payment_method, "Pix");
        assert_eq!(rows[1].total, 230.0);
    }

    #[tokio::test]
    async fn test_dashboard_composes_all_views() {
        let (db, ..) = seeded_db().await;

        let march =
            ReportFilter::from_params(Some("2026-03-01"), Some("2026-03-31"), None, None);
        let report = db.reports().dashboard(&march).await.unwrap();

        // stock is unfiltered even when the sale views are filtered
        assert_eq!(report.stock.product_count, 2);
        assert_eq!(report.stock.stock_value, 1770.0);

        assert_eq!(report.sales.sale_count, 2);
        assert_eq!(report.sales.total_revenue, 450.0);
        assert_eq!(report.sales_by_month.len(), 1);
        assert_eq!(report.sales_by_month[0].month, "2026-03");
        assert_eq!(report.sales_by_product.len(), 1);
        assert_eq!(report.revenue_by_payment_method.len(), 2);
    }

    #[tokio::test]
    async fn test_sums_round_once_at_the_boundary() {
        let db = test_db().await;

        // 0.1 accumulated ten times drifts in float; the reported total
        // must come out exactly 1.00
        let penny = db.products().create("Penny Sweet", 100, 0.1).await.unwrap();
        for _ in 0..10 {
            db.sales().register(penny.id, 1, "Cash").await.unwrap();
        }

        let summary = db.reports().sales_summary(&ReportFilter::none()).await.unwrap();
        assert_eq!(summary.sale_count, 10);
        assert_eq!(summary.total_revenue, 1.0);

        let rows = db
            .reports()
            .revenue_by_payment_method(&ReportFilter::none())
            .await
            .unwrap();
        assert_eq!(rows[0].total, 1.0);
    }

    #[tokio::test]
    async fn test_reports_on_empty_sale_set() {
        let db = test_db().await;

        let summary = db.reports().sales_summary(&ReportFilter::none()).await.unwrap();
        assert_eq!(summary.sale_count, 0);
        assert_eq!(summary.total_revenue, 0.0);

        assert!(db
            .reports()
            .sales_by_month(&ReportFilter::none())
            .await
            .unwrap()
            .is_empty());
        assert!(db
            .reports()
            .sales_by_product(&ReportFilter::none())
            .await
            .unwrap()
            .is_empty());
    }
}
