//! # vendia-db: Database Layer for Vendia
//!
//! SQLite storage for the inventory and sales backend, via sqlx.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                       Vendia Data Flow                          │
//! │                                                                 │
//! │  Dashboard request (register sale, run report, ...)             │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                  vendia-db (THIS CRATE)                   │  │
//! │  │                                                           │  │
//! │  │  ┌────────────┐   ┌────────────────┐   ┌──────────────┐  │  │
//! │  │  │  Database  │   │  Repositories  │   │  Migrations  │  │  │
//! │  │  │ (pool.rs)  │   │                │   │  (embedded)  │  │  │
//! │  │  │            │   │ ProductRepo    │   │              │  │  │
//! │  │  │ SqlitePool │◄──│ SaleRepo       │   │ 001_initial  │  │  │
//! │  │  │ lifecycle  │   │ ReportRepo     │   │  _schema.sql │  │  │
//! │  │  └────────────┘   └────────────────┘   └──────────────┘  │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  SQLite database (WAL mode, foreign keys ON)                    │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database and store error types
//! - [`repository`] - Repository implementations (product, sale, report)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vendia_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./vendia.db")).await?;
//!
//! let product = db.products().create("Mechanical Keyboard", 5, 150.0).await?;
//! let sale = db.sales().register(product.id, 2, "Cash").await?;
//! let report = db.reports().dashboard(&ReportFilter::none()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, StoreError, StoreResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::SaleRepository;
