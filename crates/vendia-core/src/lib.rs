//! # vendia-core: Pure Business Logic for Vendia
//!
//! This crate is the heart of the inventory and sales backend. It contains
//! the domain types and rules as pure functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Vendia Architecture                         │
//! │                                                                 │
//! │  ┌───────────────────────────────────────────────────────────┐  │
//! │  │                Dashboard Front End (external)             │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │ request/response                │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │               ★ vendia-core (THIS CRATE) ★                │  │
//! │  │                                                           │  │
//! │  │  ┌─────────┐  ┌─────────┐  ┌────────────┐  ┌──────────┐  │  │
//! │  │  │  types  │  │  money  │  │ validation │  │  report  │  │  │
//! │  │  │ Product │  │ round2  │  │   rules    │  │  Filter  │  │  │
//! │  │  │  Sale   │  │ totals  │  │   checks   │  │  labels  │  │  │
//! │  │  └─────────┘  └─────────┘  └────────────┘  └──────────┘  │  │
//! │  │                                                           │  │
//! │  │  NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS       │  │
//! │  └────────────────────────────┬──────────────────────────────┘  │
//! │                               │                                 │
//! │  ┌────────────────────────────▼──────────────────────────────┐  │
//! │  │                 vendia-db (Database Layer)                │  │
//! │  │         SQLite queries, migrations, repositories          │  │
//! │  └───────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Sale, report DTOs, pagination)
//! - [`money`] - Currency rounding (full-precision accumulation, 2-decimal
//!   rounding at the output boundary)
//! - [`error`] - Domain error types
//! - [`validation`] - Business rule validation
//! - [`report`] - Report filter parsing and month labeling

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use report::{ReportFilter, PAYMENT_FILTER_ALL};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default page size for product and sale listings.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// Upper bound for a caller-supplied page size.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Maximum length of a product name.
pub const MAX_PRODUCT_NAME_LEN: usize = 100;

/// Maximum length of a payment method label.
pub const MAX_PAYMENT_METHOD_LEN: usize = 50;
