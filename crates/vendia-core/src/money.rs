//! # Money Helpers
//!
//! Currency rounding for monetary values.
//!
//! ## Rounding Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  Accumulate at FULL precision, round ONCE at the boundary.      │
//! │                                                                 │
//! │  SUM(total_price)  ──►  1234.56700000001  ──►  round_currency   │
//! │                                                    │            │
//! │                                                    ▼            │
//! │                                                1234.57          │
//! │                                                                 │
//! │  The one exception: Sale.total_price is rounded when the sale   │
//! │  is registered, because it is a stored snapshot, not a derived  │
//! │  aggregate.                                                     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

// =============================================================================
// Rounding
// =============================================================================

/// Rounds a monetary value to 2 decimal places (half away from zero).
///
/// Applied exactly once, at the output boundary; intermediate sums keep
/// full precision.
#[inline]
pub fn round_currency(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Total price of a sale line: unit price × quantity, rounded once.
#[inline]
pub fn line_total(unit_price: f64, quantity: i64) -> f64 {
    round_currency(unit_price * quantity as f64)
}

// =============================================================================
// Unit Tests
// =============================================================================
