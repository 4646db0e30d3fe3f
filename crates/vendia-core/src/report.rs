//! # Report Filters
//!
//! Parsing of the optional filter parameters shared by every report view.
//!
//! ## Filter Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Report Filter Pipeline                       │
//! │                                                                 │
//! │  raw params (strings/ids from the dashboard)                    │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  ReportFilter::from_params     ← THIS MODULE                    │
//! │       │                                                         │
//! │       ├── start_date "2026-03-01" → sold_at ≥ 00:00:00.000000   │
//! │       ├── end_date   "2026-03-31" → sold_at ≤ 23:59:59.999999   │
//! │       ├── payment_method "Todos"  → no filter (sentinel)        │
//! │       ├── payment_method "Pix"    → exact match                 │
//! │       ├── product_id              → exact match                 │
//! │       └── malformed date          → filter dropped, no error    │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  vendia-db report queries (AND-composed predicates)             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dropping malformed dates instead of failing is deliberate: report
//! filters are an optional refinement, and the dashboard treats a bad
//! value the same as an absent one.

use chrono::{DateTime, NaiveDate, NaiveTime, TimeDelta, Utc};

/// Sentinel payment-method value meaning "all methods" — sent by the
/// dashboard's method selector and never treated as a literal method.
pub const PAYMENT_FILTER_ALL: &str = "Todos";

/// Date format accepted by the date filters.
const DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// ReportFilter
// =============================================================================

/// The parsed, typed form of the filter parameters every report accepts.
/// All fields are optional and AND-composed.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    /// Inclusive lower bound on `sold_at` (start of the given day, UTC).
    pub start: Option<DateTime<Utc>>,
    /// Inclusive upper bound on `sold_at` (end of the given day, UTC).
    pub end: Option<DateTime<Utc>>,
    /// Exact payment-method match; `None` when absent or `"Todos"`.
    pub payment_method: Option<String>,
    /// Exact product match on `Sale.product_id`.
    pub product_id: Option<i64>,
}

impl ReportFilter {
    /// An empty filter: every sale matches.
    pub fn none() -> Self {
        ReportFilter::default()
    }

    /// Parses raw request parameters into a filter.
    ///
    /// Malformed date strings are silently dropped (that filter is simply
    /// not applied). A blank or `"Todos"` payment method means no
    /// method filter.
    pub fn from_params(
        start_date: Option<&str>,
        end_date: Option<&str>,
        payment_method: Option<&str>,
        product_id: Option<i64>,
    ) -> Self {
        let start = start_date.and_then(parse_date).map(start_of_day);
        let end = end_date.and_then(parse_date).map(end_of_day);

        let payment_method = payment_method
            .map(str::trim)
            .filter(|m| !m.is_empty() && *m != PAYMENT_FILTER_ALL)
            .map(str::to_string);

        ReportFilter {
            start,
            end,
            payment_method,
            product_id,
        }
    }

    /// True when no predicate is set.
    pub fn is_empty(&self) -> bool {
        self.start.is_none()
            && self.end.is_none()
            && self.payment_method.is_none()
            && self.product_id.is_none()
    }
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT).ok()
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    // 23:59:59.999999 — one microsecond short of the next day
    start_of_day(date) + TimeDelta::microseconds(86_400_000_000 - 1)
}

// =============================================================================
// Month Labels
// =============================================================================

const MONTH_ABBR: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Formats a `"YYYY-MM"` bucket key as a human-readable label, e.g.
/// `"2026-08"` → `"Aug 2026"`. Unrecognized keys pass through unchanged.
pub fn month_label(month_key: &str) -> String {
    let mut parts = month_key.splitn(2, '-');
    let year = parts.next().unwrap_or_default();
    let month: Option<usize> = parts.next().and_then(|m| m.parse().ok());

    match month {
        Some(m) if (1..=12).contains(&m) && !year.is_empty() => {
            format!("{} {}", MONTH_ABBR[m - 1], year)
        }
        _ => month_key.to_string(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
