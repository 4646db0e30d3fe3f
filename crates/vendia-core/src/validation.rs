//! # Validation Module
//!
//! Input validation for product and sale mutations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Validation Layers                           │
//! │                                                                 │
//! │  Layer 1: THIS MODULE - business rule validation, runs before   │
//! │           any query is issued                                   │
//! │           │                                                     │
//! │           ▼                                                     │
//! │  Layer 2: Database (SQLite)                                     │
//! │           ├── NOT NULL / CHECK constraints                      │
//! │           ├── UNIQUE product name                               │
//! │           └── Foreign key sales.product_id → products.id        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! String validators return the trimmed value so callers persist exactly
//! what was checked.

use crate::error::ValidationError;
use crate::{MAX_PAYMENT_METHOD_LEN, MAX_PRODUCT_NAME_LEN};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Non-empty after trimming
/// - At most 100 characters
///
/// Returns the trimmed name.
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > MAX_PRODUCT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_PRODUCT_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

/// Validates a payment method label.
///
/// ## Rules
/// - Non-empty after trimming
/// - At most 50 characters
///
/// The value stays free-form; reporting groups by the literal string.
/// Returns the trimmed label.
pub fn validate_payment_method(method: &str) -> ValidationResult<String> {
    let method = method.trim();

    if method.is_empty() {
        return Err(ValidationError::Required {
            field: "payment_method".to_string(),
        });
    }

    if method.len() > MAX_PAYMENT_METHOD_LEN {
        return Err(ValidationError::TooLong {
            field: "payment_method".to_string(),
            max: MAX_PAYMENT_METHOD_LEN,
        });
    }

    Ok(method.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a product's quantity on hand. Zero is allowed.
pub fn validate_product_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates a sale quantity. Must be strictly positive.
pub fn validate_sale_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a product price. Zero is allowed (free items).
pub fn validate_price(price: f64) -> ValidationResult<()> {
    if !price.is_finite() {
        return Err(ValidationError::InvalidFormat {
            field: "price".to_string(),
            reason: "must be a finite number".to_string(),
        });
    }

    if price < 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
