//! # Error Types
//!
//! Domain-specific error types for vendia-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                        Error Types                              │
//! │                                                                 │
//! │  vendia-core errors (this file)                                 │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  vendia-db errors (separate crate)                              │
//! │  ├── DbError          - Database operation failures             │
//! │  └── StoreError       - CoreError ∪ DbError (repository result) │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → StoreError → caller        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every variant here is an expected, user-facing condition; storage
//! failures are reported separately through `DbError`.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No product with the given id.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// No sale with the given id.
    #[error("Sale not found: {0}")]
    SaleNotFound(i64),

    /// Requested sale quantity exceeds the product's stock on hand.
    /// Carries the available amount so the caller can act on it.
    #[error("Insufficient stock for {name}: available {available}, requested {requested}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// Product name uniqueness violated (case-sensitive exact match).
    #[error("Product name '{0}' already exists")]
    DuplicateName(String),

    /// A product with recorded sales can never be deleted.
    #[error("Product {id} has {sale_count} recorded sale(s) and cannot be deleted")]
    HasDependentSales { id: i64, sale_count: i64 },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors, raised before business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., non-finite number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Mechanical Keyboard".to_string(),
            available: 3,
            requested: 10,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Mechanical Keyboard: available 3, requested 10"
        );

        let err = CoreError::DuplicateName("Gaming Mouse".to_string());
        assert_eq!(err.to_string(), "Product name 'Gaming Mouse' already exists");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
