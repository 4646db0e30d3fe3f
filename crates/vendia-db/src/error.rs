//! # Database Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Error Propagation                           │
//! │                                                                 │
//! │  SQLite Error (sqlx::Error)                                     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  DbError (this module)  ← adds context and categorization       │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  StoreError (this module) = CoreError ∪ DbError                 │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Caller distinguishes the user-facing taxonomy (Domain) from    │
//! │  internal storage failures (Db)                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use vendia_core::{CoreError, ValidationError};

// =============================================================================
// DbError
// =============================================================================

/// Storage-level failures, distinct from the user-facing domain taxonomy.
/// Any such failure inside a transaction rolls the whole mutation back.
#[derive(Debug, Error)]
pub enum DbError {
    /// Row expected but not present.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// UNIQUE constraint violation.
    #[error("Duplicate {field}: '{value}' already exists")]
    UniqueViolation { field: String, value: String },

    /// Foreign key constraint violation.
    #[error("Foreign key violation: {message}")]
    ForeignKeyViolation { message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound   → DbError::NotFound
/// sqlx::Error::Database      → analyze message for constraint type
/// sqlx::Error::PoolTimedOut  → DbError::PoolExhausted
/// other                      → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite constraint messages:
                //   "UNIQUE constraint failed: <table>.<column>"
                //   "FOREIGN KEY constraint failed"
                if msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::UniqueViolation {
                        field,
                        value: "unknown".to_string(),
                    }
                } else if msg.contains("FOREIGN KEY constraint failed") {
                    DbError::ForeignKeyViolation {
                        message: msg.to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for low-level database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// StoreError
// =============================================================================

/// What every repository operation returns: either an expected,
/// user-facing domain condition or an internal storage failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error(transparent)]
    Domain(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),
}

impl From<sqlx::Error> for StoreError {
    fn from(err: sqlx::Error) -> Self {
        StoreError::Db(err.into())
    }
}

impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Domain(err.into())
    }
}

impl StoreError {
    /// True for the expected, user-facing conditions (as opposed to
    /// internal storage failures).
    pub fn is_domain(&self) -> bool {
        matches!(self, StoreError::Domain(_))
    }
}

/// Result type for repository operations.
pub type StoreResult<T> = Result<T, StoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
