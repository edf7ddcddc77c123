//! # Storage Error Types
//!
//! Error types for storage operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                            │
//! │                                                                 │
//! │  SQLite error (sqlx::Error) / JSON error (serde_json::Error)    │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  StoreError (this module) ← adds context and categorization     │
//! │       │                                                         │
//! │       ▼                                                         │
//! │  Caller surfaces a user-facing message; every error is          │
//! │  recoverable (validation) or an environment failure (I/O)       │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use kairo_core::{CoreError, ValidationError};

/// Storage operation errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Record not found in its collection.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    /// Business rule or input validation failure from kairo-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A persisted collection failed to (de)serialize.
    ///
    /// Happens only when the stored JSON was edited by hand or written
    /// by an incompatible version.
    #[error("collection serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Query execution failed.
    #[error("query failed: {0}")]
    Query(#[from] sqlx::Error),

    /// Migration failed.
    #[error("migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    /// Creates a NotFound error for a given entity type and id.
    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        StoreError::NotFound {
            entity,
            id: id.into(),
        }
    }
}

/// Field validation errors convert through the core error chain.
impl From<ValidationError> for StoreError {
    fn from(err: ValidationError) -> Self {
        StoreError::Core(CoreError::Validation(err))
    }
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;
