//! # Error Types
//!
//! Domain-specific error types for kairo-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Error Types                             │
//! │                                                                 │
//! │  kairo-core errors (this file)                                  │
//! │  ├── CoreError        - Business rule violations                │
//! │  └── ValidationError  - Input validation failures               │
//! │                                                                 │
//! │  kairo-store errors (separate crate)                            │
//! │  └── StoreError       - Storage operation failures              │
//! │                                                                 │
//! │  Flow: ValidationError → CoreError → StoreError → caller        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product name, amounts, etc.)
//! 3. Errors are enum variants, never String
//! 4. Every variant maps to a user-facing message

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They are all
/// recoverable: the caller corrects the input and retries; nothing is
/// written before they are raised.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product cannot be found in the inventory.
    ///
    /// Raised by stock-enforcing channels (credit sales) when the named
    /// product has no inventory entry.
    #[error("product not found: {0}")]
    ProductNotFound(String),

    /// Requested quantity exceeds current stock.
    ///
    /// Only the credit sale channel enforces this; other channels either
    /// clamp at zero on deduction or warn without blocking.
    #[error("requested quantity ({requested}) exceeds available stock ({available}) for {name}")]
    InsufficientStock {
        name: String,
        available: i64,
        requested: i64,
    },

    /// A transaction was saved with no line items.
    #[error("transaction has no line items")]
    EmptyTransaction,

    /// A partial settlement amount is above the outstanding remainder.
    #[error("payment of {amount} exceeds remaining balance of {remaining}")]
    PaymentExceedsRemaining { amount: Money, remaining: Money },

    /// Validation error (wraps ValidationError).
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These occur when user input doesn't meet requirements, before any
/// business logic runs.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or blank.
    #[error("{field} is required")]
    Required { field: &'static str },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: &'static str },

    /// Value must not be negative.
    #[error("{field} cannot be negative")]
    CannotBeNegative { field: &'static str },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: &'static str, max: usize },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Convenience type alias for Results with ValidationError.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InsufficientStock {
            name: "Pipe 2in".to_string(),
            available: 3,
            requested: 5,
        };
        assert_eq!(
            err.to_string(),
            "requested quantity (5) exceeds available stock (3) for Pipe 2in"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required { field: "customer name" };
        assert_eq!(err.to_string(), "customer name is required");

        let err = ValidationError::MustBePositive { field: "quantity" };
        assert_eq!(err.to_string(), "quantity must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required { field: "customer name" };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_payment_exceeds_remaining_message() {
        let err = CoreError::PaymentExceedsRemaining {
            amount: Money::from_piasters(7000),
            remaining: Money::from_piasters(6000),
        };
        assert_eq!(
            err.to_string(),
            "payment of 70.00 EGP exceeds remaining balance of 60.00 EGP"
        );
    }
}
