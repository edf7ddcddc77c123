//! # Validation Module
//!
//! Field-level validation, run before any business rule executes.
//!
//! ## Validation Strategy
//! Every save either completes fully or is rejected here, before any
//! collection write happens. All errors are recoverable: the caller
//! corrects the input and resubmits.
//!
//! ## Usage
//! ```rust
//! use kairo_core::validation::{require_customer_name, validate_quantity};
//!
//! let name = require_customer_name("  Ahmed  ").unwrap();
//! assert_eq!(name, "Ahmed");
//!
//! assert!(validate_quantity(3).is_ok());
//! assert!(validate_quantity(0).is_err());
//! ```

use crate::error::{ValidationError, ValidationResult};
use crate::money::Money;

// =============================================================================
// String Validators
// =============================================================================

/// Validates and trims a customer name.
///
/// ## Rules
/// - Must not be blank after trimming
pub fn require_customer_name(name: &str) -> ValidationResult<String> {
    require_field("customer name", name)
}

/// Validates and trims a product name.
pub fn require_product_name(name: &str) -> ValidationResult<String> {
    require_field("product name", name)
}

/// Validates and trims the Fawry service category.
pub fn require_item_type(item_type: &str) -> ValidationResult<String> {
    require_field("item type", item_type)
}

fn require_field(field: &'static str, value: &str) -> ValidationResult<String> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::Required { field });
    }
    Ok(value.to_string())
}

/// Normalizes a search query for case-insensitive substring matching.
///
/// ## Rules
/// - Can be empty (matches everything)
/// - Maximum 100 characters
///
/// ## Returns
/// The trimmed, lowercased query string.
pub fn normalize_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.len() > 100 {
        return Err(ValidationError::TooLong {
            field: "query",
            max: 100,
        });
    }

    Ok(query.to_lowercase())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity (must be strictly positive).
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }
    Ok(())
}

/// Validates a stock level (zero allowed, negatives rejected).
///
/// Used when creating or editing inventory entries; sale-side deduction
/// has its own clamping rules.
pub fn validate_stock_level(qty: i64) -> ValidationResult<()> {
    if qty < 0 {
        return Err(ValidationError::CannotBeNegative { field: "quantity" });
    }
    Ok(())
}

/// Validates a unit price (zero allowed for free items).
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if price.is_negative() {
        return Err(ValidationError::CannotBeNegative { field: "price" });
    }
    Ok(())
}

/// Validates an entered payment amount (settlements must be positive).
pub fn validate_payment_amount(amount: Money) -> ValidationResult<()> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount",
        });
    }
    Ok(())
}

/// Validates an up-front paid amount on a credit item (zero allowed).
pub fn validate_paid_amount(amount: Money) -> ValidationResult<()> {
    if amount.is_negative() {
        return Err(ValidationError::CannotBeNegative {
            field: "paid amount",
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_customer_name() {
        assert_eq!(require_customer_name(" Ahmed ").unwrap(), "Ahmed");
        assert!(require_customer_name("").is_err());
        assert!(require_customer_name("   ").is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(999).is_ok());
        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
    }

    #[test]
    fn test_validate_stock_level() {
        assert!(validate_stock_level(0).is_ok());
        assert!(validate_stock_level(10).is_ok());
        assert!(validate_stock_level(-1).is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_piasters(1099)).is_ok());
        assert!(validate_price(Money::from_piasters(-100)).is_err());
    }

    #[test]
    fn test_validate_payment_amount() {
        assert!(validate_payment_amount(Money::from_piasters(100)).is_ok());
        assert!(validate_payment_amount(Money::zero()).is_err());
        assert!(validate_payment_amount(Money::from_piasters(-100)).is_err());
    }

    #[test]
    fn test_normalize_search_query() {
        assert_eq!(normalize_search_query("  PiPe ").unwrap(), "pipe");
        assert_eq!(normalize_search_query("").unwrap(), "");
        assert!(normalize_search_query(&"a".repeat(101)).is_err());
    }
}
