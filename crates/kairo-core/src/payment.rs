//! # Payment Settlement
//!
//! Derivation of paid/remaining amounts at save time, and the partial
//! settlement applied later from the deferred-payments tracker.
//!
//! ## Settlement at Save
//! ```text
//! status = paid     →  paid = total,   remaining = 0
//! status = partial  →  paid = entered (capped at total),
//!                      remaining = total − paid (floored at 0)
//! status = pending  →  paid = 0,       remaining = total
//! ```
//! An over-entered partial payment is silently capped; the customer
//! cannot owe a negative remainder.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::money::Money;
use crate::types::PaymentStatus;

// =============================================================================
// Settlement
// =============================================================================

/// The derived money fields of a freshly saved transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settlement {
    pub paid_amount: Money,
    pub remaining_amount: Money,
}

/// Derives paid/remaining amounts from the chosen payment status.
///
/// `entered` is the amount typed into the partial-payment field; it is
/// ignored for `paid` and `pending`, and treated as zero when absent.
///
/// ## Example
/// ```rust
/// use kairo_core::money::Money;
/// use kairo_core::payment::derive_settlement;
/// use kairo_core::types::PaymentStatus;
///
/// let s = derive_settlement(
///     Money::from_piasters(10_000),
///     PaymentStatus::Partial,
///     Some(Money::from_piasters(4_000)),
/// );
/// assert_eq!(s.paid_amount.piasters(), 4_000);
/// assert_eq!(s.remaining_amount.piasters(), 6_000);
/// ```
pub fn derive_settlement(
    total: Money,
    status: PaymentStatus,
    entered: Option<Money>,
) -> Settlement {
    match status {
        PaymentStatus::Paid => Settlement {
            paid_amount: total,
            remaining_amount: Money::zero(),
        },
        PaymentStatus::Partial => {
            let entered = entered.unwrap_or_else(Money::zero);
            if entered >= total {
                Settlement {
                    paid_amount: total,
                    remaining_amount: Money::zero(),
                }
            } else {
                Settlement {
                    paid_amount: entered,
                    remaining_amount: total - entered,
                }
            }
        }
        PaymentStatus::Pending => Settlement {
            paid_amount: Money::zero(),
            remaining_amount: total,
        },
    }
}

// =============================================================================
// Partial Settlement (deferred payments)
// =============================================================================

/// Result of applying a partial payment to an outstanding invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartialPayment {
    pub paid_amount: Money,
    pub remaining_amount: Money,
    pub status: PaymentStatus,
}

/// Applies a partial payment against an outstanding balance.
///
/// ## Boundaries
/// - amount ≤ 0 → rejected
/// - amount > remaining → rejected
/// - amount == remaining → accepted; status becomes `paid`
///
/// The new remainder is recomputed as `total − new_paid`, not by
/// subtracting from the old remainder, so the two fields cannot drift
/// apart.
pub fn apply_partial_payment(
    total: Money,
    paid_so_far: Money,
    remaining: Money,
    amount: Money,
) -> CoreResult<PartialPayment> {
    if !amount.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "payment amount",
        }
        .into());
    }

    if amount > remaining {
        return Err(CoreError::PaymentExceedsRemaining { amount, remaining });
    }

    let paid_amount = paid_so_far + amount;
    let remaining_amount = total - paid_amount;
    let status = if remaining_amount.is_zero() {
        PaymentStatus::Paid
    } else {
        PaymentStatus::Partial
    };

    Ok(PartialPayment {
        paid_amount,
        remaining_amount,
        status,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
