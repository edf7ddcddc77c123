//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Integer Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                     │
//! │                                                                 │
//! │  In JavaScript/floating point:                                  │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                   │
//! │                                                                 │
//! │  OUR SOLUTION: Integer Piasters (1/100 EGP)                     │
//! │    12.50 EGP is stored as 1250                                  │
//! │    All totals, paid amounts and remainders stay exact           │
//! │                                                                 │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use kairo_core::money::Money;
//!
//! // Create from piasters (preferred)
//! let price = Money::from_piasters(1250); // 12.50 EGP
//!
//! // Arithmetic operations
//! let line_total = price * 3;                       // 37.50 EGP
//! let with_fee = price + Money::from_piasters(500); // 17.50 EGP
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

// =============================================================================
// Money Type
// =============================================================================

/// Represents a monetary value in piasters (the smallest EGP unit).
///
/// ## Design Decisions
/// - **i64 (signed)**: remainders can go negative (overpaid credit items)
/// - **Single field tuple struct**: zero-cost abstraction over i64
/// - **Serde**: serializes as a plain JSON number, so persisted records
///   stay flat
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from piasters (the smallest currency unit).
    ///
    /// ## Example
    /// ```rust
    /// use kairo_core::money::Money;
    ///
    /// let price = Money::from_piasters(1250); // 12.50 EGP
    /// assert_eq!(price.piasters(), 1250);
    /// ```
    #[inline]
    pub const fn from_piasters(piasters: i64) -> Self {
        Money(piasters)
    }

    /// Creates a Money value from pounds and piasters.
    ///
    /// ## Example
    /// ```rust
    /// use kairo_core::money::Money;
    ///
    /// let price = Money::from_pounds_piasters(12, 50); // 12.50 EGP
    /// assert_eq!(price.piasters(), 1250);
    ///
    /// let refund = Money::from_pounds_piasters(-5, 50); // -5.50 EGP
    /// assert_eq!(refund.piasters(), -550);
    /// ```
    ///
    /// ## Note
    /// For negative amounts, only the pounds part should be negative.
    #[inline]
    pub const fn from_pounds_piasters(pounds: i64, piasters: i64) -> Self {
        if pounds < 0 {
            Money(pounds * 100 - piasters)
        } else {
            Money(pounds * 100 + piasters)
        }
    }

    /// Returns the value in piasters (smallest currency unit).
    #[inline]
    pub const fn piasters(&self) -> i64 {
        self.0
    }

    /// Returns the whole-pound portion.
    #[inline]
    pub const fn pounds(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the piaster portion (always 0-99).
    #[inline]
    pub const fn piasters_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    /// Checks if the value is zero.
    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.0 > 0
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use kairo_core::money::Money;
    ///
    /// let unit_price = Money::from_piasters(299); // 2.99 EGP
    /// let line_total = unit_price.multiply_quantity(3);
    /// assert_eq!(line_total.piasters(), 897); // 8.97 EGP
    /// ```
    #[inline]
    pub const fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Display implementation shows money in a human-readable format.
///
/// ## Note
/// This is for logs and debugging. Presentation-layer formatting
/// (localization) is out of scope here.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.0 < 0 { "-" } else { "" };
        write!(
            f,
            "{}{}.{:02} EGP",
            sign,
            self.pounds().abs(),
            self.piasters_part()
        )
    }
}

/// Default money is zero.
impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

/// Addition of two Money values.
impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

/// Addition assignment (+=).
impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

/// Subtraction of two Money values.
impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

/// Subtraction assignment (-=).
impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by i64 (for quantity calculations).
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        Money(self.0 * qty)
    }
}

/// Summation over iterators of Money (transaction totals).
impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
