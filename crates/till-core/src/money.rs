//! # Money Module
//!
//! Provides the `Money` type for handling monetary values safely.
//!
//! ## Why Exact Decimals?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 decimals (rust_decimal)                          │
//! │    0.1 + 0.2 = 0.3 exactly                                              │
//! │    Totals keep every digit the cashier typed                            │
//! │    Rounding to cents happens ONLY when a value is displayed             │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::money::Money;
//!
//! let apple = Money::from_cents(100);  // $1.00
//! let banana = Money::from_cents(50);  // $0.50
//!
//! let total = apple * 2 + banana;
//! assert_eq!(total.to_fixed(), "2.50");
//! assert_eq!(total.to_string(), "$2.50");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

/// Number of decimal places shown to the cashier.
pub const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in the single store currency.
///
/// ## Design Decisions
/// - **Decimal, not float**: arithmetic is exact in base 10
/// - **Unrounded internally**: `1.005 * 3` stays `3.015` until displayed
/// - **Signed**: shortfalls are computed as `total - cash` and may be
///   inspected before the sign is checked
///
/// ## Where Money is Used
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  Product.price ──► CartLine.line_total ──► Cart.total                  │
/// │                                                 │                       │
/// │                     cash given ─────────────────┤                       │
/// │                                                 ▼                       │
/// │                                   change  or  shortfall                 │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(Decimal);

impl Money {
    /// Creates a Money value from cents.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let price = Money::from_cents(1099);
    /// assert_eq!(price.to_fixed(), "10.99");
    /// ```
    #[inline]
    pub fn from_cents(cents: i64) -> Self {
        Money(Decimal::new(cents, DISPLAY_DECIMALS))
    }

    /// Wraps an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Returns the exact, unrounded amount.
    #[inline]
    pub const fn decimal(&self) -> Decimal {
        self.0
    }

    /// Returns zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Checks if the value is greater than zero.
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is less than zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Multiplies money by a quantity.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// let unit_price = Money::from_cents(299);
    /// assert_eq!(unit_price.multiply_quantity(3).to_fixed(), "8.97");
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, qty: u32) -> Self {
        Money(self.0 * Decimal::from(qty))
    }

    /// Rounds to whole cents, half away from zero.
    ///
    /// This matches fixed-point display: `0.125` shows as `0.13`.
    /// Only use the result for display; keep computing with the exact value.
    pub fn rounded(&self) -> Self {
        let mut cents = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        cents.rescale(DISPLAY_DECIMALS);
        Money(cents)
    }

    /// Rounds to whole cents, away from zero.
    ///
    /// For amounts the customer still owes: `0.001` becomes `0.01`, never `0.00`.
    pub fn rounded_up(&self) -> Self {
        let mut cents = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::AwayFromZero);
        cents.rescale(DISPLAY_DECIMALS);
        Money(cents)
    }

    /// Renders the amount with exactly two decimals and no symbol.
    ///
    /// ## Example
    /// ```rust
    /// use till_core::money::Money;
    ///
    /// assert_eq!(Money::from_cents(250).to_fixed(), "2.50");
    /// assert_eq!(Money::zero().to_fixed(), "0.00");
    /// ```
    pub fn to_fixed(&self) -> String {
        let rounded = self.rounded();
        if rounded.is_negative() {
            format!("-{}", rounded.0.abs())
        } else {
            rounded.0.abs().to_string()
        }
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows money as `$2.50` / `-$0.50`, rounded to cents.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rounded = self.rounded();
        let sign = if rounded.is_negative() { "-" } else { "" };
        write!(f, "{}${}", sign, rounded.0.abs())
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
    }
}

impl From<Decimal> for Money {
    fn from(amount: Decimal) -> Self {
        Money(amount)
    }
}

impl Add for Money {
    type Output = Self;

    #[inline]
    fn add(self, other: Self) -> Self {
        Money(self.0 + other.0)
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 += other.0;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0 - other.0)
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 -= other.0;
    }
}

/// Multiplication by a cart quantity.
impl Mul<u32> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: u32) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), |acc, m| acc + m)
    }
}

impl<'a> Sum<&'a Money> for Money {
    fn sum<I: Iterator<Item = &'a Money>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
