//! # Money Module
//!
//! Provides the `Money` type for handling monetary values.
//!
//! ## Why Decimal, Not Cents?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  GST APPORTIONMENT NEEDS FRACTIONS                                      │
//! │                                                                         │
//! │  A ₹10 flat discount on a ₹30 cart with three ₹10 lines:               │
//! │    each line's share = 10 × (10 / 30) = 3.333…                          │
//! │                                                                         │
//! │  Integer paise would round every share and drift the tax.               │
//! │  Binary floats would give 0.30000000000000004-style noise.              │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal in whole rupees                          │
//! │    • intermediate values keep full precision                            │
//! │    • only the payable total is rounded (round half up)                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quickbill_core::money::Money;
//!
//! let price = Money::from_major(50);   // ₹50
//! let line = price * 2;                // ₹100
//! let payable = (line + Money::from_minor(432)).round_half_up();
//! assert_eq!(payable, Money::from_major(104));
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;

use crate::error::ValidationError;
use crate::types::TaxRate;
use crate::CURRENCY_SYMBOL;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value in whole currency units (rupees), held as a `Decimal`.
///
/// ## Design Decisions
/// - **Signed**: a flat discount larger than the subtotal yields a negative
///   payable amount; profit can be negative.
/// - **Numeric JSON**: serializes as a JSON number (`40`, `94.32`) and
///   accepts numbers or decimal strings.
/// - **Saturating**: arithmetic clamps at `Decimal::MAX`/`Decimal::MIN`
///   instead of panicking, so absurd inputs still produce a bill.
/// - **No implicit rounding**: arithmetic is exact; call
///   [`Money::round_half_up`] when settling the payable total.
///
/// ## Where Money is Used
/// ```text
/// Product.selling_price ──► CartItem.line_total ──► Totals.sub_total
///                                                        │
///                       Discount ──► discount share ─────┤
///                                                        ▼
///                        GST per line ──► Totals.tax_amount ──► final_amount
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Money(#[serde(with = "rust_decimal::serde::float")] Decimal);

impl Money {
    /// Creates a Money value from an exact decimal amount.
    #[inline]
    pub const fn from_decimal(amount: Decimal) -> Self {
        Money(amount)
    }

    /// Creates a Money value from whole currency units.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// let price = Money::from_major(180);
    /// assert_eq!(price.to_string(), "₹180.00");
    /// ```
    #[inline]
    pub fn from_major(units: i64) -> Self {
        Money(Decimal::from(units))
    }

    /// Creates a Money value from minor units (paise).
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// let tax = Money::from_minor(432); // ₹4.32
    /// assert_eq!(tax.to_string(), "₹4.32");
    /// ```
    #[inline]
    pub fn from_minor(paise: i64) -> Self {
        Money(Decimal::new(paise, 2))
    }

    /// Returns the exact decimal amount.
    #[inline]
    pub const fn amount(&self) -> Decimal {
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

    /// Checks if the value is positive (greater than zero).
    #[inline]
    pub fn is_positive(&self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Checks if the value is negative (less than zero).
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0 < Decimal::ZERO
    }

    /// Returns the absolute value.
    #[inline]
    pub fn abs(&self) -> Self {
        Money(self.0.abs())
    }

    /// Floors the value at zero: `max(0, self)`.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    ///
    /// let over_discounted = Money::from_major(100) - Money::from_major(120);
    /// assert_eq!(over_discounted.clamp_non_negative(), Money::zero());
    /// ```
    #[inline]
    pub fn clamp_non_negative(self) -> Self {
        if self.is_negative() {
            Money::zero()
        } else {
            self
        }
    }

    /// Rounds to the nearest whole currency unit, halves rounding up.
    ///
    /// ## Rounding Rule
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────┐
    /// │  ROUND HALF UP (toward +∞), computed as floor(x + 0.5)              │
    /// │                                                                     │
    /// │     94.32 → 94      94.5 → 95      94.99 → 95                       │
    /// │     -2.4 → -2       -2.5 → -2      -2.6 → -3                        │
    /// │                                                                     │
    /// │  Only the payable total is rounded. Subtotal, discount, tax and     │
    /// │  profit keep full precision.                                        │
    /// └─────────────────────────────────────────────────────────────────────┘
    /// ```
    pub fn round_half_up(&self) -> Money {
        Money(self.0.saturating_add(Decimal::new(5, 1)).floor())
    }

    /// Returns `pct` percent of this amount, without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let subtotal = Money::from_major(100);
    /// assert_eq!(subtotal.percent_of(Decimal::from(10)), Money::from_major(10));
    /// ```
    pub fn percent_of(&self, pct: Decimal) -> Money {
        Money((pct / Decimal::ONE_HUNDRED).saturating_mul(self.0))
    }

    /// Calculates GST on this amount at the given rate, without rounding.
    ///
    /// ## Example
    /// ```rust
    /// use quickbill_core::money::Money;
    /// use quickbill_core::types::TaxRate;
    ///
    /// let taxable = Money::from_major(36);
    /// let tax = taxable.calculate_tax(TaxRate::from_percent(12));
    /// assert_eq!(tax, Money::from_minor(432));
    /// ```
    pub fn calculate_tax(&self, rate: TaxRate) -> Money {
        Money(self.0.saturating_mul(rate.fraction()))
    }

    /// Multiplies money by a quantity.
    #[inline]
    pub fn multiply_quantity(&self, qty: i64) -> Self {
        Money(self.0.saturating_mul(Decimal::from(qty)))
    }

    /// Returns this amount's share of `total` (0 when `total` is zero).
    ///
    /// Used for pro-rata apportionment of a transaction-level discount.
    pub fn ratio_of(&self, total: Money) -> Decimal {
        if total.is_zero() {
            Decimal::ZERO
        } else {
            self.0 / total.0
        }
    }

    /// Scales the amount by an exact factor.
    #[inline]
    pub fn scale(&self, factor: Decimal) -> Money {
        Money(self.0.saturating_mul(factor))
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Renders as `₹1234.50` (two decimals, no grouping).
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.is_negative() { "-" } else { "" };
        let shown = self
            .0
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        write!(f, "{}{}{:.2}", sign, CURRENCY_SYMBOL, shown)
    }
}

/// Parses a plain decimal amount such as `"94.50"` (no currency symbol).
impl FromStr for Money {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Decimal::from_str(s.trim())
            .map(Money)
            .map_err(|e| ValidationError::InvalidFormat {
                field: "amount".to_string(),
                reason: e.to_string(),
            })
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
        Money(self.0.saturating_add(other.0))
    }
}

impl AddAssign for Money {
    #[inline]
    fn add_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_add(other.0);
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
    }
}

impl SubAssign for Money {
    #[inline]
    fn sub_assign(&mut self, other: Self) {
        self.0 = self.0.saturating_sub(other.0);
    }
}

impl Neg for Money {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Money(-self.0)
    }
}

/// Multiplication by a quantity.
impl Mul<i64> for Money {
    type Output = Self;

    #[inline]
    fn mul(self, qty: i64) -> Self {
        self.multiply_quantity(qty)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::zero(), Add::add)
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

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_constructors() {
        assert_eq!(Money::from_major(10).amount(), dec!(10));
        assert_eq!(Money::from_minor(1099).amount(), dec!(10.99));
        assert_eq!(Money::from_decimal(dec!(4.32)), Money::from_minor(432));
    }

    #[test]
    fn test_display() {
        assert_eq!(Money::from_minor(1099).to_string(), "₹10.99");
        assert_eq!(Money::from_major(5).to_string(), "₹5.00");
        assert_eq!(Money::from_minor(-550).to_string(), "-₹5.50");
        assert_eq!(Money::zero().to_string(), "₹0.00");
    }

    #[test]
    fn test_arithmetic() {
        let a = Money::from_major(10);
        let b = Money::from_major(5);

        assert_eq!(a + b, Money::from_major(15));
        assert_eq!(a - b, Money::from_major(5));
        assert_eq!(a * 3, Money::from_major(30));
        assert_eq!(-a, Money::from_major(-10));

        let total: Money = [a, b, b].iter().sum();
        assert_eq!(total, Money::from_major(20));
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(Money::from_decimal(dec!(94.32)).round_half_up(), Money::from_major(94));
        assert_eq!(Money::from_decimal(dec!(94.5)).round_half_up(), Money::from_major(95));
        assert_eq!(Money::from_decimal(dec!(94.49999)).round_half_up(), Money::from_major(94));
        assert_eq!(Money::from_decimal(dec!(2.5)).round_half_up(), Money::from_major(3));
        // Negative halves go toward +infinity.
        assert_eq!(Money::from_decimal(dec!(-2.5)).round_half_up(), Money::from_major(-2));
        assert_eq!(Money::from_decimal(dec!(-2.6)).round_half_up(), Money::from_major(-3));
    }

    #[test]
    fn test_clamp_non_negative() {
        assert_eq!(Money::from_major(-20).clamp_non_negative(), Money::zero());
        assert_eq!(Money::from_major(20).clamp_non_negative(), Money::from_major(20));
    }

    #[test]
    fn test_tax_and_percent() {
        let taxable = Money::from_major(90);
        assert_eq!(taxable.calculate_tax(TaxRate::from_percent(5)), Money::from_decimal(dec!(4.5)));
        assert_eq!(Money::from_major(250).percent_of(dec!(12.5)), Money::from_decimal(dec!(31.25)));
    }

    #[test]
    fn test_ratio_of_zero_total() {
        assert_eq!(Money::from_major(10).ratio_of(Money::zero()), Decimal::ZERO);
        assert_eq!(Money::from_major(60).ratio_of(Money::from_major(100)), dec!(0.6));
    }

    #[test]
    fn test_parse() {
        assert_eq!("94.50".parse::<Money>().unwrap(), Money::from_minor(9450));
        assert!("ninety".parse::<Money>().is_err());
    }

    #[test]
    fn test_saturates_instead_of_overflowing() {
        let huge = Money::from_decimal(Decimal::MAX);
        assert_eq!(huge + huge, huge);
        assert_eq!(-huge - huge, Money::from_decimal(Decimal::MIN));
        assert_eq!(huge.percent_of(dec!(1000000000000000000000000000)), huge);
        assert_eq!(huge * 3, huge);
    }

    #[test]
    fn test_json_is_numeric() {
        let json = serde_json::to_string(&Money::from_minor(9432)).unwrap();
        assert_eq!(json, "94.32");

        let from_number: Money = serde_json::from_str("40").unwrap();
        let from_string: Money = serde_json::from_str("\"40\"").unwrap();
        assert_eq!(from_number, Money::from_major(40));
        assert_eq!(from_string, Money::from_major(40));
    }

    #[test]
    fn test_zero_and_checks() {
        assert!(Money::zero().is_zero());
        assert!(Money::from_major(1).is_positive());
        assert!(Money::from_major(-1).is_negative());
        assert_eq!(Money::from_major(-7).abs(), Money::from_major(7));
    }
}
