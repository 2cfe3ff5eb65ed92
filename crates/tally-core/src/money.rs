//! # Money Module
//!
//! Provides the `Money` and `Percent` types for handling estimate figures.
//!
//! ## Why Decimal Money?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    0.1 + 0.2 = 0.30000000000000004  ❌ WRONG!                           │
//! │                                                                         │
//! │  Estimates multiply fractional quantities, rates and percentages, so    │
//! │  integer cents would have to round after every step.                    │
//! │                                                                         │
//! │  OUR SOLUTION: base-10 Decimal at full precision                        │
//! │    2 × 35000 × 0.95 = 66500 exactly                                     │
//! │    Rounding to 2 places happens ONLY when a figure is displayed         │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use rust_decimal::Decimal;
//! use tally_core::money::{Money, Percent};
//!
//! let rate = Money::from_input("35000");
//! let amount = rate.multiply_quantity(Decimal::from(2));
//! let discounted = amount.apply_discount(Percent::from_input("5"));
//! assert_eq!(discounted.to_string(), "66500.00");
//! assert_eq!(discounted.format_with("₹"), "₹66500.00");
//! ```

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub};
use ts_rs::TS;

use crate::validation::{clamp_amount, parse_numeric_or_zero};

/// Decimal places shown for every monetary figure.
const DISPLAY_DECIMALS: u32 = 2;

// =============================================================================
// Money Type
// =============================================================================

/// A monetary value kept at full decimal precision.
///
/// ## Where Money is Used
/// ```text
/// CatalogItem.price ──► LineItem.rate ──► LineItem.amount
///                                              │
///                       Totals.subtotal ◄──────┘
///                             │
///                             ├──► discount_amount ──► after_discount
///                             │                              │
///                             └──► tax_amount ◄──────────────┘
///                                       │
///                                       ▼
///                                 grand_total ──► "₹70623.00" (display only)
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize, TS,
)]
#[ts(export)]
pub struct Money(#[ts(type = "number")] Decimal);

impl Money {
    /// Zero money value.
    #[inline]
    pub const fn zero() -> Self {
        Money(Decimal::ZERO)
    }

    /// Wraps an exact decimal value.
    #[inline]
    pub const fn from_decimal(value: Decimal) -> Self {
        Money(value)
    }

    /// Parses user input under the lenient policy.
    ///
    /// Garbage becomes zero, negatives become zero and very large values are
    /// clamped to [`crate::MAX_NUMERIC_INPUT`].
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_input("1250.5").to_string(), "1250.50");
    /// assert!(Money::from_input("twelve").is_zero());
    /// assert!(Money::from_input("-40").is_zero());
    /// ```
    pub fn from_input(raw: &str) -> Self {
        Money(clamp_amount(parse_numeric_or_zero(raw)))
    }

    /// Returns the underlying decimal at full precision.
    #[inline]
    pub const fn decimal(&self) -> Decimal {
        self.0
    }

    /// Checks if the value is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }

    /// Multiplies money by a (possibly fractional) quantity.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    /// use rust_decimal::Decimal;
    ///
    /// let rate = Money::from_input("299.99");
    /// assert_eq!(rate.multiply_quantity(Decimal::new(15, 1)).to_string(), "449.99");
    /// ```
    #[inline]
    pub fn multiply_quantity(&self, quantity: Decimal) -> Self {
        Money(self.0 * quantity)
    }

    /// Returns `pct` percent of this amount (no rounding).
    ///
    /// Used for both the discount amount and the tax amount.
    #[inline]
    pub fn percentage_of(&self, pct: Percent) -> Money {
        Money(self.0 * pct.fraction())
    }

    /// Subtracts `pct` percent of this amount.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::{Money, Percent};
    ///
    /// let subtotal = Money::from_input("100");
    /// assert_eq!(subtotal.apply_discount(Percent::from_input("10")).to_string(), "90.00");
    /// ```
    #[inline]
    pub fn apply_discount(&self, pct: Percent) -> Money {
        *self - self.percentage_of(pct)
    }

    /// Rounds to two decimals (half away from zero) for display.
    ///
    /// The result always carries exactly two decimal places so that its
    /// string form is `"66500.00"` rather than `"66500"`.
    pub fn round_for_display(&self) -> Decimal {
        let mut rounded = self
            .0
            .round_dp_with_strategy(DISPLAY_DECIMALS, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(DISPLAY_DECIMALS);
        rounded
    }

    /// Formats as `<symbol><amount fixed to 2 decimals>`.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_input("10773").format_with("₹"), "₹10773.00");
    /// assert_eq!(Money::from_input("0.005").format_with("$"), "$0.01");
    /// ```
    pub fn format_with(&self, symbol: &str) -> String {
        let rounded = self.round_for_display();
        if rounded.is_sign_negative() && !rounded.is_zero() {
            format!("-{}{}", symbol, rounded.abs())
        } else {
            format!("{}{}", symbol, rounded.abs())
        }
    }

    /// Formats with thousands separators, as printed on estimate summaries.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Money;
    ///
    /// assert_eq!(Money::from_input("70623").format_grouped("₹"), "₹70,623.00");
    /// assert_eq!(Money::from_input("1234567.891").format_grouped("$"), "$1,234,567.89");
    /// ```
    pub fn format_grouped(&self, symbol: &str) -> String {
        let rounded = self.round_for_display();
        let digits = rounded.abs().to_string();
        let (whole, frac) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

        let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
        for (i, ch) in whole.chars().enumerate() {
            if i > 0 && (whole.len() - i) % 3 == 0 {
                grouped.push(',');
            }
            grouped.push(ch);
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };
        format!("{}{}{}.{}", sign, symbol, grouped, frac)
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// Shows the amount rounded to two decimals, without a currency symbol.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.round_for_display())
    }
}

// Addition and subtraction saturate at the bounds of `Decimal`.

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
        *self = *self + other;
    }
}

impl Sub for Money {
    type Output = Self;

    #[inline]
    fn sub(self, other: Self) -> Self {
        Money(self.0.saturating_sub(other.0))
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
// Percent Type
// =============================================================================

/// A percentage clamped to `[0, 100]`.
///
/// Used for per-line discounts, the global discount and the global tax.
/// Deserialization clamps as well, so a payload or catalog record can never
/// carry a percentage outside the range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, TS)]
#[ts(export)]
pub struct Percent(#[ts(type = "number")] Decimal);

impl Percent {
    /// Creates a percentage, clamping into `[0, 100]`.
    pub fn new(value: Decimal) -> Self {
        Percent(value.clamp(Decimal::ZERO, Decimal::ONE_HUNDRED))
    }

    /// Creates a percentage from a whole number (for configuration defaults).
    pub fn from_whole(value: u32) -> Self {
        Percent::new(Decimal::from(value))
    }

    /// Parses user input under the lenient policy, then clamps.
    ///
    /// ## Example
    /// ```rust
    /// use tally_core::money::Percent;
    ///
    /// assert_eq!(Percent::from_input("12.5").value().to_string(), "12.5");
    /// assert!(Percent::from_input("abc").is_zero());
    /// assert_eq!(Percent::from_input("250").value().to_string(), "100");
    /// ```
    pub fn from_input(raw: &str) -> Self {
        Percent::new(parse_numeric_or_zero(raw))
    }

    /// Zero percent.
    #[inline]
    pub const fn zero() -> Self {
        Percent(Decimal::ZERO)
    }

    /// Returns the percentage value (e.g. `18` for 18%).
    #[inline]
    pub const fn value(&self) -> Decimal {
        self.0
    }

    /// Returns the percentage as a fraction (e.g. `0.18` for 18%).
    #[inline]
    pub fn fraction(&self) -> Decimal {
        self.0 / Decimal::ONE_HUNDRED
    }

    /// Checks if the percentage is zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0.normalize())
    }
}

impl<'de> Deserialize<'de> for Percent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        <Decimal as Deserialize>::deserialize(deserializer).map(Percent::new)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
