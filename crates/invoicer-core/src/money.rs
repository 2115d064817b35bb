//! # Money Module
//!
//! Provides the `Money` type for Rupee amounts held as whole paise, and the
//! `IntoAmount` boundary that turns loosely-typed form input into them.
//!
//! ## Why Integer Paise?
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE FLOATING POINT PROBLEM                                             │
//! │                                                                         │
//! │  In binary floating point:                                              │
//! │    1.005 * 100 = 100.49999999999999   → rounds to 100 paise  ❌         │
//! │                                                                         │
//! │  OUR SOLUTION: Decimal in, integer paise out                            │
//! │    "1.005" → Decimal 1.005 → round half away from zero → 101 paise     │
//! │    Every later sum and comparison is exact i64 arithmetic              │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoicer_core::money::Money;
//!
//! let rate = Money::from_paise(1_250);          // ₹12.50
//! let total = rate + Money::from_paise(50);     // ₹13.00
//! assert_eq!(total.format_inr(), "13.00");
//!
//! // Form input goes through coercion (blank / invalid → zero)
//! assert_eq!(Money::coerce("1234.5").paise(), 123_450);
//! assert_eq!(Money::coerce("oops").paise(), 0);
//! ```

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign, Sub, SubAssign};
use ts_rs::TS;

// =============================================================================
// Amount Coercion
// =============================================================================

/// Anything that can be read as an amount of Rupees.
///
/// ## Coerce-or-Default Policy
/// `to_amount` returns `None` for values that are not numbers. Callers that
/// need a total function ([`Money::coerce`]) map `None` to zero; callers
/// that want to report bad input (the CLI) can look at the `None` first.
///
/// ```text
/// ┌──────────────────────────┬──────────────────────────────┐
/// │ Input                    │ to_amount()                  │
/// ├──────────────────────────┼──────────────────────────────┤
/// │ 45, 45u64, dec!(45)      │ Some(45)                     │
/// │ 0.5f64                   │ Some(0.5)                    │
/// │ f64::NAN, f64::INFINITY  │ None                         │
/// │ "  12.5 ", "1e3"         │ Some(12.5), Some(1000)       │
/// │ "" (blank form field)    │ Some(0)                      │
/// │ "abc"                    │ None                         │
/// │ None::<T>                │ None                         │
/// │ JSON null / true / false │ Some(0) / Some(1) / Some(0)  │
/// │ JSON array / object      │ None                         │
/// └──────────────────────────┴──────────────────────────────┘
/// ```
pub trait IntoAmount {
    /// Returns the value in Rupees, or `None` when it is not a number.
    fn to_amount(&self) -> Option<Decimal>;
}

impl<T: IntoAmount + ?Sized> IntoAmount for &T {
    fn to_amount(&self) -> Option<Decimal> {
        (**self).to_amount()
    }
}

impl IntoAmount for Decimal {
    fn to_amount(&self) -> Option<Decimal> {
        Some(*self)
    }
}

impl IntoAmount for Money {
    fn to_amount(&self) -> Option<Decimal> {
        Some(self.to_decimal())
    }
}

macro_rules! impl_into_amount_int {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn to_amount(&self) -> Option<Decimal> {
                    Some(Decimal::from(*self))
                }
            }
        )*
    };
}

impl_into_amount_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

// Floats go through their shortest round-trip text ("12.345", not
// 12.3449999999999997513...) so rounding happens on the value the user typed.
macro_rules! impl_into_amount_float {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn to_amount(&self) -> Option<Decimal> {
                    if !self.is_finite() {
                        return None;
                    }
                    self.to_string().parse::<Decimal>().ok()
                }
            }
        )*
    };
}

impl_into_amount_float!(f32, f64);

impl IntoAmount for str {
    fn to_amount(&self) -> Option<Decimal> {
        let s = self.trim();
        if s.is_empty() {
            return Some(Decimal::ZERO);
        }

        s.parse::<Decimal>()
            .ok()
            .or_else(|| Decimal::from_scientific(s).ok())
    }
}

impl IntoAmount for String {
    fn to_amount(&self) -> Option<Decimal> {
        self.as_str().to_amount()
    }
}

impl<T: IntoAmount> IntoAmount for Option<T> {
    fn to_amount(&self) -> Option<Decimal> {
        self.as_ref().and_then(|value| value.to_amount())
    }
}

impl IntoAmount for serde_json::Value {
    fn to_amount(&self) -> Option<Decimal> {
        use serde_json::Value;

        match self {
            Value::Null => Some(Decimal::ZERO),
            Value::Bool(flag) => Some(if *flag { Decimal::ONE } else { Decimal::ZERO }),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Some(Decimal::from(i))
                } else if let Some(u) = n.as_u64() {
                    Some(Decimal::from(u))
                } else {
                    n.as_f64().and_then(|f| f.to_amount())
                }
            }
            Value::String(s) => s.to_amount(),
            Value::Array(_) | Value::Object(_) => None,
        }
    }
}

/// Parses a numeric form field, treating anything unparseable as zero.
///
/// ## Example
/// ```rust
/// use invoicer_core::money::parse_lenient;
/// use rust_decimal::Decimal;
///
/// assert_eq!(parse_lenient("2.5").to_string(), "2.5");
/// assert_eq!(parse_lenient(""), Decimal::ZERO);
/// assert_eq!(parse_lenient("two"), Decimal::ZERO);
/// ```
pub fn parse_lenient(input: &str) -> Decimal {
    input.to_amount().unwrap_or(Decimal::ZERO)
}

// =============================================================================
// Money Type
// =============================================================================

/// A Rupee amount in paise (1 Rupee = 100 paise).
///
/// ## Design Decisions
/// - **i64 (signed)**: Differences of two amounts can go negative
/// - **Single field tuple struct**: Zero-cost abstraction over i64
/// - **Serialized as paise**: `{"amountPaise": 12345}` never loses precision
///
/// ## Where Money Flows
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  LineItem.quantity × LineItem.rate ──► LineItem.amount (rounded)       │
/// │                                              │                          │
/// │                                              ▼                          │
/// │                                  BillTotals.total_amount                │
/// │                                     │                   │               │
/// │                                     ▼                   ▼               │
/// │                         "₹ 1,23,456.00" (table)   "INR One Lakh ..."   │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Money(i64);

impl Money {
    /// Creates a Money value from paise.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Money;
    ///
    /// let rate = Money::from_paise(1099); // ₹10.99
    /// assert_eq!(rate.paise(), 1099);
    /// ```
    #[inline]
    pub const fn from_paise(paise: i64) -> Self {
        Money(paise)
    }

    /// Creates a Money value from Rupees and paise.
    ///
    /// For negative amounts only the Rupee part carries the sign:
    /// `from_rupees_paise(-5, 50)` is -₹5.50.
    #[inline]
    pub const fn from_rupees_paise(rupees: i64, paise: i64) -> Self {
        if rupees < 0 {
            Money(rupees * 100 - paise)
        } else {
            Money(rupees * 100 + paise)
        }
    }

    /// Rounds a decimal Rupee amount to whole paise, half away from zero.
    ///
    /// Returns `None` when the result does not fit in an `i64` of paise.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let amount = Decimal::from_str("12.345").unwrap();
    /// assert_eq!(Money::from_decimal(amount).unwrap().paise(), 1235);
    /// ```
    pub fn from_decimal(rupees: Decimal) -> Option<Self> {
        rupees
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
            .checked_mul(Decimal::ONE_HUNDRED)?
            .to_i64()
            .map(Money)
    }

    /// Reads any number-like value, treating invalid input as zero.
    #[inline]
    pub fn coerce<A: IntoAmount>(amount: A) -> Self {
        amount
            .to_amount()
            .and_then(Money::from_decimal)
            .unwrap_or_default()
    }

    /// `quantity × rate`, rounded to paise.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Money;
    /// use rust_decimal::Decimal;
    /// use std::str::FromStr;
    ///
    /// let qty = Decimal::from_str("2.5").unwrap();
    /// let rate = Decimal::from_str("10.01").unwrap();
    /// // 25.025 → 25.03
    /// assert_eq!(Money::from_quantity_rate(qty, rate).unwrap().paise(), 2503);
    /// ```
    pub fn from_quantity_rate(quantity: Decimal, rate: Decimal) -> Option<Self> {
        quantity.checked_mul(rate).and_then(Money::from_decimal)
    }

    /// This amount times `quantity`, rounded to paise. Saturates to zero on
    /// overflow, matching [`Money::coerce`].
    pub fn multiply_quantity(&self, quantity: Decimal) -> Self {
        Money::from_quantity_rate(quantity, self.to_decimal()).unwrap_or_default()
    }

    /// Returns the value in paise.
    #[inline]
    pub const fn paise(&self) -> i64 {
        self.0
    }

    /// Returns the whole-Rupee portion (truncated toward zero).
    #[inline]
    pub const fn rupees(&self) -> i64 {
        self.0 / 100
    }

    /// Returns the paise portion (always 0-99).
    #[inline]
    pub const fn paise_part(&self) -> i64 {
        (self.0 % 100).abs()
    }

    /// Returns the amount as a two-decimal Rupee value.
    #[inline]
    pub fn to_decimal(&self) -> Decimal {
        Decimal::new(self.0, 2)
    }

    #[inline]
    pub const fn zero() -> Self {
        Money(0)
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    #[inline]
    pub const fn is_negative(&self) -> bool {
        self.0 < 0
    }

    /// Returns the absolute value, saturating at `i64::MAX` paise.
    #[inline]
    pub const fn abs(&self) -> Self {
        Money(self.0.saturating_abs())
    }

    /// Sum of two amounts, or `None` on overflow.
    #[inline]
    pub fn checked_add(self, other: Money) -> Option<Money> {
        self.0.checked_add(other.0).map(Money)
    }

    /// Formats with Indian digit grouping and exactly two decimals.
    ///
    /// ## Indian Grouping
    /// The last three digits form one group, every group above that has two:
    /// `12,34,56,789.00` rather than `1,234,56,789.00`.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::money::Money;
    ///
    /// assert_eq!(Money::from_paise(123_456_789_0).format_inr(), "1,23,45,678.90");
    /// assert_eq!(Money::from_paise(99).format_inr(), "0.99");
    /// assert_eq!(Money::from_paise(-100_000_00).format_inr(), "-1,00,000.00");
    /// ```
    pub fn format_inr(&self) -> String {
        let total = self.0.unsigned_abs();
        let rupees = (total / 100).to_string();
        let paise = total % 100;

        format!(
            "{}{}.{:02}",
            if self.0 < 0 { "-" } else { "" },
            group_indian(&rupees),
            paise
        )
    }

    /// Returns the "INR ... Only" phrase for this amount.
    #[inline]
    pub fn to_words(&self) -> String {
        crate::words::money_to_words(*self)
    }
}

/// Inserts Indian thousands separators into a plain digit string.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut out = String::with_capacity(digits.len() + digits.len() / 2);
    for (i, ch) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out.push(',');
    out.push_str(tail);
    out
}

// =============================================================================
// Trait Implementations
// =============================================================================

/// `₹1,23,456.78`, sign first for negative amounts.
impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let formatted = self.format_inr();
        match formatted.strip_prefix('-') {
            Some(positive) => write!(f, "-₹{}", positive),
            None => write!(f, "₹{}", formatted),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Money::zero()
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
    fn test_from_paise() {
        let money = Money::from_paise(1099);
        assert_eq!(money.paise(), 1099);
        assert_eq!(money.rupees(), 10);
        assert_eq!(money.paise_part(), 99);
    }

    #[test]
    fn test_from_rupees_paise() {
        assert_eq!(Money::from_rupees_paise(10, 99).paise(), 1099);
        assert_eq!(Money::from_rupees_paise(-5, 50).paise(), -550);
    }

    #[test]
    fn test_from_decimal_rounding() {
        assert_eq!(Money::from_decimal(dec!(12.345)), Some(Money::from_paise(1235)));
        assert_eq!(Money::from_decimal(dec!(12.344)), Some(Money::from_paise(1234)));
        assert_eq!(Money::from_decimal(dec!(1.005)), Some(Money::from_paise(101)));
        assert_eq!(Money::from_decimal(dec!(-1.005)), Some(Money::from_paise(-101)));
        assert_eq!(Money::from_decimal(dec!(0)), Some(Money::zero()));
    }

    #[test]
    fn test_checked_add() {
        let big = Money::from_paise(i64::MAX - 1);
        assert_eq!(big.checked_add(Money::from_paise(1)), Some(Money::from_paise(i64::MAX)));
        assert_eq!(big.checked_add(Money::from_paise(2)), None);
    }

    #[test]
    fn test_multiply_quantity() {
        let rate = Money::from_paise(1001);
        assert_eq!(rate.multiply_quantity(dec!(2.5)).paise(), 2503);
        assert_eq!(rate.multiply_quantity(Decimal::ZERO), Money::zero());
    }

    #[test]
    fn test_from_decimal_overflow() {
        assert_eq!(Money::from_decimal(Decimal::MAX), None);
        assert_eq!(Money::from_decimal(dec!(100000000000000000000)), None);
    }

    #[test]
    fn test_coerce() {
        assert_eq!(Money::coerce(12.5).paise(), 1250);
        assert_eq!(Money::coerce(7u32).paise(), 700);
        assert_eq!(Money::coerce("  3.10 ").paise(), 310);
        assert_eq!(Money::coerce("").paise(), 0);
        assert_eq!(Money::coerce("12abc").paise(), 0);
        assert_eq!(Money::coerce(f64::NAN).paise(), 0);
        assert_eq!(Money::coerce(Some("4")).paise(), 400);
        assert_eq!(Money::coerce(None::<f64>).paise(), 0);
        assert_eq!(Money::coerce(Money::from_paise(42)).paise(), 42);
    }

    #[test]
    fn test_to_amount_distinguishes_invalid() {
        assert_eq!("abc".to_amount(), None);
        assert_eq!("".to_amount(), Some(Decimal::ZERO));
        assert_eq!(f64::INFINITY.to_amount(), None);
        assert_eq!(serde_json::json!(true).to_amount(), Some(Decimal::ONE));
        assert_eq!(serde_json::json!([1]).to_amount(), None);
    }

    #[test]
    fn test_from_quantity_rate() {
        assert_eq!(
            Money::from_quantity_rate(dec!(3), dec!(2.99)),
            Some(Money::from_paise(897))
        );
        assert_eq!(
            Money::from_quantity_rate(dec!(0.333), dec!(10)),
            Some(Money::from_paise(333))
        );
        assert_eq!(Money::from_quantity_rate(Decimal::MAX, dec!(2)), None);
    }

    #[test]
    fn test_format_inr() {
        assert_eq!(Money::from_paise(0).format_inr(), "0.00");
        assert_eq!(Money::from_paise(5).format_inr(), "0.05");
        assert_eq!(Money::from_paise(99_900).format_inr(), "999.00");
        assert_eq!(Money::from_paise(100_000).format_inr(), "1,000.00");
        assert_eq!(Money::from_paise(1_234_567).format_inr(), "12,345.67");
        assert_eq!(Money::from_paise(12_345_678).format_inr(), "1,23,456.78");
        assert_eq!(Money::from_paise(1_000_000_000).format_inr(), "1,00,00,000.00");
        assert_eq!(Money::from_paise(-12_345_678).format_inr(), "-1,23,456.78");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Money::from_paise(12_345_678)), "₹1,23,456.78");
        assert_eq!(format!("{}", Money::from_paise(-550)), "-₹5.50");
        assert_eq!(format!("{}", Money::zero()), "₹0.00");
    }

    #[test]
    fn test_arithmetic_and_sum() {
        let a = Money::from_paise(1000);
        let b = Money::from_paise(500);
        assert_eq!((a + b).paise(), 1500);
        assert_eq!((a - b).paise(), 500);

        let mut c = a;
        c += b;
        c -= Money::from_paise(100);
        assert_eq!(c.paise(), 1400);

        let items = [a, b, Money::from_paise(1)];
        let total: Money = items.iter().sum();
        assert_eq!(total.paise(), 1501);
    }

    #[test]
    fn test_abs_saturates() {
        assert_eq!(Money::from_paise(-550).abs().paise(), 550);
        assert_eq!(Money::from_paise(i64::MIN).abs().paise(), i64::MAX);
    }
}
