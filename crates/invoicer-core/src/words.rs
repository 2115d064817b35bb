//! # Amount in Words (Indian Numbering System)
//!
//! Converts a Rupee amount into the phrase printed on the
//! "Amount Chargeable (in words)" line of a Bill of Supply.
//!
//! ## Output Grammar
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  paise > 0:   INR <Rupees In Words> and <Paise In Words> Paise Only     │
//! │  paise = 0:   INR <Rupees In Words> Only                                │
//! │                                                                         │
//! │  1234567.89 → INR Twelve Lakh Thirty-Four Thousand Five Hundred         │
//! │               Sixty-Seven and Eighty-Nine Paise Only                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Indian Grouping
//! ```text
//!      1,23,45,678
//!      │ │  │  └──── remainder  (0-999)   no suffix
//!      │ │  └─────── thousand   (0-99)    "Thousand"
//!      │ └────────── lakh       (0-99)    "Lakh"
//!      └──────────── crore      (0-...)   "Crore"
//! ```
//! Groups are peeled off by sequential division/modulo, largest first.
//! Zero-valued groups vanish from the phrase entirely.
//!
//! ## Usage
//! ```rust
//! use invoicer_core::words::amount_to_words_inr;
//!
//! assert_eq!(amount_to_words_inr(45), "INR Forty-Five Only");
//! assert_eq!(amount_to_words_inr("0.50"), "INR Zero and Fifty Paise Only");
//! assert_eq!(amount_to_words_inr("not a number"), "INR Zero Only");
//! ```

use crate::money::{IntoAmount, Money};

// =============================================================================
// Lookup Tables
// =============================================================================

const ONES: [&str; 20] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine", "Ten", "Eleven",
    "Twelve", "Thirteen", "Fourteen", "Fifteen", "Sixteen", "Seventeen", "Eighteen", "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// 1,000
pub const THOUSAND: u64 = 1_000;

/// 1,00,000
pub const LAKH: u64 = 100_000;

/// 1,00,00,000
pub const CRORE: u64 = 10_000_000;

// =============================================================================
// Magnitude Groups
// =============================================================================

/// A rupee integer split into its Indian magnitude groups.
///
/// `lakh` and `thousand` are always below 100 and `remainder` below 1000.
/// `crore` is unbounded: everything at or above one crore lands there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct IndianGroups {
    pub crore: u64,
    pub lakh: u64,
    pub thousand: u64,
    pub remainder: u64,
}

impl IndianGroups {
    /// Splits `n` into crore / lakh / thousand / remainder.
    ///
    /// ## Example
    /// ```rust
    /// use invoicer_core::words::IndianGroups;
    ///
    /// let groups = IndianGroups::decompose(12_34_56_789);
    /// assert_eq!(groups.crore, 12);
    /// assert_eq!(groups.lakh, 34);
    /// assert_eq!(groups.thousand, 56);
    /// assert_eq!(groups.remainder, 789);
    /// ```
    pub const fn decompose(n: u64) -> Self {
        let crore = n / CRORE;
        let n = n % CRORE;
        let lakh = n / LAKH;
        let n = n % LAKH;
        let thousand = n / THOUSAND;
        let remainder = n % THOUSAND;

        IndianGroups {
            crore,
            lakh,
            thousand,
            remainder,
        }
    }

    /// Sums the groups back with their place values.
    pub const fn reconstruct(&self) -> u64 {
        self.crore * CRORE + self.lakh * LAKH + self.thousand * THOUSAND + self.remainder
    }
}

// =============================================================================
// Helpers
// =============================================================================

/// 0-99. Zero renders as the empty string.
fn two_digits_to_words(n: u8) -> String {
    debug_assert!(n < 100);

    match n {
        0 => String::new(),
        1..=19 => ONES[n as usize].to_string(),
        _ => {
            let tens = TENS[(n / 10) as usize];
            match n % 10 {
                0 => tens.to_string(),
                ones => format!("{}-{}", tens, ONES[ones as usize]),
            }
        }
    }
}

/// 0-999. Zero renders as the empty string.
fn three_digits_to_words(n: u16) -> String {
    debug_assert!(n < 1000);

    let hundred = (n / 100) as usize;
    let rest = (n % 100) as u8;

    let mut words = String::new();
    if hundred > 0 {
        words.push_str(ONES[hundred]);
        words.push_str(" Hundred");
    }
    if rest > 0 {
        if !words.is_empty() {
            words.push(' ');
        }
        words.push_str(&two_digits_to_words(rest));
    }
    words
}

/// Renders a whole number of Rupees.
///
/// The crore count is itself rendered with this rule, so amounts of a
/// thousand crore and above read naturally ("One Thousand Crore").
///
/// ## Example
/// ```rust
/// use invoicer_core::words::rupees_to_words;
///
/// assert_eq!(rupees_to_words(0), "Zero");
/// assert_eq!(rupees_to_words(1_00_000), "One Lakh");
/// assert_eq!(rupees_to_words(10_000_000_000), "One Thousand Crore");
/// ```
pub fn rupees_to_words(n: u64) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let groups = IndianGroups::decompose(n);
    let mut parts: Vec<String> = Vec::with_capacity(4);

    if groups.crore > 0 {
        parts.push(format!("{} Crore", rupees_to_words(groups.crore)));
    }
    if groups.lakh > 0 {
        parts.push(format!("{} Lakh", three_digits_to_words(groups.lakh as u16)));
    }
    if groups.thousand > 0 {
        parts.push(format!(
            "{} Thousand",
            three_digits_to_words(groups.thousand as u16)
        ));
    }
    if groups.remainder > 0 {
        parts.push(three_digits_to_words(groups.remainder as u16));
    }

    parts.join(" ")
}

// =============================================================================
// Public Entry Points
// =============================================================================

/// Converts an amount in Rupees to its "INR ... Only" phrase.
///
/// ## Coerce-or-Default
/// The boundary is intentionally total. Anything that is not a number
/// (blank strings, `None`, `NaN`, JSON objects, values too large for
/// paise arithmetic) is treated as zero. Negative amounts are read as
/// their absolute value.
///
/// ## Rounding
/// The amount is rounded to whole paise half away from zero, on the
/// decimal value (12.345 → 1235 paise).
///
/// ## Example
/// ```rust
/// use invoicer_core::words::amount_to_words_inr;
///
/// assert_eq!(amount_to_words_inr(0), "INR Zero Only");
/// assert_eq!(amount_to_words_inr(10_000_000), "INR One Crore Only");
/// assert_eq!(amount_to_words_inr(0.5), "INR Zero and Fifty Paise Only");
/// assert_eq!(amount_to_words_inr(None::<f64>), "INR Zero Only");
/// ```
pub fn amount_to_words_inr<A: IntoAmount>(amount: A) -> String {
    money_to_words(Money::coerce(amount))
}

/// Same phrase as [`amount_to_words_inr`] for an already-rounded amount.
pub fn money_to_words(amount: Money) -> String {
    let total_paise = amount.paise().unsigned_abs();
    let rupees = total_paise / 100;
    let paise = (total_paise % 100) as u8;

    let rupees_words = rupees_to_words(rupees);
    if paise > 0 {
        format!(
            "INR {} and {} Paise Only",
            rupees_words,
            two_digits_to_words(paise)
        )
    } else {
        format!("INR {} Only", rupees_words)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================


// =============================================================================
// Property Tests
// =============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn groups_reconstruct(n in 0u64..1_000_000_000) {
            let groups = IndianGroups::decompose(n);
            prop_assert_eq!(groups.reconstruct(), n);
            prop_assert!(groups.lakh < 100);
            prop_assert!(groups.thousand < 100);
            prop_assert!(groups.remainder < 1000);
        }

        #[test]
        fn whole_rupees_have_no_paise_clause(n in 0u64..1_000_000_000_000) {
            let words = amount_to_words_inr(n);
            prop_assert!(!words.contains("Paise"));
            prop_assert!(words.starts_with("INR "));
            prop_assert!(words.ends_with(" Only"));
        }

        #[test]
        fn nonzero_paise_have_one_clause(rupees in 0i64..1_000_000_000, paise in 1i64..100) {
            let words = money_to_words(Money::from_paise(rupees * 100 + paise));
            prop_assert_eq!(words.matches(" and ").count(), 1);
            prop_assert_eq!(words.matches(" Paise Only").count(), 1);
            prop_assert!(words.ends_with(" Paise Only"));
        }

        #[test]
        fn zero_groups_are_omitted(n in 0u64..100_000_000_000) {
            let words = rupees_to_words(n);
            prop_assert!(!words.contains("Zero Crore"));
            prop_assert!(!words.contains("Zero Lakh"));
            prop_assert!(!words.contains("Zero Thousand"));
            prop_assert!(!words.contains("  "));
            if n != 0 {
                prop_assert!(!words.contains("Zero"));
            }
        }

        #[test]
        fn conversion_is_deterministic(amount in 0.0f64..1e12) {
            prop_assert_eq!(amount_to_words_inr(amount), amount_to_words_inr(amount));
        }
    }
}
