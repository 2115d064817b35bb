//! # invoicer-core: Pure Logic for Bills of Supply
//!
//! Everything a Bill of Supply needs that can be computed without I/O:
//! the Indian-system amount-in-words phrase, paise arithmetic, bill
//! totals, validation, page geometry and the document model handed to a
//! renderer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Invoicer Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Bill form / invoicer CLI                        │   │
//! │  │    bill JSON ──► validate ──► build document ──► write / print  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ invoicer-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌─────────┐  │   │
//! │  │   │  words  │ │  money  │ │  bill   │ │ layout  │ │document │  │   │
//! │  │   │ INR ... │ │  Money  │ │  Bill   │ │ A4 mm   │ │ blocks  │  │   │
//! │  │   │  Only   │ │  paise  │ │ totals  │ │ footer  │ │ tables  │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └─────────┘ └─────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO FONTS • NO FILES • PURE FUNCTIONS                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`words`] - Amount in words, Indian numbering (Lakh, Crore)
//! - [`money`] - Money in paise, lenient amount coercion, en-IN formatting
//! - [`types`] - Bill header, line items, issuer and bank details
//! - [`bill`] - Item editing and totals
//! - [`validation`] - Form input checks
//! - [`layout`] - A4 geometry and footer placement
//! - [`document`] - Printable document model (header, body, full bill)
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Total conversion**: any input yields a phrase; garbage reads as zero
//! 2. **Decimal rounding**: Rupees round to paise half away from zero, never via floats
//! 3. **Integer money**: stored amounts are paise (i64)
//! 4. **No I/O**: files, fonts and environment belong to the app
//!
//! ## Example Usage
//!
//! ```rust
//! use invoicer_core::amount_to_words_inr;
//!
//! assert_eq!(
//!     amount_to_words_inr(1234567.89),
//!     "INR Twelve Lakh Thirty-Four Thousand Five Hundred Sixty-Seven and Eighty-Nine Paise Only"
//! );
//! assert_eq!(amount_to_words_inr(10_000_000), "INR One Crore Only");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod bill;
pub mod document;
pub mod error;
pub mod layout;
pub mod money;
pub mod types;
pub mod validation;
pub mod words;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use invoicer_core::Money` instead of
// `use invoicer_core::money::Money`

pub use bill::{Bill, BillTotals};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{IntoAmount, Money};
pub use types::*;
pub use words::amount_to_words_inr;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum rows on a single bill.
///
/// ## Business Reason
/// Keeps a bill printable in a handful of pages and stops a runaway form.
pub const MAX_BILL_ITEMS: usize = 200;

/// Unit a new row starts with ("per" column).
pub const DEFAULT_UNIT: &str = "NO";

/// Stands in for a blank invoice number in file names.
pub const FALLBACK_INVOICE_NO: &str = "Generated";

/// Printed in the Reference cell when no reference was entered.
pub const NO_REFERENCE: &str = "NA";
