//! # Validation Module
//!
//! Input validation for bills before they reach the renderer.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Browser form                                                 │
//! │  ├── Required markers (*) on invoice no, date, buyer, address          │
//! │  └── number inputs for quantity / rate                                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Deserialization (serde)                                      │
//! │  └── Date must be yyyy-mm-dd, numbers must parse                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: THIS MODULE                                                  │
//! │  ├── Required fields non-blank, length limits                          │
//! │  └── Non-negative quantities / rates, item count                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use invoicer_core::validation::{validate_invoice_no, validate_buyer_name};
//!
//! assert!(validate_invoice_no("AS/24-25/017").is_ok());
//! assert!(validate_buyer_name("   ").is_err());
//! ```

use chrono::NaiveDate;

use crate::bill::Bill;
use crate::error::{CoreError, ValidationError};
use crate::types::{BillData, LineItem};
use crate::MAX_BILL_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

const MAX_INVOICE_NO_LEN: usize = 50;
const MAX_NAME_LEN: usize = 120;
const MAX_LINE_LEN: usize = 200;

// =============================================================================
// String Validators
// =============================================================================

fn require(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

/// Validates an invoice number.
///
/// ## Rules
/// - Must not be blank
/// - At most 50 characters
/// - No control characters (it ends up in a file name)
pub fn validate_invoice_no(invoice_no: &str) -> ValidationResult<()> {
    require("invoice no", invoice_no, MAX_INVOICE_NO_LEN)?;

    if invoice_no.chars().any(char::is_control) {
        return Err(ValidationError::InvalidFormat {
            field: "invoice no".to_string(),
            reason: "must not contain control characters".to_string(),
        });
    }

    Ok(())
}

/// Validates the buyer name (required, at most 120 characters).
pub fn validate_buyer_name(name: &str) -> ValidationResult<()> {
    require("buyer name", name, MAX_NAME_LEN)
}

/// Validates one of the two buyer address lines (required).
pub fn validate_address_line(field: &str, line: &str) -> ValidationResult<()> {
    require(field, line, MAX_LINE_LEN)
}

/// Validates the optional reference. Blank is fine.
pub fn validate_reference(reference: &str) -> ValidationResult<()> {
    if reference.trim().chars().count() > MAX_LINE_LEN {
        return Err(ValidationError::TooLong {
            field: "reference".to_string(),
            max: MAX_LINE_LEN,
        });
    }

    Ok(())
}

/// Parses an ISO `yyyy-mm-dd` date as sent by an `<input type="date">`.
///
/// ## Example
/// ```rust
/// use invoicer_core::validation::parse_bill_date;
///
/// assert!(parse_bill_date("2024-08-15").is_ok());
/// assert!(parse_bill_date("15/08/2024").is_err());
/// ```
pub fn parse_bill_date(input: &str) -> ValidationResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        ValidationError::InvalidFormat {
            field: "date".to_string(),
            reason: "expected yyyy-mm-dd".to_string(),
        }
    })
}

// =============================================================================
// Record Validators
// =============================================================================

/// Validates the bill header.
pub fn validate_bill_data(data: &BillData) -> ValidationResult<()> {
    validate_invoice_no(&data.invoice_no)?;
    validate_reference(&data.reference)?;
    validate_buyer_name(&data.buyer_name)?;
    validate_address_line("address line 1", &data.buyer_address1)?;
    validate_address_line("address line 2", &data.buyer_address2)?;
    Ok(())
}

/// Validates a line item.
///
/// ## Rules
/// - Description required
/// - Quantity and rate must not be negative
pub fn validate_line_item(item: &LineItem) -> ValidationResult<()> {
    require("description", &item.description, MAX_LINE_LEN)?;

    if item.quantity.is_sign_negative() && !item.quantity.is_zero() {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    if item.rate.is_sign_negative() && !item.rate.is_zero() {
        return Err(ValidationError::Negative {
            field: "rate".to_string(),
        });
    }

    Ok(())
}

/// Validates a whole bill: header, every item, the item count, and that
/// the totals fit.
pub fn validate_bill(bill: &Bill) -> ValidationResult<()> {
    validate_bill_data(&bill.data)?;

    if bill.items.is_empty() || bill.items.len() > MAX_BILL_ITEMS {
        return Err(ValidationError::CountOutOfRange {
            field: "items".to_string(),
            min: 1,
            max: MAX_BILL_ITEMS,
        });
    }

    bill.items.iter().try_for_each(validate_line_item)?;

    match bill.totals() {
        Ok(_) => Ok(()),
        Err(CoreError::TotalOverflow { field }) => Err(ValidationError::TooLarge {
            field: format!("total {}", field),
        }),
        Err(other) => Err(ValidationError::InvalidFormat {
            field: "items".to_string(),
            reason: other.to_string(),
        }),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
