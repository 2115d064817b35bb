//! # Error Types
//!
//! Domain-specific error types for invoicer-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  invoicer-core errors (this file)                                      │
//! │  ├── CoreError        - Bill editing failures                          │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  invoicer-cli errors (app)                                             │
//! │  └── ConfigError      - Config file / environment problems             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → anyhow::Error → stderr            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The words converter never produces any of these: it is total.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors raised while editing or checking a bill.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A row index that is not in the item list.
    ///
    /// ## When This Occurs
    /// - Form sends an update for a row that was removed meanwhile
    /// - Bill file edited by hand with a stale index
    #[error("Item {index} not found (bill has {len} items)")]
    ItemNotFound { index: usize, len: usize },

    /// The bill already holds the maximum number of rows.
    #[error("A bill cannot have more than {max} items")]
    TooManyItems { max: usize },

    /// `quantity × rate` does not fit in paise arithmetic.
    #[error("Amount for item {index} is too large")]
    AmountOverflow { index: usize },

    /// Rows fit individually but their sum does not.
    #[error("Bill total {field} is too large")]
    TotalOverflow { field: &'static str },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when form input doesn't meet requirements.
/// Used before a bill is handed to the renderer.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is negative where only zero or more makes sense.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Collection size is out of range.
    #[error("{field} must have between {min} and {max} entries")]
    CountOutOfRange {
        field: String,
        min: usize,
        max: usize,
    },

    /// Value is out of range for exact arithmetic.
    #[error("{field} is too large")]
    TooLarge { field: String },

    /// Invalid format (e.g., invalid date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::ItemNotFound { index: 4, len: 2 };
        assert_eq!(err.to_string(), "Item 4 not found (bill has 2 items)");

        let err = CoreError::TooManyItems { max: 200 };
        assert_eq!(err.to_string(), "A bill cannot have more than 200 items");

        let err = CoreError::TotalOverflow { field: "amount" };
        assert_eq!(err.to_string(), "Bill total amount is too large");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "buyer name".to_string(),
        };
        assert_eq!(err.to_string(), "buyer name is required");

        let err = ValidationError::Negative {
            field: "rate".to_string(),
        };
        assert_eq!(err.to_string(), "rate must not be negative");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "invoice no".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
