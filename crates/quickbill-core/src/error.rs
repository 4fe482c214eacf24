//! # Error Types
//!
//! Domain-specific error types for quickbill-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quickbill-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule failures                         │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quickbill-store errors (separate crate)                               │
//! │  └── StoreError       - Wraps CoreError + configuration failures       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → StoreError → caller               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The billing engine itself never fails. Errors only appear where input is
//! parsed (discount kind, payment method) or at the settlement boundary.

use thiserror::Error;

use crate::money::Money;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id is not present in the inventory.
    #[error("Product not found: {0}")]
    ProductNotFound(String),

    /// Selling more units than are on hand.
    ///
    /// ## User Workflow
    /// ```text
    /// Commit sale (Cooking Oil × 40)
    ///      │
    ///      ▼
    /// Check stock: available=30
    ///      │
    ///      ▼
    /// InsufficientStock { product: "Cooking Oil", available: 30, requested: 40 }
    /// ```
    #[error("Insufficient stock for {product}: available {available}, requested {requested}")]
    InsufficientStock {
        product: String,
        available: i64,
        requested: i64,
    },

    /// A sale was committed with no line items.
    #[error("Cart is empty")]
    EmptyCart,

    /// Cash received does not cover the payable amount.
    #[error("Cash received {given} is less than payable {payable}")]
    InsufficientTender { given: Money, payable: Money },

    /// Cart has exceeded maximum allowed lines.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Invalid format (e.g. unparseable amount).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// Duplicate value (e.g. duplicate product id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
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
        let err = CoreError::InsufficientStock {
            product: "Cooking Oil".to_string(),
            available: 30,
            requested: 40,
        };
        assert_eq!(
            err.to_string(),
            "Insufficient stock for Cooking Oil: available 30, requested 40"
        );
    }

    #[test]
    fn test_tender_message_uses_currency() {
        let err = CoreError::InsufficientTender {
            given: Money::from_major(100),
            payable: Money::from_major(105),
        };
        assert_eq!(err.to_string(), "Cash received ₹100.00 is less than payable ₹105.00");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "gst".to_string(),
            min: 0,
            max: 100,
        };
        assert_eq!(err.to_string(), "gst must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "id".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
