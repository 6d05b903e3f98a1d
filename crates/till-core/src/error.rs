//! # Error Types
//!
//! Domain-specific error types for till-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  till-core errors (this file)                                          │
//! │  ├── CoreError        - Business rule failures (cash, lookups)         │
//! │  └── ValidationError  - Free-text input that failed to parse           │
//! │                                                                         │
//! │  till-terminal errors (app)                                            │
//! │  └── AppError         - Config, I/O, and wrapped CoreError             │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → AppError → feedback line          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Recovery
//! Every error in this crate is recoverable by correcting the input and
//! retrying. None of them leave the session half-mutated.

use thiserror::Error;

use crate::money::Money;
use crate::types::ProductId;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// The `Display` strings of the payment variants are the exact messages
/// shown in the feedback region of the POS screen.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Product id is not in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Cash-given text could not be read as an amount.
    ///
    /// ## User Workflow
    /// ```text
    /// Cash given: "abc"
    ///      │
    ///      ▼
    /// buy() → InvalidCashInput
    ///      │
    ///      ▼
    /// Feedback: "invalid cash amount" (cart untouched)
    /// ```
    #[error("invalid cash amount")]
    InvalidCashInput,

    /// Tendered cash is below the cart total.
    ///
    /// `shortfall` is rounded up to whole cents, so it is never `$0.00`.
    #[error("need {shortfall} more")]
    InsufficientCash { shortfall: Money },

    /// The cart line for this product already holds the maximum quantity.
    #[error("cannot add more than {max} of product {id}")]
    QuantityLimit { id: ProductId, max: u32 },

    /// The id generator has no fresh product ids left.
    #[error("no product ids left")]
    IdsExhausted,

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Produced by the parsers in [`crate::validation`] before any state is
/// touched.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be strictly positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Value is above the accepted maximum.
    #[error("{field} must be at most {max}")]
    TooLarge { field: String, max: Money },

    /// Value is not a decimal number.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_payment_messages() {
        assert_eq!(CoreError::InvalidCashInput.to_string(), "invalid cash amount");

        let err = CoreError::InsufficientCash {
            shortfall: Money::from_cents(50),
        };
        assert_eq!(err.to_string(), "need $0.50 more");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::MustBePositive {
            field: "price".to_string(),
        };
        assert_eq!(err.to_string(), "price must be positive");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }

    #[test]
    fn test_product_not_found_message() {
        let err = CoreError::ProductNotFound(ProductId::new(42));
        assert_eq!(err.to_string(), "Product not found: 42");
    }
}
