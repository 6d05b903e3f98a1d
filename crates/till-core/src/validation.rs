//! # Validation Module
//!
//! Turns free-text form input into typed values.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      One Parser, Two Flows                              │
//! │                                                                         │
//! │  New-product form                  Cash-given input                     │
//! │  price text "0.80"                 cash text "5.00"                     │
//! │       │                                  │                              │
//! │       ▼                                  ▼                              │
//! │  parse_price()                      parse_cash()                        │
//! │       │                                  │                              │
//! │       └──────────► parse_amount() ◄──────┘                              │
//! │                         │                                               │
//! │                         ├── "" / "  "  → Required                       │
//! │                         ├── "abc"      → InvalidFormat                  │
//! │                         └── "2.50"     → Money(2.50)                    │
//! │                                                                         │
//! │  Then each flow applies its own sign rule:                             │
//! │    price must be > 0, cash must be ≥ 0                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use till_core::validation::{parse_price, validate_product_name};
//!
//! assert!(parse_price("0.80").is_ok());
//! assert!(parse_price("-1").is_err());
//! assert!(validate_product_name("").is_err());
//! ```

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::money::Money;
use crate::{MAX_NAME_LEN, MAX_PRICE};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Amount Parsing
// =============================================================================

/// Parses free text as an exact decimal amount.
///
/// ## Rules
/// - Surrounding whitespace is ignored
/// - Empty input is `Required`
/// - Anything `rust_decimal` cannot read exactly is `InvalidFormat`
///   (no trailing garbage, no exponents, no NaN/infinity)
///
/// The sign is not checked here; see [`parse_price`] and [`parse_cash`].
pub fn parse_amount(field: &str, text: &str) -> ValidationResult<Money> {
    let text = text.trim();

    if text.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    Decimal::from_str(text)
        .map(Money::from_decimal)
        .map_err(|e| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: e.to_string(),
        })
}

/// Parses a product price.
///
/// ## Rules
/// - Must parse as an amount
/// - Must be strictly positive (free items are not sold here)
/// - Must not exceed [`MAX_PRICE`]
///
/// ## Example
/// ```rust
/// use till_core::validation::parse_price;
///
/// assert!(parse_price("1.00").is_ok());
/// assert!(parse_price("0").is_err());
/// assert!(parse_price("three").is_err());
/// ```
pub fn parse_price(text: &str) -> ValidationResult<Money> {
    let price = parse_amount("price", text)?;

    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }

    let max = Money::from_decimal(Decimal::from(MAX_PRICE));
    if price > max {
        return Err(ValidationError::TooLarge {
            field: "price".to_string(),
            max,
        });
    }

    Ok(price)
}

/// Parses the cash handed over by the customer.
///
/// ## Rules
/// - Must parse as an amount
/// - Must not be negative; zero is accepted and then fails the
///   shortfall check like any other too-small tender
pub fn parse_cash(text: &str) -> ValidationResult<Money> {
    let cash = parse_amount("cash", text)?;

    if cash.is_negative() {
        return Err(ValidationError::MustNotBeNegative {
            field: "cash".to_string(),
        });
    }

    Ok(cash)
}

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name and returns it trimmed.
///
/// ## Rules
/// - Must not be empty or whitespace only
/// - Must be at most `MAX_NAME_LEN` characters
pub fn validate_product_name(name: &str) -> ValidationResult<String> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LEN,
        });
    }

    Ok(name.to_string())
}

// =============================================================================
// Unit Tests
// =============================================================================
