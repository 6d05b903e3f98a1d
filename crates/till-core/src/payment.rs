//! # Payment Calculator
//!
//! Cash tender validation and change computation.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Payment States                                       │
//! │                                                                         │
//! │                     buy() fails                                         │
//! │               ┌──────────────────────► Error { message }                │
//! │               │                            │                            │
//! │   ┌──────┐    │                            │ cart / catalog mutation    │
//! │   │ Idle │────┤                            ▼                            │
//! │   └──────┘    │                         ┌──────┐                        │
//! │      ▲        │   buy() succeeds        │ Idle │                        │
//! │      │        └──────────────────────► Success { change }               │
//! │      │                                     │                            │
//! │      └─────────────────────────────────────┘                            │
//! │                 cart / catalog mutation                                 │
//! │                                                                         │
//! │  A buy() from Error or Success re-evaluates from scratch.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::validation::parse_cash;

// =============================================================================
// Payment State
// =============================================================================

/// Outcome of the last buy attempt, shown in the feedback region.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum PaymentState {
    /// No pending result.
    #[default]
    Idle,
    /// Last attempt was rejected; `message` is user facing.
    Error { message: String },
    /// Last attempt went through.
    Success { change: Money },
}

impl PaymentState {
    pub fn is_idle(&self) -> bool {
        matches!(self, PaymentState::Idle)
    }

    pub fn change(&self) -> Option<Money> {
        match self {
            PaymentState::Success { change } => Some(*change),
            _ => None,
        }
    }

    /// Text for the feedback region, if any.
    pub fn feedback(&self) -> Option<String> {
        match self {
            PaymentState::Idle => None,
            PaymentState::Error { message } => Some(message.clone()),
            PaymentState::Success { change } => Some(format!("Payment complete. Change: {}", change)),
        }
    }
}

impl From<&CoreError> for PaymentState {
    fn from(err: &CoreError) -> Self {
        PaymentState::Error {
            message: err.to_string(),
        }
    }
}

// =============================================================================
// Tender
// =============================================================================

/// An accepted cash tender.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tender {
    pub tendered: Money,
    /// `tendered - total`, never negative.
    pub change: Money,
}

/// Checks `cash_text` against `total` and computes the change.
///
/// ## Rules
/// 1. Cash that doesn't parse, or is negative → `InvalidCashInput`
/// 2. Cash below total → `InsufficientCash { shortfall: total - cash }`,
///    rounded up to whole cents
/// 3. Otherwise → `Tender { change: cash - total }`
///
/// ## Example
/// ```rust
/// use till_core::money::Money;
/// use till_core::payment::settle;
///
/// let total = Money::from_cents(250);
/// assert_eq!(settle(total, "5.00").unwrap().change, Money::from_cents(250));
/// assert_eq!(settle(total, "2.00").unwrap_err().to_string(), "need $0.50 more");
/// ```
pub fn settle(total: Money, cash_text: &str) -> CoreResult<Tender> {
    let cash = parse_cash(cash_text).map_err(|_| CoreError::InvalidCashInput)?;

    if cash < total {
        return Err(CoreError::InsufficientCash {
            shortfall: (total - cash).rounded_up(),
        });
    }

    Ok(Tender {
        tendered: cash,
        change: cash - total,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_exact_cash_gives_zero_change() {
        let tender = settle(Money::from_cents(250), "2.50").unwrap();
        assert!(tender.change.is_zero());
        assert_eq!(tender.tendered, Money::from_cents(250));
    }

    #[test]
    fn test_change() {
        let tender = settle(Money::from_cents(250), "5.00").unwrap();
        assert_eq!(tender.change, Money::from_cents(250));
    }

    #[test]
    fn test_shortfall_message() {
        let err = settle(Money::from_cents(250), "2.00").unwrap_err();
        assert_eq!(
            err,
            CoreError::InsufficientCash {
                shortfall: Money::from_cents(50)
            }
        );
        assert_eq!(err.to_string(), "need $0.50 more");
    }

    #[test]
    fn test_shortfall_rounds_up_to_cents() {
        let total = Money::from_decimal(dec!(1.005));
        let err = settle(total, "1").unwrap_err();
        match &err {
            CoreError::InsufficientCash { shortfall } => {
                assert_eq!(shortfall.decimal(), dec!(0.01))
            }
            other => panic!("unexpected error: {:?}", other),
        }
        assert_eq!(err.to_string(), "need $0.01 more");

        // A tenth of a cent short still asks for a whole cent.
        let err = settle(Money::from_cents(250), "2.499").unwrap_err();
        assert_eq!(err.to_string(), "need $0.01 more");

        let err = settle(Money::from_cents(250), "2.4951").unwrap_err();
        assert_eq!(err.to_string(), "need $0.01 more");
    }

    #[test]
    fn test_invalid_cash() {
        let total = Money::from_cents(100);
        assert_eq!(settle(total, "abc"), Err(CoreError::InvalidCashInput));
        assert_eq!(settle(total, ""), Err(CoreError::InvalidCashInput));
        assert_eq!(settle(total, "-5"), Err(CoreError::InvalidCashInput));
    }

    #[test]
    fn test_zero_total() {
        let tender = settle(Money::zero(), "0").unwrap();
        assert!(tender.change.is_zero());

        let tender = settle(Money::zero(), "3").unwrap();
        assert_eq!(tender.change, Money::from_cents(300));
    }

    #[test]
    fn test_feedback() {
        assert_eq!(PaymentState::Idle.feedback(), None);

        let state = PaymentState::from(&CoreError::InvalidCashInput);
        assert_eq!(state.feedback().as_deref(), Some("invalid cash amount"));

        let state = PaymentState::Success {
            change: Money::from_cents(250),
        };
        assert_eq!(
            state.feedback().as_deref(),
            Some("Payment complete. Change: $2.50")
        );
        assert_eq!(state.change(), Some(Money::from_cents(250)));
    }

    #[test]
    fn test_state_serialization() {
        let json = serde_json::to_string(&PaymentState::Success {
            change: Money::from_cents(250),
        })
        .unwrap();
        assert_eq!(json, r#"{"state":"success","change":"2.50"}"#);
    }
}
