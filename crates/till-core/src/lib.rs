//! # till-core: Pure Business Logic for Till POS
//!
//! This crate is the **heart** of Till POS. It holds the catalog, the cart
//! and the cash-payment calculator as plain in-memory state with zero I/O.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Till POS Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 till-terminal (front end)                       │   │
//! │  │   Catalog list ──► Cart list ──► Cash input ──► Feedback line  │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ Action                                 │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ till-core (THIS CRATE) ★                        │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  catalog  │  │   cart    │  │  payment  │  │  session  │  │   │
//! │  │   │  Product  │  │ CartLine  │  │  settle() │  │  Action   │  │   │
//! │  │   │  add/rm   │  │  total()  │  │  states   │  │  apply()  │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO PERSISTENCE • NO NETWORK • SINGLE OWNER          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, CartLine, SaleRecord)
//! - [`money`] - Money type with exact decimal arithmetic
//! - [`error`] - Domain error types
//! - [`validation`] - Parsing of free-text form input
//! - [`catalog`] - Catalog manager
//! - [`cart`] - Cart manager
//! - [`payment`] - Payment state machine
//! - [`session`] - Session state and reducer
//!
//! ## Example Usage
//!
//! ```rust
//! use till_core::{Catalog, ProductId, Session};
//!
//! let mut session = Session::new(Catalog::demo());
//! session.add_to_cart(ProductId::new(1)).unwrap(); // Apple $1.00
//! session.add_to_cart(ProductId::new(1)).unwrap();
//! session.add_to_cart(ProductId::new(2)).unwrap(); // Banana $0.50
//! assert_eq!(session.total().to_fixed(), "2.50");
//!
//! let err = session.buy("2.00").unwrap_err();
//! assert_eq!(err.to_string(), "need $0.50 more");
//!
//! let change = session.buy("5.00").unwrap();
//! assert_eq!(change.to_fixed(), "2.50");
//! assert!(session.cart().is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod catalog;
pub mod error;
pub mod money;
pub mod payment;
pub mod session;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{Cart, CartTotals};
pub use catalog::Catalog;
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use payment::PaymentState;
pub use session::{Action, Session, SessionSnapshot};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum length of a product name, in characters.
pub const MAX_NAME_LEN: usize = 200;

/// Highest accepted unit price, in whole currency units.
pub const MAX_PRICE: i64 = 1_000_000_000;

/// Most units of one product a single cart line can hold.
///
/// Together with [`MAX_PRICE`] this keeps every line total below `1e14`,
/// far inside the range of `rust_decimal::Decimal` even summed over any
/// cart that fits in memory.
pub const MAX_LINE_QUANTITY: u32 = 100_000;

/// Products the screen starts with, as `(name, price in cents)`.
pub const DEMO_PRODUCTS: &[(&str, i64)] = &[("Apple", 100), ("Banana", 50), ("Orange", 80)];
