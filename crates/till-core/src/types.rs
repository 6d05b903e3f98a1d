//! # Domain Types
//!
//! Core domain types used throughout Till POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    CartLine     │   │   SaleRecord    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (u64)       │◄──│  product        │   │  id (UUID)      │       │
//! │  │  name           │   │  quantity ≥ 1   │   │  lines          │       │
//! │  │  price          │   └─────────────────┘   │  total / change │       │
//! │  └─────────────────┘                         └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Product Id
// =============================================================================

/// Identity of a catalog product.
///
/// Fresh ids come from [`crate::catalog::IdGenerator`], which seeds from the
/// wall clock in milliseconds and never hands out the same value twice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u64);

impl ProductId {
    #[inline]
    pub const fn new(id: u64) -> Self {
        ProductId(id)
    }

    #[inline]
    pub const fn get(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u64>().map(ProductId)
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available for sale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,

    /// Display name shown to the cashier. Never empty.
    pub name: String,

    /// Unit price. Always positive.
    pub price: Money,
}

// =============================================================================
// Cart Line
// =============================================================================

/// A line in the cart: one product and how many of it.
///
/// The product is a snapshot taken when the line was created. Catalog
/// products are immutable once added, so the snapshot never goes stale;
/// deleting the product deletes the line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product: Product,

    /// Always ≥ 1. A line that would drop to zero is removed instead.
    pub quantity: u32,
}

impl CartLine {
    pub fn new(product: Product) -> Self {
        CartLine {
            product,
            quantity: 1,
        }
    }

    #[inline]
    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price × quantity, unrounded.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price * self.quantity
    }
}

// =============================================================================
// Sale Record
// =============================================================================

/// A completed cash sale, kept for the lifetime of the session.
///
/// Lines are frozen copies of the cart at the moment of payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRecord {
    /// UUID v4.
    pub id: String,
    pub lines: Vec<CartLine>,
    pub total: Money,
    pub tendered: Money,
    pub change: Money,
    pub completed_at: DateTime<Utc>,
}

impl SaleRecord {
    /// Total number of units sold.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }
}
