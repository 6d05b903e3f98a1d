//! # Cart Manager
//!
//! The working selection of products for the current transaction.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Operations                                      │
//! │                                                                         │
//! │  Screen Action            Method               Cart Change              │
//! │  ─────────────            ──────               ───────────              │
//! │                                                                         │
//! │  "Add" on product ───────► add(&product) ─────► qty += 1 or push line   │
//! │                                                                         │
//! │  "Remove" on line ───────► remove_one(id) ────► qty -= 1, drop at 0     │
//! │                                                                         │
//! │  "Delete" on product ────► remove_product(id) ► drop line entirely      │
//! │                                                                         │
//! │  Successful buy ─────────► take_lines() ──────► empty cart              │
//! │                                                                         │
//! │  Total display ──────────► total() ───────────► (read only, never cached)│
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;
use crate::types::{CartLine, Product, ProductId};
use crate::MAX_LINE_QUANTITY;

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product bumps quantity)
/// - Every line has quantity ≥ 1 and ≤ `MAX_LINE_QUANTITY`
/// - Lines keep the order in which products were first added
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds one unit of `product`.
    ///
    /// ## Returns
    /// - `Some(n)` with the line's quantity after the add
    /// - `None` if the line is already at `MAX_LINE_QUANTITY` (nothing changes)
    pub fn add(&mut self, product: &Product) -> Option<u32> {
        if let Some(line) = self.line_mut(product.id) {
            if line.quantity >= MAX_LINE_QUANTITY {
                return None;
            }
            line.quantity += 1;
            return Some(line.quantity);
        }

        self.lines.push(CartLine::new(product.clone()));
        Some(1)
    }

    /// Removes one unit of the product with `id`.
    ///
    /// ## Returns
    /// - `None` if no line matches (nothing changes)
    /// - `Some(0)` if the line was dropped
    /// - `Some(n)` with the remaining quantity otherwise
    pub fn remove_one(&mut self, id: ProductId) -> Option<u32> {
        let index = self.lines.iter().position(|l| l.product_id() == id)?;
        let line = &mut self.lines[index];

        if line.quantity > 1 {
            line.quantity -= 1;
            Some(line.quantity)
        } else {
            self.lines.remove(index);
            Some(0)
        }
    }

    /// Drops the whole line for `id`, whatever its quantity.
    ///
    /// Returns whether a line was removed.
    pub fn remove_product(&mut self, id: ProductId) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id() != id);
        self.lines.len() != before
    }

    /// Empties the cart and hands back the lines it held.
    pub fn take_lines(&mut self) -> Vec<CartLine> {
        std::mem::take(&mut self.lines)
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product_id() == id)
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLine> {
        self.lines.iter_mut().find(|l| l.product_id() == id)
    }

    /// Sum of price × quantity over all lines, exact.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Returns the number of distinct products in the cart.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity of all lines.
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Cart totals summary for display and snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartTotals {
    pub item_count: usize,
    pub total_quantity: u64,
    /// Exact total.
    pub total: Money,
    /// Total as shown on screen, e.g. `"2.50"`.
    pub total_display: String,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        let total = cart.total();
        CartTotals {
            item_count: cart.item_count(),
            total_quantity: cart.total_quantity(),
            total,
            total_display: total.to_fixed(),
        }
    }
}
