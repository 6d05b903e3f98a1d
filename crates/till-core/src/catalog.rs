//! # Catalog Manager
//!
//! The list of products the cashier can put in the cart.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Catalog Operations                                   │
//! │                                                                         │
//! │  New-product form ──► add(name, price_text)                             │
//! │                          ├── invalid → ValidationError, no change      │
//! │                          └── valid   → push Product { fresh id }       │
//! │                                                                         │
//! │  Delete button ──────► remove(id)                                       │
//! │                          ├── present → Some(product)                   │
//! │                          └── absent  → None (no-op)                    │
//! │                                                                         │
//! │  NOTE: removing the matching cart line is the session's job, see       │
//! │        `Session::dispatch(Action::DeleteProduct)`.                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::types::{Product, ProductId};
use crate::validation::{parse_price, validate_product_name, ValidationResult};

// =============================================================================
// Id Generator
// =============================================================================

/// Hands out product ids that never repeat within a session.
///
/// Ids are the current Unix time in milliseconds, bumped past the last
/// issued id when two products are created within the same millisecond
/// (or the clock steps backwards).
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a fresh id strictly greater than every id seen so far.
    ///
    /// `None` once `u64::MAX` has been issued or observed.
    pub fn next_id(&mut self) -> Option<ProductId> {
        let now = u64::try_from(Utc::now().timestamp_millis()).unwrap_or(0);
        let id = now.max(self.last.checked_add(1)?);
        self.last = id;
        Some(ProductId::new(id))
    }

    /// Records an id assigned elsewhere so it is never reissued.
    pub fn observe(&mut self, id: ProductId) {
        self.last = self.last.max(id.get());
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// Ordered list of sellable products.
///
/// ## Invariants
/// - Product ids are unique
/// - Every name is non-empty and every price is positive
/// - Insertion order is display order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    ids: IdGenerator,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog from already-validated entries, numbered 1, 2, 3...
    pub fn with_products<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, Money)>,
        S: Into<String>,
    {
        let mut catalog = Catalog::new();
        for (seq, (name, price)) in (1u64..).zip(entries) {
            let id = ProductId::new(seq);
            catalog.ids.observe(id);
            catalog.products.push(Product {
                id,
                name: name.into(),
                price,
            });
        }
        catalog
    }

    /// Validates raw `(name, price_text)` pairs and builds a catalog from them.
    ///
    /// Fails on the first invalid entry.
    pub fn from_entries<'a, I>(entries: I) -> ValidationResult<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let validated = entries
            .into_iter()
            .map(|(name, price)| -> ValidationResult<(String, Money)> {
                Ok((validate_product_name(name)?, parse_price(price)?))
            })
            .collect::<ValidationResult<Vec<_>>>()?;
        Ok(Self::with_products(validated))
    }

    /// The demo catalog the screen starts with.
    pub fn demo() -> Self {
        Self::with_products(
            crate::DEMO_PRODUCTS
                .iter()
                .map(|&(name, cents)| (name, Money::from_cents(cents))),
        )
    }

    /// Adds a product from form input.
    ///
    /// ## Behavior
    /// - Name is trimmed and must be non-empty
    /// - Price must parse and be > 0
    /// - On failure nothing changes and the typed error is returned
    ///
    /// ## Returns
    /// The newly created product.
    pub fn add(&mut self, name: &str, price_text: &str) -> CoreResult<&Product> {
        let name = validate_product_name(name)?;
        let price = parse_price(price_text)?;
        self.insert(name, price)
    }

    /// Appends a product that has already been validated.
    pub fn insert(&mut self, name: String, price: Money) -> CoreResult<&Product> {
        let id = self.ids.next_id().ok_or(CoreError::IdsExhausted)?;
        debug!(%id, name = %name, price = %price, "catalog insert");
        let index = self.products.len();
        self.products.push(Product { id, name, price });
        Ok(&self.products[index])
    }

    /// Removes the product with the given id.
    ///
    /// Returns `None` when no such product exists.
    pub fn remove(&mut self, id: ProductId) -> Option<Product> {
        let index = self.products.iter().position(|p| p.id == id)?;
        Some(self.products.remove(index))
    }

    pub fn get(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn contains(&self, id: ProductId) -> bool {
        self.get(id).is_some()
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Product> {
        self.products.iter()
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
