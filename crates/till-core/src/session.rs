//! # Session State
//!
//! Everything one POS screen holds, and the only function that changes it.
//!
//! ## Action Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Session Reducer                                      │
//! │                                                                         │
//! │   Action ──► Session::dispatch ──┬── form inputs    (payment kept)      │
//! │                                  │                                      │
//! │                                  ├── catalog change ─┐                  │
//! │                                  ├── cart change ────┼─► payment = Idle │
//! │                                  │                   ┘                  │
//! │                                  └── Buy ──► settle() ─┬─► Error        │
//! │                                                        └─► Success      │
//! │                                                            cart cleared │
//! │                                                            cash cleared │
//! │                                                            sale recorded│
//! │                                                                         │
//! │   Session::apply(self, action) -> Session   (value-in, value-out form)  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invalidation Rules
//! - `AddToCart` (known product) and `RemoveFromCart` always reset the
//!   payment to `Idle`, even when the remove finds no line
//! - `SubmitProduct` and `DeleteProduct` reset it only when the catalog
//!   actually changed
//! - Editing form or cash inputs never touches the payment state

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use crate::cart::{Cart, CartTotals};
use crate::catalog::Catalog;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::payment::{settle, PaymentState};
use crate::types::{CartLine, Product, ProductId, SaleRecord};
use crate::MAX_LINE_QUANTITY;

// =============================================================================
// Actions
// =============================================================================

/// A user event on the POS screen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Typing in the new-product name field.
    SetProductName(String),
    /// Typing in the new-product price field.
    SetProductPrice(String),
    /// Submitting the new-product form.
    SubmitProduct,
    /// "Delete" on a catalog product.
    DeleteProduct(ProductId),
    /// "Add" on a catalog product.
    AddToCart(ProductId),
    /// "Remove" on a cart line.
    RemoveFromCart(ProductId),
    /// Typing in the cash-given field.
    SetCashGiven(String),
    /// Pressing "Buy".
    Buy,
}

/// Contents of the new-product form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
}

impl ProductForm {
    fn clear(&mut self) {
        self.name.clear();
        self.price.clear();
    }
}

// =============================================================================
// Session
// =============================================================================

/// Session-scoped POS state.
///
/// ## Invariants
/// - Every cart line refers to a product currently in the catalog
/// - `payment` is `Idle` after any catalog or cart mutation
#[derive(Debug, Clone, Default)]
pub struct Session {
    catalog: Catalog,
    cart: Cart,
    form: ProductForm,
    cash_given: String,
    payment: PaymentState,
    sales: Vec<SaleRecord>,
}

impl Session {
    /// Starts a session over `catalog` with an empty cart.
    pub fn new(catalog: Catalog) -> Self {
        Session {
            catalog,
            ..Self::default()
        }
    }

    /// Applies `action` and returns the resulting state.
    ///
    /// Errors are not lost: payment failures land in [`Session::payment`],
    /// and rejected product input leaves the form as typed.
    pub fn apply(mut self, action: Action) -> Session {
        // Outcome is already reflected in the returned state.
        let _ = self.dispatch(action);
        self
    }

    /// Applies `action` in place and reports what went wrong, if anything.
    ///
    /// ## Errors
    /// - `Validation` for a rejected new product (state unchanged)
    /// - `ProductNotFound` for `AddToCart` with an unknown id (state unchanged)
    /// - `QuantityLimit` for `AddToCart` on a full line (state unchanged)
    /// - `IdsExhausted` when no fresh product id is left (state unchanged)
    /// - `InvalidCashInput` / `InsufficientCash` for a failed `Buy`
    ///   (only the payment state changes)
    pub fn dispatch(&mut self, action: Action) -> CoreResult<()> {
        debug!(?action, "dispatch");

        match action {
            Action::SetProductName(name) => {
                self.form.name = name;
                Ok(())
            }
            Action::SetProductPrice(price) => {
                self.form.price = price;
                Ok(())
            }
            Action::SetCashGiven(cash) => {
                self.cash_given = cash;
                Ok(())
            }
            Action::SubmitProduct => self.submit_product().map(|_| ()),
            Action::DeleteProduct(id) => {
                self.delete_product(id);
                Ok(())
            }
            Action::AddToCart(id) => {
                let product = self
                    .catalog
                    .get(id)
                    .ok_or(CoreError::ProductNotFound(id))?;
                let quantity = self.cart.add(product).ok_or(CoreError::QuantityLimit {
                    id,
                    max: MAX_LINE_QUANTITY,
                })?;
                debug!(%id, quantity, "added to cart");
                self.invalidate_payment();
                Ok(())
            }
            Action::RemoveFromCart(id) => {
                let remaining = self.cart.remove_one(id);
                debug!(%id, ?remaining, "removed from cart");
                self.invalidate_payment();
                Ok(())
            }
            Action::Buy => self.buy_now(),
        }
    }

    fn submit_product(&mut self) -> CoreResult<ProductId> {
        let product = self.catalog.add(&self.form.name, &self.form.price)?;
        let id = product.id;
        info!(%id, name = %product.name, price = %product.price, "product added");
        self.form.clear();
        self.invalidate_payment();
        Ok(id)
    }

    fn delete_product(&mut self, id: ProductId) {
        let Some(product) = self.catalog.remove(id) else {
            debug!(%id, "delete of unknown product ignored");
            return;
        };
        let had_line = self.cart.remove_product(id);
        info!(%id, name = %product.name, had_line, "product deleted");
        self.invalidate_payment();
    }

    fn buy_now(&mut self) -> CoreResult<()> {
        let total = self.cart.total();

        let tender = match settle(total, &self.cash_given) {
            Ok(tender) => tender,
            Err(err) => {
                debug!(%total, cash = %self.cash_given, error = %err, "buy rejected");
                self.payment = PaymentState::from(&err);
                return Err(err);
            }
        };

        let lines = self.cart.take_lines();
        if !lines.is_empty() {
            let record = SaleRecord {
                id: Uuid::new_v4().to_string(),
                lines,
                total,
                tendered: tender.tendered,
                change: tender.change,
                completed_at: Utc::now(),
            };
            info!(
                sale_id = %record.id,
                total = %record.total,
                change = %record.change,
                units = record.total_quantity(),
                "sale completed"
            );
            self.sales.push(record);
        }

        self.cash_given.clear();
        self.payment = PaymentState::Success {
            change: tender.change,
        };
        Ok(())
    }

    fn invalidate_payment(&mut self) {
        self.payment = PaymentState::Idle;
    }

    // =========================================================================
    // Convenience Operations
    // =========================================================================

    /// Fills the new-product form and submits it.
    ///
    /// Returns the id of the new product.
    pub fn add_product(&mut self, name: &str, price_text: &str) -> CoreResult<ProductId> {
        self.form.name = name.to_string();
        self.form.price = price_text.to_string();
        self.submit_product()
    }

    pub fn remove_product(&mut self, id: ProductId) {
        self.delete_product(id);
    }

    pub fn add_to_cart(&mut self, id: ProductId) -> CoreResult<()> {
        self.dispatch(Action::AddToCart(id))
    }

    pub fn remove_from_cart(&mut self, id: ProductId) {
        // RemoveFromCart never fails.
        let _ = self.dispatch(Action::RemoveFromCart(id));
    }

    /// Enters `cash_text` as cash given and presses "Buy".
    ///
    /// Returns the change on success.
    pub fn buy(&mut self, cash_text: &str) -> CoreResult<Money> {
        self.cash_given = cash_text.to_string();
        self.buy_now()?;
        Ok(self.payment.change().unwrap_or_default())
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Current cart total, recomputed on every call.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    pub fn form(&self) -> &ProductForm {
        &self.form
    }

    pub fn cash_given(&self) -> &str {
        &self.cash_given
    }

    pub fn payment(&self) -> &PaymentState {
        &self.payment
    }

    /// Sales completed during this session, oldest first.
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }

    /// Whether the "Buy" action is enabled.
    pub fn can_buy(&self) -> bool {
        !self.cart.is_empty()
    }

    /// Serializable view of the screen.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            products: self.catalog.products().to_vec(),
            cart: self.cart.lines().to_vec(),
            totals: CartTotals::from(&self.cart),
            form: self.form.clone(),
            cash_given: self.cash_given.clone(),
            can_buy: self.can_buy(),
            payment: self.payment.clone(),
            sales_completed: self.sales.len(),
        }
    }
}

/// Point-in-time copy of a [`Session`], for JSON output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub products: Vec<Product>,
    pub cart: Vec<CartLine>,
    pub totals: CartTotals,
    pub form: ProductForm,
    pub cash_given: String,
    pub can_buy: bool,
    pub payment: PaymentState,
    pub sales_completed: usize,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;

    const APPLE: ProductId = ProductId::new(1);
    const BANANA: ProductId = ProductId::new(2);
    const ORANGE: ProductId = ProductId::new(3);

    /// Catalog [Apple 1.00, Banana 0.50, Orange 0.80], cart [Apple×2, Banana×1].
    fn session_with_cart() -> Session {
        let mut session = Session::new(Catalog::demo());
        session.add_to_cart(APPLE).unwrap();
        session.add_to_cart(APPLE).unwrap();
        session.add_to_cart(BANANA).unwrap();
        session
    }

    fn cart_summary(session: &Session) -> Vec<(String, u32)> {
        session
            .cart()
            .lines()
            .iter()
            .map(|l| (l.product.name.clone(), l.quantity))
            .collect()
    }

    #[test]
    fn test_cart_scenario() {
        let session = session_with_cart();
        assert_eq!(
            cart_summary(&session),
            [("Apple".to_string(), 2), ("Banana".to_string(), 1)]
        );
        assert_eq!(session.total().to_fixed(), "2.50");
        assert!(session.can_buy());
    }

    #[test]
    fn test_buy_insufficient_cash() {
        let mut session = session_with_cart();
        let cart_before = session.cart().clone();

        let err = session.buy("2.00").unwrap_err();
        assert_eq!(err.to_string(), "need $0.50 more");
        assert_eq!(
            session.payment(),
            &PaymentState::Error {
                message: "need $0.50 more".to_string()
            }
        );
        assert_eq!(session.cart(), &cart_before);
        assert_eq!(session.cash_given(), "2.00");
        assert!(session.sales().is_empty());
    }

    #[test]
    fn test_repeated_insufficient_buy_is_stable() {
        let mut session = session_with_cart();
        let cart_before = session.cart().clone();

        let first = session.buy("1.99").unwrap_err();
        for _ in 0..5 {
            assert_eq!(session.buy("1.99").unwrap_err(), first);
            assert_eq!(session.cart(), &cart_before);
        }
    }

    #[test]
    fn test_buy_success() {
        let mut session = session_with_cart();

        let change = session.buy("5.00").unwrap();
        assert_eq!(change, Money::from_cents(250));
        assert_eq!(session.payment().change(), Some(Money::from_cents(250)));
        assert!(session.cart().is_empty());
        assert!(session.cash_given().is_empty());
        assert!(!session.can_buy());

        let sale = &session.sales()[0];
        assert_eq!(sale.total, Money::from_cents(250));
        assert_eq!(sale.tendered, Money::from_cents(500));
        assert_eq!(sale.change, Money::from_cents(250));
        assert_eq!(sale.total_quantity(), 3);
        assert!(uuid::Uuid::parse_str(&sale.id).is_ok());
    }

    #[test]
    fn test_buy_invalid_cash() {
        let mut session = session_with_cart();
        let err = session.buy("lots").unwrap_err();
        assert_eq!(err, CoreError::InvalidCashInput);
        assert_eq!(
            session.payment().feedback().as_deref(),
            Some("invalid cash amount")
        );
        assert_eq!(session.cart().total_quantity(), 3);
    }

    #[test]
    fn test_negative_cash_is_invalid_input() {
        let mut session = session_with_cart();
        assert_eq!(session.buy("-10").unwrap_err(), CoreError::InvalidCashInput);
    }

    #[test]
    fn test_buy_on_empty_cart_uses_zero_total() {
        let mut session = Session::new(Catalog::demo());
        assert!(!session.can_buy());

        let change = session.buy("1.00").unwrap();
        assert_eq!(change, Money::from_cents(100));
        assert!(session.sales().is_empty());
    }

    #[test]
    fn test_add_product_scenarios() {
        let mut session = Session::new(Catalog::demo());

        assert!(session.add_product("", "3").is_err());
        assert_eq!(session.catalog().len(), 3);

        let err = session.add_product("Mango", "-1").unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::MustBePositive { .. })
        ));
        assert_eq!(session.catalog().len(), 3);
        // Rejected input stays in the form.
        assert_eq!(session.form().name, "Mango");
        assert_eq!(session.form().price, "-1");

        let id = session.add_product("Mango", "1.75").unwrap();
        assert_eq!(session.catalog().len(), 4);
        assert_eq!(session.catalog().get(id).unwrap().name, "Mango");
        assert_eq!(session.form(), &ProductForm::default());
    }

    #[test]
    fn test_oversized_price_is_rejected() {
        let mut session = Session::new(Catalog::demo());

        let err = session
            .add_product("Yacht", "79228162514264337593543950335")
            .unwrap_err();
        assert!(matches!(
            err,
            CoreError::Validation(ValidationError::TooLarge { .. })
        ));
        assert_eq!(session.catalog().len(), 3);

        let id = session.add_product("Yacht", "1000000000").unwrap();
        session.add_to_cart(id).unwrap();
        session.add_to_cart(id).unwrap();
        assert_eq!(session.total().to_fixed(), "2000000000.00");
    }

    #[test]
    fn test_add_to_full_line_is_refused() {
        let mut session = Session::new(Catalog::demo());
        for _ in 0..MAX_LINE_QUANTITY {
            session.add_to_cart(APPLE).unwrap();
        }
        session.dispatch(Action::SetCashGiven("1".to_string())).unwrap();
        let _ = session.dispatch(Action::Buy);
        let payment_before = session.payment().clone();

        let err = session.add_to_cart(APPLE).unwrap_err();
        assert_eq!(
            err,
            CoreError::QuantityLimit {
                id: APPLE,
                max: MAX_LINE_QUANTITY
            }
        );
        assert_eq!(session.cart().line(APPLE).unwrap().quantity, MAX_LINE_QUANTITY);
        assert_eq!(session.payment(), &payment_before);
    }

    #[test]
    fn test_sub_cent_shortfall_asks_for_a_cent() {
        let mut session = session_with_cart();
        let err = session.buy("2.499").unwrap_err();
        assert_eq!(err.to_string(), "need $0.01 more");
        assert_eq!(session.cart().total_quantity(), 3);
    }

    #[test]
    fn test_delete_product_removes_cart_line() {
        let mut session = session_with_cart();
        session.remove_product(APPLE);

        assert!(!session.catalog().contains(APPLE));
        assert!(session.cart().line(APPLE).is_none());
        assert_eq!(session.total().to_fixed(), "0.50");

        // Deleting again is a no-op.
        let before = session.cart().clone();
        session.remove_product(APPLE);
        assert_eq!(session.cart(), &before);
    }

    #[test]
    fn test_add_unknown_product() {
        let mut session = Session::new(Catalog::demo());
        let err = session.add_to_cart(ProductId::new(404)).unwrap_err();
        assert_eq!(err, CoreError::ProductNotFound(ProductId::new(404)));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_remove_from_cart_decrements() {
        let mut session = session_with_cart();
        session.remove_from_cart(APPLE);
        assert_eq!(session.cart().line(APPLE).unwrap().quantity, 1);
        session.remove_from_cart(APPLE);
        assert!(session.cart().line(APPLE).is_none());
        session.remove_from_cart(ORANGE);
        assert_eq!(cart_summary(&session), [("Banana".to_string(), 1)]);
    }

    #[test]
    fn test_cart_mutation_invalidates_payment() {
        let mut session = session_with_cart();
        session.buy("1.00").unwrap_err();
        assert!(!session.payment().is_idle());

        session.add_to_cart(ORANGE).unwrap();
        assert!(session.payment().is_idle());

        session.buy("1.00").unwrap_err();
        session.remove_from_cart(ORANGE);
        assert!(session.payment().is_idle());

        // A remove that finds no line still counts as a cart action.
        session.buy("1.00").unwrap_err();
        session.remove_from_cart(ORANGE);
        assert!(session.payment().is_idle());
    }

    #[test]
    fn test_success_cleared_by_next_add() {
        let mut session = session_with_cart();
        session.buy("10").unwrap();
        assert!(session.payment().change().is_some());

        session.add_to_cart(BANANA).unwrap();
        assert!(session.payment().is_idle());
    }

    #[test]
    fn test_catalog_mutation_invalidates_payment() {
        let mut session = session_with_cart();
        session.buy("1.00").unwrap_err();
        session.add_product("Kiwi", "0.40").unwrap();
        assert!(session.payment().is_idle());

        session.buy("1.00").unwrap_err();
        session.remove_product(ORANGE);
        assert!(session.payment().is_idle());
    }

    #[test]
    fn test_no_op_catalog_actions_keep_payment() {
        let mut session = session_with_cart();
        session.buy("1.00").unwrap_err();

        session.remove_product(ProductId::new(999));
        assert!(!session.payment().is_idle());

        let _ = session.add_product("", "1");
        assert!(!session.payment().is_idle());

        session.dispatch(Action::SetCashGiven("3".into())).unwrap();
        assert!(!session.payment().is_idle());
    }

    #[test]
    fn test_apply_is_value_in_value_out() {
        let session = Session::new(Catalog::demo())
            .apply(Action::AddToCart(APPLE))
            .apply(Action::AddToCart(BANANA))
            .apply(Action::SetCashGiven("1".into()))
            .apply(Action::Buy);

        assert_eq!(
            session.payment().feedback().as_deref(),
            Some("need $0.50 more")
        );

        let session = session
            .apply(Action::SetCashGiven("2".into()))
            .apply(Action::Buy);
        assert_eq!(session.payment().change(), Some(Money::from_cents(50)));
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_delete_never_leaves_dangling_lines() {
        let mut session = Session::new(Catalog::demo());
        let kiwi = session.add_product("Kiwi", "0.40").unwrap();
        for id in [APPLE, BANANA, ORANGE, kiwi, kiwi, APPLE] {
            session.add_to_cart(id).unwrap();
        }

        for id in [kiwi, BANANA] {
            session.remove_product(id);
            assert!(session
                .cart()
                .lines()
                .iter()
                .all(|l| session.catalog().contains(l.product_id())));
        }
        assert_eq!(session.total().to_fixed(), "2.80");
    }

    #[test]
    fn test_snapshot() {
        let session = session_with_cart();
        let snapshot = session.snapshot();

        assert_eq!(snapshot.products.len(), 3);
        assert_eq!(snapshot.cart.len(), 2);
        assert_eq!(snapshot.totals.total_display, "2.50");
        assert!(snapshot.can_buy);
        assert_eq!(snapshot.payment, PaymentState::Idle);

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["totals"]["total"], "2.50");
        assert_eq!(json["payment"]["state"], "idle");
    }
}
