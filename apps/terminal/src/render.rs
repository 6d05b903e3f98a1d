//! # Screen Rendering
//!
//! Plain-text rendering of the POS screen regions.
//!
//! ```text
//! == Till POS ==
//! Products
//!   [1] Apple - $1.00
//!   [2] Banana - $0.50
//! Cart
//!   [1] Apple x 2 - $2.00
//!   [2] Banana x 1 - $0.50
//! Total: $2.50
//! ```
//!
//! Everything here is read only; ids in brackets are what the `add`,
//! `remove` and `delete` commands take.

use std::io::{self, Write};

use till_core::{Money, Session};

pub fn header<W: Write>(out: &mut W, store_name: &str) -> io::Result<()> {
    writeln!(out, "== {} ==", store_name)
}

pub fn catalog<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "Products")?;
    if session.catalog().is_empty() {
        writeln!(out, "  (no products)")?;
    }
    for product in session.catalog().iter() {
        writeln!(out, "  [{}] {} - {}", product.id, product.name, product.price)?;
    }
    Ok(())
}

/// Pending new-product input, shown only while something is typed.
pub fn form<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    let form = session.form();
    if form.name.is_empty() && form.price.is_empty() {
        return Ok(());
    }
    writeln!(out, "New product: name={:?} price={:?}", form.name, form.price)
}

pub fn cart<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "Cart")?;
    if session.cart().is_empty() {
        writeln!(out, "  Your cart is empty.")?;
    }
    for line in session.cart().lines() {
        writeln!(
            out,
            "  [{}] {} x {} - {}",
            line.product_id(),
            line.product.name,
            line.quantity,
            line.line_total()
        )?;
    }
    total(out, session.total())
}

pub fn total<W: Write>(out: &mut W, total: Money) -> io::Result<()> {
    writeln!(out, "Total: {}", total)
}

/// The feedback region: last payment error or success, if any.
pub fn feedback<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    match session.payment().feedback() {
        Some(message) => writeln!(out, "{}", message),
        None => Ok(()),
    }
}

pub fn history<W: Write>(out: &mut W, session: &Session) -> io::Result<()> {
    writeln!(out, "Sales this session: {}", session.sales().len())?;
    for sale in session.sales() {
        writeln!(
            out,
            "  {} {} units={} total={} paid={} change={}",
            sale.completed_at.format("%H:%M:%S"),
            sale.id,
            sale.total_quantity(),
            sale.total,
            sale.tendered,
            sale.change
        )?;
    }
    Ok(())
}

/// The whole screen, top to bottom.
pub fn screen<W: Write>(out: &mut W, store_name: &str, session: &Session) -> io::Result<()> {
    header(out, store_name)?;
    catalog(out, session)?;
    form(out, session)?;
    cart(out, session)?;
    if !session.cash_given().is_empty() {
        writeln!(out, "Cash given: {}", session.cash_given())?;
    }
    feedback(out, session)
}
