//! # Commands
//!
//! One input line is one command. Each command either reads the session
//! (and renders part of the screen) or turns into exactly one
//! [`Action`] on it.
//!
//! ## Command Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Input                    Action                   Renders              │
//! │  ─────                    ──────                   ───────              │
//! │  list                     -                        products             │
//! │  cart                     -                        cart + total         │
//! │  show                     -                        whole screen         │
//! │  add <id>                 AddToCart                cart + total         │
//! │  remove <id>              RemoveFromCart           cart + total         │
//! │  delete <id>              DeleteProduct            products + cart      │
//! │  name <text>              SetProductName           form                 │
//! │  price <text>             SetProductPrice          form                 │
//! │  submit                   SubmitProduct            products + form      │
//! │  new <name...> <price>    name + price + submit    products + form      │
//! │  cash <text>              SetCashGiven             -                    │
//! │  buy [cash]               [SetCashGiven] + Buy     feedback + cart      │
//! │  history / json / config  -                        sales / JSON / TOML  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::Write;
use tracing::debug;

use till_core::{Action, CoreError, ProductId, Session};

use crate::config::TerminalConfig;
use crate::error::{AppError, AppResult};
use crate::render;

pub const HELP: &str = "\
Commands:
  list                     show products
  cart                     show cart and total
  show                     show the whole screen
  add <id>                 add one of product <id> to the cart
  remove <id>              remove one of product <id> from the cart
  delete <id>              delete product <id> from the catalog
  new <name...> <price>    add a product to the catalog
  name <text>              type into the new-product name field
  price <text>             type into the new-product price field
  submit                   submit the new-product form
  cash <amount>            type into the cash-given field
  buy [amount]             pay for the cart with cash
  history                  list sales completed this session
  json                     print the session as JSON
  config                   print the effective configuration
  help                     show this help
  quit                     leave";

// =============================================================================
// Command
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    List,
    Cart,
    Show,
    Add(ProductId),
    Remove(ProductId),
    Delete(ProductId),
    New { name: String, price: String },
    Name(String),
    Price(String),
    Submit,
    Cash(String),
    Buy(Option<String>),
    History,
    Json,
    Config,
    Help,
    Quit,
}

impl Command {
    /// Parses one input line.
    ///
    /// Returns `Ok(None)` for a blank line.
    pub fn parse(line: &str) -> AppResult<Option<Command>> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(None);
        }

        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        let command = match word.to_lowercase().as_str() {
            "list" | "ls" | "products" => Command::List,
            "cart" => Command::Cart,
            "show" | "screen" => Command::Show,
            "add" => Command::Add(parse_id(rest)?),
            "remove" | "rm" => Command::Remove(parse_id(rest)?),
            "delete" | "del" => Command::Delete(parse_id(rest)?),
            "new" => {
                let (name, price) = rest
                    .rsplit_once(char::is_whitespace)
                    .ok_or_else(|| AppError::usage("usage: new <name> <price>"))?;
                Command::New {
                    name: name.trim().to_string(),
                    price: price.to_string(),
                }
            }
            "name" => Command::Name(rest.to_string()),
            "price" => Command::Price(rest.to_string()),
            "submit" => Command::Submit,
            "cash" => Command::Cash(rest.to_string()),
            "buy" | "pay" => Command::Buy((!rest.is_empty()).then(|| rest.to_string())),
            "history" | "sales" => Command::History,
            "json" => Command::Json,
            "config" => Command::Config,
            "help" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            other => return Err(AppError::usage(format!("unknown command `{}`", other))),
        };

        Ok(Some(command))
    }
}

fn parse_id(text: &str) -> AppResult<ProductId> {
    if text.is_empty() {
        return Err(AppError::usage("missing product id"));
    }
    text.parse()
        .map_err(|_| AppError::usage(format!("`{}` is not a product id", text)))
}

// =============================================================================
// Execution
// =============================================================================

/// What the input loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// Runs `command` against the session and writes its output.
///
/// ## Errors
/// - `Core(ProductNotFound)` when adding an id that isn't in the catalog
/// - `Io` / `Json` / `ConfigRenderFailed` when output fails
///
/// Payment failures and rejected products are not errors here: they are
/// part of the screen state and get rendered.
pub fn execute<W: Write>(
    command: Command,
    session: &mut Session,
    config: &TerminalConfig,
    out: &mut W,
) -> AppResult<Flow> {
    debug!(?command, "execute");

    match command {
        Command::List => render::catalog(out, session)?,
        Command::Cart => render::cart(out, session)?,
        Command::Show => render::screen(out, &config.store.name, session)?,
        Command::Add(id) => {
            session.dispatch(Action::AddToCart(id))?;
            render::cart(out, session)?;
        }
        Command::Remove(id) => {
            session.dispatch(Action::RemoveFromCart(id))?;
            render::cart(out, session)?;
        }
        Command::Delete(id) => {
            session.dispatch(Action::DeleteProduct(id))?;
            render::catalog(out, session)?;
            render::cart(out, session)?;
        }
        Command::New { name, price } => {
            session.dispatch(Action::SetProductName(name))?;
            session.dispatch(Action::SetProductPrice(price))?;
            submit(session, out)?;
        }
        Command::Name(name) => {
            session.dispatch(Action::SetProductName(name))?;
            render::form(out, session)?;
        }
        Command::Price(price) => {
            session.dispatch(Action::SetProductPrice(price))?;
            render::form(out, session)?;
        }
        Command::Submit => submit(session, out)?,
        Command::Cash(cash) => session.dispatch(Action::SetCashGiven(cash))?,
        Command::Buy(cash) => {
            if let Some(cash) = cash {
                session.dispatch(Action::SetCashGiven(cash))?;
            }
            buy(session, out)?;
        }
        Command::History => render::history(out, session)?,
        Command::Json => {
            let json = serde_json::to_string_pretty(&session.snapshot())?;
            writeln!(out, "{}", json)?;
        }
        Command::Config => write!(out, "{}", config.to_toml_string()?)?,
        Command::Help => writeln!(out, "{}", HELP)?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

/// Submits the new-product form.
///
/// A rejected product is silent: the catalog is unchanged and the form
/// keeps what was typed, which the re-render shows.
fn submit<W: Write>(session: &mut Session, out: &mut W) -> AppResult<()> {
    match session.dispatch(Action::SubmitProduct) {
        Ok(()) => {}
        Err(CoreError::Validation(err)) => debug!(error = %err, "product rejected"),
        Err(err) => return Err(err.into()),
    }
    render::catalog(out, session)?;
    render::form(out, session)?;
    Ok(())
}

/// Presses "Buy", which is disabled while the cart is empty.
fn buy<W: Write>(session: &mut Session, out: &mut W) -> AppResult<()> {
    if !session.can_buy() {
        writeln!(out, "Cart is empty; nothing to pay for.")?;
        return Ok(());
    }

    match session.dispatch(Action::Buy) {
        Ok(()) => {}
        Err(CoreError::InvalidCashInput) | Err(CoreError::InsufficientCash { .. }) => {}
        Err(err) => return Err(err.into()),
    }
    render::feedback(out, session)?;
    render::cart(out, session)?;
    Ok(())
}
