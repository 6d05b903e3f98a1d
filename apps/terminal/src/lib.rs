//! # Till POS Terminal
//!
//! Line-oriented front end for the `till-core` session.
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Terminal Startup                                 │
//! │                                                                         │
//! │  1. Parse arguments ───────────────────────────────────────────────────►│
//! │     • --config <path>  (optional)                                       │
//! │                                                                         │
//! │  2. Load configuration ────────────────────────────────────────────────►│
//! │     • defaults → TOML file → TILL_* env vars                            │
//! │                                                                         │
//! │  3. Initialize logging ────────────────────────────────────────────────►│
//! │     • tracing-subscriber with env filter, written to stderr             │
//! │     • RUST_LOG wins over [logging] filter                               │
//! │                                                                         │
//! │  4. Seed the catalog and open the session ─────────────────────────────►│
//! │                                                                         │
//! │  5. Read commands until `quit` or end of input                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod render;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use till_core::Session;

use commands::{Command, Flow};
use config::TerminalConfig;
use error::{AppError, AppResult};

const PROMPT: &str = "> ";

/// Runs the terminal on stdin/stdout.
pub fn run() -> AppResult<()> {
    let config_path = parse_args(std::env::args().skip(1))?;
    let config = TerminalConfig::load(config_path.as_deref())?;

    init_tracing(&config.logging.filter);
    info!(store = %config.store.name, "Starting Till POS terminal");

    let mut session = Session::new(config.seed_catalog()?);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    render::screen(&mut out, &config.store.name, &session)?;
    run_loop(stdin.lock(), &mut out, &mut session, &config)?;

    info!(sales = session.sales().len(), "Till POS terminal closed");
    Ok(())
}

/// Reads commands from `input` until `quit` or end of input.
///
/// Recoverable errors (bad input, unknown product) are printed and the
/// loop carries on. Anything else ends the loop.
pub fn run_loop<R, W>(
    input: R,
    out: &mut W,
    session: &mut Session,
    config: &TerminalConfig,
) -> AppResult<()>
where
    R: BufRead,
    W: Write,
{
    write!(out, "{}", PROMPT)?;
    out.flush()?;

    for line in input.lines() {
        let line = line?;

        let result = Command::parse(&line).and_then(|command| match command {
            Some(command) => commands::execute(command, session, config, out),
            None => Ok(Flow::Continue),
        });

        match result {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(err) if err.is_recoverable() => {
                warn!(error = %err, input = %line, "Command failed");
                writeln!(out, "{}", err)?;
            }
            Err(err) => return Err(err),
        }

        write!(out, "{}", PROMPT)?;
        out.flush()?;
    }

    writeln!(out)?;
    Ok(())
}

fn parse_args<I>(mut args: I) -> AppResult<Option<PathBuf>>
where
    I: Iterator<Item = String>,
{
    let mut config_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let path = args
                    .next()
                    .ok_or_else(|| AppError::usage("--config needs a path"))?;
                config_path = Some(PathBuf::from(path));
            }
            other => return Err(AppError::usage(format!("unknown argument `{}`", other))),
        }
    }
    Ok(config_path)
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=till_core=trace` - Trace every session action
///
/// Logs go to stderr so they never interleave with the screen.
fn init_tracing(default_filter: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(default_filter))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    // Already installed when embedded in a test harness.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use till_core::{Catalog, Money, ProductId};

    fn drive(input: &str) -> (Session, String) {
        let mut session = Session::new(Catalog::demo());
        let config = TerminalConfig::default();
        let mut out = Vec::new();
        run_loop(input.as_bytes(), &mut out, &mut session, &config).unwrap();
        (session, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_checkout_session() {
        let (session, out) = drive("add 1\nadd 1\nadd 2\nbuy 2\nbuy 5.00\nquit\n");

        assert!(out.contains("need $0.50 more"));
        assert!(out.contains("Payment complete. Change: $2.50"));
        assert!(session.cart().is_empty());
        assert_eq!(session.sales().len(), 1);
        assert_eq!(session.sales()[0].total, Money::from_cents(250));
    }

    #[test]
    fn test_errors_do_not_stop_the_loop() {
        let (session, out) = drive("dance\nadd 42\nadd 3\n");

        assert!(out.contains("unknown command `dance`"));
        assert!(out.contains("Product not found: 42"));
        assert_eq!(session.cart().line(ProductId::new(3)).map(|l| l.quantity), Some(1));
    }

    #[test]
    fn test_quit_stops_reading() {
        let (session, _) = drive("quit\nadd 1\n");
        assert!(session.cart().is_empty());
    }

    #[test]
    fn test_end_of_input_ends_loop() {
        let (_, out) = drive("\n\n");
        assert_eq!(out, "> > > \n");
    }

    #[test]
    fn test_parse_args() {
        let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();

        assert_eq!(parse_args(args(&[]).into_iter()).unwrap(), None);
        assert_eq!(
            parse_args(args(&["--config", "/tmp/t.toml"]).into_iter()).unwrap(),
            Some(PathBuf::from("/tmp/t.toml"))
        );
        assert!(parse_args(args(&["--config"]).into_iter()).is_err());
        assert!(parse_args(args(&["--verbose"]).into_iter()).is_err());
    }
}
