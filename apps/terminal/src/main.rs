//! # Till POS Terminal Entry Point
//!
//! See `till_terminal::run` for the startup sequence.

use std::process::ExitCode;

fn main() -> ExitCode {
    match till_terminal::run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("till-terminal: {}", err);
            ExitCode::FAILURE
        }
    }
}
