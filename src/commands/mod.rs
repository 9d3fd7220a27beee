//! Command dispatch and handlers.
//!
//! Each handler has an outer `run` that decodes the request from stdin,
//! wires up live capabilities, and encodes the response to stdout, and an
//! inner `execute` that holds the actual logic against injected ports.

pub mod check;
pub mod get;
pub mod put;

use std::io;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a parsed command to its handler, connected to the process's
/// stdin and stdout.
///
/// # Errors
///
/// Returns the handler's error; each invocation fails at most once and
/// never retries.
pub fn dispatch(command: &Command) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    match command {
        Command::Check => check::run(stdin.lock(), stdout.lock()),
        Command::In { destination } => get::run(destination, stdin.lock(), stdout.lock()),
        Command::Out { sources } => put::run(sources, stdin.lock(), stdout.lock()),
    }
}
