//! Git executor port for running the `git` CLI.

use crate::error::Result;

/// The combined outcome of one git invocation.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// The exit code of the process.
    pub exit_code: i32,
    /// Interleaved stdout and stderr, for logging.
    pub output: String,
}

/// Executes git commands.
///
/// Handlers receive this capability explicitly instead of mutating a
/// process-global hook, so tests can record invocations or inject
/// failures per call site.
pub trait GitExecutor: Send + Sync {
    /// Runs `git` with the given arguments and returns its output.
    ///
    /// A non-zero exit is reported through [`GitOutput::exit_code`], not
    /// as an `Err`; spawn failures are errors.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned.
    fn run(&self, args: &[String]) -> Result<GitOutput>;
}
