//! Crate-wide error type.
//!
//! Every failure in a resource invocation funnels into [`Error`]; the
//! binary prints it once and exits non-zero. There is no retry layer.

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes of a single resource invocation.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed request, missing parameter, or other configuration problem.
    #[error("configuration error: {0}")]
    Config(String),

    /// A requested entity (revision, fetch protocol) does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// A base or endpoint URL could not be parsed or extended.
    #[error("invalid url: {0}")]
    InvalidUrl(String),

    /// A git subprocess could not be spawned or exited non-zero.
    #[error("git failed: {0}")]
    Git(String),

    /// Gerrit answered with a non-success HTTP status.
    #[error("gerrit returned {status}: {body}")]
    Service {
        /// The HTTP status code of the response.
        status: u16,
        /// The response body, useful for diagnosing rejected requests.
        body: String,
    },

    /// Transport-level HTTP failure.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON (de)serialization failure.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Filesystem or process I/O failure.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
