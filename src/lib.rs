//! Concourse-style resource adapter for Gerrit code review.
//!
//! Three operations, one process invocation each: `check` discovers new
//! change revisions, `in` fetches one revision into a working directory
//! via git, and `out` posts a review back. Requests arrive as JSON on
//! stdin; responses leave as JSON on stdout; logs go to stderr.

pub mod adapters;
pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod gerrit;
pub mod ports;
pub mod protocol;
pub mod resolve;
pub mod version;

#[cfg(test)]
pub(crate) mod testutil;

pub use error::{Error, Result};
