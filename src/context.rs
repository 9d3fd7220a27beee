//! Service context bundling the port trait objects.

use crate::adapters::live::{GerritClient, LiveGitExecutor};
use crate::config::Source;
use crate::error::Result;
use crate::ports::{GitExecutor, ReviewService};

/// Bundles the review-service and git capabilities for one invocation.
///
/// Handlers take this context instead of reaching for globals, so tests
/// can wire in fakes per call.
pub struct ResourceContext {
    /// Review-service access.
    pub review: Box<dyn ReviewService>,
    /// Git execution.
    pub git: Box<dyn GitExecutor>,
}

impl ResourceContext {
    /// Creates a live context talking to the configured Gerrit instance
    /// and the real `git` CLI.
    ///
    /// # Errors
    ///
    /// Returns an error when the source URL is missing or invalid.
    pub fn live(source: &Source) -> Result<Self> {
        Ok(Self {
            review: Box::new(GerritClient::from_source(source)?),
            git: Box::new(LiveGitExecutor),
        })
    }
}
