//! Review-service port for Gerrit REST queries.

use crate::error::Result;
use crate::gerrit::{ChangeInfo, ReviewInput};

/// Read and write access to a code-review service.
///
/// Abstracting the REST surface lets the command handlers run against a
/// fake service in tests.
pub trait ReviewService: Send + Sync {
    /// Lists changes matching `query`, with revision detail per `options`
    /// (e.g. `CURRENT_REVISION`). A `limit` of zero leaves the server
    /// default in place.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the response cannot be
    /// decoded.
    fn query_changes(&self, query: &str, limit: u32, options: &[&str]) -> Result<Vec<ChangeInfo>>;

    /// Looks up a single change by id, with revision detail per `options`.
    ///
    /// # Errors
    ///
    /// Returns an error if the change does not exist or the request fails.
    fn get_change(&self, change_id: &str, options: &[&str]) -> Result<ChangeInfo>;

    /// Posts a review for one revision of one change.
    ///
    /// # Errors
    ///
    /// Returns an error if the submission is rejected or the request fails.
    fn set_review(&self, change_id: &str, revision_id: &str, review: &ReviewInput) -> Result<()>;
}
