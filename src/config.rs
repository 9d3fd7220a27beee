//! Resource configuration decoded from the pipeline request.
//!
//! `Source` is shared by all three operations; `InParams` and `OutParams`
//! carry per-operation knobs. Unknown JSON fields are ignored so that the
//! adapter stays forward-compatible with pipeline-side additions.

use std::collections::HashMap;

use serde::Deserialize;

/// Connection and query settings for the Gerrit instance.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Source {
    /// Base URL of the Gerrit instance, e.g. `https://review.example.com`.
    #[serde(default)]
    pub url: String,
    /// Change query used by `check`; defaults to `status:open`.
    #[serde(default)]
    pub query: Option<String>,
    /// Restrict `check` to a single project.
    #[serde(default)]
    pub project: Option<String>,
    /// Restrict `check` to a single branch.
    #[serde(default)]
    pub branch: Option<String>,
    /// HTTP basic auth username for authenticated REST calls.
    #[serde(default)]
    pub username: Option<String>,
    /// HTTP basic auth password.
    #[serde(default)]
    pub password: Option<String>,
    /// Git cookie-jar content, materialized to a temp file for git and
    /// parsed for REST Cookie headers.
    #[serde(default)]
    pub cookies: Option<String>,
}

/// Parameters for the `in` operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InParams {
    /// Fetch protocol to use, overriding the default preference order.
    #[serde(default)]
    pub fetch_protocol: Option<String>,
    /// Fetch URL to use verbatim, overriding protocol selection entirely.
    #[serde(default)]
    pub fetch_url: Option<String>,
}

/// Parameters for the `out` operation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct OutParams {
    /// Name of the input resource directory holding the fetched change.
    #[serde(default)]
    pub repository: Option<String>,
    /// Review message; fallback when `message_file` cannot be read.
    #[serde(default)]
    pub message: Option<String>,
    /// Path (relative to the sources directory) of a file holding the
    /// review message.
    #[serde(default)]
    pub message_file: Option<String>,
    /// Label scores to apply, e.g. `{"Code-Review": 1}`.
    #[serde(default)]
    pub labels: HashMap<String, i32>,
}

/// Treats empty strings from the pipeline request the same as absent values.
pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
