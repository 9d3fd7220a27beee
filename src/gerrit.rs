//! Gerrit REST wire model.
//!
//! Only the fields this adapter consumes are modeled; serde ignores the
//! rest of Gerrit's (large) response documents.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A change as returned by the `/changes/` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangeInfo {
    /// Triplet id `<project>~<branch>~<change-id>`, unique per instance.
    pub id: String,
    /// Project the change belongs to.
    pub project: String,
    /// Destination branch.
    pub branch: String,
    /// The `Change-Id` footer value.
    pub change_id: String,
    /// First line of the commit message.
    pub subject: String,
    /// Server-assigned numeric change number.
    #[serde(rename = "_number")]
    pub number: u64,
    /// Revision hash of the current patch set, when requested.
    #[serde(default)]
    pub current_revision: Option<String>,
    /// Last update time of the change.
    #[serde(with = "timestamp")]
    pub updated: DateTime<Utc>,
    /// Revisions keyed by commit hash; populated by the
    /// `CURRENT_REVISION` / `ALL_REVISIONS` query options.
    #[serde(default)]
    pub revisions: HashMap<String, RevisionInfo>,
}

/// One patch set of a change.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RevisionInfo {
    /// Patch-set number, starting at 1.
    #[serde(rename = "_number")]
    pub number: u32,
    /// Creation time of the patch set.
    #[serde(with = "timestamp")]
    pub created: DateTime<Utc>,
    /// Account that uploaded the patch set.
    #[serde(default)]
    pub uploader: Option<AccountInfo>,
    /// Ref the patch set can be fetched from.
    #[serde(rename = "ref")]
    pub git_ref: String,
    /// Fetch endpoints keyed by protocol name, e.g. `http`.
    #[serde(default)]
    pub fetch: HashMap<String, FetchInfo>,
}

/// A Gerrit account reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccountInfo {
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Email address.
    #[serde(default)]
    pub email: String,
}

/// Fetch endpoint for one protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchInfo {
    /// URL to fetch from.
    pub url: String,
    /// Ref to fetch.
    #[serde(rename = "ref")]
    pub git_ref: String,
}

/// Body of a `POST .../review` request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReviewInput {
    /// Cover message for the review.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
    /// Label scores to apply.
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub labels: HashMap<String, i32>,
}

/// Serde adapter for Gerrit's `YYYY-MM-DD HH:MM:SS.nnnnnnnnn` UTC
/// timestamp format.
pub mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    const WRITE_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.9f";
    const READ_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

    /// Formats `value` in Gerrit's wire format.
    ///
    /// # Errors
    ///
    /// Propagates serializer failures.
    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(WRITE_FORMAT).to_string())
    }

    /// Parses a timestamp in Gerrit's wire format.
    ///
    /// # Errors
    ///
    /// Fails when the string does not match the expected format.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        let naive = NaiveDateTime::parse_from_str(&raw, READ_FORMAT)
            .map_err(serde::de::Error::custom)?;
        Ok(naive.and_utc())
    }
}
