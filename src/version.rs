//! Resource versions and the on-disk marker file.
//!
//! A version names one patch set of one change. The `in` operation writes
//! the resolved version as a small JSON marker into the working directory
//! so that a later `out` can address the same change and revision.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Name of the marker file written into the fetched working directory.
pub const VERSION_FILENAME: &str = ".gerrit_version.json";

/// Identifies a single reviewable unit: one revision of one change.
///
/// `created` is carried for ordering during `check` but is excluded from
/// equality; two versions are the same unit whenever change and revision
/// match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Version {
    /// Change identifier, stable across patch sets.
    pub change_id: String,
    /// Revision identifier (the patch-set commit hash).
    pub revision: String,
    /// Creation time of the revision, used for ordering candidates.
    pub created: DateTime<Utc>,
}

impl PartialEq for Version {
    fn eq(&self, other: &Self) -> bool {
        self.change_id == other.change_id && self.revision == other.revision
    }
}

impl Eq for Version {}

impl Version {
    /// Writes the version as JSON to `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the write fails.
    pub fn write_to_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Reads a version back from a JSON marker file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn read_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&contents)?)
    }
}
