//! Pipeline request/response documents.
//!
//! Requests arrive as one JSON document on stdin; responses leave as one
//! JSON document on stdout. Nothing else may be written to stdout — all
//! logging goes to stderr.

use std::io::{Read, Write};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::{InParams, OutParams, Source};
use crate::error::{Error, Result};
use crate::version::Version;

/// Request body for `check`.
#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    /// Resource source configuration.
    pub source: Source,
    /// Cursor: the last version the pipeline has seen, if any.
    #[serde(default)]
    pub version: Option<Version>,
}

/// Request body for `in`.
#[derive(Debug, Deserialize)]
pub struct InRequest {
    /// Resource source configuration.
    pub source: Source,
    /// The version to materialize.
    pub version: Version,
    /// Fetch overrides.
    #[serde(default)]
    pub params: InParams,
}

/// Request body for `out`.
#[derive(Debug, Deserialize)]
pub struct OutRequest {
    /// Resource source configuration.
    pub source: Source,
    /// Review parameters.
    #[serde(default)]
    pub params: OutParams,
}

/// One metadata entry surfaced to the pipeline UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataField {
    /// Field name, e.g. `project`.
    pub name: String,
    /// Field value.
    pub value: String,
}

/// Response body for `in` and `out`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResourceResponse {
    /// The version that was materialized or published.
    pub version: Version,
    /// Metadata entries for display.
    pub metadata: Vec<MetadataField>,
}

/// Decodes one request document from the reader.
///
/// # Errors
///
/// Returns [`Error::Config`] when the document is not valid JSON of the
/// expected shape.
pub fn read_request<T: DeserializeOwned>(reader: impl Read) -> Result<T> {
    serde_json::from_reader(reader).map_err(|err| Error::Config(format!("malformed request: {err}")))
}

/// Encodes one response document to the writer.
///
/// # Errors
///
/// Returns an error when serialization or the write fails.
pub fn write_response<T: Serialize>(mut writer: impl Write, response: &T) -> Result<()> {
    serde_json::to_writer(&mut writer, response)?;
    writeln!(writer)?;
    Ok(())
}
