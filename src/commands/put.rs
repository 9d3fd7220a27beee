//! The `out` operation: publish a review for a fetched revision.

use std::io::{Read, Write};
use std::path::Path;

use tracing::warn;

use crate::config;
use crate::context::ResourceContext;
use crate::error::{Error, Result};
use crate::gerrit::ReviewInput;
use crate::ports::ReviewService;
use crate::protocol::{self, OutRequest, ResourceResponse};
use crate::version::{Version, VERSION_FILENAME};

/// Runs `out` end to end: decode request, read the marker file, submit
/// the review, emit the response.
///
/// # Errors
///
/// Fails on a malformed request, a missing `repository` param, an
/// unreadable marker file, or a rejected review submission.
pub fn run(sources: &Path, input: impl Read, output: impl Write) -> Result<()> {
    let request: OutRequest = protocol::read_request(input)?;
    let ctx = ResourceContext::live(&request.source)?;
    let response = execute(ctx.review.as_ref(), &request, sources)?;
    protocol::write_response(output, &response)
}

/// Reads the marker written by `in` and posts message + labels against
/// exactly that change and revision.
///
/// A configured `message_file` takes precedence over `message`; when the
/// file cannot be read the inline message is the fallback, and an empty
/// fallback is fatal.
pub(crate) fn execute(
    review: &dyn ReviewService,
    request: &OutRequest,
    sources: &Path,
) -> Result<ResourceResponse> {
    let params = &request.params;
    let repository = config::non_empty(&params.repository)
        .ok_or_else(|| Error::Config("param repository required".to_string()))?;

    let marker_path = sources.join(repository).join(VERSION_FILENAME);
    let version = Version::read_from_file(&marker_path)
        .map_err(|err| Error::Config(format!("error reading {}: {err}", marker_path.display())))?;

    let mut message = params.message.clone().unwrap_or_default();
    if let Some(message_file) = config::non_empty(&params.message_file) {
        let path = sources.join(message_file);
        match std::fs::read_to_string(&path) {
            Ok(contents) => message = contents,
            Err(err) => {
                warn!("error reading message file {}: {err}", path.display());
                if message.is_empty() {
                    return Err(Error::Config(format!(
                        "message file {message_file} unreadable and no fallback message given"
                    )));
                }
                warn!("using fallback message {message:?}");
            }
        }
    }

    let input = ReviewInput { message, labels: params.labels.clone() };
    review.set_review(&version.change_id, &version.revision, &input)?;

    Ok(ResourceResponse { version, metadata: Vec::new() })
}
