//! The `check` operation: discover versions newer than a cursor.

use std::io::{Read, Write};

use crate::config::{self, Source};
use crate::context::ResourceContext;
use crate::error::Result;
use crate::ports::ReviewService;
use crate::protocol::{self, CheckRequest};
use crate::version::Version;

/// Runs `check` end to end: decode request, query Gerrit, emit versions.
///
/// # Errors
///
/// Fails on a malformed request, an unreachable service, or an
/// undecodable response.
pub fn run(input: impl Read, output: impl Write) -> Result<()> {
    let request: CheckRequest = protocol::read_request(input)?;
    let ctx = ResourceContext::live(&request.source)?;
    let versions = execute(ctx.review.as_ref(), &request.source, request.version.as_ref())?;
    protocol::write_response(output, &versions)
}

/// Queries for candidate versions and applies the cursor semantics.
///
/// One candidate per change, taken from its current revision. With no
/// cursor only the newest candidate is returned. With a cursor, every
/// candidate created at or after the cursor's timestamp is returned,
/// oldest first, so that re-checking the same cursor is idempotent.
///
/// # Errors
///
/// Propagates review-service failures.
pub(crate) fn execute(
    service: &dyn ReviewService,
    source: &Source,
    cursor: Option<&Version>,
) -> Result<Vec<Version>> {
    let changes = service.query_changes(&build_query(source), 0, &["CURRENT_REVISION"])?;

    // (change number, candidate) pairs so ties on the timestamp have a
    // deterministic order: newer change numbers first.
    let mut candidates: Vec<(u64, Version)> = changes
        .iter()
        .filter_map(|change| {
            let revision_id = change.current_revision.clone()?;
            let revision = change.revisions.get(&revision_id)?;
            Some((
                change.number,
                Version {
                    change_id: change.id.clone(),
                    revision: revision_id,
                    created: revision.created,
                },
            ))
        })
        .collect();
    candidates.sort_by(|a, b| b.1.created.cmp(&a.1.created).then(b.0.cmp(&a.0)));

    let mut versions: Vec<Version> = match cursor {
        None => candidates.into_iter().map(|(_, version)| version).take(1).collect(),
        Some(cursor) => candidates
            .into_iter()
            .map(|(_, version)| version)
            .filter(|version| version.created >= cursor.created || version == cursor)
            .collect(),
    };
    versions.reverse();
    Ok(versions)
}

/// Composes the change query from the source configuration.
fn build_query(source: &Source) -> String {
    let mut terms =
        vec![config::non_empty(&source.query).unwrap_or("status:open").to_string()];
    if let Some(project) = config::non_empty(&source.project) {
        terms.push(format!("project:{project}"));
    }
    if let Some(branch) = config::non_empty(&source.branch) {
        terms.push(format!("branch:{branch}"));
    }
    terms.join(" ")
}
