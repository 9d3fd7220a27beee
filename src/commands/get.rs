//! The `in` operation: materialize a change revision via git.

use std::io::{Read, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::auth::AuthManager;
use crate::context::ResourceContext;
use crate::error::{Error, Result};
use crate::ports::{GitExecutor, ReviewService};
use crate::protocol::{self, InRequest, MetadataField, ResourceResponse};
use crate::resolve;
use crate::version::VERSION_FILENAME;

/// Runs `in` end to end: decode request, fetch and check out the
/// revision into `destination`, emit the response.
///
/// # Errors
///
/// Fails on a malformed request, an unresolvable version or fetch
/// protocol, or any failed git command.
pub fn run(destination: &Path, input: impl Read, output: impl Write) -> Result<()> {
    let request: InRequest = protocol::read_request(input)?;
    let auth = AuthManager::new(&request.source)?;
    let ctx = ResourceContext::live(&request.source)?;
    let response =
        execute(ctx.review.as_ref(), ctx.git.as_ref(), &auth, &request, destination)?;
    protocol::write_response(output, &response)
}

/// Resolves the requested version, drives git, and assembles metadata.
///
/// The git sequence is `init`, `config color.ui always`, the auth
/// manager's config args (cookie file), `fetch <url> <ref>`, and
/// `checkout FETCH_HEAD`, each fatal on non-zero exit. The marker file
/// write is fatal too; failing to build the revision link or to append
/// the marker to `.git/info/exclude` only logs a warning.
pub(crate) fn execute(
    review: &dyn ReviewService,
    executor: &dyn GitExecutor,
    auth: &AuthManager,
    request: &InRequest,
    destination: &Path,
) -> Result<ResourceResponse> {
    let (change, revision) = resolve::find_change_revision(review, &request.version)?;
    let fetch = resolve::resolve_fetch_args(&request.params, &revision)?;

    git(executor, destination, &["init"])?;
    git(executor, destination, &["config", "color.ui", "always"])?;
    if let Some(config_args) = auth.git_config_args() {
        let args: Vec<&str> = config_args.iter().map(String::as_str).collect();
        git(executor, destination, &args)?;
    }
    git(executor, destination, &["fetch", &fetch.url, &fetch.git_ref])?;
    git(executor, destination, &["checkout", "FETCH_HEAD"])?;

    let mut metadata = vec![
        MetadataField { name: "project".to_string(), value: change.project.clone() },
        MetadataField { name: "subject".to_string(), value: change.subject.clone() },
    ];
    if let Some(uploader) = &revision.uploader {
        metadata.push(MetadataField {
            name: "uploader".to_string(),
            value: format!("{} <{}>", uploader.name, uploader.email),
        });
    }
    match resolve::build_revision_link(&request.source.url, change.number, revision.number) {
        Ok(link) => metadata.push(MetadataField { name: "link".to_string(), value: link }),
        Err(err) => warn!("error building revision link: {err}"),
    }

    let marker_path = destination.join(VERSION_FILENAME);
    request
        .version
        .write_to_file(&marker_path)
        .map_err(|err| Error::Config(format!("error writing {}: {err}", marker_path.display())))?;

    if let Err(err) = append_to_exclude(destination) {
        warn!("error adding {VERSION_FILENAME} to .git/info/exclude: {err}");
    }

    Ok(ResourceResponse { version: request.version.clone(), metadata })
}

/// Runs one git command in `dir`, logging the invocation and its
/// combined output. A non-zero exit is fatal for the invocation.
fn git(executor: &dyn GitExecutor, dir: &Path, args: &[&str]) -> Result<()> {
    let mut full_args: Vec<String> = vec!["-C".to_string(), dir.display().to_string()];
    full_args.extend(args.iter().map(|arg| (*arg).to_string()));

    info!("git {}", full_args.join(" "));
    let result = executor.run(&full_args)?;
    if !result.output.is_empty() {
        info!("git output:\n{}", result.output);
    }
    if result.exit_code != 0 {
        return Err(Error::Git(format!(
            "git {} exited with status {}: {}",
            args.first().copied().unwrap_or_default(),
            result.exit_code,
            result.output.trim()
        )));
    }
    Ok(())
}

/// Keeps the marker file out of the fetched repository's own status.
fn append_to_exclude(destination: &Path) -> Result<()> {
    let exclude = destination.join(".git").join("info").join("exclude");
    if let Some(parent) = exclude.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut file = std::fs::OpenOptions::new().create(true).append(true).open(&exclude)?;
    writeln!(file, "\n/{VERSION_FILENAME}")?;
    Ok(())
}
