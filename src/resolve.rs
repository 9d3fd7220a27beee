//! Fetch-argument and version resolution.
//!
//! Maps an abstract version (change + revision) onto concrete git fetch
//! arguments and web links, and resolves versions against the review
//! service.

use reqwest::Url;

use crate::config::{self, InParams};
use crate::error::{Error, Result};
use crate::gerrit::{ChangeInfo, RevisionInfo};
use crate::ports::ReviewService;
use crate::version::Version;

/// Protocols tried in order when the request names neither a protocol nor
/// a URL. Authenticated `http` wins over `anonymous http`.
pub const DEFAULT_FETCH_PROTOCOLS: &[&str] = &["http", "anonymous http"];

/// A resolved `(url, ref)` pair handed to `git fetch`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchArgs {
    /// Remote URL to fetch from.
    pub url: String,
    /// Ref to fetch.
    pub git_ref: String,
}

/// Resolves the fetch URL and ref for a revision.
///
/// An explicit `fetch_url` wins and is paired with the revision's native
/// ref. Otherwise the explicit `fetch_protocol` is used, falling back to
/// the first entry of [`DEFAULT_FETCH_PROTOCOLS`] present in the
/// revision's fetch map.
///
/// # Errors
///
/// Returns [`Error::NotFound`] when the selected protocol has no fetch
/// entry; there is no silent fallback.
pub fn resolve_fetch_args(params: &InParams, revision: &RevisionInfo) -> Result<FetchArgs> {
    if let Some(url) = config::non_empty(&params.fetch_url) {
        return Ok(FetchArgs { url: url.to_string(), git_ref: revision.git_ref.clone() });
    }

    let protocol = match config::non_empty(&params.fetch_protocol) {
        Some(explicit) => explicit.to_string(),
        None => DEFAULT_FETCH_PROTOCOLS
            .iter()
            .find(|candidate| revision.fetch.contains_key(**candidate))
            .map(|candidate| (*candidate).to_string())
            .unwrap_or_default(),
    };

    match revision.fetch.get(&protocol) {
        Some(info) => Ok(FetchArgs { url: info.url.clone(), git_ref: info.git_ref.clone() }),
        None => Err(Error::NotFound(format!("no fetch info for protocol {protocol:?}"))),
    }
}

/// Builds the web link for one patch set: `<base>/c/<change>/<patchset>`.
///
/// # Errors
///
/// Returns [`Error::InvalidUrl`] when the base URL cannot be parsed or
/// extended.
pub fn build_revision_link(
    base_url: &str,
    change_number: u64,
    patch_set_number: u32,
) -> Result<String> {
    let mut url =
        Url::parse(base_url).map_err(|err| Error::InvalidUrl(format!("{base_url}: {err}")))?;
    url.path_segments_mut()
        .map_err(|()| Error::InvalidUrl(format!("{base_url} cannot be a base")))?
        .pop_if_empty()
        .push("c")
        .push(&change_number.to_string())
        .push(&patch_set_number.to_string());
    Ok(url.into())
}

/// Resolves a version to its change and revision.
///
/// # Errors
///
/// Returns an error when the change cannot be fetched, or
/// [`Error::NotFound`] when the revision is absent from the change —
/// a version must always name a revision that exists within its change.
pub fn find_change_revision(
    service: &dyn ReviewService,
    version: &Version,
) -> Result<(ChangeInfo, RevisionInfo)> {
    let change = service.get_change(&version.change_id, &["ALL_REVISIONS"])?;
    let revision = change.revisions.get(&version.revision).cloned().ok_or_else(|| {
        Error::NotFound(format!(
            "revision {} not found in change {}",
            version.revision, change.id
        ))
    })?;
    Ok((change, revision))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{build_change, FakeReviewService};
    use chrono::{TimeZone, Utc};
    use std::collections::HashMap;

    fn revision_with_fetch(protocols: &[(&str, &str, &str)]) -> RevisionInfo {
        RevisionInfo {
            number: 1,
            created: Utc.timestamp_opt(0, 0).single().unwrap(),
            uploader: None,
            git_ref: "refs/changes/1/1/1".to_string(),
            fetch: protocols
                .iter()
                .map(|(proto, url, git_ref)| {
                    (
                        (*proto).to_string(),
                        crate::gerrit::FetchInfo {
                            url: (*url).to_string(),
                            git_ref: (*git_ref).to_string(),
                        },
                    )
                })
                .collect(),
        }
    }

    #[test]
    fn prefers_http_over_anonymous_http() {
        let revision = revision_with_fetch(&[
            ("http", "https://auth.example.com/p", "refs/a"),
            ("anonymous http", "https://anon.example.com/p", "refs/b"),
        ]);
        let args = resolve_fetch_args(&InParams::default(), &revision).unwrap();
        assert_eq!(args.url, "https://auth.example.com/p");
        assert_eq!(args.git_ref, "refs/a");
    }

    #[test]
    fn falls_back_to_anonymous_http() {
        let revision =
            revision_with_fetch(&[("anonymous http", "https://anon.example.com/p", "refs/b")]);
        let args = resolve_fetch_args(&InParams::default(), &revision).unwrap();
        assert_eq!(args.url, "https://anon.example.com/p");
    }

    #[test]
    fn explicit_protocol_overrides_preference() {
        let revision = revision_with_fetch(&[
            ("http", "https://auth.example.com/p", "refs/a"),
            ("fake", "fake://example.com", "fake/ref"),
        ]);
        let params =
            InParams { fetch_protocol: Some("fake".to_string()), ..InParams::default() };
        let args = resolve_fetch_args(&params, &revision).unwrap();
        assert_eq!(args.url, "fake://example.com");
        assert_eq!(args.git_ref, "fake/ref");
    }

    #[test]
    fn explicit_url_keeps_native_ref() {
        let revision = revision_with_fetch(&[("http", "https://auth.example.com/p", "refs/a")]);
        let params = InParams { fetch_url: Some("some://otherurl".to_string()), ..InParams::default() };
        let args = resolve_fetch_args(&params, &revision).unwrap();
        assert_eq!(args.url, "some://otherurl");
        assert_eq!(args.git_ref, "refs/changes/1/1/1");
    }

    #[test]
    fn missing_protocol_is_not_found() {
        let revision = revision_with_fetch(&[("ssh", "ssh://example.com/p", "refs/a")]);
        let err = resolve_fetch_args(&InParams::default(), &revision).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {err:?}");

        let params =
            InParams { fetch_protocol: Some("sftp".to_string()), ..InParams::default() };
        let err = resolve_fetch_args(&params, &revision).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn revision_link_appends_to_base_path() {
        let link = build_revision_link("https://example.com/path", 1, 1).unwrap();
        assert_eq!(link, "https://example.com/path/c/1/1");
    }

    #[test]
    fn revision_link_handles_trailing_slash() {
        let link = build_revision_link("https://example.com/path/", 42, 3).unwrap();
        assert_eq!(link, "https://example.com/path/c/42/3");
    }

    #[test]
    fn revision_link_without_path() {
        let link = build_revision_link("https://example.com", 7, 2).unwrap();
        assert_eq!(link, "https://example.com/c/7/2");
    }

    #[test]
    fn revision_link_rejects_garbage_base() {
        let err = build_revision_link("not a url", 1, 1).unwrap_err();
        assert!(matches!(err, Error::InvalidUrl(_)), "got {err:?}");
    }

    #[test]
    fn finds_revision_within_change() {
        let service = FakeReviewService::with_changes(vec![build_change(1, 3)]);
        let version = Version {
            change_id: "Itestchange1".to_string(),
            revision: "deadbeef1".to_string(),
            created: Utc.timestamp_opt(100, 0).single().unwrap(),
        };

        let (change, revision) = find_change_revision(&service, &version).unwrap();
        assert_eq!(change.number, 1);
        assert_eq!(revision.number, 2);
        assert_eq!(revision.git_ref, "refs/changes/1/1/2");
    }

    #[test]
    fn missing_revision_in_change_is_not_found() {
        let service = FakeReviewService::with_changes(vec![build_change(1, 1)]);
        let version = Version {
            change_id: "Itestchange1".to_string(),
            revision: "cafef00d".to_string(),
            created: Utc.timestamp_opt(100, 0).single().unwrap(),
        };

        let err = find_change_revision(&service, &version).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)), "got {err:?}");
    }

    #[test]
    fn unknown_change_propagates_error() {
        let service = FakeReviewService::with_changes(Vec::new());
        let version = Version {
            change_id: "Inope".to_string(),
            revision: "deadbeef0".to_string(),
            created: Utc.timestamp_opt(0, 0).single().unwrap(),
        };
        assert!(find_change_revision(&service, &version).is_err());
    }

    #[test]
    fn default_resolution_ignores_unknown_protocols() {
        // A revision advertising an unrelated protocol before the defaults
        // must still resolve to "http".
        let mut fetch = HashMap::new();
        fetch.insert(
            "zz-custom".to_string(),
            crate::gerrit::FetchInfo { url: "zz://x".into(), git_ref: "r".into() },
        );
        fetch.insert(
            "http".to_string(),
            crate::gerrit::FetchInfo { url: "https://x".into(), git_ref: "r2".into() },
        );
        let revision = RevisionInfo {
            number: 1,
            created: Utc.timestamp_opt(0, 0).single().unwrap(),
            uploader: None,
            git_ref: "refs/changes/1/1/1".to_string(),
            fetch,
        };
        let args = resolve_fetch_args(&InParams::default(), &revision).unwrap();
        assert_eq!(args.url, "https://x");
    }
}
