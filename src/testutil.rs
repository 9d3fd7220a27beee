//! Shared fixtures for unit tests: canned changes and fake ports.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::{Error, Result};
use crate::gerrit::{AccountInfo, ChangeInfo, FetchInfo, ReviewInput, RevisionInfo};
use crate::ports::{GitExecutor, GitOutput, ReviewService};

pub(crate) const TEST_PROJECT: &str = "testproject";
pub(crate) const TEST_BRANCH: &str = "testbranch";
pub(crate) const TEST_SUBJECT: &str = "Test Subject";
pub(crate) const TEST_NAME: &str = "Testy McTestface";
pub(crate) const TEST_EMAIL: &str = "testy@example.com";

/// Builds a change with `revision_count` patch sets named `deadbeef0..`,
/// each created at `100 * number + 10_000 * index` seconds past the
/// epoch, so higher change numbers and later patch sets sort newer.
pub(crate) fn build_change(number: u64, revision_count: u32) -> ChangeInfo {
    let change_key = format!("Itestchange{number}");
    let mut revisions = HashMap::new();
    let mut current_revision = None;
    let mut updated = DateTime::<Utc>::UNIX_EPOCH;

    for index in 0..revision_count {
        let revision_id = format!("deadbeef{index}");
        let created = Utc
            .timestamp_opt(100 * i64::try_from(number).unwrap() + 10_000 * i64::from(index), 0)
            .single()
            .unwrap();
        let git_ref = format!("refs/changes/1/{number}/{}", index + 1);

        revisions.insert(
            revision_id.clone(),
            RevisionInfo {
                number: index + 1,
                created,
                uploader: Some(AccountInfo {
                    name: TEST_NAME.to_string(),
                    email: TEST_EMAIL.to_string(),
                }),
                git_ref: git_ref.clone(),
                fetch: HashMap::from([
                    (
                        "http".to_string(),
                        FetchInfo {
                            url: format!("https://gerrit.example.com/{TEST_PROJECT}.git"),
                            git_ref: git_ref.clone(),
                        },
                    ),
                    (
                        "fake".to_string(),
                        FetchInfo {
                            url: "fake://example.com".to_string(),
                            git_ref: "fake/ref".to_string(),
                        },
                    ),
                ]),
            },
        );
        current_revision = Some(revision_id);
        updated = created;
    }

    ChangeInfo {
        id: format!("{TEST_PROJECT}~{TEST_BRANCH}~{change_key}"),
        project: TEST_PROJECT.to_string(),
        branch: TEST_BRANCH.to_string(),
        change_id: change_key,
        subject: TEST_SUBJECT.to_string(),
        number,
        current_revision,
        updated,
        revisions,
    }
}

/// A recorded `set_review` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RecordedReview {
    pub change_id: String,
    pub revision_id: String,
    pub review: ReviewInput,
}

/// In-memory review service serving canned changes and recording calls.
pub(crate) struct FakeReviewService {
    changes: Vec<ChangeInfo>,
    pub queries: Mutex<Vec<String>>,
    pub reviews: Mutex<Vec<RecordedReview>>,
}

impl FakeReviewService {
    pub(crate) fn with_changes(changes: Vec<ChangeInfo>) -> Self {
        Self { changes, queries: Mutex::new(Vec::new()), reviews: Mutex::new(Vec::new()) }
    }
}

impl ReviewService for FakeReviewService {
    fn query_changes(&self, query: &str, _limit: u32, _options: &[&str]) -> Result<Vec<ChangeInfo>> {
        self.queries.lock().unwrap().push(query.to_string());
        // Newest first, as Gerrit serves change listings.
        let mut changes = self.changes.clone();
        changes.sort_by(|a, b| b.updated.cmp(&a.updated));
        Ok(changes)
    }

    fn get_change(&self, change_id: &str, _options: &[&str]) -> Result<ChangeInfo> {
        self.changes
            .iter()
            .find(|change| change.id == change_id || change.change_id == change_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("change {change_id}")))
    }

    fn set_review(&self, change_id: &str, revision_id: &str, review: &ReviewInput) -> Result<()> {
        self.reviews.lock().unwrap().push(RecordedReview {
            change_id: change_id.to_string(),
            revision_id: revision_id.to_string(),
            review: review.clone(),
        });
        Ok(())
    }
}

/// Git executor that records every invocation and reports success.
#[derive(Default)]
pub(crate) struct RecordingGit {
    pub calls: Mutex<Vec<Vec<String>>>,
}

impl RecordingGit {
    /// Returns the recorded call containing `keyword`, if any.
    pub(crate) fn call_with(&self, keyword: &str) -> Option<Vec<String>> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .find(|call| call.iter().any(|arg| arg == keyword))
            .cloned()
    }
}

impl GitExecutor for RecordingGit {
    fn run(&self, args: &[String]) -> Result<GitOutput> {
        self.calls.lock().unwrap().push(args.to_vec());
        Ok(GitOutput { exit_code: 0, output: String::new() })
    }
}

/// Git executor that fails (exit 128) once the named subcommand appears.
pub(crate) struct FailingGit {
    pub fail_on: &'static str,
}

impl GitExecutor for FailingGit {
    fn run(&self, args: &[String]) -> Result<GitOutput> {
        if args.iter().any(|arg| arg == self.fail_on) {
            return Ok(GitOutput {
                exit_code: 128,
                output: format!("fatal: {} refused", self.fail_on),
            });
        }
        Ok(GitOutput { exit_code: 0, output: String::new() })
    }
}
