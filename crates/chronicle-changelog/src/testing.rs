//! Test fixtures shared by the engine tests

use std::collections::HashMap;

use chrono::{FixedOffset, TimeZone};

use chronicle_core::{Issue, IssueError, IssueRef, IssueTracker};
use chronicle_git::{CommitInfo, Signature, TagInfo};

/// In-memory issue tracker
#[derive(Default)]
pub(crate) struct FakeTracker {
    issues: HashMap<IssueRef, Issue>,
}

impl FakeTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_issue(mut self, reference: IssueRef, issue: Issue) -> Self {
        self.issues.insert(reference, issue);
        self
    }
}

impl IssueTracker for FakeTracker {
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError> {
        self.issues
            .get(reference)
            .cloned()
            .ok_or_else(|| IssueError::NotFound(reference.to_string()))
    }
}

pub(crate) fn signature(name: &str, day: u32) -> Signature {
    let offset = FixedOffset::east_opt(0).unwrap();
    Signature::new(
        name,
        format!("{}@example.com", name.to_lowercase()),
        offset.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap(),
    )
}

/// A commit with fixed identities
pub(crate) fn commit(hash: &str, message: &str) -> CommitInfo {
    commit_on(hash, message, 1)
}

/// A commit made on a given day of January 2024
pub(crate) fn commit_on(hash: &str, message: &str, day: u32) -> CommitInfo {
    CommitInfo::new(
        hash,
        message,
        signature("Author", day),
        signature("Committer", day),
    )
}

/// A lightweight tag on a commit
pub(crate) fn tag(name: &str, commit: &CommitInfo) -> TagInfo {
    TagInfo::lightweight(name, &commit.hash)
}
