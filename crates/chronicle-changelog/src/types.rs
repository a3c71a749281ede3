//! Changelog types

use std::collections::BTreeSet;

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use chronicle_core::Issue;
use chronicle_git::{CommitInfo, Signature, TagInfo};

/// Tag name used for the window anchored at an untagged start commit
pub const PSEUDO_TAG_NAME: &str = "current build";

/// Message carried by the pseudo tag
pub const PSEUDO_TAG_MESSAGE: &str = "Pseudo tag on latest commit";

/// Message carried by lightweight tags, which have none of their own
pub const LIGHTWEIGHT_TAG_MESSAGE: &str = "No tag message available";

/// Kind of a version tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagKind {
    /// A plain ref to a commit
    Lightweight,
    /// A tag object with tagger and message
    Annotated,
    /// Synthesized for an untagged newest window
    Pseudo,
}

/// A release marker bounding a version window
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// Tag name
    pub name: String,
    /// Tag kind
    pub kind: TagKind,
    /// Release date: tagger time for annotated tags, otherwise the commit date
    pub release_date: DateTime<FixedOffset>,
    /// Date of the tagged commit
    pub commit_date: DateTime<FixedOffset>,
    /// Who made the tag (the committer for lightweight and pseudo tags)
    pub tagger: Signature,
    /// Tag message
    pub message: String,
    /// Hash of the tagged commit
    pub commit_hash: String,
}

impl Tag {
    /// Build a tag from raw tag data and the commit it points at.
    ///
    /// Returns `None` if the raw tag does not point at `commit`.
    pub fn from_info(info: &TagInfo, commit: &CommitInfo) -> Option<Self> {
        if info.commit_hash.as_deref() != Some(commit.hash.as_str()) {
            return None;
        }

        let tag = match (&info.tagger, info.annotated) {
            (Some(tagger), true) => Self {
                name: info.name.clone(),
                kind: TagKind::Annotated,
                release_date: tagger.when,
                commit_date: commit.commit_date(),
                tagger: tagger.clone(),
                message: info.message.clone().unwrap_or_default(),
                commit_hash: commit.hash.clone(),
            },
            // Annotated tags without a tagger are treated like lightweight ones
            _ => Self {
                name: info.name.clone(),
                kind: if info.annotated {
                    TagKind::Annotated
                } else {
                    TagKind::Lightweight
                },
                release_date: commit.commit_date(),
                commit_date: commit.commit_date(),
                tagger: commit.committer.clone(),
                message: info
                    .message
                    .clone()
                    .unwrap_or_else(|| LIGHTWEIGHT_TAG_MESSAGE.to_string()),
                commit_hash: commit.hash.clone(),
            },
        };

        Some(tag)
    }

    /// The pseudo tag for an untagged start commit
    pub fn pseudo(commit: &CommitInfo) -> Self {
        Self {
            name: PSEUDO_TAG_NAME.to_string(),
            kind: TagKind::Pseudo,
            release_date: commit.commit_date(),
            commit_date: commit.commit_date(),
            tagger: commit.committer.clone(),
            message: PSEUDO_TAG_MESSAGE.to_string(),
            commit_hash: commit.hash.clone(),
        }
    }

    /// Check if this is a pseudo tag
    pub fn is_pseudo(&self) -> bool {
        self.kind == TagKind::Pseudo
    }
}

/// A commit with its issue references resolved.
///
/// Produced by the message parser; the source commit is left untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Commit hash
    pub hash: String,
    /// Short hash
    pub short_hash: String,
    /// Full message with references rewritten as links
    pub full_message: String,
    /// First line, with fix phrases removed
    pub short_message: String,
    /// Issues the commit declares fixed, in message order
    pub fix_references: Vec<Issue>,
}

/// A changelog section: a label group and the issues that landed in it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueGroup {
    /// Section title
    pub name: String,
    /// Issues in this section
    pub issues: BTreeSet<Issue>,
}

impl IssueGroup {
    /// Create an empty group
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            issues: BTreeSet::new(),
        }
    }

    /// Add an issue
    pub fn add_issue(&mut self, issue: Issue) {
        self.issues.insert(issue);
    }

    /// Check if group is empty
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

/// One version window of the changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRecord {
    /// The tag bounding this window
    pub tag: Tag,
    /// Commits in the window, newest first (only included ones once grouped)
    pub commits: Vec<CommitInfo>,
    /// Commits dropped by an exclusion marker
    pub excluded_commits: Vec<CommitInfo>,
    /// Parsed form of every included commit, same order
    pub parsed_commits: Vec<ParsedCommit>,
    /// Non-empty label groups, in configured order
    pub groups: Vec<IssueGroup>,
    /// Pull requests referenced from this window
    pub pull_requests: BTreeSet<Issue>,
}

impl VersionRecord {
    /// Create an empty window for a tag
    pub fn new(tag: Tag) -> Self {
        Self {
            tag,
            commits: Vec::new(),
            excluded_commits: Vec::new(),
            parsed_commits: Vec::new(),
            groups: Vec::new(),
            pull_requests: BTreeSet::new(),
        }
    }

    /// Add a commit to the window
    pub fn add_commit(&mut self, commit: CommitInfo) {
        self.commits.push(commit);
    }

    /// Find a group by name
    pub fn group(&self, name: &str) -> Option<&IssueGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Check if the window has any issues to report
    pub fn has_issues(&self) -> bool {
        !self.groups.is_empty() || !self.pull_requests.is_empty()
    }
}
