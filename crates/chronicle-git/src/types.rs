//! Git types

use std::hash::{Hash, Hasher};

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

/// A person and a point in time, as recorded by git
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Signature {
    /// Name
    pub name: String,
    /// Email
    pub email: String,
    /// Timestamp, in the signer's own UTC offset
    pub when: DateTime<FixedOffset>,
}

impl Signature {
    /// Create a new signature
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        when: DateTime<FixedOffset>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            when,
        }
    }
}

/// Information about a git commit.
///
/// Two commits are the same commit when their hashes are equal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Full commit message
    pub message: String,
    /// Author identity
    pub author: Signature,
    /// Committer identity
    pub committer: Signature,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: Signature,
        committer: Signature,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            author,
            committer,
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }

    /// Commit date (committer time)
    pub fn commit_date(&self) -> DateTime<FixedOffset> {
        self.committer.when
    }

    /// Author date
    pub fn author_date(&self) -> DateTime<FixedOffset> {
        self.author.when
    }
}

impl PartialEq for CommitInfo {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for CommitInfo {}

impl Hash for CommitInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hash.hash(state);
    }
}

/// Raw information about a git tag, as read from the repository
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Hash of the commit the tag points to, if it points to a commit at all
    pub commit_hash: Option<String>,
    /// Whether this is an annotated tag
    pub annotated: bool,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Tagger (for annotated tags)
    pub tagger: Option<Signature>,
}

impl TagInfo {
    /// Create a lightweight tag pointing at a commit
    pub fn lightweight(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: Some(commit_hash.into()),
            annotated: false,
            message: None,
            tagger: None,
        }
    }

    /// Create an annotated tag pointing at a commit
    pub fn annotated(
        name: impl Into<String>,
        commit_hash: impl Into<String>,
        tagger: Signature,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            commit_hash: Some(commit_hash.into()),
            annotated: true,
            message: Some(message.into()),
            tagger: Some(tagger),
        }
    }

    /// Create a tag whose target could not be resolved to a commit
    pub fn dangling(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            commit_hash: None,
            annotated: false,
            message: None,
            tagger: None,
        }
    }
}
