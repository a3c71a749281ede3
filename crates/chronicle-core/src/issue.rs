//! Issue model and the issue-tracker seam

use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::IssueError;

/// An issue or pull request, independent of the hosting service
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Issue number within its repository
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Issue body
    pub body: String,
    /// Browser URL of the issue
    pub html_url: String,
    /// Label names attached to the issue
    pub labels: BTreeSet<String>,
    /// Whether this is a pull request rather than a plain issue
    pub pull_request: bool,
}

impl Issue {
    /// Create a new issue with no labels
    pub fn new(number: u64, html_url: impl Into<String>) -> Self {
        Self {
            number,
            title: String::new(),
            body: String::new(),
            html_url: html_url.into(),
            labels: BTreeSet::new(),
            pull_request: false,
        }
    }

    /// Set the title
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Add a label
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.labels.insert(label.into());
        self
    }

    /// Mark as pull request
    pub fn with_pull_request(mut self, pull_request: bool) -> Self {
        self.pull_request = pull_request;
        self
    }

    /// Check if the issue carries a label
    pub fn has_label(&self, label: &str) -> bool {
        self.labels.contains(label)
    }
}

// Identity is (number, html_url); title, labels and body are payload.
impl PartialEq for Issue {
    fn eq(&self, other: &Self) -> bool {
        self.number == other.number && self.html_url == other.html_url
    }
}

impl Eq for Issue {}

impl Hash for Issue {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.number.hash(state);
        self.html_url.hash(state);
    }
}

impl Ord for Issue {
    fn cmp(&self, other: &Self) -> Ordering {
        self.html_url
            .cmp(&other.html_url)
            .then(self.number.cmp(&other.number))
    }
}

impl PartialOrd for Issue {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A reference to an issue as written in a commit message.
///
/// `#12` leaves both `owner` and `repo` empty (the current repository),
/// `tools#12` sets only `repo` (same owner), `acme/tools#12` sets both.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct IssueRef {
    /// Repository owner, if qualified
    pub owner: Option<String>,
    /// Repository name, if qualified
    pub repo: Option<String>,
    /// Issue number
    pub number: u64,
}

impl IssueRef {
    /// A reference into the current repository
    pub fn local(number: u64) -> Self {
        Self {
            owner: None,
            repo: None,
            number,
        }
    }

    /// A reference into another repository of the current owner
    pub fn in_repo(repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: None,
            repo: Some(repo.into()),
            number,
        }
    }

    /// A fully qualified reference
    pub fn qualified(owner: impl Into<String>, repo: impl Into<String>, number: u64) -> Self {
        Self {
            owner: Some(owner.into()),
            repo: Some(repo.into()),
            number,
        }
    }
}

impl fmt::Display for IssueRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.owner, &self.repo) {
            (Some(owner), Some(repo)) => write!(f, "{}/{}#{}", owner, repo, self.number),
            (None, Some(repo)) => write!(f, "{}#{}", repo, self.number),
            _ => write!(f, "#{}", self.number),
        }
    }
}

/// Looks up issues on a hosting service.
///
/// Implementations block until the lookup completes. Any error is treated by
/// the changelog engine as "leave the reference unexpanded".
pub trait IssueTracker: Send + Sync {
    /// Fetch the issue a reference points at
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError>;

    /// The reference with the parts it leaves out filled in, so two
    /// spellings of the same issue compare equal
    fn canonical(&self, reference: &IssueRef) -> IssueRef {
        reference.clone()
    }
}

impl<T: IssueTracker + ?Sized> IssueTracker for &T {
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError> {
        (**self).issue(reference)
    }

    fn canonical(&self, reference: &IssueRef) -> IssueRef {
        (**self).canonical(reference)
    }
}

impl<T: IssueTracker + ?Sized> IssueTracker for Box<T> {
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError> {
        (**self).issue(reference)
    }

    fn canonical(&self, reference: &IssueRef) -> IssueRef {
        (**self).canonical(reference)
    }
}

/// Caches successful lookups of another tracker for the lifetime of a run.
///
/// Entries are keyed by the wrapped tracker's canonical reference, so `#5`
/// and `owner/repo#5` naming the same issue share one lookup.
pub struct CachingIssueTracker<T> {
    inner: T,
    cache: Mutex<HashMap<IssueRef, Issue>>,
}

impl<T: IssueTracker> CachingIssueTracker<T> {
    /// Wrap a tracker
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            cache: Mutex::new(HashMap::new()),
        }
    }

    /// Number of cached issues
    pub fn cached(&self) -> usize {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Get the wrapped tracker
    pub fn inner(&self) -> &T {
        &self.inner
    }
}

impl<T: IssueTracker> IssueTracker for CachingIssueTracker<T> {
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError> {
        let key = self.inner.canonical(reference);
        if let Some(hit) = self
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&key)
        {
            debug!(reference = %reference, key = %key, "issue cache hit");
            return Ok(hit.clone());
        }

        // Failures are not cached; a later reference may succeed after a transient error.
        let issue = self.inner.issue(&key)?;
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key, issue.clone());
        Ok(issue)
    }

    fn canonical(&self, reference: &IssueRef) -> IssueRef {
        self.inner.canonical(reference)
    }
}

/// A tracker for runs without network access; every lookup fails
#[derive(Debug, Clone, Copy, Default)]
pub struct OfflineIssueTracker;

impl IssueTracker for OfflineIssueTracker {
    fn issue(&self, reference: &IssueRef) -> Result<Issue, IssueError> {
        Err(IssueError::Transport(format!(
            "offline, cannot resolve {}",
            reference
        )))
    }
}
