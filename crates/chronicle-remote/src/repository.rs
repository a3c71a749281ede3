//! Remote repository coordinates

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Matches https, ssh and scp-like (`git@host:owner/repo.git`) remote URLs
static REMOTE_URL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:(?P<scheme>https?|ssh|git)://)?(?:[^@/]+@)?(?P<host>[^/:]+)(?::(?P<port>\d+))?[:/](?P<owner>[^/]+)/(?P<repo>[^/]+?)(?:\.git)?/?$",
    )
    .expect("Invalid regex")
});

/// A repository on a hosting service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteRepository {
    /// Host name, e.g. `github.com`
    pub host: String,
    /// Repository owner (user or organisation)
    pub owner: String,
    /// Repository name
    pub name: String,
}

impl RemoteRepository {
    /// Create from its parts
    pub fn new(host: impl Into<String>, owner: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            owner: owner.into(),
            name: name.into(),
        }
    }

    /// Parse a git remote URL.
    ///
    /// Supports:
    /// - `https://github.com/owner/repo(.git)`
    /// - `git@github.com:owner/repo.git`
    /// - `ssh://git@github.com/owner/repo.git`
    pub fn from_remote_url(remote_url: &str) -> Option<Self> {
        let caps = REMOTE_URL_REGEX.captures(remote_url.trim())?;
        let host = caps.name("host")?.as_str();
        let owner = caps.name("owner")?.as_str();
        let name = caps.name("repo")?.as_str();

        if owner.is_empty() || name.is_empty() {
            return None;
        }

        Some(Self::new(host, owner, name))
    }

    /// Parse an `owner/repo` pair on a given host
    pub fn from_full_name(host: &str, full_name: &str) -> Option<Self> {
        let (owner, name) = full_name.split_once('/')?;
        if owner.is_empty() || name.is_empty() || name.contains('/') {
            return None;
        }
        Some(Self::new(host, owner, name))
    }

    /// `owner/repo`
    pub fn full_name(&self) -> String {
        format!("{}/{}", self.owner, self.name)
    }

    /// Browser URL of the repository
    pub fn html_url(&self) -> String {
        format!("https://{}/{}/{}", self.host, self.owner, self.name)
    }

    /// Base URL for links to a tag; the tag name is appended directly
    pub fn tag_url(&self) -> String {
        format!("{}/tree/", self.html_url())
    }

    /// Base URL for links to an issue; the number is appended directly
    pub fn issues_url(&self) -> String {
        format!("{}/issues/", self.html_url())
    }

    /// Check whether an HTTPS URL points into this repository
    pub fn contains_url(&self, candidate: &str) -> bool {
        match url::Url::parse(candidate) {
            Ok(parsed) => {
                parsed.host_str() == Some(self.host.as_str())
                    && parsed
                        .path()
                        .trim_start_matches('/')
                        .starts_with(&format!("{}/", self.full_name()))
            }
            Err(_) => false,
        }
    }
}

impl fmt::Display for RemoteRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.host, self.full_name())
    }
}
