//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::path::PathBuf;

use super::defaults::{
    default_fix_words, default_label_groups, default_typo_map, DEFAULT_OUTPUT_FILE,
    DEFAULT_PULL_REQUESTS_TITLE, LATEST_COMMIT, LATEST_VERSION,
};

/// Main configuration for Chronicle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Project name, used as the changelog title
    pub name: Option<String>,

    /// Git configuration
    pub git: GitConfig,

    /// Hosted repository configuration
    pub remote: RemoteConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote name
    pub remote: String,

    /// Branch whose history the changelog covers
    pub branch: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

/// Hosted repository (issue tracker) configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    /// Hosting provider
    pub provider: String,

    /// API base URL
    pub api_url: String,

    /// Environment variable holding the API token
    pub token_env: String,

    /// `owner/repo`, overriding the one derived from the git remote URL
    pub repository: Option<String>,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            provider: "github".to_string(),
            api_url: "https://api.github.com".to_string(),
            token_env: "GITHUB_TOKEN".to_string(),
            repository: None,
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub output_file: PathBuf,

    /// Output format (markdown, json)
    pub format: String,

    /// Where the changelog starts: "latest commit", "latest version" or a tag name
    pub from_version: VersionSelector,

    /// Tag name of the last (oldest) version to include
    pub to_version: Option<String>,

    /// Maximum number of tagged versions to include, 0 for no limit
    pub number_of_versions: usize,

    /// Issue groups, in output order
    pub label_groups: Vec<LabelGroup>,

    /// Heading for pull requests
    pub pull_request_title: String,

    /// Whether pull requests get their own group instead of being grouped by label
    pub separate_pull_requests: bool,

    /// Marker opening an exclusion tag
    pub exclusion_tag_open: String,

    /// Marker closing an exclusion tag
    pub exclusion_tag_close: String,

    /// Exclusion keywords; a commit containing `{open}{keyword}{close}` is skipped
    pub exclusion_tags: BTreeSet<String>,

    /// Whether to apply the typo map before looking for issue references
    pub correct_typos: bool,

    /// Search/replace pairs applied to commit messages
    pub typo_map: BTreeMap<String, String>,

    /// Words that mark the following issue reference as fixed by the commit
    pub fix_words: Vec<String>,

    /// Whether to list the commits of each version
    pub include_commits: bool,

    /// Whether to include commit hashes in the commit list
    pub include_hashes: bool,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        Self {
            output_file: PathBuf::from(DEFAULT_OUTPUT_FILE),
            format: "markdown".to_string(),
            from_version: VersionSelector::LatestCommit,
            to_version: None,
            number_of_versions: 0,
            label_groups: default_label_groups(),
            pull_request_title: DEFAULT_PULL_REQUESTS_TITLE.to_string(),
            separate_pull_requests: true,
            exclusion_tag_open: "{{".to_string(),
            exclusion_tag_close: "}}".to_string(),
            exclusion_tags: BTreeSet::from(["javadoc".to_string()]),
            correct_typos: true,
            typo_map: default_typo_map(),
            fix_words: default_fix_words(),
            include_commits: true,
            include_hashes: true,
        }
    }
}

impl ChangelogConfig {
    /// All exclusion markers, e.g. `{{javadoc}}`
    pub fn exclusion_markers(&self) -> Vec<String> {
        self.exclusion_tags
            .iter()
            .map(|tag| {
                format!(
                    "{}{}{}",
                    self.exclusion_tag_open, tag, self.exclusion_tag_close
                )
            })
            .collect()
    }

    /// Check whether a commit message carries an exclusion tag
    pub fn is_excluded(&self, message: &str) -> bool {
        self.exclusion_markers()
            .iter()
            .any(|marker| message.contains(marker.as_str()))
    }

    /// Find a label group by name
    pub fn label_group(&self, name: &str) -> Option<&LabelGroup> {
        self.label_groups.iter().find(|g| g.name == name)
    }
}

/// A named changelog section collecting issues with any of its labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelGroup {
    /// Section title
    pub name: String,
    /// Issue labels routed into this section
    #[serde(default)]
    pub labels: BTreeSet<String>,
}

impl LabelGroup {
    /// Create a group from a name and its labels
    pub fn new<I, S>(name: impl Into<String>, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            labels: labels.into_iter().map(Into::into).collect(),
        }
    }

    /// Check whether any of the given labels belongs to this group
    pub fn matches_any<'a>(&self, labels: impl IntoIterator<Item = &'a String>) -> bool {
        labels.into_iter().any(|l| self.labels.contains(l))
    }
}

/// Selects the version a changelog starts from
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum VersionSelector {
    /// Start at the newest commit, tagged or not
    #[default]
    LatestCommit,
    /// Start at the newest tagged commit
    LatestVersion,
    /// Start at a named tag
    Tag(String),
}

impl VersionSelector {
    /// Check whether a tag name satisfies this selector
    pub fn matches(&self, tag_name: &str) -> bool {
        match self {
            Self::LatestCommit | Self::LatestVersion => true,
            Self::Tag(name) => name == tag_name,
        }
    }

    /// The string form used in configuration files
    pub fn as_str(&self) -> &str {
        match self {
            Self::LatestCommit => LATEST_COMMIT,
            Self::LatestVersion => LATEST_VERSION,
            Self::Tag(name) => name,
        }
    }
}

impl From<String> for VersionSelector {
    fn from(value: String) -> Self {
        match value.as_str() {
            LATEST_COMMIT => Self::LatestCommit,
            LATEST_VERSION => Self::LatestVersion,
            _ => Self::Tag(value),
        }
    }
}

impl From<&str> for VersionSelector {
    fn from(value: &str) -> Self {
        Self::from(value.to_string())
    }
}

impl From<VersionSelector> for String {
    fn from(value: VersionSelector) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for VersionSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for VersionSelector {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}
