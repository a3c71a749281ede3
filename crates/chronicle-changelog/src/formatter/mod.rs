//! Changelog formatters

mod json;
mod markdown;
mod registry;

pub use json::JsonFormatter;
pub use markdown::MarkdownFormatter;
pub use registry::FormatterRegistry;

use chronicle_core::config::ChangelogConfig;
use chronicle_core::Result;
use serde::Serialize;

use crate::types::VersionRecord;

/// Everything a formatter renders
#[derive(Debug, Clone, Serialize)]
pub struct ChangelogDocument {
    /// Project name for the title
    pub project_name: String,
    /// Browser URL of the repository
    pub base_url: Option<String>,
    /// Base URL for tag links; the tag name is appended
    pub tag_url: Option<String>,
    /// Version records, newest first
    pub records: Vec<VersionRecord>,
}

impl ChangelogDocument {
    /// Create a document without links
    pub fn new(project_name: impl Into<String>, records: Vec<VersionRecord>) -> Self {
        Self {
            project_name: project_name.into(),
            base_url: None,
            tag_url: None,
            records,
        }
    }

    /// Set the repository URL
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the tag URL
    pub fn with_tag_url(mut self, url: impl Into<String>) -> Self {
        self.tag_url = Some(url.into());
        self
    }

    /// Link to a tag, if a tag URL is known
    pub fn tag_link(&self, tag_name: &str) -> Option<String> {
        self.tag_url
            .as_deref()
            .map(|base| format!("{}/{}", base.trim_end_matches('/'), tag_name))
    }

    /// Link to a commit, if the repository URL is known
    pub fn commit_link(&self, hash: &str) -> Option<String> {
        self.base_url
            .as_deref()
            .map(|base| format!("{}/commit/{}", base.trim_end_matches('/'), hash))
    }
}

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog document to string
    fn format(&self, document: &ChangelogDocument, config: &ChangelogConfig) -> Result<String>;

    /// Name used in configuration (`changelog.format`)
    fn name(&self) -> &'static str;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;
}
