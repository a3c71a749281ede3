//! Markdown changelog formatter

use chronicle_core::config::ChangelogConfig;
use chronicle_core::Result;
use tracing::{debug, instrument};

use super::{ChangelogDocument, ChangelogFormatter};
use crate::types::VersionRecord;

/// Markdown changelog formatter
#[derive(Debug, Clone)]
pub struct MarkdownFormatter {
    /// Date format for version headers
    pub date_format: String,
}

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self {
            date_format: "%Y-%m-%d".to_string(),
        }
    }

    /// Set the date format
    pub fn with_date_format(mut self, format: impl Into<String>) -> Self {
        self.date_format = format.into();
        self
    }

    fn write_record(
        &self,
        output: &mut String,
        document: &ChangelogDocument,
        record: &VersionRecord,
        config: &ChangelogConfig,
    ) {
        let tag = &record.tag;
        let date = tag.release_date.format(&self.date_format);
        match document.tag_link(&tag.name).filter(|_| !tag.is_pseudo()) {
            Some(link) => {
                output.push_str(&format!("## [{}]({}) ({})\n\n", tag.name, link, date));
            }
            None => {
                output.push_str(&format!("## {} ({})\n\n", tag.name, date));
            }
        }

        for group in &record.groups {
            output.push_str(&format!("### {}\n\n", group.name));
            for issue in &group.issues {
                output.push_str(&format!(
                    "- [#{}]({}) {}\n",
                    issue.number, issue.html_url, issue.title
                ));
            }
            output.push('\n');
        }

        if config.include_commits && !record.parsed_commits.is_empty() {
            output.push_str("### Commits\n\n");
            for commit in &record.parsed_commits {
                output.push_str("- ");
                output.push_str(&commit.short_message);

                if config.include_hashes {
                    match document.commit_link(&commit.hash) {
                        Some(link) => {
                            output.push_str(&format!(" ([{}]({}))", commit.short_hash, link));
                        }
                        None => {
                            output.push_str(&format!(" ({})", commit.short_hash));
                        }
                    }
                }
                output.push('\n');
            }
            output.push('\n');
        }
    }
}

impl Default for MarkdownFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip(self, document, config), fields(project = %document.project_name, records = document.records.len()))]
    fn format(&self, document: &ChangelogDocument, config: &ChangelogConfig) -> Result<String> {
        let mut output = String::new();
        output.push_str(&format!("# {} Change Log\n\n", document.project_name));

        for record in &document.records {
            self.write_record(&mut output, document, record, config);
        }

        let trimmed_len = output.trim_end().len();
        output.truncate(trimmed_len);
        output.push('\n');

        debug!(output_len = output.len(), "markdown changelog formatted");
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "markdown"
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
