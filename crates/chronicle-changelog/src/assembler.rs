//! Changelog assembly

use chronicle_core::config::{validate_changelog, ChangelogConfig};
use chronicle_core::{IssueTracker, Result};
use chronicle_git::{CommitInfo, TagInfo};
use tracing::{debug, info, instrument};

use crate::grouper::VersionGrouper;
use crate::parser::CommitParser;
use crate::tag_index::TagIndex;
use crate::types::VersionRecord;
use crate::windower::{build_windows, WindowSelection};

/// Assembles version records from history, tags and an issue tracker
pub struct ChangelogAssembler {
    config: ChangelogConfig,
    grouper: VersionGrouper,
}

impl ChangelogAssembler {
    /// Create a new assembler with the default parser
    pub fn new(config: ChangelogConfig) -> Self {
        Self {
            grouper: VersionGrouper::new(config.clone()),
            config,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.grouper = self.grouper.with_parser(parser);
        self
    }

    /// Get the configuration
    pub fn config(&self) -> &ChangelogConfig {
        &self.config
    }

    /// Build the version records for a newest-first history.
    ///
    /// Fails before any lookup if the configuration is invalid or the
    /// selection cannot be satisfied.
    #[instrument(skip_all, fields(commits = commits.len(), tags = tags.len()))]
    pub fn assemble(
        &self,
        commits: &[CommitInfo],
        tags: &[TagInfo],
        tracker: &dyn IssueTracker,
    ) -> Result<Vec<VersionRecord>> {
        info!(
            commit_count = commits.len(),
            tag_count = tags.len(),
            "assembling changelog"
        );
        validate_changelog(&self.config)?;

        let index = TagIndex::build(commits, tags);
        let selection = WindowSelection::from_changelog(&self.config);
        let mut records = build_windows(commits, &index, &selection)?;

        for record in records.iter_mut() {
            self.grouper.populate(record, tracker);
        }

        debug!(
            records = records.len(),
            issues = records
                .iter()
                .map(|r| r.groups.iter().map(|g| g.issues.len()).sum::<usize>())
                .sum::<usize>(),
            "changelog assembled"
        );
        Ok(records)
    }
}
