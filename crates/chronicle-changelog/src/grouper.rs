//! Issue grouping for version windows

use chronicle_core::config::ChangelogConfig;
use chronicle_core::IssueTracker;
use tracing::{debug, instrument};

use crate::parser::{CommitParser, MessageParser, ParserConfig};
use crate::types::{IssueGroup, VersionRecord};

/// Fills version windows with parsed commits and label groups
pub struct VersionGrouper {
    parser: Box<dyn CommitParser>,
    config: ChangelogConfig,
}

impl VersionGrouper {
    /// Create a grouper using the message parser configured from `config`
    pub fn new(config: ChangelogConfig) -> Self {
        Self {
            parser: Box::new(MessageParser::with_config(ParserConfig::from_changelog(
                &config,
            ))),
            config,
        }
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Empty groups in configured order, the pull request group included
    fn seed_groups(&self) -> Vec<IssueGroup> {
        let mut groups: Vec<IssueGroup> = self
            .config
            .label_groups
            .iter()
            .map(|g| IssueGroup::new(&g.name))
            .collect();

        let title = &self.config.pull_request_title;
        if !title.is_empty() && !groups.iter().any(|g| &g.name == title) {
            groups.insert(0, IssueGroup::new(title));
        }
        groups
    }

    /// Parse a window's commits and sort the issues they fix into groups.
    ///
    /// Excluded commits move from `commits` to `excluded_commits`. Groups,
    /// pull requests and parsed commits are rebuilt from scratch, so
    /// populating a window again gives the same result.
    #[instrument(skip(self, record, tracker), fields(tag = %record.tag.name, commits = record.commits.len()))]
    pub fn populate(&self, record: &mut VersionRecord, tracker: &dyn IssueTracker) {
        let (excluded, included): (Vec<_>, Vec<_>) = std::mem::take(&mut record.commits)
            .into_iter()
            .partition(|c| self.config.is_excluded(&c.message));
        record.commits = included;
        record.excluded_commits.extend(excluded);

        let mut groups = self.seed_groups();
        record.pull_requests.clear();
        record.parsed_commits.clear();

        for commit in &record.commits {
            let parsed = self.parser.parse(commit, tracker);

            for issue in &parsed.fix_references {
                if self.config.separate_pull_requests && issue.pull_request {
                    record.pull_requests.insert(issue.clone());
                    continue;
                }

                for group in groups.iter_mut() {
                    let matches = self
                        .config
                        .label_group(&group.name)
                        .is_some_and(|lg| lg.matches_any(&issue.labels));
                    if matches {
                        group.add_issue(issue.clone());
                    }
                }
            }

            record.parsed_commits.push(parsed);
        }

        if !record.pull_requests.is_empty() {
            let title = &self.config.pull_request_title;
            if let Some(group) = groups.iter_mut().find(|g| &g.name == title) {
                group.issues = record.pull_requests.clone();
            }
        }

        groups.retain(|g| !g.is_empty());
        record.groups = groups;

        debug!(
            included = record.commits.len(),
            excluded = record.excluded_commits.len(),
            groups = record.groups.len(),
            pull_requests = record.pull_requests.len(),
            "populated version window"
        );
    }
}
