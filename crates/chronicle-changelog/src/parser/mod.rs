//! Commit message parsing
//!
//! Resolves issue references (`#12`, `repo#12`, `owner/repo#12`) in commit
//! messages through an [`IssueTracker`], rewriting them as Markdown links and
//! collecting the issues a commit declares fixed.

mod config;
mod tokens;

pub use config::ParserConfig;
pub(crate) use tokens::is_separator;

use std::ops::Range;

use chronicle_core::IssueTracker;
use chronicle_git::CommitInfo;
use tracing::{debug, warn};

use crate::types::ParsedCommit;
use tokens::{parse_reference, tokenize};

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit, resolving references through the tracker
    fn parse(&self, commit: &CommitInfo, tracker: &dyn IssueTracker) -> ParsedCommit;
}

/// Parser for free-form commit messages with issue references
#[derive(Debug, Clone, Default)]
pub struct MessageParser {
    config: ParserConfig,
}

impl MessageParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a parser with custom configuration
    pub fn with_config(config: ParserConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &ParserConfig {
        &self.config
    }
}

impl CommitParser for MessageParser {
    fn parse(&self, commit: &CommitInfo, tracker: &dyn IssueTracker) -> ParsedCommit {
        let message = self.config.correct(&commit.message);
        let first_line = message.lines().next().unwrap_or("");
        let tokens = tokenize(&message);

        let mut full_message = String::with_capacity(message.len());
        let mut cursor = 0;
        let mut fix_references = Vec::new();
        let mut fix_phrases = Vec::new();

        for (idx, token) in tokens.iter().enumerate() {
            let Some(reference) = parse_reference(token.text) else {
                continue;
            };

            let issue = match tracker.issue(&reference) {
                Ok(issue) => issue,
                Err(e) => {
                    warn!(
                        commit = %commit.short_hash,
                        reference = %reference,
                        error = %e,
                        "could not resolve issue reference"
                    );
                    continue;
                }
            };

            full_message.push_str(&message[cursor..token.start]);
            full_message.push_str(&format!("[{}]({})", issue.number, issue.html_url));
            cursor = token.end;

            let previous = idx.checked_sub(1).map(|p| &tokens[p]);
            if let Some(word) = previous.filter(|w| self.config.is_fix_word(w.text)) {
                if token.end <= first_line.len() {
                    fix_phrases.push(word.start..token.end);
                }
                fix_references.push(issue);
            }
        }
        full_message.push_str(&message[cursor..]);
        let short_message = strip_spans(first_line, &fix_phrases);

        debug!(
            commit = %commit.short_hash,
            fixes = fix_references.len(),
            "parsed commit message"
        );

        ParsedCommit {
            hash: commit.hash.clone(),
            short_hash: commit.short_hash.clone(),
            full_message,
            short_message,
            fix_references,
        }
    }
}

/// Cut ascending, non-overlapping byte spans out of a line
fn strip_spans(line: &str, spans: &[Range<usize>]) -> String {
    if spans.is_empty() {
        return line.to_string();
    }

    let mut kept = String::with_capacity(line.len());
    let mut cursor = 0;
    for span in spans {
        kept.push_str(&line[cursor..span.start]);
        cursor = span.end;
    }
    kept.push_str(&line[cursor..]);
    kept.trim_start_matches(is_separator).to_string()
}
