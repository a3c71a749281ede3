//! Chronicle Changelog - Changelog assembly engine
//!
//! This crate turns a newest-first commit history and its tags into version
//! records: commits are windowed by tag, their messages are parsed for issue
//! references, and the referenced issues are grouped by label.

pub mod assembler;
pub mod formatter;
pub mod grouper;
pub mod parser;
pub mod tag_index;
pub mod types;
pub mod windower;

#[cfg(test)]
pub(crate) mod testing;

pub use assembler::ChangelogAssembler;
pub use formatter::{ChangelogDocument, ChangelogFormatter, FormatterRegistry, MarkdownFormatter};
pub use grouper::VersionGrouper;
pub use parser::{CommitParser, MessageParser, ParserConfig};
pub use tag_index::TagIndex;
pub use types::{IssueGroup, ParsedCommit, Tag, TagKind, VersionRecord};
pub use windower::{build_windows, WindowSelection};
