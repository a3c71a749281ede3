//! Chronicle Core - Core library for changelog assembly
//!
//! This crate provides the foundational types shared by the Chronicle crates:
//! error handling, configuration, and the issue model together with the
//! issue-tracker seam the changelog engine resolves references through.

pub mod config;
pub mod error;
pub mod issue;

pub use error::{ChronicleError, IssueError, Result};
pub use issue::{CachingIssueTracker, Issue, IssueRef, IssueTracker, OfflineIssueTracker};
