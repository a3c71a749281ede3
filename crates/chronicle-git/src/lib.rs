//! Chronicle Git - Git history and tag access for changelog assembly
//!
//! This crate reads commit history, tags and remote URLs from a local
//! repository and hands them over as plain values.

mod commits;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, Signature, TagInfo};
