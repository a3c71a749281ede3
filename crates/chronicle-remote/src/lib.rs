//! Chronicle Remote - Hosted repository access
//!
//! Maps git remote URLs to hosted repositories and resolves issue references
//! against the GitHub REST API.

pub mod github;
pub mod repository;

pub use github::{GitHubConfig, GitHubIssues};
pub use repository::RemoteRepository;
