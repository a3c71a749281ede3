//! Remote lookups

use tracing::debug;

use crate::repository::{GitRepo, Result};
use chronicle_core::error::GitError;

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => {
                let url = remote.url().map(|s| s.to_string());
                debug!(remote = name, url = ?url, "resolved remote url");
                Ok(url)
            }
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }
}
