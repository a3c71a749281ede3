//! Git repository operations

use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, Offset, TimeZone, Utc};
use git2::Repository;
use tracing::{info, instrument};

use chronicle_core::error::GitError;

use crate::types::Signature;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Git repository wrapper
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open a repository at the given path
    #[instrument(fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        info!(path = %path.display(), "opening git repository");
        let repo = Repository::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepositoryNotFound(path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        Ok(Self {
            path: path.to_path_buf(),
            repo,
        })
    }

    /// Discover and open a repository by searching parent directories
    #[instrument(fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        info!(start_path = %start_path.display(), "discovering git repository");
        let repo = Repository::discover(start_path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::NotARepository(start_path.to_path_buf())
            } else {
                GitError::OpenFailed(e.to_string())
            }
        })?;

        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();

        Ok(Self { repo, path })
    }

    /// Get the repository path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Name of the checked-out branch, if HEAD is on a branch
    pub fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            // No commits yet, HEAD still names the branch it will create
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => {
                let head = self.repo.find_reference("HEAD")?;
                return Ok(head
                    .symbolic_target()
                    .and_then(|t| t.strip_prefix("refs/heads/"))
                    .map(|s| s.to_string()));
            }
            Err(e) => return Err(e.into()),
        };
        if head.is_branch() {
            Ok(head.shorthand().map(|s| s.to_string()))
        } else {
            Ok(None)
        }
    }

    /// Directory name of the working tree, a fallback project name
    pub fn directory_name(&self) -> Option<String> {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
    }
}

/// Convert a git2 signature, keeping the signer's UTC offset
pub(crate) fn signature_from(sig: &git2::Signature<'_>) -> Signature {
    let when = sig.when();
    let offset = FixedOffset::east_opt(when.offset_minutes() * 60).unwrap_or(Utc.fix());
    let timestamp: DateTime<FixedOffset> = offset
        .timestamp_opt(when.seconds(), 0)
        .single()
        .unwrap_or_else(|| Utc::now().with_timezone(&offset));

    Signature::new(
        sig.name().unwrap_or("Unknown"),
        sig.email().unwrap_or("unknown@example.com"),
        timestamp,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn init_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();
        (temp, repo)
    }

    #[test]
    fn test_open_repo() {
        let (_temp, repo) = init_repo();
        assert!(!repo.repo.is_bare());
        assert!(repo.path().is_dir());
    }

    #[test]
    fn test_discover_repo() {
        let temp = TempDir::new().unwrap();
        Repository::init(temp.path()).unwrap();

        let subdir = temp.path().join("sub").join("dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let repo = GitRepo::discover(&subdir).unwrap();
        // Canonicalize both paths to handle macOS /var -> /private/var symlink
        let repo_path = repo.path().canonicalize().unwrap();
        let temp_path = temp.path().canonicalize().unwrap();
        assert_eq!(repo_path, temp_path);
    }

    #[test]
    fn test_not_a_repo() {
        let temp = TempDir::new().unwrap();
        let result = GitRepo::open(temp.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_current_branch_unborn() {
        let (temp, _) = init_repo();
        Repository::open(temp.path())
            .unwrap()
            .set_head("refs/heads/trunk")
            .unwrap();

        let repo = GitRepo::open(temp.path()).unwrap();
        assert_eq!(repo.current_branch().unwrap().as_deref(), Some("trunk"));
    }

    #[test]
    fn test_signature_keeps_offset() {
        let raw = git2::Signature::new(
            "Dev",
            "dev@example.com",
            &git2::Time::new(1_700_000_000, 120),
        )
        .unwrap();

        let sig = signature_from(&raw);
        assert_eq!(sig.name, "Dev");
        assert_eq!(sig.when.offset().local_minus_utc(), 7200);
        assert_eq!(sig.when.timestamp(), 1_700_000_000);
    }
}
