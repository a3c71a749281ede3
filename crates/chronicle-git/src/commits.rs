//! Commit history operations

use git2::{Oid, Sort};
use tracing::{debug, instrument};

use chronicle_core::error::GitError;

use crate::repository::{signature_from, GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get the history of a branch, newest first.
    ///
    /// Every reachable commit appears exactly once.
    #[instrument(skip(self))]
    pub fn branch_commits(&self, branch: &str) -> Result<Vec<CommitInfo>> {
        let tip = self.branch_tip(branch)?;
        let commits = self.walk_from(tip)?;
        debug!(branch, count = commits.len(), "walked branch history");
        Ok(commits)
    }

    fn branch_tip(&self, branch: &str) -> Result<Oid> {
        let local = format!("refs/heads/{}", branch);
        if let Ok(reference) = self.repo.find_reference(&local) {
            return Ok(reference.peel_to_commit()?.id());
        }

        // Remote-tracking branches and other revspecs
        match self.repo.revparse_single(branch) {
            Ok(object) => Ok(object.peel_to_commit()?.id()),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::BranchNotFound(branch.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    fn walk_from(&self, tip: Oid) -> Result<Vec<CommitInfo>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(tip)?;

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid?;
            let commit = self.repo.find_commit(oid)?;
            commits.push(commit_to_info(&commit));
        }

        Ok(commits)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let message = commit
        .message()
        .map(|m| m.trim_end().to_string())
        .unwrap_or_else(|| String::from_utf8_lossy(commit.message_bytes()).trim_end().to_string());

    CommitInfo::new(
        commit.id().to_string(),
        message,
        signature_from(&commit.author()),
        signature_from(&commit.committer()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn commit_file(repo: &Repository, dir: &Path, name: &str, message: &str) -> Oid {
        std::fs::write(dir.join(name), message).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::new("Test", "test@example.com", &git2::Time::new(1_700_000_000, 0))
            .unwrap();

        let parents = match repo.find_reference("refs/heads/main") {
            Ok(r) => vec![r.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        repo.commit(Some("refs/heads/main"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn setup_repo_with_commits() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.set_head("refs/heads/main").unwrap();

        commit_file(&repo, temp.path(), "a.txt", "Initial commit");
        commit_file(&repo, temp.path(), "b.txt", "Fix #1 crash\n\nDetails here");
        commit_file(&repo, temp.path(), "c.txt", "Add docs");

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_branch_commits_newest_first() {
        let (_temp, repo) = setup_repo_with_commits();
        let commits = repo.branch_commits("main").unwrap();
        let summaries: Vec<_> = commits.iter().map(|c| c.summary()).collect();
        assert_eq!(summaries, vec!["Add docs", "Fix #1 crash", "Initial commit"]);
    }

    #[test]
    fn test_full_message_kept() {
        let (_temp, repo) = setup_repo_with_commits();
        let commits = repo.branch_commits("main").unwrap();
        assert_eq!(commits[1].message, "Fix #1 crash\n\nDetails here");
    }

    #[test]
    fn test_unknown_branch() {
        let (_temp, repo) = setup_repo_with_commits();
        let result = repo.branch_commits("nope");
        assert!(matches!(result, Err(GitError::BranchNotFound(_))));
    }

    #[test]
    fn test_branch_commits_carry_ids() {
        let (temp, repo) = setup_repo_with_commits();
        let raw = Repository::open(temp.path()).unwrap();
        let head = raw
            .head()
            .unwrap()
            .peel_to_commit()
            .unwrap();

        let commits = repo.branch_commits("main").unwrap();
        assert_eq!(commits[0].hash, head.id().to_string());
        assert_eq!(commits[0].author.name, "Test");
    }
}
