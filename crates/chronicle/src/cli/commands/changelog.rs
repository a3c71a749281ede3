//! Changelog command

use std::path::PathBuf;

use clap::Args;
use tracing::{debug, info, warn};

use chronicle_changelog::{ChangelogAssembler, ChangelogDocument, FormatterRegistry};
use chronicle_core::config::{load_config_or_default, validate_config, Config, VersionSelector};
use chronicle_core::error::{ChangelogError, ConfigError};
use chronicle_core::{CachingIssueTracker, IssueTracker, OfflineIssueTracker};
use chronicle_git::GitRepo;
use chronicle_remote::{GitHubConfig, GitHubIssues, RemoteRepository};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

const DEFAULT_HOST: &str = "github.com";

/// Assemble the changelog
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Start version: "latest commit", "latest version" or a tag name
    #[arg(long, value_name = "VERSION")]
    pub from: Option<String>,

    /// Last (oldest) version to include
    #[arg(long, value_name = "VERSION")]
    pub to: Option<String>,

    /// Maximum number of tagged versions (0 for all)
    #[arg(long, value_name = "N")]
    pub versions: Option<usize>,

    /// Branch to read history from (defaults to configured branch)
    #[arg(short, long)]
    pub branch: Option<String>,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Print the changelog instead of writing it
    #[arg(long)]
    pub stdout: bool,

    /// Do not contact the issue tracker; references stay unexpanded
    #[arg(long)]
    pub no_remote: bool,
}

/// A rendered changelog
#[derive(Debug)]
struct Rendered {
    content: String,
    versions: usize,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            from = ?self.from,
            to = ?self.to,
            versions = ?self.versions,
            no_remote = self.no_remote,
            "executing changelog command"
        );
        let cwd = std::env::current_dir()?;
        let (mut config, config_path) = load_config_or_default(&cwd)?;
        let chatty = !cli.quiet && !self.stdout && cli.format == OutputFormat::Text;
        if config_path.is_none() && chatty {
            output::warning("No configuration file found, using defaults");
        }
        self.apply_overrides(&mut config);
        validate_config(&config)?;

        let repo = GitRepo::discover(&cwd)?;
        let remote = resolve_remote(&repo, &config);

        let tracker: Box<dyn IssueTracker> = match (&remote, self.no_remote) {
            (Some(remote), false) => {
                let github = GitHubConfig::from_config(&config.remote, remote.clone());
                Box::new(CachingIssueTracker::new(GitHubIssues::new(github)?))
            }
            (None, false) => {
                warn!("no hosted repository found, issue references will not be resolved");
                Box::new(OfflineIssueTracker)
            }
            (_, true) => Box::new(OfflineIssueTracker),
        };

        let format = match cli.format {
            OutputFormat::Json => "json",
            OutputFormat::Text => config.changelog.format.as_str(),
        };
        let rendered = render_changelog(&repo, &config, remote.as_ref(), tracker.as_ref(), format)?;

        if self.stdout {
            print!("{}", rendered.content);
            return Ok(());
        }

        let output_path = match &self.output {
            Some(path) => cwd.join(path),
            None => repo.path().join(&config.changelog.output_file),
        };
        std::fs::write(&output_path, &rendered.content).map_err(|e| {
            ChangelogError::WriteFailed {
                path: output_path.clone(),
                reason: e.to_string(),
            }
        })?;
        info!(path = %output_path.display(), versions = rendered.versions, "changelog written");

        match cli.format {
            OutputFormat::Json => {
                let summary = serde_json::json!({
                    "output": output_path.to_string_lossy(),
                    "versions": rendered.versions,
                });
                println!("{}", serde_json::to_string_pretty(&summary)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Changelog with {} version(s) written to {}",
                        rendered.versions,
                        output::path_style().apply_to(output_path.display())
                    ));
                }
            }
        }

        Ok(())
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(from) = &self.from {
            config.changelog.from_version = VersionSelector::from(from.as_str());
        }
        if let Some(to) = &self.to {
            config.changelog.to_version = Some(to.clone());
        }
        if let Some(versions) = self.versions {
            config.changelog.number_of_versions = versions;
        }
        if let Some(branch) = &self.branch {
            config.git.branch = branch.clone();
        }
    }
}

/// Find the hosted repository: the configured `owner/repo`, else the git remote
fn resolve_remote(repo: &GitRepo, config: &Config) -> Option<RemoteRepository> {
    let from_url = repo
        .remote_url(&config.git.remote)
        .ok()
        .flatten()
        .and_then(|url| RemoteRepository::from_remote_url(&url));

    if let Some(full_name) = &config.remote.repository {
        let host = from_url.as_ref().map_or(DEFAULT_HOST, |r| r.host.as_str());
        let configured = RemoteRepository::from_full_name(host, full_name);
        if configured.is_none() {
            warn!(repository = %full_name, "configured repository is not in owner/repo form");
        }
        return configured;
    }

    debug!(remote = %config.git.remote, repository = ?from_url, "resolved hosted repository");
    from_url
}

/// Assemble the changelog and render it with the named formatter
fn render_changelog(
    repo: &GitRepo,
    config: &Config,
    remote: Option<&RemoteRepository>,
    tracker: &dyn IssueTracker,
    format: &str,
) -> anyhow::Result<Rendered> {
    let registry = FormatterRegistry::new();
    let formatter = registry.get(format).ok_or_else(|| ConfigError::InvalidValue {
        field: "changelog.format".to_string(),
        message: format!(
            "unknown format '{}', expected one of: {}",
            format,
            registry.names().join(", ")
        ),
    })?;

    let commits = repo.branch_commits(&config.git.branch)?;
    let tags = repo.tags()?;

    let assembler = ChangelogAssembler::new(config.changelog.clone());
    let records = assembler.assemble(&commits, &tags, tracker)?;
    let versions = records.len();

    let project_name = config
        .name
        .clone()
        .or_else(|| remote.map(|r| r.name.clone()))
        .or_else(|| repo.directory_name())
        .unwrap_or_else(|| "Project".to_string());

    let mut document = ChangelogDocument::new(project_name, records);
    if let Some(remote) = remote {
        document = document
            .with_base_url(remote.html_url())
            .with_tag_url(remote.tag_url());
    }

    let content = formatter.format(&document, &config.changelog)?;
    Ok(Rendered { content, versions })
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn commit_file(repo: &Repository, dir: &Path, name: &str, message: &str, time: i64) -> git2::Oid {
        std::fs::write(dir.join(name), message).unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new(name)).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();
        let sig = Signature::new("Test", "test@example.com", &git2::Time::new(time, 0)).unwrap();

        let parents = match repo.find_reference("refs/heads/main") {
            Ok(r) => vec![r.peel_to_commit().unwrap()],
            Err(_) => vec![],
        };
        let parent_refs: Vec<&git2::Commit<'_>> = parents.iter().collect();

        repo.commit(Some("refs/heads/main"), &sig, &sig, message, &tree, &parent_refs)
            .unwrap()
    }

    fn setup_repo() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();
        repo.set_head("refs/heads/main").unwrap();

        let first = commit_file(&repo, temp.path(), "a.txt", "Initial commit", 1_704_110_400);
        let first = repo.find_commit(first).unwrap();
        repo.tag_lightweight("v1.0", first.as_object(), false).unwrap();

        commit_file(&repo, temp.path(), "b.txt", "Fix #3 crash on start", 1_704_196_800);
        commit_file(&repo, temp.path(), "c.txt", "Update docs {{javadoc}}", 1_704_283_200);

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_render_offline_markdown() {
        let (_temp, repo) = setup_repo();
        let mut config = Config::default();
        config.name = Some("widgets".to_string());

        let rendered =
            render_changelog(&repo, &config, None, &OfflineIssueTracker, "markdown").unwrap();

        assert_eq!(rendered.versions, 2);
        assert!(rendered.content.starts_with("# widgets Change Log"));
        assert!(rendered.content.contains("## current build (2024-01-03)"));
        assert!(rendered.content.contains("## v1.0 (2024-01-01)"));
        assert!(rendered.content.contains("- Fix #3 crash on start ("));
        assert!(!rendered.content.contains("Update docs"));
    }

    #[test]
    fn test_render_with_remote_links() {
        let (_temp, repo) = setup_repo();
        let config = Config::default();
        let remote = RemoteRepository::new("github.com", "acme", "widgets");

        let rendered = render_changelog(
            &repo,
            &config,
            Some(&remote),
            &OfflineIssueTracker,
            "markdown",
        )
        .unwrap();

        assert!(rendered.content.starts_with("# widgets Change Log"));
        assert!(rendered
            .content
            .contains("## [v1.0](https://github.com/acme/widgets/tree/v1.0)"));
        assert!(rendered
            .content
            .contains("https://github.com/acme/widgets/commit/"));
    }

    #[test]
    fn test_render_json() {
        let (_temp, repo) = setup_repo();
        let rendered =
            render_changelog(&repo, &Config::default(), None, &OfflineIssueTracker, "json")
                .unwrap();

        let value: serde_json::Value = serde_json::from_str(&rendered.content).unwrap();
        assert_eq!(value["records"].as_array().unwrap().len(), 2);
        assert_eq!(value["records"][1]["tag"]["name"], "v1.0");
    }

    #[test]
    fn test_unknown_format() {
        let (_temp, repo) = setup_repo();
        let result =
            render_changelog(&repo, &Config::default(), None, &OfflineIssueTracker, "html");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_to_version_fails() {
        let (_temp, repo) = setup_repo();
        let mut config = Config::default();
        config.changelog.to_version = Some("v0.1".to_string());

        let err = render_changelog(&repo, &config, None, &OfflineIssueTracker, "markdown")
            .unwrap_err();
        assert!(err.to_string().contains("v0.1"));
    }

    #[test]
    fn test_resolve_remote_from_git() {
        let (temp, _) = setup_repo();
        Repository::open(temp.path())
            .unwrap()
            .remote("origin", "git@github.com:acme/widgets.git")
            .unwrap();
        let repo = GitRepo::open(temp.path()).unwrap();

        let remote = resolve_remote(&repo, &Config::default()).unwrap();
        assert_eq!(remote.full_name(), "acme/widgets");
    }

    #[test]
    fn test_resolve_remote_configured() {
        let (_temp, repo) = setup_repo();
        let mut config = Config::default();
        config.remote.repository = Some("acme/gadgets".to_string());

        let remote = resolve_remote(&repo, &config).unwrap();
        assert_eq!(remote.host, "github.com");
        assert_eq!(remote.full_name(), "acme/gadgets");
    }

    #[test]
    fn test_resolve_remote_missing() {
        let (_temp, repo) = setup_repo();
        assert!(resolve_remote(&repo, &Config::default()).is_none());
    }

    #[test]
    fn test_overrides() {
        let cmd = ChangelogCommand {
            from: Some("latest version".to_string()),
            to: Some("v1.0".to_string()),
            versions: Some(2),
            branch: Some("develop".to_string()),
            output: None,
            stdout: true,
            no_remote: true,
        };
        let mut config = Config::default();
        cmd.apply_overrides(&mut config);

        assert_eq!(config.changelog.from_version, VersionSelector::LatestVersion);
        assert_eq!(config.changelog.to_version.as_deref(), Some("v1.0"));
        assert_eq!(config.changelog.number_of_versions, 2);
        assert_eq!(config.git.branch, "develop");
    }
}
