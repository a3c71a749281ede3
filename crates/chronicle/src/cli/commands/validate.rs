//! Validate command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use chronicle_core::config::{load_config_from_dir, validate_config, Config};
use chronicle_git::GitRepo;
use chronicle_remote::RemoteRepository;

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};
use crate::exit_codes;

/// Validate configuration and repository state
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Only validate configuration file
    #[arg(long)]
    pub config_only: bool,

    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Collected validation results
#[derive(Debug, Default)]
struct Report {
    config_path: Option<PathBuf>,
    repository: Option<String>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Report {
    fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            config_only = self.config_only,
            strict = self.strict,
            "executing validate command"
        );
        let cwd = std::env::current_dir()?;
        let report = self.check(&cwd);

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": report.passed(),
                    "config_path": report.config_path.as_ref().map(|p| p.to_string_lossy().to_string()),
                    "repository": report.repository,
                    "errors": report.errors,
                    "warnings": report.warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_report(&report);
                }
            }
        }

        if !report.passed() {
            std::process::exit(i32::from(exit_codes::VALIDATION_ERROR));
        }

        Ok(())
    }

    fn check(&self, cwd: &Path) -> Report {
        let mut report = Report::default();

        let config = match load_config_from_dir(cwd) {
            Ok((config, path)) => {
                report.config_path = Some(path);
                Some(config)
            }
            Err(e) => {
                report.errors.push(format!("Configuration: {}", e));
                None
            }
        };

        if let Some(ref cfg) = config {
            if let Err(e) = validate_config(cfg) {
                report.errors.push(format!("Configuration validation: {}", e));
            }
        }

        if !self.config_only {
            match GitRepo::discover(cwd) {
                Ok(repo) => {
                    if let Some(ref cfg) = config {
                        check_repository(&repo, cfg, &mut report);
                    }
                }
                Err(e) => {
                    report.errors.push(format!("Git repository: {}", e));
                }
            }
        }

        if self.strict {
            let mut warnings = std::mem::take(&mut report.warnings);
            report.errors.append(&mut warnings);
        }

        report
    }
}

fn check_repository(repo: &GitRepo, cfg: &Config, report: &mut Report) {
    match repo.current_branch() {
        Ok(Some(branch)) => {
            if branch != cfg.git.branch {
                report.warnings.push(format!(
                    "Changelog branch is '{}', currently on '{}'",
                    cfg.git.branch, branch
                ));
            }
        }
        Ok(None) => {
            report.warnings.push("HEAD is detached".to_string());
        }
        Err(e) => {
            report.errors.push(format!("Branch check: {}", e));
        }
    }

    let from_remote = match repo.remote_url(&cfg.git.remote) {
        Ok(Some(url)) => {
            let parsed = RemoteRepository::from_remote_url(&url);
            if parsed.is_none() {
                report
                    .warnings
                    .push(format!("Remote URL '{}' is not a hosted repository", url));
            }
            parsed
        }
        Ok(None) => None,
        Err(_) => {
            report
                .warnings
                .push(format!("Remote '{}' not found", cfg.git.remote));
            None
        }
    };

    let repository = match &cfg.remote.repository {
        Some(full_name) => {
            let host = from_remote.as_ref().map_or("github.com", |r| r.host.as_str());
            let configured = RemoteRepository::from_full_name(host, full_name);
            if configured.is_none() {
                report.errors.push(format!(
                    "remote.repository '{}' must be in owner/repo form",
                    full_name
                ));
            }
            configured
        }
        None => from_remote,
    };

    match repository {
        Some(repository) => {
            report.repository = Some(repository.full_name());
            if std::env::var(&cfg.remote.token_env).map_or(true, |t| t.trim().is_empty()) {
                report.warnings.push(format!(
                    "{} is not set, issue lookups will be unauthenticated",
                    cfg.remote.token_env
                ));
            }
        }
        None => {
            report
                .warnings
                .push("No hosted repository found, issue references will not be resolved".to_string());
        }
    }
}

fn print_report(report: &Report) {
    println!("{}", output::header("Validation Results"));
    println!();

    if let Some(path) = &report.config_path {
        println!(
            "{}",
            output::key_value("Config", &output::path_style().apply_to(path.display()).to_string())
        );
    }
    if let Some(repository) = &report.repository {
        println!(
            "{}",
            output::key_value("Repository", &output::tag_style().apply_to(repository).to_string())
        );
    }
    if report.config_path.is_some() || report.repository.is_some() {
        println!();
    }

    if !report.errors.is_empty() {
        println!("{}", style("Errors:").red().bold());
        for error in &report.errors {
            println!("  {} {}", style("✗").red(), error);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("{}", style("Warnings:").yellow().bold());
        for warning in &report.warnings {
            println!("  {} {}", style("!").yellow(), warning);
        }
        println!();
    }

    if report.passed() {
        if report.warnings.is_empty() {
            output::success("All checks passed");
        } else {
            output::success(&format!(
                "Validation passed with {} warning(s)",
                report.warnings.len()
            ));
        }
    } else {
        output::error(&format!(
            "Validation failed with {} error(s)",
            report.errors.len()
        ));
    }
}
