//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use console::style;
use tracing::info;

use chronicle_core::config::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Initialize a new Chronicle configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self.write_config(&cwd)?;

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "created": config_path.to_string_lossy(),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    output::success(&format!(
                        "Created configuration at {}",
                        output::path_style().apply_to(config_path.display())
                    ));
                    println!();
                    println!("Next steps:");
                    println!(
                        "  1. Edit {} to set your label groups",
                        config_path.display()
                    );
                    println!(
                        "  2. Run {} to verify your setup",
                        style("chronicle validate").cyan()
                    );
                    println!(
                        "  3. Run {} to write the changelog",
                        style("chronicle changelog").cyan()
                    );
                }
            }
        }

        Ok(())
    }

    fn write_config(&self, cwd: &Path) -> anyhow::Result<PathBuf> {
        let config_path = match &self.output {
            Some(path) => cwd.join(path),
            None => cwd.join(DEFAULT_CONFIG_TOML),
        };

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, DEFAULT_CONFIG_TEMPLATE)?;
        info!(path = %config_path.display(), "configuration written");
        Ok(config_path)
    }
}
