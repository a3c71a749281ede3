//! Configuration validation

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::{ChangelogConfig, Config, VersionSelector};

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_remote(config)?;
    validate_changelog(&config.changelog)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.to_string(),
        message: message.into(),
    }
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty").into());
    }

    if config.git.branch.is_empty() {
        return Err(invalid("git.branch", "branch cannot be empty").into());
    }

    Ok(())
}

fn validate_remote(config: &Config) -> Result<()> {
    let valid_providers = ["github"];
    if !valid_providers.contains(&config.remote.provider.as_str()) {
        return Err(invalid(
            "remote.provider",
            format!("must be one of: {}", valid_providers.join(", ")),
        )
        .into());
    }

    if let Some(repository) = &config.remote.repository {
        let parts: Vec<&str> = repository.split('/').collect();
        if parts.len() != 2 || parts.iter().any(|p| p.is_empty()) {
            return Err(invalid("remote.repository", "must be of the form owner/repo").into());
        }
    }

    Ok(())
}

/// Validate the changelog section on its own
pub fn validate_changelog(config: &ChangelogConfig) -> Result<()> {
    if config.output_file.as_os_str().is_empty() {
        return Err(ConfigError::MissingField("changelog.output_file".to_string()).into());
    }

    let valid_formats = ["markdown", "md", "json"];
    if !valid_formats.contains(&config.format.as_str()) {
        return Err(invalid(
            "changelog.format",
            format!("must be one of: {}", valid_formats.join(", ")),
        )
        .into());
    }

    if matches!(&config.from_version, VersionSelector::Tag(name) if name.is_empty()) {
        return Err(invalid("changelog.from_version", "version cannot be empty").into());
    }

    if config.to_version.as_deref() == Some("") {
        return Err(invalid("changelog.to_version", "version cannot be empty").into());
    }

    if config.exclusion_tag_open.is_empty() || config.exclusion_tag_close.is_empty() {
        return Err(invalid(
            "changelog.exclusion_tag_open",
            "exclusion tag markers cannot be empty",
        )
        .into());
    }

    let mut seen = HashSet::new();
    for (i, group) in config.label_groups.iter().enumerate() {
        if group.name.is_empty() {
            return Err(invalid(
                &format!("changelog.label_groups[{}].name", i),
                "group name cannot be empty",
            )
            .into());
        }
        if !seen.insert(group.name.as_str()) {
            return Err(invalid(
                &format!("changelog.label_groups[{}].name", i),
                format!("duplicate group '{}'", group.name),
            )
            .into());
        }
    }

    debug!(groups = config.label_groups.len(), "changelog configuration valid");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LabelGroup;

    #[test]
    fn test_validate_default_config() {
        let config = Config::default();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_branch() {
        let mut config = Config::default();
        config.git.branch = String::new();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_unknown_format() {
        let mut config = Config::default();
        config.changelog.format = "html".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_missing_output_file() {
        let mut config = Config::default();
        config.changelog.output_file = Default::default();
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("changelog.output_file"));
    }

    #[test]
    fn test_validate_duplicate_group() {
        let mut config = Config::default();
        config
            .changelog
            .label_groups
            .push(LabelGroup::new("Fixes", ["regression"]));
        let err = validate_config(&config).unwrap_err();
        assert!(err.to_string().contains("duplicate group"));
    }

    #[test]
    fn test_validate_repository_override() {
        let mut config = Config::default();
        config.remote.repository = Some("acme".to_string());
        assert!(validate_config(&config).is_err());

        config.remote.repository = Some("acme/tools".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_empty_to_version() {
        let mut config = Config::default();
        config.changelog.to_version = Some(String::new());
        assert!(validate_config(&config).is_err());
    }
}
