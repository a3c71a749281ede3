//! Default configuration values

use std::collections::BTreeMap;

use super::types::{Config, LabelGroup};
use crate::error::{ConfigError, Result};

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "chronicle.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "chronicle.yaml";

/// Default changelog file name
pub const DEFAULT_OUTPUT_FILE: &str = "changelog.md";

/// Default heading for pull requests
pub const DEFAULT_PULL_REQUESTS_TITLE: &str = "Pull Requests";

/// Version selector: start from the newest commit
pub const LATEST_COMMIT: &str = "latest commit";

/// Version selector: start from the newest tag
pub const LATEST_VERSION: &str = "latest version";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".chronicle.toml",
        ".chronicle.yaml",
    ]
}

/// Default label groups, in output order
pub fn default_label_groups() -> Vec<LabelGroup> {
    vec![
        // pull requests are routed by type, not by label
        LabelGroup::new(DEFAULT_PULL_REQUESTS_TITLE, Vec::<String>::new()),
        LabelGroup::new("Fixes", ["bug"]),
        LabelGroup::new("Quality", ["testing", "quality"]),
        LabelGroup::new("Enhancements", ["enhancement", "performance"]),
        LabelGroup::new("Tasks", ["task"]),
        LabelGroup::new("Documentation", ["documentation"]),
    ]
}

/// Default typo corrections: a keyword glued to `#` gets its space back
pub fn default_typo_map() -> BTreeMap<String, String> {
    [
        "Fix", "fix", "Fixes", "fixes", "See", "see", "Close", "close", "Closes", "closes",
        "Resolve", "resolve", "Resolves", "resolves",
    ]
    .into_iter()
    .map(|word| (format!("{}#", word), format!("{} #", word)))
    .collect()
}

/// Default fix words
pub fn default_fix_words() -> Vec<String> {
    [
        "fix", "fixes", "fixed", "resolve", "resolves", "resolved", "close", "closes", "closed",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Render the default configuration as TOML
pub fn default_config_toml() -> Result<String> {
    let config = Config::default();
    Ok(toml::to_string_pretty(&config).map_err(ConfigError::TomlSerialize)?)
}

/// Minimal configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Chronicle Configuration

[git]
remote = "origin"
branch = "main"

[remote]
provider = "github"
token_env = "GITHUB_TOKEN"

[changelog]
output_file = "changelog.md"
format = "markdown"
from_version = "latest commit"
number_of_versions = 0
pull_request_title = "Pull Requests"
separate_pull_requests = true
exclusion_tags = ["javadoc"]

[[changelog.label_groups]]
name = "Pull Requests"
labels = []

[[changelog.label_groups]]
name = "Fixes"
labels = ["bug"]

[[changelog.label_groups]]
name = "Quality"
labels = ["testing", "quality"]

[[changelog.label_groups]]
name = "Enhancements"
labels = ["enhancement", "performance"]

[[changelog.label_groups]]
name = "Tasks"
labels = ["task"]

[[changelog.label_groups]]
name = "Documentation"
labels = ["documentation"]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_typo_map_inserts_space() {
        let map = default_typo_map();
        assert_eq!(map.len(), 14);
        assert_eq!(map.get("Fix#").map(String::as_str), Some("Fix #"));
        assert_eq!(map.get("resolves#").map(String::as_str), Some("resolves #"));
    }

    #[test]
    fn test_template_parses_to_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(config.changelog.label_groups, default_label_groups());
        assert_eq!(config.changelog.typo_map, default_typo_map());
    }

    #[test]
    fn test_default_config_toml_round_trips() {
        let rendered = default_config_toml().unwrap();
        let config: Config = toml::from_str(&rendered).unwrap();
        assert_eq!(config.changelog.fix_words, default_fix_words());
    }
}
