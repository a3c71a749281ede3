//! JSON changelog formatter

use chronicle_core::config::ChangelogConfig;
use chronicle_core::Result;

use super::{ChangelogDocument, ChangelogFormatter};

/// Renders the document as pretty-printed JSON
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new() -> Self {
        Self
    }
}

impl ChangelogFormatter for JsonFormatter {
    fn format(&self, document: &ChangelogDocument, _config: &ChangelogConfig) -> Result<String> {
        let mut output = serde_json::to_string_pretty(document)?;
        output.push('\n');
        Ok(output)
    }

    fn name(&self) -> &'static str {
        "json"
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::commit;
    use crate::types::{Tag, VersionRecord};

    #[test]
    fn test_format_json() {
        let head = commit("abc1234567890", "Initial commit");
        let mut record = VersionRecord::new(Tag::pseudo(&head));
        record.add_commit(head);

        let document = ChangelogDocument::new("widgets", vec![record])
            .with_base_url("https://github.com/acme/widgets");
        let output = JsonFormatter::new()
            .format(&document, &ChangelogConfig::default())
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["project_name"], "widgets");
        assert_eq!(value["base_url"], "https://github.com/acme/widgets");
        assert_eq!(value["records"][0]["tag"]["kind"], "pseudo");
        assert_eq!(value["records"][0]["commits"][0]["hash"], "abc1234567890");
    }
}
