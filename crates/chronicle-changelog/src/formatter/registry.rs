//! Formatter registry

use std::sync::Arc;

use super::{ChangelogFormatter, JsonFormatter, MarkdownFormatter};

/// Registry of available changelog formatters
pub struct FormatterRegistry {
    formatters: Vec<Arc<dyn ChangelogFormatter>>,
}

impl FormatterRegistry {
    /// Create a new registry with all built-in formatters
    pub fn new() -> Self {
        Self {
            formatters: vec![
                Arc::new(MarkdownFormatter::new()),
                Arc::new(JsonFormatter::new()),
            ],
        }
    }

    /// Register a formatter
    pub fn register<F: ChangelogFormatter + 'static>(&mut self, formatter: F) {
        self.formatters.push(Arc::new(formatter));
    }

    /// Get formatter by name or file extension
    pub fn get(&self, format: &str) -> Option<Arc<dyn ChangelogFormatter>> {
        self.formatters
            .iter()
            .find(|f| f.name() == format || f.extension() == format)
            .cloned()
    }

    /// Names of all registered formatters
    pub fn names(&self) -> Vec<&'static str> {
        self.formatters.iter().map(|f| f.name()).collect()
    }
}

impl Default for FormatterRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_name_or_extension() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.get("markdown").unwrap().name(), "markdown");
        assert_eq!(registry.get("md").unwrap().name(), "markdown");
        assert_eq!(registry.get("json").unwrap().name(), "json");
        assert!(registry.get("html").is_none());
    }

    #[test]
    fn test_names() {
        let registry = FormatterRegistry::new();
        assert_eq!(registry.names(), vec!["markdown", "json"]);
    }
}
