//! Parser configuration

use std::collections::BTreeMap;

use chronicle_core::config::defaults::{default_fix_words, default_typo_map};
use chronicle_core::config::ChangelogConfig;

/// Configuration for the commit message parser
#[derive(Debug, Clone)]
pub struct ParserConfig {
    /// Replacements applied to the message before tokenizing
    pub typo_map: BTreeMap<String, String>,
    /// Whether to apply the typo map
    pub correct_typos: bool,
    /// Words that mark the following reference as fixed by the commit
    pub fix_words: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            typo_map: default_typo_map(),
            correct_typos: true,
            fix_words: default_fix_words(),
        }
    }
}

impl ParserConfig {
    /// Take the parser settings from a changelog configuration
    pub fn from_changelog(config: &ChangelogConfig) -> Self {
        Self {
            typo_map: config.typo_map.clone(),
            correct_typos: config.correct_typos,
            fix_words: config.fix_words.clone(),
        }
    }

    /// Set whether to correct typos
    pub fn with_typo_correction(mut self, enabled: bool) -> Self {
        self.correct_typos = enabled;
        self
    }

    /// Add a typo replacement
    pub fn typo(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.typo_map.insert(from.into(), to.into());
        self
    }

    /// Replace the fix words
    pub fn with_fix_words<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fix_words = words.into_iter().map(Into::into).collect();
        self
    }

    /// Check if a word is a fix word (case-insensitive)
    pub fn is_fix_word(&self, word: &str) -> bool {
        self.fix_words.iter().any(|w| w.eq_ignore_ascii_case(word))
    }

    /// Apply the typo map to a message, if enabled
    pub fn correct(&self, message: &str) -> String {
        if !self.correct_typos {
            return message.to_string();
        }

        self.typo_map
            .iter()
            .fold(message.to_string(), |acc, (from, to)| acc.replace(from.as_str(), to))
    }
}
