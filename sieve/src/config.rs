//! Search configuration.
//!
//! ```toml
//! # sieve.toml
//! reserved_words = ["Order", "Select"]
//! log_predicates = false
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SearchError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Identifiers escaped in addition to the dialect's built-in keywords.
    pub reserved_words: Vec<String>,
    /// Emit compiled predicate and ordering text at debug level.
    pub log_predicates: bool,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            reserved_words: Vec::new(),
            log_predicates: true,
        }
    }
}

impl SearchConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, SearchError> {
        Ok(toml::from_str(source)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SearchError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    #[inline]
    pub fn with_reserved_word(mut self, word: impl Into<String>) -> Self {
        self.reserved_words.push(word.into());
        self
    }
}
