use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::config::SearchConfig;
use crate::errors::SearchError;

// same character classes as the evaluator's identifiers
static IDENTIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\p{Alphabetic}_][\p{Alphabetic}\p{N}_]*$").expect("identifier pattern is valid"));

/// Words the expression evaluator treats as keywords or predefined names.
pub const BUILTIN_RESERVED: &[&str] = &[
    "and", "or", "not", "in", "null", "true", "false", "it", "parent", "root", "any", "datetime", "guid",
];

/// Prefix marking an identifier that must not be read as a keyword.
pub const ESCAPE_PREFIX: char = '@';

/// Naming rules of the target expression dialect.
///
/// Field paths are split on `.`, each segment validated, and reserved segments
/// escaped with [`ESCAPE_PREFIX`] (`DateTime` → `@DateTime`). Parameters render as
/// `@0`, `@1`, … so they never collide with escaped identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    reserved: BTreeSet<String>,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            reserved: BUILTIN_RESERVED.iter().map(|word| word.to_string()).collect(),
        }
    }
}

impl Dialect {
    pub fn from_config(config: &SearchConfig) -> Self {
        let mut dialect = Self::default();
        dialect
            .reserved
            .extend(config.reserved_words.iter().map(|word| word.to_ascii_lowercase()));
        dialect
    }

    #[inline]
    pub fn is_reserved(&self, segment: &str) -> bool {
        self.reserved.contains(&segment.to_ascii_lowercase())
    }

    /// Escaping hook applied to every rendered path segment.
    pub fn escape_identifier(&self, segment: &str) -> String {
        if self.is_reserved(segment) {
            format!("{ESCAPE_PREFIX}{segment}")
        } else {
            segment.to_string()
        }
    }

    /// Validate and render a dotted field path.
    pub fn render_path(&self, path: &str, context: &'static str) -> Result<String, SearchError> {
        if path.trim().is_empty() {
            return Err(SearchError::missing_identifier(context, "field path is empty"));
        }
        let mut rendered = String::with_capacity(path.len() + 2);
        for (i, segment) in path.split('.').enumerate() {
            if !IDENTIFIER.is_match(segment) {
                return Err(SearchError::missing_identifier(
                    context,
                    format!("'{segment}' in path '{path}' is not an identifier"),
                ));
            }
            if i > 0 {
                rendered.push('.');
            }
            rendered.push_str(&self.escape_identifier(segment));
        }
        Ok(rendered)
    }

    #[inline]
    pub fn parameter(&self, index: usize) -> String {
        format!("@{index}")
    }
}
