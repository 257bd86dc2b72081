use std::borrow::Cow;

use thiserror::Error;

/// Top-level error type returned by criteria compilation and search execution.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A criterion or sort key was compiled without a usable field path.
    #[error("missing identifier in {context}: {detail}")]
    MissingIdentifier { context: &'static str, detail: String },

    /// A criteria container carried zero or more than one payload.
    #[error("unsupported condition shape: container has {populated} populated payload slots, expected exactly 1")]
    UnsupportedCondition { populated: usize },

    /// Predicate or ordering text could not be parsed by the evaluator.
    #[error("parse error at position {position}: {message}")]
    Parse { message: String, position: usize },

    /// A field path does not resolve against the record type.
    #[error("unknown member '{path}'")]
    Resolution { path: String },

    /// Evaluation failed (type mismatch, unbound parameter, null receiver).
    #[error("evaluation error: {message}")]
    Evaluation { message: String },

    /// Search configuration could not be read.
    #[error("configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// Search configuration file could not be opened.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Failure raised by the underlying data source.
    #[error("{message}")]
    Source { message: Cow<'static, str> },
}

impl SearchError {
    pub(crate) fn missing_identifier(context: &'static str, detail: impl Into<String>) -> Self {
        Self::MissingIdentifier {
            context,
            detail: detail.into(),
        }
    }

    pub(crate) fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation {
            message: message.into(),
        }
    }

    pub(crate) fn parse(message: impl Into<String>, position: usize) -> Self {
        Self::Parse {
            message: message.into(),
            position,
        }
    }

    /// Returns `true` for errors caused by caller misuse of the criteria model.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::MissingIdentifier { .. } | Self::UnsupportedCondition { .. })
    }
}
