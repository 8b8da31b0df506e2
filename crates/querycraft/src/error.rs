//! Error types for the querycraft crate.

use thiserror::Error;

use crate::WireValue;

/// Errors that can occur while building or rendering query documents.
#[derive(Debug, Error)]
pub enum QueryError {
    /// A setter received a value outside the option's registry or pattern.
    ///
    /// The node the setter was called on is left untouched.
    #[error(
        "invalid value {value} for `{option}` in {context}: expected {}",
        describe_allowed(.allowed, .pattern)
    )]
    InvalidOptionValue {
        option: String,
        value: WireValue,
        allowed: Vec<&'static str>,
        pattern: Option<&'static str>,
        context: String,
    },

    /// A structural operation the node's kind does not support.
    #[error("{operation} is not supported by `{kind}`")]
    UnsupportedOperation { operation: String, kind: String },

    /// Rendering a document as JSON text failed.
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

impl QueryError {
    /// Create an unsupported-operation error.
    pub fn unsupported(operation: impl Into<String>, kind: impl Into<String>) -> Self {
        Self::UnsupportedOperation {
            operation: operation.into(),
            kind: kind.into(),
        }
    }
}

fn describe_allowed(allowed: &[&'static str], pattern: &Option<&'static str>) -> String {
    match (allowed.is_empty(), *pattern) {
        (false, Some(pattern)) => format!("one of [{}] or {}", allowed.join(", "), pattern),
        (false, None) => format!("one of [{}]", allowed.join(", ")),
        (true, Some(pattern)) => pattern.to_string(),
        (true, None) => "no value".to_string(),
    }
}

/// Result type for querycraft operations.
pub type Result<T> = std::result::Result<T, QueryError>;
