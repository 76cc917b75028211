//! Error types for the documentation generation crate.
//!
//! Generation itself never fails; errors come from serializing the
//! finished document and from building exclusion rules.

use thiserror::Error;

/// Errors that can occur while producing a document.
#[derive(Debug, Error)]
pub enum DocsError {
    /// Failed to serialize the document to JSON.
    #[error("Failed to serialize OpenAPI document: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Failed to serialize the document to YAML.
    #[error("Failed to serialize OpenAPI document as YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// An exclusion pattern is not a valid regular expression.
    #[error("Invalid exclusion pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The offending pattern.
        pattern: String,
        /// Why it failed to compile.
        reason: String,
    },
}

/// Result type for documentation operations.
pub type DocsResult<T> = Result<T, DocsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serialization_error() {
        let err: DocsError = serde_json::from_str::<String>("invalid")
            .unwrap_err()
            .into();
        assert!(matches!(err, DocsError::SerializationError(_)));
        assert!(err.to_string().contains("serialize"));
    }

    #[test]
    fn test_invalid_pattern_error() {
        let err = DocsError::InvalidPattern {
            pattern: "(".to_string(),
            reason: "unclosed group".to_string(),
        };
        assert!(err.to_string().contains("'('"));
        assert!(err.to_string().contains("unclosed group"));
    }
}
