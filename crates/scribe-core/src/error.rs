//! Error types for the core schema engine.
//!
//! Most of the engine absorbs failures locally (see [`Normalizer`]), so these
//! errors only surface at the boundary where external input is classified
//! into the canonical model.
//!
//! [`Normalizer`]: crate::Normalizer

use thiserror::Error;

/// Result type alias using [`CoreError`].
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while classifying external input.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A JSON value could not be read as a schema.
    #[error("invalid schema at '{pointer}': {reason}")]
    InvalidSchema {
        /// JSON pointer of the offending node.
        pointer: String,
        /// Why the node was rejected.
        reason: String,
    },

    /// A route declared a method outside the supported verb set.
    #[error("unknown HTTP method: {0}")]
    UnknownMethod(String),
}

impl CoreError {
    /// Create an invalid schema error.
    pub fn invalid_schema(pointer: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidSchema {
            pointer: pointer.into(),
            reason: reason.into(),
        }
    }
}
