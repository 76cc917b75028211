//! Errors raised while reading generator inputs.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for the input pipeline.
pub type ScribeResult<T> = Result<T, ScribeError>;

/// Errors that can occur while loading inputs or rendering a document.
#[derive(Error, Debug)]
pub enum ScribeError {
    /// An input file could not be read.
    #[error("failed to read {path}")]
    Read {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An input file is not valid JSON for what it holds.
    #[error("failed to parse {path}: {source}")]
    Parse {
        /// Path to the file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// Configuration could not be turned into a generator.
    #[error(transparent)]
    Config(#[from] scribe_config::ConfigError),

    /// The document could not be serialized.
    #[error(transparent)]
    Docs(#[from] scribe_docs::DocsError),
}

impl ScribeError {
    /// Create a new read error.
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Create a new parse error.
    pub fn parse(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        Self::Parse {
            path: path.into(),
            source,
        }
    }
}
