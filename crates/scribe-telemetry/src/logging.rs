//! Structured logging for Scribe.
//!
//! Library crates only emit `tracing` events. Binaries call
//! [`init_logging`] once to install a subscriber.
//!
//! # Example
//!
//! ```rust
//! use scribe_telemetry::{init_logging, LogConfig};
//!
//! let config = LogConfig::development();
//! init_logging(&config).unwrap();
//!
//! tracing::info!(paths = 3, operations = 5, "Generated OpenAPI document");
//! ```

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::error::TelemetryError;
use crate::TelemetryResult;

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Whether logging is enabled.
    pub enabled: bool,

    /// Filter directive (e.g., "info", "scribe_core=debug,warn").
    pub level: String,

    /// Whether to output JSON format.
    pub json_format: bool,

    /// Whether to include file/line info.
    pub file_line_info: bool,

    /// Whether to include target (module path).
    pub include_target: bool,

    /// Whether to emit ANSI colours in the pretty format.
    pub ansi: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: "info".to_string(),
            json_format: true,
            file_line_info: false,
            include_target: true,
            ansi: false,
        }
    }
}

impl LogConfig {
    /// Creates a development configuration with human-readable output.
    #[must_use]
    pub fn development() -> Self {
        Self {
            enabled: true,
            level: "debug".to_string(),
            json_format: false,
            file_line_info: true,
            include_target: true,
            ansi: true,
        }
    }

    /// Creates a production configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self::default()
    }
}

/// Initializes the logging subsystem.
///
/// Events are written to stderr; stdout carries generated documents.
///
/// # Errors
///
/// Returns [`TelemetryError::InvalidFilter`] for an unparsable level and
/// [`TelemetryError::LoggingInit`] if a global subscriber is already set.
pub fn init_logging(config: &LogConfig) -> TelemetryResult<()> {
    if !config.enabled {
        return Ok(());
    }

    let filter = create_env_filter(&config.level)?;

    if config.json_format {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .json()
            .with_writer(std::io::stderr)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    } else {
        let fmt_layer = tracing_subscriber::fmt::layer()
            .pretty()
            .with_writer(std::io::stderr)
            .with_ansi(config.ansi)
            .with_file(config.file_line_info)
            .with_line_number(config.file_line_info)
            .with_target(config.include_target)
            .with_filter(filter);

        tracing_subscriber::registry()
            .with(fmt_layer)
            .try_init()
            .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
    }

    Ok(())
}

/// Creates an env filter from a directive string.
///
/// # Errors
///
/// Returns error if the filter string is invalid.
pub fn create_env_filter(filter: &str) -> TelemetryResult<EnvFilter> {
    EnvFilter::try_new(filter).map_err(|e| TelemetryError::InvalidFilter(format!("{filter}: {e}")))
}

/// Standard log fields for Scribe.
///
/// Use these field names for consistency across logs.
pub mod fields {
    /// HTTP method of a route.
    pub const METHOD: &str = "method";

    /// Path pattern of a route.
    pub const PATH: &str = "path";

    /// Schema vendor name.
    pub const VENDOR: &str = "vendor";

    /// Component schema name.
    pub const SCHEMA: &str = "schema";

    /// Number of paths in a document.
    pub const PATHS: &str = "paths";

    /// Number of operations in a document.
    pub const OPERATIONS: &str = "operations";

    /// Input file being read.
    pub const FILE: &str = "file";

    /// Error field name.
    pub const ERROR: &str = "error";
}
