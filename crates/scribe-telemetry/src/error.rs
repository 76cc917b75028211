//! Telemetry error types.

use thiserror::Error;

/// Errors that can occur while setting up logging.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// The level or filter directive could not be parsed.
    #[error("Invalid log filter: {0}")]
    InvalidFilter(String),
}
