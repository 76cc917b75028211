//! # Scribe Telemetry
//!
//! Logging setup for Scribe binaries.
//!
//! The library crates emit `tracing` events with structured fields:
//! `warn` for unsupported schema vendors and failed conversions, `debug`
//! for skipped routes, skipped declaration fragments and reference fills,
//! and `info` when a document has been generated. [`init_logging`] installs
//! a `tracing-subscriber` registry with an [`EnvFilter`] and either a JSON
//! or a pretty formatter.
//!
//! [`EnvFilter`]: tracing_subscriber::EnvFilter

#![doc(html_root_url = "https://docs.rs/scribe-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod logging;

pub use error::TelemetryError;
pub use logging::{create_env_filter, fields, init_logging, LogConfig};

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;
