//! Typed configuration for Scribe document generation.
//!
//! This crate provides a strongly-typed configuration system with support for:
//! - TOML and JSON configuration files
//! - Environment variable overrides
//! - Strict validation (fails on unknown fields)
//! - Layered configuration (defaults → file → env)
//!
//! # Overview
//!
//! The configuration is built around the [`ScribeConfig`] struct:
//!
//! - [`InfoConfig`] - document title, version, description and servers
//! - [`ExcludeConfig`] - routes left out of the document
//! - [`OutputConfig`] - JSON or YAML output
//! - [`LoggingConfig`] - log level and format
//!
//! # Example
//!
//! ```no_run
//! use scribe_config::ConfigLoader;
//!
//! # fn main() -> Result<(), scribe_config::ConfigError> {
//! let config = ConfigLoader::new()
//!     .with_defaults()
//!     .with_file("scribe.toml")?
//!     .with_env_prefix("SCRIBE")
//!     .load()?;
//!
//! println!("Documenting {} v{}", config.info.title, config.info.version);
//! # Ok(())
//! # }
//! ```
//!
//! # Configuration File Format
//!
//! ```toml
//! [info]
//! title = "Users"
//! version = "2.0.0"
//! description = "User management"
//!
//! [[info.servers]]
//! url = "https://api.example.com"
//! description = "Production"
//!
//! [exclude]
//! methods = ["options"]
//! paths = ["/health"]
//! patterns = ["^/internal"]
//! static_files = true
//! tags = ["private"]
//!
//! [output]
//! format = "yaml"
//!
//! [logging]
//! level = "info"
//! format = "json"
//! ```
//!
//! # Environment Variable Overrides
//!
//! Values can be overridden via environment variables using the format
//! `PREFIX__SECTION__KEY`. For example:
//!
//! - `SCRIBE__INFO__TITLE=Users`
//! - `SCRIBE__EXCLUDE__STATIC_FILES=false`
//! - `SCRIBE__OUTPUT__FORMAT=yaml`
//! - `SCRIBE__LOGGING__LEVEL=debug`

#![doc(html_root_url = "https://docs.rs/scribe-config/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
mod error;
mod loader;
mod schema;

pub use config::*;
pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
