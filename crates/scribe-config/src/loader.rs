//! Configuration loader with layered approach.
//!
//! This module provides the [`ConfigLoader`] for loading configuration from
//! multiple sources: defaults, files, and environment variables.

use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::path::Path;

use crate::{ConfigError, LogFormat, OutputFormat, ScribeConfig};

/// Configuration loader with layered approach.
///
/// The loader applies configuration in layers, with later layers overriding
/// earlier ones:
/// 1. Default values (built into the code)
/// 2. Configuration file (TOML or JSON)
/// 3. Environment variables (`PREFIX__SECTION__KEY`)
///
/// # Example
///
/// ```no_run
/// use scribe_config::ConfigLoader;
///
/// # fn main() -> Result<(), scribe_config::ConfigError> {
/// let config = ConfigLoader::new()
///     .with_defaults()
///     .with_file("scribe.toml")?
///     .with_env_prefix("SCRIBE")
///     .load()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ConfigLoader {
    config: ScribeConfig,
    env_prefix: Option<String>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    /// Create a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: ScribeConfig::default(),
            env_prefix: None,
        }
    }

    /// Start with default configuration values.
    #[must_use]
    pub fn with_defaults(mut self) -> Self {
        self.config = ScribeConfig::default();
        self
    }

    /// Load configuration from a file.
    ///
    /// The format is picked from the extension: `.toml` or `.json`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - The file does not exist
    /// - The file cannot be read
    /// - The file contains invalid TOML/JSON or unknown fields
    /// - The extension is not recognised
    pub fn with_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::file_not_found(path));
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::read_error(path, e))?;

        self.config = Self::parse_file(&content, path)?;
        Ok(self)
    }

    /// Load configuration from a file if it exists.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if the file exists but cannot be loaded.
    pub fn with_optional_file<P: AsRef<Path>>(self, path: P) -> Result<Self, ConfigError> {
        if path.as_ref().exists() {
            self.with_file(path)
        } else {
            Ok(self)
        }
    }

    /// Load configuration from a string in the given format ("toml" or
    /// "json").
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if parsing fails.
    ///
    /// # Example
    ///
    /// ```
    /// use scribe_config::ConfigLoader;
    ///
    /// let toml = r#"
    ///     [info]
    ///     title = "Users"
    /// "#;
    ///
    /// let config = ConfigLoader::new()
    ///     .with_string(toml, "toml")
    ///     .unwrap()
    ///     .load()
    ///     .unwrap();
    ///
    /// assert_eq!(config.info.title, "Users");
    /// ```
    pub fn with_string(mut self, content: &str, format: &str) -> Result<Self, ConfigError> {
        self.config = match format.to_lowercase().as_str() {
            "toml" => toml::from_str(content)?,
            "json" => serde_json::from_str(content)?,
            _ => {
                return Err(ConfigError::validation_error(format!(
                    "unsupported configuration format: {format}"
                )))
            }
        };
        Ok(self)
    }

    /// Set environment variable prefix for overrides.
    ///
    /// With prefix "SCRIBE":
    /// - `SCRIBE__INFO__TITLE=Users`
    /// - `SCRIBE__EXCLUDE__METHODS=options,head`
    /// - `SCRIBE__LOGGING__LEVEL=debug`
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: &str) -> Self {
        self.env_prefix = Some(prefix.to_uppercase());
        self
    }

    /// Load a `.env` file into the process environment, if there is one.
    #[must_use]
    pub fn with_dotenv(self) -> Self {
        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();
        self
    }

    /// Apply environment overrides and validate.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if an environment variable cannot be parsed or
    /// validation fails.
    pub fn load(mut self) -> Result<ScribeConfig, ConfigError> {
        if let Some(prefix) = self.env_prefix.take() {
            self.apply_env_overrides(&prefix)?;
        }

        self.config.validate()?;
        Ok(self.config)
    }

    /// Finalize without environment overrides or validation.
    #[must_use]
    pub fn load_unvalidated(self) -> ScribeConfig {
        self.config
    }

    fn parse_file(content: &str, path: &Path) -> Result<ScribeConfig, ConfigError> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_lowercase);

        match extension.as_deref() {
            Some("toml") => Ok(toml::from_str(content)?),
            Some("json") => Ok(serde_json::from_str(content)?),
            _ => Err(ConfigError::validation_error(format!(
                "unsupported configuration file format: {}",
                path.display()
            ))),
        }
    }

    fn apply_env_overrides(&mut self, prefix: &str) -> Result<(), ConfigError> {
        // Sorted so that overrides apply in a stable order.
        let env_vars: BTreeMap<String, String> = env::vars()
            .filter(|(k, _)| k.starts_with(prefix))
            .collect();

        for (key, value) in env_vars {
            self.apply_env_var(&key, &value, prefix)?;
        }

        Ok(())
    }

    fn apply_env_var(&mut self, key: &str, value: &str, prefix: &str) -> Result<(), ConfigError> {
        let Some(key_without_prefix) = key.strip_prefix(prefix).and_then(|k| k.strip_prefix("__")) else {
            // Some other variable that merely shares the prefix.
            return Ok(());
        };

        let parts: Vec<&str> = key_without_prefix.split("__").collect();

        match parts.as_slice() {
            ["INFO", "TITLE"] => self.config.info.title = value.to_string(),
            ["INFO", "VERSION"] => self.config.info.version = value.to_string(),
            ["INFO", "DESCRIPTION"] => {
                self.config.info.description = if value.is_empty() {
                    None
                } else {
                    Some(value.to_string())
                };
            }

            ["EXCLUDE", "STATIC_FILES"] => {
                self.config.exclude.static_files = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["EXCLUDE", "METHODS"] => self.config.exclude.methods = parse_list(value),
            ["EXCLUDE", "PATHS"] => self.config.exclude.paths = parse_list(value),
            ["EXCLUDE", "PATTERNS"] => self.config.exclude.patterns = parse_list(value),
            ["EXCLUDE", "TAGS"] => self.config.exclude.tags = parse_list(value),

            ["OUTPUT", "FORMAT"] => {
                self.config.output.format = match value.to_lowercase().as_str() {
                    "json" => OutputFormat::Json,
                    "yaml" | "yml" => OutputFormat::Yaml,
                    _ => return Err(ConfigError::env_parse_error(key, "expected 'json' or 'yaml'")),
                };
            }
            ["OUTPUT", "PRETTY"] => {
                self.config.output.pretty = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            ["LOGGING", "ENABLED"] => {
                self.config.logging.enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "LEVEL"] => self.config.logging.level = value.to_string(),
            ["LOGGING", "FORMAT"] => {
                self.config.logging.format = match value.to_lowercase().as_str() {
                    "json" => LogFormat::Json,
                    "pretty" => LogFormat::Pretty,
                    _ => return Err(ConfigError::env_parse_error(key, "expected 'json' or 'pretty'")),
                };
            }
            ["LOGGING", "ANSI_ENABLED"] => {
                self.config.logging.ansi_enabled = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }
            ["LOGGING", "INCLUDE_LOCATION"] => {
                self.config.logging.include_location = parse_bool(value)
                    .ok_or_else(|| ConfigError::env_parse_error(key, "expected boolean"))?;
            }

            _ => {}
        }

        Ok(())
    }
}

/// Parse a boolean from a string.
fn parse_bool(s: &str) -> Option<bool> {
    match s.to_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// Parse a comma separated list, dropping empty items.
fn parse_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}
