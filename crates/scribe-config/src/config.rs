//! Main configuration type.

use serde::{Deserialize, Serialize};

use crate::{ConfigError, ExcludeConfig, InfoConfig, LoggingConfig, OutputConfig};

/// Complete Scribe configuration.
///
/// Use [`ConfigLoader`](crate::ConfigLoader) to load it from files and
/// environment variables.
///
/// # Example
///
/// ```
/// use scribe_config::ScribeConfig;
///
/// let config = ScribeConfig::default();
/// assert_eq!(config.info.title, "API");
/// assert!(config.exclude.static_files);
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(deny_unknown_fields)]
pub struct ScribeConfig {
    /// Document metadata.
    #[serde(default)]
    pub info: InfoConfig,

    /// Route exclusion rules.
    #[serde(default)]
    pub exclude: ExcludeConfig,

    /// Output settings.
    #[serde(default)]
    pub output: OutputConfig,

    /// Logging settings.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScribeConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if:
    /// - The title or version is empty
    /// - A server URL is empty
    /// - An excluded method is unknown or a pattern does not compile
    /// - The log level is not a valid filter directive
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.info.title.trim().is_empty() {
            return Err(ConfigError::invalid_value("info.title", "must not be empty"));
        }
        if self.info.version.trim().is_empty() {
            return Err(ConfigError::invalid_value("info.version", "must not be empty"));
        }
        if self.info.servers.iter().any(|server| server.url.trim().is_empty()) {
            return Err(ConfigError::invalid_value("info.servers", "server url must not be empty"));
        }

        self.exclude.to_rules()?;

        if self.logging.enabled {
            scribe_telemetry::create_env_filter(&self.logging.level)
                .map_err(|e| ConfigError::invalid_value("logging.level", e.to_string()))?;
        }

        Ok(())
    }
}
