//! Configuration section types.

use scribe_core::Method;
use scribe_docs::{DocsError, ExcludeRules};
use scribe_telemetry::LogConfig;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A server entry written into the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ServerEntry {
    /// Server URL.
    pub url: String,

    /// Server description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Document metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct InfoConfig {
    /// API title.
    #[serde(default = "default_title")]
    pub title: String,

    /// API version.
    #[serde(default = "default_version")]
    pub version: String,

    /// API description.
    #[serde(default)]
    pub description: Option<String>,

    /// Servers listed in the document.
    #[serde(default)]
    pub servers: Vec<ServerEntry>,
}

impl Default for InfoConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            version: default_version(),
            description: None,
            servers: Vec::new(),
        }
    }
}

fn default_title() -> String {
    "API".to_string()
}

fn default_version() -> String {
    "1.0.0".to_string()
}

/// Routes to leave out of the document.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ExcludeConfig {
    /// Methods to exclude (e.g. "options").
    #[serde(default)]
    pub methods: Vec<String>,

    /// Exact path patterns to exclude.
    #[serde(default)]
    pub paths: Vec<String>,

    /// Regular expressions matched against path patterns.
    #[serde(default)]
    pub patterns: Vec<String>,

    /// Exclude paths containing a `.` (static files).
    #[serde(default = "default_true")]
    pub static_files: bool,

    /// Exclude routes carrying any of these tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for ExcludeConfig {
    fn default() -> Self {
        Self {
            methods: Vec::new(),
            paths: Vec::new(),
            patterns: Vec::new(),
            static_files: true,
            tags: Vec::new(),
        }
    }
}

impl ExcludeConfig {
    /// Build the generator's exclusion rules.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an unknown method or a
    /// pattern that is not a valid regular expression.
    pub fn to_rules(&self) -> Result<ExcludeRules, ConfigError> {
        let mut rules = ExcludeRules::new().static_files(self.static_files);

        for method in &self.methods {
            let method: Method = method
                .parse()
                .map_err(|e: scribe_core::CoreError| ConfigError::invalid_value("exclude.methods", e.to_string()))?;
            rules = rules.method(method);
        }
        for path in &self.paths {
            rules = rules.path(path.clone());
        }
        for pattern in &self.patterns {
            rules = rules.pattern(pattern).map_err(|e| match e {
                DocsError::InvalidPattern { pattern, reason } => {
                    ConfigError::invalid_value("exclude.patterns", format!("{pattern}: {reason}"))
                }
                other => ConfigError::invalid_value("exclude.patterns", other.to_string()),
            })?;
        }
        for tag in &self.tags {
            rules = rules.tag(tag.clone());
        }

        Ok(rules)
    }
}

/// Document serialization format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// JSON document.
    #[default]
    Json,
    /// YAML document.
    Yaml,
}

/// Output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Serialization format.
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output.
    #[serde(default = "default_true")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: true,
        }
    }
}

/// Log format.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// JSON formatted logs.
    Json,
    /// Human-readable pretty format.
    #[default]
    Pretty,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Enable logging.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Log level or filter directive.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log output format.
    #[serde(default)]
    pub format: LogFormat,

    /// Include ANSI color codes in output.
    #[serde(default)]
    pub ansi_enabled: bool,

    /// Include source file and line in logs.
    #[serde(default)]
    pub include_location: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            level: default_log_level(),
            format: LogFormat::default(),
            ansi_enabled: false,
            include_location: false,
        }
    }
}

impl LoggingConfig {
    /// Convert into the telemetry crate's logging settings.
    pub fn to_log_config(&self) -> LogConfig {
        LogConfig {
            enabled: self.enabled,
            level: self.level.clone(),
            json_format: self.format == LogFormat::Json,
            file_line_info: self.include_location,
            include_target: true,
            ansi: self.ansi_enabled,
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

fn default_true() -> bool {
    true
}
