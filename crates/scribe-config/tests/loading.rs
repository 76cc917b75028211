//! Loading configuration files from disk.

use std::fs;

use scribe_config::{ConfigError, ConfigLoader, LogFormat, OutputFormat};
use scribe_core::{Method, Route};
use tempfile::TempDir;

fn write(dir: &TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "scribe.toml",
        r#"
            [info]
            title = "Orders"
            version = "0.3.0"

            [exclude]
            methods = ["options"]
            patterns = ["^/admin"]

            [logging]
            format = "json"
        "#,
    );

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();

    assert_eq!(config.info.title, "Orders");
    assert_eq!(config.logging.format, LogFormat::Json);
    assert!(config.exclude.static_files);

    let rules = config.exclude.to_rules().unwrap();
    assert!(rules.matches(&Route::new(Method::Options, "/orders")));
    assert!(rules.matches(&Route::new(Method::Get, "/admin/users")));
    assert!(!rules.matches(&Route::new(Method::Get, "/orders")));
}

#[test]
fn loads_json_file() {
    let dir = TempDir::new().unwrap();
    let path = write(
        &dir,
        "scribe.json",
        r#"{"info": {"servers": [{"url": "http://localhost:3000"}]}, "output": {"format": "yaml", "pretty": false}}"#,
    );

    let config = ConfigLoader::new().with_file(&path).unwrap().load().unwrap();

    assert_eq!(config.info.servers[0].url, "http://localhost:3000");
    assert_eq!(config.output.format, OutputFormat::Yaml);
    assert!(!config.output.pretty);
}

#[test]
fn unknown_fields_are_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "scribe.toml", "[output]\ncolour = true\n");

    let result = ConfigLoader::new().with_file(&path);
    assert!(matches!(result, Err(ConfigError::TomlError(_))));
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "scribe.ini", "title = Orders\n");

    let result = ConfigLoader::new().with_file(&path);
    assert!(matches!(result, Err(ConfigError::ValidationError(_))));
}

#[test]
fn missing_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    let result = ConfigLoader::new().with_file(dir.path().join("absent.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound { .. })));
}

#[test]
fn optional_file_is_loaded_when_present() {
    let dir = TempDir::new().unwrap();
    let present = write(&dir, "scribe.toml", "[info]\ntitle = \"Present\"\n");

    let config = ConfigLoader::new()
        .with_optional_file(dir.path().join("absent.toml"))
        .unwrap()
        .with_optional_file(&present)
        .unwrap()
        .load()
        .unwrap();

    assert_eq!(config.info.title, "Present");
}

#[test]
fn invalid_values_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = write(&dir, "scribe.toml", "[exclude]\nmethods = [\"fetch\"]\n");

    let loader = ConfigLoader::new().with_file(&path).unwrap();
    assert!(matches!(loader.load(), Err(ConfigError::InvalidValue { .. })));
}
