//! Tests for TOML config loading, creation, and path resolution.

use super::template::default_config_toml;
use super::*;
use pagehost_common::ConfigError;
use std::path::Path;

#[test]
fn load_from_nonexistent_returns_file_not_found() {
    let result = load_from_path(Path::new("/tmp/nonexistent_pagehost_config.toml"));
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn load_valid_partial_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r##"
[page]
scheme = "sgweb"
host = "sourcegraph"

[theme]
dark_background = "#1e1f22"
"##,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.page.scheme, "sgweb");
    assert_eq!(config.page.host, "sourcegraph");
    assert_eq!(config.theme.dark_background, "#1e1f22");
    // Defaults preserved
    assert_eq!(config.page.entry, "html/index.html");
    assert_eq!(config.theme.light_background, "#f7f8fa");
    assert_eq!(config.bridge.bootstrap_function, "initializePage");
}

#[test]
fn load_invalid_toml_returns_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "this is not valid toml {{{").unwrap();

    let result = load_from_path(&path);
    assert!(matches!(result, Err(ConfigError::ParseError(_))));
}

#[test]
fn load_config_with_invalid_values_returns_parsed_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(
        &path,
        r#"
[page]
scheme = "http"
"#,
    )
    .unwrap();

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.page.scheme, "http");
}

#[test]
fn create_default_config_writes_parseable_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("config.toml");

    create_default_config(&path).unwrap();
    assert!(path.exists());

    let config = load_from_path(&path).unwrap();
    assert_eq!(config.page.scheme, "pagehost");
}

#[test]
fn template_is_valid_toml() {
    let parsed: Result<crate::PageHostConfig, _> = toml::from_str(&default_config_toml());
    assert!(parsed.is_ok());
}

#[test]
fn default_path_ends_with_pagehost_config() {
    if let Ok(path) = default_config_path() {
        assert!(path.ends_with("pagehost/config.toml"));
    }
}
