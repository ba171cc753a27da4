//! Tests for `repometer.toml` loading and discovery.

use std::fs;

use repometer_config::{ConfigError, ReportConfig, ScanConfig, TomlConfig};
use tempfile::TempDir;

#[test]
fn load_minimal_toml_with_single_section() {
    let config = TomlConfig::parse("[report]\ntop = 10\n").expect("valid minimal TOML");
    assert_eq!(config.report.top, Some(10));
    assert_eq!(config.report.min_count, None);
    assert_eq!(config.scan, ScanConfig::default());
}

#[test]
fn empty_string_is_the_default_config() {
    assert_eq!(TomlConfig::parse("").unwrap(), TomlConfig::default());
}

#[test]
fn load_fully_populated_toml_file() {
    let toml_str = r#"
[scan]
root = "checkouts"
output = "out/metrics.json"
exclude = ["vendor", "third_party"]
extend_exclude = ["fixtures"]
max_file_bytes = 1024

[report]
min_count = 3
top = 20
"#;
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("repometer.toml");
    fs::write(&path, toml_str).unwrap();

    let config = TomlConfig::from_file(&path).expect("valid full config");
    assert_eq!(config.scan.root.as_deref(), Some("checkouts"));
    assert_eq!(config.scan.output.as_deref(), Some("out/metrics.json"));
    assert_eq!(
        config.scan.exclude,
        Some(vec!["vendor".to_string(), "third_party".to_string()])
    );
    assert_eq!(config.scan.extend_exclude, Some(vec!["fixtures".to_string()]));
    assert_eq!(config.scan.max_file_bytes, Some(1024));
    assert_eq!(
        config.report,
        ReportConfig {
            min_count: Some(3),
            top: Some(20)
        }
    );
}

#[test]
fn wrong_value_type_is_a_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("repometer.toml");
    fs::write(&path, "[report]\ntop = \"many\"\n").unwrap();

    let err = TomlConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::Parse { .. }));
    assert!(err.to_string().contains("invalid TOML"));
}

#[test]
fn discover_uses_file_in_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("repometer.toml"), "[scan]\nroot = \"src\"\n").unwrap();

    let config = TomlConfig::discover(None, dir.path()).unwrap();
    assert_eq!(config.scan.root.as_deref(), Some("src"));
}

#[test]
fn discover_without_file_is_default() {
    let dir = TempDir::new().unwrap();
    assert_eq!(
        TomlConfig::discover(None, dir.path()).unwrap(),
        TomlConfig::default()
    );
}

#[test]
fn discover_with_missing_explicit_file_fails() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = TomlConfig::discover(Some(&missing), dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::NotFound { .. }));
    assert!(err.to_string().contains("nope.toml"));
}

#[test]
fn explicit_file_wins_over_directory_file() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("repometer.toml"), "[report]\ntop = 1\n").unwrap();
    let explicit = dir.path().join("other.toml");
    fs::write(&explicit, "[report]\ntop = 7\n").unwrap();

    let config = TomlConfig::discover(Some(&explicit), dir.path()).unwrap();
    assert_eq!(config.report.top, Some(7));
}
