use std::io::Write;
use std::path::{Path, PathBuf};

use usage_config::{ConfigError, UsageConfig};
use usage_core::{Args, OptionSpec, OptionTable, ProgramInfo, ValueType};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sample_config() -> UsageConfig {
    UsageConfig {
        info: ProgramInfo::new("usage_demo", "1.4.0")
            .with_author("Jane Doe")
            .with_copyright("2024, Jane Doe"),
        options: OptionTable::new()
            .with_option(
                "name",
                OptionSpec::required("n", "name", ValueType::String)
                    .with_arg_name("name")
                    .with_description("user's name"),
            )
            .with_option(
                "hex",
                OptionSpec::required("x", "hex", ValueType::Hex).with_arg_name("hex"),
            )
            .with_option("sudo", OptionSpec::flag("s", "sudo")),
    }
}

fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
    let path = dir.join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(contents.as_bytes()).unwrap();
    f.flush().unwrap();
    path
}

// ---------------------------------------------------------------------------
// Round trips
// ---------------------------------------------------------------------------

#[test]
fn test_yaml_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usage.yaml");

    let original = sample_config();
    original.save(&path).unwrap();

    let loaded = UsageConfig::load(&path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_json_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("usage.json");

    let original = sample_config();
    original.save(&path).unwrap();

    let loaded = UsageConfig::load(&path).unwrap();
    assert_eq!(loaded, original);
    assert_eq!(
        loaded.options.names().collect::<Vec<_>>(),
        vec!["name", "hex", "sudo"]
    );
}

// ---------------------------------------------------------------------------
// Loading from hand-written files
// ---------------------------------------------------------------------------

#[test]
fn test_load_yaml_and_scan() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "demo.yml",
        r#"
info:
  name: demo
  version: "2.0"
options:
  level:
    key: l
    word: level
    arity: required
    type: int
  color:
    word: color
    arity: optional
    type: bool
"#,
    );

    let usage = UsageConfig::load(&path)
        .unwrap()
        .into_usage(Args::new(["demo", "--level", "3", "--color=on", "rest"]));

    assert_eq!(usage.get("level").as_int(), 3);
    assert!(!usage.contains("color"));
    assert_eq!(usage.errors().len(), 1);
    assert_eq!(usage.remainder(), ["rest"]);
    assert_eq!(usage.version(), "demo \nVersion 2.0");
}

#[test]
fn test_load_missing_file() {
    let dir = tempfile::tempdir().unwrap();

    let err = UsageConfig::load(dir.path().join("absent.yml")).unwrap_err();
    assert!(matches!(err, ConfigError::IoError(_)));
}

#[test]
fn test_load_unsupported_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "usage.toml", "");

    let err = UsageConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::UnsupportedFormat(_)));
}

#[test]
fn test_load_invalid_table() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(
        dir.path(),
        "bad.json",
        r#"{ "options": { "verbose": { "key": "-v" } } }"#,
    );

    let err = UsageConfig::load(&path).unwrap_err();
    match err {
        ConfigError::InvalidTable(errors) => assert_eq!(errors.len(), 1),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_load_malformed_yaml() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_file(dir.path(), "broken.yaml", "options: [unclosed");

    let err = UsageConfig::load(&path).unwrap_err();
    assert!(matches!(err, ConfigError::YamlError(_)));
}
