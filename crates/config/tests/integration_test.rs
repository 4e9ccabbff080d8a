//! Integration tests for reading fixture files through the public API.
//!
//! These tests exercise `Registry` exactly as a downstream crate would,
//! using the fixtures under `tests/fixtures`.

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use envreg_config::{CacheStore, ParseMode, Registry, RegistryError, Value, read_config_file};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

fn read_and_compare(name: &str, expected: &[(&str, &str)]) {
    let registry = Registry::new(fixture(name), Arc::new(CacheStore::new()));
    registry.load_config().expect("fixture should load");

    for (key, value) in expected {
        assert_eq!(
            registry.get_string(key),
            *value,
            "{name}: wrong value for {key}"
        );
    }
}

#[test]
fn test_read_plain_env() {
    read_and_compare(
        "plain.env",
        &[
            ("OPTION_A", "1"),
            ("OPTION_B", "2"),
            ("OPTION_C", "3"),
            ("OPTION_D", "4"),
            ("OPTION_E", "5"),
            ("OPTION_F", ""),
            ("OPTION_G", ""),
            ("OPTION_H", "my string"),
        ],
    );
}

#[test]
fn test_read_unquoted_env() {
    read_and_compare(
        "unquoted.env",
        &[
            ("OPTION_A", "some quoted phrase"),
            ("OPTION_B", "first one with an unquoted phrase"),
            ("OPTION_C", "then another one with an unquoted phrase"),
            (
                "OPTION_D",
                "then another one with an unquoted phrase special è char",
            ),
            ("OPTION_E", "then another one quoted phrase"),
        ],
    );
}

#[test]
fn test_read_exported_env() {
    read_and_compare("exported.env", &[("OPTION_A", "2"), ("OPTION_B", "\\n")]);
}

#[test]
fn test_keys_are_case_insensitive() {
    let registry = Registry::new(fixture("plain.env"), Arc::new(CacheStore::new()));
    assert_eq!(registry.get("option_h"), "my string");
    assert_eq!(registry.get("Option_H"), "my string");
}

#[test]
fn test_prefixed_registry_reads_typed_values() {
    let registry = Registry::builder()
        .with_config_file(fixture("prefixed.env"))
        .with_prefix("app")
        .build();

    assert_eq!(registry.get_string("api_endpoint"), "http://localhost:8000/api");
    assert_eq!(registry.get_duration("some_duration"), Duration::from_secs(1));
    assert_eq!(registry.get_u64("db_port"), 3306);
    assert_eq!(registry.get_string("db_password"), "my-secret-pw");
    assert!(!registry.is_set("does_not_exist"));
}

#[test]
fn test_strict_mode_rejects_fixture_with_malformed_line() {
    let registry = Registry::builder()
        .with_config_file(fixture("prefixed.env"))
        .with_parse_mode(ParseMode::Strict)
        .build();

    match registry.load_config() {
        Err(RegistryError::Parse { line, .. }) => assert_eq!(line, 10),
        other => panic!("expected Parse error, got {other:?}"),
    }
}

#[test]
fn test_read_config_file_is_public() {
    let entries: BTreeMap<String, String> =
        read_config_file(&fixture("exported.env"), "=", ParseMode::Lenient).unwrap();
    assert_eq!(entries.len(), 2);
}

#[test]
fn test_load_config_missing_file() {
    let registry = Registry::new(fixture("does-not-exist.env"), Arc::new(CacheStore::new()));
    let err = registry.load_config().unwrap_err();
    assert!(err.is_not_found());
    assert!(registry.get("OPTION_A").is_empty());
}

#[test]
fn test_load_config_on_directory_is_not_found() {
    let registry = Registry::new(
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests").join("fixtures"),
        Arc::new(CacheStore::new()),
    );
    assert!(matches!(
        registry.load_config(),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn test_value_reexport() {
    assert_eq!(Value::from("x"), "x");
}
