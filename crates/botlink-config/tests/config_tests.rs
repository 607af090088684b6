// SPDX-FileCopyrightText: 2026 Botlink Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the botlink configuration system.

use botlink_config::model::BotlinkConfig;
use botlink_config::{
    ConfigError, load_and_validate_str, load_config_from_path, load_config_from_str,
};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_botlink_config() {
    let toml = r#"
[agent]
name = "test-agent"
log_level = "debug"

[storage]
database_path = "/tmp/test.db"
wal_mode = false
connect_max_retries = 5
connect_backoff_ms = 250

[relay]
base_url = "http://10.0.0.2:5000"
bot_id = 7
timeout_secs = 10

[import]
max_concurrent_inserts = 4
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.agent.name, "test-agent");
    assert_eq!(config.agent.log_level, "debug");
    assert_eq!(config.storage.database_path, "/tmp/test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.storage.connect_max_retries, 5);
    assert_eq!(config.storage.connect_backoff_ms, 250);
    assert_eq!(config.relay.base_url, "http://10.0.0.2:5000");
    assert_eq!(config.relay.bot_id, 7);
    assert_eq!(config.relay.timeout_secs, 10);
    assert_eq!(config.import.max_concurrent_inserts, 4);
}

/// An empty config falls back to compiled defaults everywhere.
#[test]
fn empty_toml_uses_defaults() {
    let config = load_config_from_str("").expect("empty TOML should deserialize");
    assert_eq!(config.agent.name, "botlink");
    assert_eq!(config.agent.log_level, "info");
    assert!(config.storage.wal_mode);
    assert_eq!(config.storage.connect_max_retries, 3);
    assert_eq!(config.relay.base_url, "http://127.0.0.1:5000");
    assert_eq!(config.relay.bot_id, 1);
    assert_eq!(config.relay.timeout_secs, 30);
    assert_eq!(config.import.max_concurrent_inserts, 8);
}

/// A partial section keeps defaults for the fields it omits.
#[test]
fn partial_section_keeps_field_defaults() {
    let toml = r#"
[relay]
base_url = "http://192.168.1.50:5000"
"#;
    let config = load_config_from_str(toml).unwrap();
    assert_eq!(config.relay.base_url, "http://192.168.1.50:5000");
    assert_eq!(config.relay.bot_id, 1);
    assert_eq!(config.relay.timeout_secs, 30);
}

/// Unknown keys are rejected and reported with a suggestion.
#[test]
fn unknown_field_produces_unknown_key_error() {
    let toml = r#"
[relay]
base_ulr = "http://127.0.0.1:5000"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::UnknownKey { key, suggestion, .. }
            if key == "base_ulr" && suggestion.as_deref() == Some("base_url")
    )));
}

/// Type mismatches are reported as invalid-type diagnostics.
#[test]
fn wrong_type_produces_invalid_type_error() {
    let toml = r#"
[relay]
timeout_secs = "soon"
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert!(
        errors
            .iter()
            .any(|e| matches!(e, ConfigError::InvalidType { .. })),
        "got: {errors:?}"
    );
}

/// Semantic validation runs after a successful parse.
#[test]
fn semantic_validation_rejects_bad_values() {
    let toml = r#"
[relay]
base_url = "not a url"
bot_id = -3
"#;
    let errors = load_and_validate_str(toml).unwrap_err();
    assert_eq!(errors.len(), 2);
    assert!(errors.iter().all(|e| matches!(e, ConfigError::Validation { .. })));
}

/// An explicit config file path loads without XDG lookup.
#[test]
fn load_from_explicit_path_reads_the_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("botlink.toml");
    std::fs::write(&path, "[agent]\nname = \"from-file\"\n").unwrap();

    let config = load_config_from_path(&path).expect("file should load");
    assert_eq!(config.agent.name, "from-file");
    assert_eq!(config.relay.bot_id, 1);
}

/// The config model round-trips through serde (needed for Figment defaults).
#[test]
fn default_config_round_trips_through_serde() {
    let config = BotlinkConfig::default();
    let json = serde_json::to_string(&config).unwrap();
    let back: BotlinkConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back.agent.name, config.agent.name);
    assert_eq!(back.storage.database_path, config.storage.database_path);
    assert_eq!(back.relay.base_url, config.relay.base_url);
}
