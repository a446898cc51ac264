// SPDX-FileCopyrightText: 2026 Tether Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Tether configuration system.

use tether_config::diagnostic::ConfigError;
use tether_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_tether_config() {
    let toml = r#"
[client]
name = "office-kiosk"
client_id = "3f6c2d1e-0000-4000-8000-aabbccddeeff"
log_level = "debug"

[server]
url = "wss://mgmt.example.com/ws"
reconnect_delay_secs = 10

[plugins]
directories = ["/opt/tether/plugins", "plugins"]
state_path = "/var/lib/tether/state.db"
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.client.name, "office-kiosk");
    assert_eq!(
        config.client.client_id.as_deref(),
        Some("3f6c2d1e-0000-4000-8000-aabbccddeeff")
    );
    assert_eq!(config.client.log_level, "debug");
    assert_eq!(config.server.url, "wss://mgmt.example.com/ws");
    assert_eq!(config.server.reconnect_delay_secs, 10);
    assert_eq!(
        config.plugins.directories,
        vec!["/opt/tether/plugins", "plugins"]
    );
    assert_eq!(config.plugins.state_path, "/var/lib/tether/state.db");
}

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let config = load_config_from_str("").expect("empty TOML should use defaults");

    assert_eq!(config.client.name, "tether");
    assert!(config.client.client_id.is_none());
    assert_eq!(config.client.log_level, "info");
    assert_eq!(config.server.url, "ws://localhost:8765");
    assert_eq!(config.server.reconnect_delay_secs, 5);
    assert_eq!(config.plugins.directories, vec!["plugins"]);
    assert_eq!(config.plugins.state_path, "tether-state.db");
}

/// Unknown field in [client] section produces an error.
#[test]
fn unknown_field_in_client_produces_error() {
    let toml = r#"
[client]
naem = "test"
"#;

    let err = load_config_from_str(toml).expect_err("should reject unknown field");
    let err_str = format!("{err}");
    // Figment wraps serde's deny_unknown_fields error
    assert!(
        err_str.contains("unknown field") || err_str.contains("naem"),
        "error should mention unknown field or the bad key, got: {err_str}"
    );
}

/// The diagnostic bridge turns an unknown field into an UnknownKey with a
/// typo suggestion.
#[test]
fn unknown_field_gets_typo_suggestion() {
    let errors = load_and_validate_str(
        r#"
[plugins]
directores = ["plugins"]
"#,
    )
    .expect_err("should reject unknown field");

    let unknown = errors
        .iter()
        .find_map(|e| match e {
            ConfigError::UnknownKey { key, suggestion, .. } => Some((key, suggestion)),
            _ => None,
        })
        .expect("expected an UnknownKey diagnostic");
    assert_eq!(unknown.0, "directores");
    assert_eq!(unknown.1.as_deref(), Some("directories"));
}

/// Semantic validation fires through the high-level entry point.
#[test]
fn validation_rejects_empty_directories() {
    let errors = load_and_validate_str(
        r#"
[plugins]
directories = []
"#,
    )
    .expect_err("should reject empty directory list");

    assert!(
        errors
            .iter()
            .any(|e| e.to_string().contains("at least one directory"))
    );
}

/// Type mismatch produces an InvalidType diagnostic naming the key.
#[test]
fn type_mismatch_produces_invalid_type() {
    let errors = load_and_validate_str(
        r#"
[server]
reconnect_delay_secs = "soon"
"#,
    )
    .expect_err("should reject string where integer expected");

    assert!(errors.iter().any(|e| matches!(
        e,
        ConfigError::InvalidType { key, .. } if key.contains("reconnect_delay_secs")
    )));
}
