// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Integration tests for the Haven configuration system.

use haven_config::diagnostic::{ConfigError, suggest_key};
use haven_config::{load_and_validate_str, load_config_from_str};

/// Valid TOML with all known fields deserializes successfully.
#[test]
fn valid_toml_deserializes_into_haven_config() {
    let toml = r#"
[app]
name = "haven-test"
log_level = "debug"
theme = "light"

[storage]
database_path = "/tmp/haven-test.db"
wal_mode = false

[gemini]
api_key = "key-123"
chat_model = "gemini-3-flash-preview"
insight_model = "gemini-3-pro-preview"
max_media_bytes = 1048576
"#;

    let config = load_config_from_str(toml).expect("valid TOML should deserialize");
    assert_eq!(config.app.name, "haven-test");
    assert_eq!(config.app.log_level, "debug");
    assert_eq!(config.app.theme, "light");
    assert_eq!(config.storage.database_path, "/tmp/haven-test.db");
    assert!(!config.storage.wal_mode);
    assert_eq!(config.gemini.api_key.as_deref(), Some("key-123"));
    assert_eq!(config.gemini.max_media_bytes, 1_048_576);
}

/// Unknown field in [app] section produces an error.
#[test]
fn unknown_field_in_app_produces_error() {
    let toml = r#"
[app]
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

/// Missing optional sections use defaults without error.
#[test]
fn missing_optional_sections_use_defaults() {
    let toml = "";
    let config = load_config_from_str(toml).expect("empty TOML should use defaults");

    assert_eq!(config.app.name, "haven");
    assert_eq!(config.app.log_level, "info");
    assert_eq!(config.app.theme, "dark");
    assert_eq!(config.storage.database_path, "haven.db");
    assert!(config.storage.wal_mode);
    assert!(config.gemini.api_key.is_none());
    assert_eq!(config.gemini.chat_model, "gemini-3-flash-preview");
    assert_eq!(config.gemini.insight_model, "gemini-3-pro-preview");
    assert_eq!(config.gemini.max_media_bytes, 50 * 1024 * 1024);
}

/// load_and_validate_str surfaces semantic validation errors.
#[test]
fn semantic_validation_errors_are_surfaced() {
    let toml = r#"
[app]
log_level = "shout"
"#;

    let errors = load_and_validate_str(toml).expect_err("should fail validation");
    assert!(errors.iter().any(
        |e| matches!(e, ConfigError::Validation { message } if message.contains("log_level"))
    ));
}

/// Unknown-key diagnostics carry a fuzzy-match suggestion.
#[test]
fn unknown_key_diagnostic_suggests_correction() {
    let toml = r#"
[gemini]
api_ky = "key"
"#;

    let errors = load_and_validate_str(toml).expect_err("should reject unknown field");
    let found = errors.iter().any(|e| {
        matches!(
            e,
            ConfigError::UnknownKey { key, suggestion, .. }
                if key == "api_ky" && suggestion.as_deref() == Some("api_key")
        )
    });
    assert!(found, "expected UnknownKey with api_key suggestion, got: {errors:?}");
}

/// suggest_key finds close matches and rejects distant ones.
#[test]
fn suggest_key_behaves_reasonably() {
    let valid = &["database_path", "wal_mode"];
    assert_eq!(
        suggest_key("database_pth", valid),
        Some("database_path".to_string())
    );
    assert_eq!(suggest_key("qqqqq", valid), None);
}
