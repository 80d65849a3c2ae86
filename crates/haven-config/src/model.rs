// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs for Haven.
//!
//! All structs use `#[serde(deny_unknown_fields)]` to reject unrecognized
//! config keys at startup, providing actionable error messages.

use serde::{Deserialize, Serialize};

/// Top-level Haven configuration.
///
/// Loaded from TOML files following XDG hierarchy, with environment variable
/// overrides. All sections are optional and default to sensible values.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HavenConfig {
    /// Application identity and behavior settings.
    #[serde(default)]
    pub app: AppConfig,

    /// Record store settings.
    #[serde(default)]
    pub storage: StorageConfig,

    /// Gemini API settings for the AI request gateway.
    #[serde(default)]
    pub gemini: GeminiConfig,
}

/// Application identity and behavior configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Display name of the application.
    #[serde(default = "default_app_name")]
    pub name: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Default display theme for the shell (light or dark).
    #[serde(default = "default_theme")]
    pub theme: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            log_level: default_log_level(),
            theme: default_theme(),
        }
    }
}

fn default_app_name() -> String {
    "haven".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_theme() -> String {
    "dark".to_string()
}

/// Record store configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    /// Path to the SQLite database file.
    #[serde(default = "default_database_path")]
    pub database_path: String,

    /// Whether to enable WAL journal mode.
    #[serde(default = "default_wal_mode")]
    pub wal_mode: bool,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            wal_mode: default_wal_mode(),
        }
    }
}

fn default_database_path() -> String {
    "haven.db".to_string()
}

fn default_wal_mode() -> bool {
    true
}

/// Gemini API configuration for the AI request gateway.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiConfig {
    /// Process-wide default API key. A profile-level override takes
    /// precedence at call time; with neither set, requests are attempted
    /// anyway and fall back per capability.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Model used for conversational and narrative-analysis calls.
    #[serde(default = "default_chat_model")]
    pub chat_model: String,

    /// Model used for image, video, and case-report calls.
    #[serde(default = "default_insight_model")]
    pub insight_model: String,

    /// API base URL. Overridable for testing.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Ceiling on inline media payload size, in bytes. Payloads above the
    /// ceiling are rejected before any request is made.
    #[serde(default = "default_max_media_bytes")]
    pub max_media_bytes: u64,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            chat_model: default_chat_model(),
            insight_model: default_insight_model(),
            base_url: default_base_url(),
            max_media_bytes: default_max_media_bytes(),
        }
    }
}

fn default_chat_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_insight_model() -> String {
    "gemini-3-pro-preview".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

fn default_max_media_bytes() -> u64 {
    50 * 1024 * 1024
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_expected_values() {
        let config = HavenConfig::default();
        assert_eq!(config.app.name, "haven");
        assert_eq!(config.app.log_level, "info");
        assert_eq!(config.storage.database_path, "haven.db");
        assert!(config.storage.wal_mode);
        assert_eq!(config.gemini.chat_model, "gemini-3-flash-preview");
        assert_eq!(config.gemini.insight_model, "gemini-3-pro-preview");
        assert_eq!(config.gemini.max_media_bytes, 50 * 1024 * 1024);
        assert!(config.gemini.api_key.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let toml_str = r#"
[app]
name = "test"
log_levle = "debug"
"#;
        let result = toml::from_str::<HavenConfig>(toml_str);
        assert!(result.is_err());
    }

    #[test]
    fn partial_sections_merge_with_defaults() {
        let toml_str = r#"
[gemini]
api_key = "test-key"
"#;
        let config: HavenConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.gemini.api_key.as_deref(), Some("test-key"));
        assert_eq!(config.gemini.chat_model, "gemini-3-flash-preview");
    }
}
