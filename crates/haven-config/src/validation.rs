// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde
//! attributes, such as non-empty paths and recognized enum-like strings.

use std::str::FromStr;

use haven_core::Theme;

use crate::diagnostic::ConfigError;
use crate::model::HavenConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &HavenConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.storage.database_path.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "storage.database_path must not be empty".to_string(),
        });
    }

    if !LOG_LEVELS.contains(&config.app.log_level.as_str()) {
        errors.push(ConfigError::Validation {
            message: format!(
                "app.log_level must be one of {}, got `{}`",
                LOG_LEVELS.join(", "),
                config.app.log_level
            ),
        });
    }

    if Theme::from_str(&config.app.theme).is_err() {
        errors.push(ConfigError::Validation {
            message: format!("app.theme must be `light` or `dark`, got `{}`", config.app.theme),
        });
    }

    if config.gemini.chat_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.chat_model must not be empty".to_string(),
        });
    }

    if config.gemini.insight_model.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.insight_model must not be empty".to_string(),
        });
    }

    if config.gemini.base_url.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "gemini.base_url must not be empty".to_string(),
        });
    }

    if config.gemini.max_media_bytes == 0 {
        errors.push(ConfigError::Validation {
            message: "gemini.max_media_bytes must be greater than zero".to_string(),
        });
    }

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}
