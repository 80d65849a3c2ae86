// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration loader using Figment for layered config merging.
//!
//! Supports XDG hierarchy: `./haven.toml` > `~/.config/haven/haven.toml` >
//! `/etc/haven/haven.toml` with environment variable overrides via the
//! `HAVEN_` prefix.

#![allow(clippy::result_large_err)] // figment::Error is external and cannot be boxed without wrapper

use std::path::Path;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::HavenConfig;

/// Load configuration from the standard XDG hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/haven/haven.toml` (system-wide)
/// 3. `~/.config/haven/haven.toml` (user XDG config)
/// 4. `./haven.toml` (local directory)
/// 5. `HAVEN_*` environment variables
pub fn load_config() -> Result<HavenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HavenConfig::default()))
        .merge(Toml::file("/etc/haven/haven.toml"))
        .merge(Toml::file(
            dirs::config_dir()
                .map(|d| d.join("haven/haven.toml"))
                .unwrap_or_default(),
        ))
        .merge(Toml::file("haven.toml"))
        .merge(env_provider())
        .extract()
}

/// Load configuration from a TOML string only (no XDG lookup).
///
/// Used for testing and explicit config specification.
pub fn load_config_from_str(toml_content: &str) -> Result<HavenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HavenConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from a specific file path with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<HavenConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(HavenConfig::default()))
        .merge(Toml::file(path))
        .merge(env_provider())
        .extract()
}

/// Create the environment variable provider using explicit `map()` for
/// section-to-dot mapping.
///
/// Uses `Env::map()` NOT `Env::split("_")` to avoid ambiguity with
/// underscore-containing key names: `HAVEN_GEMINI_API_KEY` must map to
/// `gemini.api_key`, not `gemini.api.key`.
fn env_provider() -> Env {
    Env::prefixed("HAVEN_").map(|key| {
        // `key` is the lowercased env var name with prefix stripped.
        let key_str = key.as_str();
        let mapped = key_str
            .replacen("app_", "app.", 1)
            .replacen("storage_", "storage.", 1)
            .replacen("gemini_", "gemini.", 1);
        mapped.into()
    })
}
