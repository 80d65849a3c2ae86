// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types shared across the Haven workspace.

use thiserror::Error;

/// The primary error type used across Haven services and adapters.
#[derive(Debug, Error)]
pub enum HavenError {
    /// Configuration errors (invalid TOML, missing required fields, type mismatches).
    #[error("configuration error: {0}")]
    Config(String),

    /// Record store errors (database connection, query failure, serialization).
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Gateway errors (HTTP failure, API error body, malformed response).
    ///
    /// These never escape a gateway capability; each capability converts
    /// them into its documented fallback value at the boundary.
    #[error("gateway error: {message}")]
    Gateway {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Input rejected before any state was written.
    #[error("validation error: {0}")]
    Validation(String),

    /// A lookup that found nothing (e.g. sign-in identifier mismatch).
    #[error("not found: {0}")]
    NotFound(String),

    /// Operation timed out.
    #[error("operation timed out after {duration:?}")]
    Timeout { duration: std::time::Duration },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}
