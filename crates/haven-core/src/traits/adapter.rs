// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Base trait implemented by every Haven adapter.

use async_trait::async_trait;

use crate::error::HavenError;
use crate::types::{AdapterType, HealthStatus};

/// The base trait for Haven adapters (record store, AI gateway).
///
/// Provides identity, health check, and shutdown capabilities so the
/// `doctor` command can inspect every adapter uniformly.
#[async_trait]
pub trait Adapter: Send + Sync + 'static {
    /// Returns the human-readable name of this adapter instance.
    fn name(&self) -> &str;

    /// Returns the semantic version of this adapter.
    fn version(&self) -> semver::Version;

    /// Returns the type of adapter.
    fn adapter_type(&self) -> AdapterType;

    /// Performs a health check and returns the adapter's current status.
    async fn health_check(&self) -> Result<HealthStatus, HavenError>;

    /// Gracefully shuts down the adapter, releasing any held resources.
    async fn shutdown(&self) -> Result<(), HavenError>;
}
