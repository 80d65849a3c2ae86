// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types used across the Haven workspace.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The functional screens reachable inside the application shell.
///
/// The string forms are the navigation identifiers the original screens
/// registered under; they are stable and used by the CLI `nav` command.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum ScreenId {
    Home,
    Assistant,
    Wellness,
    Justice,
    #[strum(serialize = "stopncii")]
    #[serde(rename = "stopncii")]
    StopNcii,
    Helplines,
    Learning,
    ImageInsight,
    Video,
    Defense,
    Awareness,
    Tracker,
    Support,
    Settings,
}

/// Keys under which local record documents are persisted.
///
/// Each key holds one independent JSON document; there are no cross-key
/// transactions or foreign keys between them.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum RecordKey {
    /// The single user profile document.
    Profile,
    /// The append-only incident narrative blob.
    NarrativeLog,
    /// The list of health observation entries.
    HealthLog,
    /// The set of self-reported cycle-day dates.
    CycleDays,
}

/// Display theme for the shell.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, EnumString, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    #[default]
    Dark,
}

impl Theme {
    /// Returns the other theme.
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Identifies the kind of adapter behind a service boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
pub enum AdapterType {
    Storage,
    Gateway,
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}
