// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile lifecycle and local tracking services for Haven.
//!
//! Everything here works against the record store: the profile document,
//! the append-only narrative journal, the health observation log, and the
//! cycle-day set.

pub mod health;
pub mod journal;
pub mod model;
pub mod sanitize;
pub mod service;
pub mod wellness;

pub use health::{BASELINE_OBSERVATION, HealthLogEntry, HealthService};
pub use journal::JournalService;
pub use model::{
    BADGE_INITIALIZED, BADGE_WELLNESS_WARRIOR, INITIAL_POINTS, PrivacySettings, PrivacyUpdate,
    Profile, ProfileDraft, ProfileUpdate, WELLNESS_WARRIOR_THRESHOLD,
};
pub use service::ProfileService;
pub use wellness::{ACTIVITIES, WellnessActivity, find_activity};
