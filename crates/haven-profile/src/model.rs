// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The user profile document and its partial-update forms.

use serde::{Deserialize, Serialize};

/// Badge granted on registration.
pub const BADGE_INITIALIZED: &str = "Survivor Initialized";

/// Badge granted when points first reach [`WELLNESS_WARRIOR_THRESHOLD`].
pub const BADGE_WELLNESS_WARRIOR: &str = "Wellness Warrior";

/// Point total at which the wellness badge is granted.
pub const WELLNESS_WARRIOR_THRESHOLD: u64 = 500;

/// Points granted on registration.
pub const INITIAL_POINTS: u64 = 100;

/// Per-flag privacy preferences.
///
/// Updated through [`PrivacyUpdate`] so that toggling one flag never
/// clobbers its siblings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct PrivacySettings {
    pub share_analysis_with_police: bool,
    pub share_analysis_with_guardian: bool,
    pub anonymous_mode_default: bool,
}

impl Default for PrivacySettings {
    fn default() -> Self {
        Self {
            share_analysis_with_police: false,
            share_analysis_with_guardian: true,
            anonymous_mode_default: true,
        }
    }
}

/// The single local user profile, stored as camelCase JSON under the
/// `profile` record key.
///
/// A stored profile with `is_registered = false` is treated as no profile
/// everywhere in the system.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub age: u32,
    pub profession: String,
    /// Data-URL encoded profile photo, if one was supplied.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub photo: Option<String>,
    pub contact: String,
    #[serde(default)]
    pub parent_contact: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    #[serde(default)]
    pub peer_name: String,
    #[serde(default)]
    pub peer_contact: String,
    /// National identity number, exactly twelve digits.
    pub national_id: String,
    /// Secondary identity document number, upper-cased alphanumeric.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary_id: Option<String>,
    pub is_registered: bool,
    pub points: u64,
    pub badges: Vec<String>,
    #[serde(default)]
    pub privacy_settings: PrivacySettings,
    /// Per-user gateway credential override. Takes precedence over the
    /// configured default key when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_api_key: Option<String>,
}

impl Profile {
    /// Adds a badge unless it is already held. Returns true if added.
    pub fn grant_badge(&mut self, badge: &str) -> bool {
        if self.badges.iter().any(|b| b == badge) {
            return false;
        }
        self.badges.push(badge.to_string());
        true
    }
}

/// Raw registration input, before sanitization and validation.
#[derive(Debug, Clone, Default)]
pub struct ProfileDraft {
    pub name: String,
    pub email: String,
    pub gender: String,
    pub age: u32,
    pub profession: String,
    pub photo: Option<String>,
    pub contact: String,
    pub parent_contact: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub peer_name: String,
    pub peer_contact: String,
    pub national_id: String,
    pub secondary_id: Option<String>,
}

/// Partial per-flag privacy update.
#[derive(Debug, Clone, Default)]
pub struct PrivacyUpdate {
    pub share_analysis_with_police: Option<bool>,
    pub share_analysis_with_guardian: Option<bool>,
    pub anonymous_mode_default: Option<bool>,
}

impl PrivacyUpdate {
    /// Merges set flags into `settings`, leaving unset flags untouched.
    pub fn apply(&self, settings: &mut PrivacySettings) {
        if let Some(v) = self.share_analysis_with_police {
            settings.share_analysis_with_police = v;
        }
        if let Some(v) = self.share_analysis_with_guardian {
            settings.share_analysis_with_guardian = v;
        }
        if let Some(v) = self.anonymous_mode_default {
            settings.anonymous_mode_default = v;
        }
    }
}

/// Shallow partial update of the profile's mutable fields.
///
/// `custom_api_key` set to an empty string clears the stored override.
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<String>,
    pub age: Option<u32>,
    pub profession: Option<String>,
    pub photo: Option<String>,
    pub contact: Option<String>,
    pub parent_contact: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_contact: Option<String>,
    pub peer_name: Option<String>,
    pub peer_contact: Option<String>,
    pub privacy: Option<PrivacyUpdate>,
    pub custom_api_key: Option<String>,
}
