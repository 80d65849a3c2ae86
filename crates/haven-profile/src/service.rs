// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Profile lifecycle: registration, sign-in, updates, gamification, logout.

use std::sync::Arc;

use tracing::{debug, info};

use haven_core::{HavenError, RecordKey, RecordStore, RecordStoreExt};

use crate::model::{
    BADGE_INITIALIZED, BADGE_WELLNESS_WARRIOR, INITIAL_POINTS, PrivacySettings, Profile,
    ProfileDraft, ProfileUpdate, WELLNESS_WARRIOR_THRESHOLD,
};
use crate::sanitize::{
    NATIONAL_ID_DIGITS, sanitize_name, sanitize_national_id, sanitize_phone,
    sanitize_secondary_id,
};

/// Profile operations over the record store.
///
/// There is at most one profile; every operation works against the single
/// document under the `profile` key.
pub struct ProfileService {
    store: Arc<dyn RecordStore>,
}

impl ProfileService {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// Returns the registered profile, if one exists.
    ///
    /// A missing, corrupt, or unregistered document all come back as
    /// `None`; callers never see a distinction.
    pub async fn current(&self) -> Result<Option<Profile>, HavenError> {
        let profile: Option<Profile> = self.store.get_json(RecordKey::Profile).await?;
        Ok(profile.filter(|p| p.is_registered))
    }

    /// Registers a new profile from raw form input.
    ///
    /// Inputs are sanitized first, then validated; the persisted profile
    /// starts with 100 points and the initialization badge.
    pub async fn register(&self, draft: ProfileDraft) -> Result<Profile, HavenError> {
        let national_id = sanitize_national_id(&draft.national_id);
        if national_id.len() != NATIONAL_ID_DIGITS {
            return Err(HavenError::Validation(format!(
                "national id must be exactly {NATIONAL_ID_DIGITS} digits"
            )));
        }

        let profile = Profile {
            name: sanitize_name(&draft.name),
            email: draft.email.trim().to_string(),
            gender: draft.gender,
            age: draft.age,
            profession: draft.profession,
            photo: draft.photo,
            contact: sanitize_phone(&draft.contact),
            parent_contact: sanitize_phone(&draft.parent_contact),
            guardian_name: sanitize_name(&draft.guardian_name),
            guardian_contact: sanitize_phone(&draft.guardian_contact),
            peer_name: sanitize_name(&draft.peer_name),
            peer_contact: sanitize_phone(&draft.peer_contact),
            national_id,
            secondary_id: draft
                .secondary_id
                .map(|s| sanitize_secondary_id(&s))
                .filter(|s| !s.is_empty()),
            is_registered: true,
            points: INITIAL_POINTS,
            badges: vec![BADGE_INITIALIZED.to_string()],
            privacy_settings: PrivacySettings::default(),
            custom_api_key: None,
        };

        let mut missing = Vec::new();
        if profile.name.is_empty() {
            missing.push("name");
        }
        if profile.email.is_empty() {
            missing.push("email");
        }
        if profile.contact.is_empty() {
            missing.push("contact");
        }
        if profile.guardian_name.is_empty() {
            missing.push("guardian name");
        }
        if profile.guardian_contact.is_empty() {
            missing.push("guardian contact");
        }
        if !missing.is_empty() {
            return Err(HavenError::Validation(format!(
                "required fields missing: {}",
                missing.join(", ")
            )));
        }

        self.store.set_json(RecordKey::Profile, &profile).await?;
        info!(name = %profile.name, "profile registered");
        Ok(profile)
    }

    /// Looks up the cached registered profile by email or national id.
    ///
    /// This is a local-cache lookup, not authentication: it only ever
    /// matches the single profile stored on this device.
    pub async fn sign_in(&self, identifier: &str) -> Result<Profile, HavenError> {
        let identifier = identifier.trim();
        match self.current().await? {
            Some(profile)
                if profile.email == identifier || profile.national_id == identifier =>
            {
                debug!("sign-in matched cached profile");
                Ok(profile)
            }
            _ => Err(HavenError::NotFound(
                "no cached account matches that email or national id".to_string(),
            )),
        }
    }

    /// Applies a partial update to the registered profile.
    ///
    /// Top-level fields merge shallowly; privacy flags merge per-flag so
    /// that toggling one never resets its siblings. An empty
    /// `custom_api_key` clears the stored override.
    pub async fn update(&self, update: ProfileUpdate) -> Result<Profile, HavenError> {
        let mut profile = self
            .current()
            .await?
            .ok_or_else(|| HavenError::NotFound("no registered profile".to_string()))?;

        if let Some(name) = update.name {
            profile.name = sanitize_name(&name);
        }
        if let Some(email) = update.email {
            profile.email = email.trim().to_string();
        }
        if let Some(gender) = update.gender {
            profile.gender = gender;
        }
        if let Some(age) = update.age {
            profile.age = age;
        }
        if let Some(profession) = update.profession {
            profile.profession = profession;
        }
        if let Some(photo) = update.photo {
            profile.photo = if photo.is_empty() { None } else { Some(photo) };
        }
        if let Some(contact) = update.contact {
            profile.contact = sanitize_phone(&contact);
        }
        if let Some(parent_contact) = update.parent_contact {
            profile.parent_contact = sanitize_phone(&parent_contact);
        }
        if let Some(guardian_name) = update.guardian_name {
            profile.guardian_name = sanitize_name(&guardian_name);
        }
        if let Some(guardian_contact) = update.guardian_contact {
            profile.guardian_contact = sanitize_phone(&guardian_contact);
        }
        if let Some(peer_name) = update.peer_name {
            profile.peer_name = sanitize_name(&peer_name);
        }
        if let Some(peer_contact) = update.peer_contact {
            profile.peer_contact = sanitize_phone(&peer_contact);
        }
        if let Some(privacy) = update.privacy {
            privacy.apply(&mut profile.privacy_settings);
        }
        if let Some(key) = update.custom_api_key {
            let key = key.trim().to_string();
            profile.custom_api_key = if key.is_empty() { None } else { Some(key) };
        }

        self.store.set_json(RecordKey::Profile, &profile).await?;
        Ok(profile)
    }

    /// Adds points for a completed activity and grants the wellness badge
    /// the first time the total reaches the threshold.
    pub async fn award_points(
        &self,
        amount: u64,
        activity: &str,
    ) -> Result<Profile, HavenError> {
        let mut profile = self
            .current()
            .await?
            .ok_or_else(|| HavenError::NotFound("no registered profile".to_string()))?;

        profile.points += amount;
        if profile.points >= WELLNESS_WARRIOR_THRESHOLD
            && profile.grant_badge(BADGE_WELLNESS_WARRIOR)
        {
            info!(points = profile.points, "wellness badge granted");
        }

        self.store.set_json(RecordKey::Profile, &profile).await?;
        debug!(activity, amount, total = profile.points, "points awarded");
        Ok(profile)
    }

    /// Wipes every local record, returning the app to the unregistered
    /// state.
    pub async fn logout(&self) -> Result<(), HavenError> {
        self.store.clear().await?;
        info!("local records wiped on logout");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_storage::MemoryRecordStore;

    fn service() -> ProfileService {
        ProfileService::new(Arc::new(MemoryRecordStore::new()))
    }

    fn draft() -> ProfileDraft {
        ProfileDraft {
            name: "Asha Verma".into(),
            email: "asha@example.com".into(),
            gender: "female".into(),
            age: 24,
            profession: "Student".into(),
            contact: "9876543210".into(),
            guardian_name: "Meera Verma".into(),
            guardian_contact: "9123456780".into(),
            national_id: "123456789012".into(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn register_initializes_points_and_badge() {
        let svc = service();
        let profile = svc.register(draft()).await.unwrap();

        assert!(profile.is_registered);
        assert_eq!(profile.points, 100);
        assert_eq!(profile.badges, vec![BADGE_INITIALIZED.to_string()]);
        assert!(svc.current().await.unwrap().is_some());
    }

    #[tokio::test]
    async fn register_rejects_short_national_id() {
        let svc = service();
        let mut d = draft();
        d.national_id = "12345".into();
        let err = svc.register(d).await.unwrap_err();
        assert!(matches!(err, HavenError::Validation(_)));
    }

    #[tokio::test]
    async fn register_rejects_national_id_with_letters_padding_it_short() {
        let svc = service();
        let mut d = draft();
        // Sanitization strips letters, leaving fewer than twelve digits.
        d.national_id = "1234abcd9012".into();
        assert!(svc.register(d).await.is_err());
    }

    #[tokio::test]
    async fn register_requires_guardian_fields() {
        let svc = service();
        let mut d = draft();
        d.guardian_name = String::new();
        let err = svc.register(d).await.unwrap_err();
        match err {
            HavenError::Validation(msg) => assert!(msg.contains("guardian name")),
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn register_sanitizes_inputs() {
        let svc = service();
        let mut d = draft();
        d.name = "Asha3 Verma!".into();
        d.contact = "+91 98765 43210 000".into();
        d.secondary_id = Some("abcde1234f".into());
        let profile = svc.register(d).await.unwrap();

        assert_eq!(profile.name, "Asha Verma");
        assert_eq!(profile.contact, "9198765432");
        assert_eq!(profile.secondary_id.as_deref(), Some("ABCDE1234F"));
    }

    #[tokio::test]
    async fn sign_in_matches_email_or_national_id() {
        let svc = service();
        svc.register(draft()).await.unwrap();

        assert!(svc.sign_in("asha@example.com").await.is_ok());
        assert!(svc.sign_in("123456789012").await.is_ok());
    }

    #[tokio::test]
    async fn sign_in_rejects_unknown_identifier() {
        let svc = service();
        svc.register(draft()).await.unwrap();

        let err = svc.sign_in("someone@else.com").await.unwrap_err();
        assert!(matches!(err, HavenError::NotFound(_)));
    }

    #[tokio::test]
    async fn sign_in_without_profile_is_not_found() {
        let svc = service();
        assert!(matches!(
            svc.sign_in("asha@example.com").await.unwrap_err(),
            HavenError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn update_merges_privacy_flags_individually() {
        let svc = service();
        svc.register(draft()).await.unwrap();

        let updated = svc
            .update(ProfileUpdate {
                privacy: Some(crate::model::PrivacyUpdate {
                    share_analysis_with_police: Some(true),
                    ..Default::default()
                }),
                ..Default::default()
            })
            .await
            .unwrap();

        assert!(updated.privacy_settings.share_analysis_with_police);
        assert!(updated.privacy_settings.share_analysis_with_guardian);
        assert!(updated.privacy_settings.anonymous_mode_default);
    }

    #[tokio::test]
    async fn update_leaves_untouched_fields_alone() {
        let svc = service();
        svc.register(draft()).await.unwrap();

        let updated = svc
            .update(ProfileUpdate {
                profession: Some("Engineer".into()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(updated.profession, "Engineer");
        assert_eq!(updated.name, "Asha Verma");
        assert_eq!(updated.points, 100);
    }

    #[tokio::test]
    async fn update_clears_api_key_on_empty_string() {
        let svc = service();
        svc.register(draft()).await.unwrap();

        let updated = svc
            .update(ProfileUpdate {
                custom_api_key: Some("user-key-123".into()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert_eq!(updated.custom_api_key.as_deref(), Some("user-key-123"));

        let cleared = svc
            .update(ProfileUpdate {
                custom_api_key: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();
        assert!(cleared.custom_api_key.is_none());
    }

    #[tokio::test]
    async fn wellness_badge_granted_exactly_once_at_threshold() {
        let svc = service();
        svc.register(draft()).await.unwrap();

        // 100 + 480 = 580 crosses the 500 threshold.
        let p = svc.award_points(480, "yoga").await.unwrap();
        assert_eq!(p.points, 580);
        assert!(p.badges.contains(&BADGE_WELLNESS_WARRIOR.to_string()));

        svc.award_points(30, "vagal").await.unwrap();
        svc.award_points(20, "mood").await.unwrap();

        let final_profile = svc.current().await.unwrap().unwrap();
        assert_eq!(final_profile.points, 630);
        assert_eq!(
            final_profile
                .badges
                .iter()
                .filter(|b| *b == BADGE_WELLNESS_WARRIOR)
                .count(),
            1
        );
    }

    #[tokio::test]
    async fn logout_wipes_every_record_key() {
        let store = Arc::new(MemoryRecordStore::new());
        let svc = ProfileService::new(store.clone());
        svc.register(draft()).await.unwrap();
        store.set(RecordKey::NarrativeLog, "\"entry\"").await.unwrap();
        store.set(RecordKey::HealthLog, "[]").await.unwrap();
        store.set(RecordKey::CycleDays, "[]").await.unwrap();

        svc.logout().await.unwrap();

        assert!(store.get(RecordKey::Profile).await.unwrap().is_none());
        assert!(store.get(RecordKey::NarrativeLog).await.unwrap().is_none());
        assert!(store.get(RecordKey::HealthLog).await.unwrap().is_none());
        assert!(store.get(RecordKey::CycleDays).await.unwrap().is_none());
        assert!(svc.current().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_profile_document_reads_as_unregistered() {
        let store = Arc::new(MemoryRecordStore::new());
        let svc = ProfileService::new(store.clone());
        store
            .set(RecordKey::Profile, "{ definitely not json")
            .await
            .unwrap();
        assert!(svc.current().await.unwrap().is_none());
    }
}
