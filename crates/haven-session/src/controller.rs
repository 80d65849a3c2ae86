// SPDX-FileCopyrightText: 2026 Haven Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The session controller: drives state transitions for the whole app.

use std::sync::Arc;

use tracing::{debug, info};

use haven_core::{HavenError, RecordStore, ScreenId, Theme};
use haven_profile::{Profile, ProfileDraft, ProfileService};

use crate::state::AppState;

/// Owns the app state machine and the profile lifecycle behind it.
///
/// All transitions funnel through here: startup resolution, registration,
/// sign-in, navigation, and logout. The display theme is process-local
/// and resets to dark on every start.
pub struct SessionController {
    profiles: ProfileService,
    state: AppState,
    theme: Theme,
}

impl SessionController {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self {
            profiles: ProfileService::new(store),
            state: AppState::Gate,
            theme: Theme::default(),
        }
    }

    pub fn state(&self) -> AppState {
        self.state
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        self.theme
    }

    /// Access to the profile operations behind the controller.
    pub fn profiles(&self) -> &ProfileService {
        &self.profiles
    }

    /// Computes the startup state from the stored profile.
    ///
    /// A registered profile lands on the home screen; anything else
    /// (absent, unregistered, corrupt) lands at the gate.
    pub async fn startup(&mut self) -> Result<AppState, HavenError> {
        self.state = match self.profiles.current().await? {
            Some(profile) => {
                info!(name = %profile.name, "resuming registered session");
                AppState::Shell(ScreenId::Home)
            }
            None => {
                debug!("no registered profile, gating");
                AppState::Gate
            }
        };
        Ok(self.state)
    }

    /// Registers a new profile and enters the shell on success. On
    /// failure the state is untouched.
    pub async fn register(&mut self, draft: ProfileDraft) -> Result<Profile, HavenError> {
        let profile = self.profiles.register(draft).await?;
        self.state = AppState::Shell(ScreenId::Home);
        Ok(profile)
    }

    /// Signs in against the cached profile and enters the shell on
    /// success. A mismatch leaves the app at the gate.
    pub async fn sign_in(&mut self, identifier: &str) -> Result<Profile, HavenError> {
        let profile = self.profiles.sign_in(identifier).await?;
        self.state = AppState::Shell(ScreenId::Home);
        Ok(profile)
    }

    /// Navigates to a screen. Only valid inside the shell.
    pub fn navigate(&mut self, screen: ScreenId) -> Result<(), HavenError> {
        match self.state {
            AppState::Shell(_) => {
                self.state = AppState::Shell(screen);
                debug!(screen = %screen, "navigated");
                Ok(())
            }
            AppState::Gate => Err(HavenError::Validation(
                "cannot navigate before registration".to_string(),
            )),
        }
    }

    /// Wipes every local record and returns to the gate.
    pub async fn logout(&mut self) -> Result<(), HavenError> {
        self.profiles.logout().await?;
        self.state = AppState::Gate;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use haven_core::RecordKey;
    use haven_storage::MemoryRecordStore;

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

    fn controller() -> (SessionController, Arc<MemoryRecordStore>) {
        let store = Arc::new(MemoryRecordStore::new());
        (SessionController::new(store.clone()), store)
    }

    #[tokio::test]
    async fn startup_gates_a_fresh_device() {
        let (mut ctl, _) = controller();
        assert_eq!(ctl.startup().await.unwrap(), AppState::Gate);
    }

    #[tokio::test]
    async fn startup_resumes_a_registered_profile_on_home() {
        let store = Arc::new(MemoryRecordStore::new());
        let mut first = SessionController::new(store.clone());
        first.register(draft()).await.unwrap();

        let mut second = SessionController::new(store);
        assert_eq!(
            second.startup().await.unwrap(),
            AppState::Shell(ScreenId::Home)
        );
    }

    #[tokio::test]
    async fn startup_gates_on_corrupt_profile_document() {
        let (mut ctl, store) = controller();
        store
            .set(RecordKey::Profile, "{ not json")
            .await
            .unwrap();
        assert_eq!(ctl.startup().await.unwrap(), AppState::Gate);
    }

    #[tokio::test]
    async fn register_enters_the_shell_on_home() {
        let (mut ctl, _) = controller();
        ctl.register(draft()).await.unwrap();
        assert_eq!(ctl.state(), AppState::Shell(ScreenId::Home));
    }

    #[tokio::test]
    async fn failed_registration_stays_at_the_gate() {
        let (mut ctl, _) = controller();
        let mut bad = draft();
        bad.national_id = "123".into();
        assert!(ctl.register(bad).await.is_err());
        assert_eq!(ctl.state(), AppState::Gate);
    }

    #[tokio::test]
    async fn sign_in_mismatch_leaves_the_gate_in_place() {
        let store = Arc::new(MemoryRecordStore::new());
        let mut first = SessionController::new(store.clone());
        first.register(draft()).await.unwrap();

        let mut ctl = SessionController::new(store);
        ctl.startup().await.unwrap();
        // Registered device resumes into the shell; log out to test the gate.
        ctl.logout().await.unwrap();

        assert!(ctl.sign_in("wrong@example.com").await.is_err());
        assert_eq!(ctl.state(), AppState::Gate);
    }

    #[tokio::test]
    async fn navigation_is_rejected_at_the_gate() {
        let (mut ctl, _) = controller();
        assert!(ctl.navigate(ScreenId::Assistant).is_err());
    }

    #[tokio::test]
    async fn navigation_moves_between_screens_in_the_shell() {
        let (mut ctl, _) = controller();
        ctl.register(draft()).await.unwrap();

        ctl.navigate(ScreenId::Tracker).unwrap();
        assert_eq!(ctl.state(), AppState::Shell(ScreenId::Tracker));
        ctl.navigate(ScreenId::Settings).unwrap();
        assert_eq!(ctl.state(), AppState::Shell(ScreenId::Settings));
    }

    #[tokio::test]
    async fn logout_wipes_records_and_returns_to_the_gate() {
        let (mut ctl, store) = controller();
        ctl.register(draft()).await.unwrap();
        store.set(RecordKey::NarrativeLog, "\"x\"").await.unwrap();

        ctl.logout().await.unwrap();

        assert_eq!(ctl.state(), AppState::Gate);
        assert!(store.get(RecordKey::Profile).await.unwrap().is_none());
        assert!(store.get(RecordKey::NarrativeLog).await.unwrap().is_none());
        assert!(ctl.navigate(ScreenId::Home).is_err());
    }

    #[tokio::test]
    async fn theme_defaults_dark_and_toggles() {
        let (mut ctl, _) = controller();
        assert_eq!(ctl.theme(), Theme::Dark);
        assert_eq!(ctl.toggle_theme(), Theme::Light);
        assert_eq!(ctl.toggle_theme(), Theme::Dark);
    }
}
