//! Session state: the one live profile, replace-and-persist on every action.

use std::sync::Mutex;

use chrono::Utc;

use crate::guidance::{self, GuidanceSession, TextGenerator};
use crate::profile::{reduce, signup, ProfileAction};
use crate::store::ProfileStore;
use crate::types::Profile;

/// Which auth screen to show when no profile is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthRoute {
    Login,
    Signup,
}

/// Application state owned by the session controller.
///
/// There is exactly one mutable profile copy; every mutation runs the pure
/// reducer under the lock, persists the whole blob, then replaces the
/// in-memory copy. Persistence is last-write-wins — concurrent sessions on
/// the same blob are not detected.
pub struct SessionState {
    store: ProfileStore,
    profile: Mutex<Option<Profile>>,
    pub guidance: GuidanceSession,
    auth_route: Mutex<AuthRoute>,
}

impl SessionState {
    /// Open the default store and load any persisted profile (migrating it
    /// if the blob predates the current schema).
    pub fn new() -> Result<Self, String> {
        Ok(Self::with_store(ProfileStore::open_default()?))
    }

    /// Session over an explicit store. Used by tests.
    pub fn with_store(store: ProfileStore) -> Self {
        let profile = store.load();
        if profile.is_some() {
            log::info!("Session restored from persisted profile");
        }
        Self {
            store,
            profile: Mutex::new(profile),
            guidance: GuidanceSession::new(),
            auth_route: Mutex::new(AuthRoute::Login),
        }
    }

    /// Snapshot of the current profile.
    pub fn profile(&self) -> Option<Profile> {
        self.profile.lock().ok().and_then(|guard| guard.clone())
    }

    pub fn is_logged_in(&self) -> bool {
        self.profile.lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    /// Routing flag for the logged-out shell.
    pub fn auth_route(&self) -> AuthRoute {
        self.auth_route.lock().map(|guard| *guard).unwrap_or(AuthRoute::Login)
    }

    pub fn set_auth_route(&self, route: AuthRoute) {
        if let Ok(mut guard) = self.auth_route.lock() {
            *guard = route;
        }
    }

    /// Create and persist a fresh profile, replacing any current session.
    pub fn signup(&self, name: &str, email: &str) -> Result<Profile, String> {
        let profile = signup(name, email, Utc::now());
        self.store
            .save(&profile)
            .map_err(|e| format!("Failed to persist profile: {}", e))?;
        let mut guard = self.profile.lock().map_err(|_| "Lock poisoned")?;
        *guard = Some(profile.clone());
        Ok(profile)
    }

    /// Run one action through the reducer and persist the result.
    ///
    /// The in-memory profile is only replaced once the blob write succeeds,
    /// so a failed persist leaves the session on the last durable state.
    pub fn dispatch(&self, action: ProfileAction) -> Result<Profile, String> {
        let mut guard = self.profile.lock().map_err(|_| "Lock poisoned")?;
        let current = guard.as_ref().ok_or("No profile loaded")?;

        let next = reduce(current, action, Utc::now()).map_err(|e| e.user_message())?;
        self.store
            .save(&next)
            .map_err(|e| format!("Failed to persist profile: {}", e))?;
        *guard = Some(next.clone());
        Ok(next)
    }

    /// Request fresh daily guidance and apply it unless superseded.
    ///
    /// Returns the text produced by THIS request (fallbacks included) even
    /// when a newer request won the display slot — callers decide what to
    /// show from `guidance.current()`.
    pub async fn refresh_guidance(&self, generator: &dyn TextGenerator) -> Result<String, String> {
        let profile = self.profile().ok_or("No profile loaded")?;
        let token = self.guidance.begin_request();
        let text = guidance::daily_guidance(generator, &profile).await;
        self.guidance.apply_response(token, text.clone());
        Ok(text)
    }

    /// Ask the oracle a free-form question.
    pub async fn ask_oracle(
        &self,
        generator: &dyn TextGenerator,
        question: &str,
    ) -> Result<String, String> {
        let profile = self.profile().ok_or("No profile loaded")?;
        Ok(guidance::ask_oracle(generator, &profile, question).await)
    }

    /// Export the full profile to a file.
    pub fn export(&self, dest: &std::path::Path) -> Result<(), String> {
        let profile = self.profile().ok_or("No profile loaded")?;
        self.store
            .export_to(&profile, dest)
            .map_err(|e| format!("Export failed: {}", e))
    }

    /// End the session: drop the in-memory profile, remove the persisted
    /// blob, and invalidate in-flight guidance.
    pub fn logout(&self) -> Result<(), String> {
        self.store.clear().map_err(|e| format!("Failed to clear data: {}", e))?;
        if let Ok(mut guard) = self.profile.lock() {
            *guard = None;
        }
        self.guidance.reset();
        Ok(())
    }

    /// Alias for the settings "clear all data" action.
    pub fn clear_data(&self) -> Result<(), String> {
        self.logout()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guidance::test_support::FakeGenerator;
    use crate::matcher::{self, PhaseFilter};
    use crate::pillars;
    use crate::soil;
    use crate::types::{Archetype, SoilState};
    use crate::util::date_key;

    fn session() -> (tempfile::TempDir, SessionState) {
        let dir = tempfile::tempdir().unwrap();
        let state = SessionState::with_store(ProfileStore::at(dir.path().join("state")));
        (dir, state)
    }

    #[test]
    fn test_fresh_session_is_logged_out() {
        let (_guard, state) = session();
        assert!(!state.is_logged_in());
        assert_eq!(state.auth_route(), AuthRoute::Login);
        state.set_auth_route(AuthRoute::Signup);
        assert_eq!(state.auth_route(), AuthRoute::Signup);
    }

    #[test]
    fn test_dispatch_requires_profile() {
        let (_guard, state) = session();
        let result = state.dispatch(ProfileAction::CompleteOnboarding);
        assert!(result.is_err());
    }

    #[test]
    fn test_session_survives_restart() {
        let dir = tempfile::tempdir().unwrap();
        let store_path = dir.path().join("state");

        let state = SessionState::with_store(ProfileStore::at(store_path.clone()));
        state.signup("Ada", "ada@example.com").unwrap();
        state.dispatch(ProfileAction::CompleteOnboarding).unwrap();
        drop(state);

        let state = SessionState::with_store(ProfileStore::at(store_path));
        let profile = state.profile().unwrap();
        assert!(profile.onboarded);
        assert_eq!(profile.name, "Ada");
    }

    #[test]
    fn test_logout_clears_blob_and_memory() {
        let (_guard, state) = session();
        state.signup("Ada", "ada@example.com").unwrap();
        state.logout().unwrap();
        assert!(!state.is_logged_in());
        assert_eq!(state.guidance.current(), None);
    }

    #[test]
    fn test_failed_action_leaves_state_unchanged() {
        let (_guard, state) = session();
        state.signup("Ada", "ada@example.com").unwrap();
        let before = state.profile().unwrap();

        let result = state.dispatch(ProfileAction::CheckIn {
            soil_state: SoilState::Parched,
            energy_level: 42,
            notes: None,
        });
        assert!(result.is_err());
        let after = state.profile().unwrap();
        assert_eq!(
            serde_json::to_string(&before).unwrap(),
            serde_json::to_string(&after).unwrap()
        );
    }

    #[tokio::test]
    async fn test_refresh_guidance_applies_to_session() {
        let (_guard, state) = session();
        state.signup("Ada", "ada@example.com").unwrap();
        let generator = FakeGenerator {
            response: Ok("Beloved, plant seeds.".to_string()),
        };
        let text = state.refresh_guidance(&generator).await.unwrap();
        assert_eq!(text, "Beloved, plant seeds.");
        assert_eq!(state.guidance.current().as_deref(), Some("Beloved, plant seeds."));
    }

    /// Full first-day walkthrough: signup today with a 28-day cycle, check in
    /// FLOODED at energy 4, toggle a pillar twice.
    #[test]
    fn test_first_day_walkthrough() {
        let (_guard, state) = session();
        state.signup("Ada", "ada@example.com").unwrap();

        // day 1, Maiden
        let profile = state
            .dispatch(ProfileAction::CheckIn {
                soil_state: SoilState::Flooded,
                energy_level: 4,
                notes: None,
            })
            .unwrap();
        let latest = &profile.daily_check_ins[0];
        assert_eq!(latest.cycle_day, 1);
        assert_eq!(latest.phase, Archetype::Maiden);
        assert_eq!(soil::latest_soil_state(&profile.daily_check_ins), SoilState::Flooded);

        // herbal recommendations now target FLOODED only
        let protocols = profile.herbal_protocols().unwrap();
        let matched = matcher::herbal_for(protocols, SoilState::Flooded);
        assert!(!matched.is_empty());
        assert!(matched.iter().all(|p| p.soil_states.contains(&SoilState::Flooded)));

        // somatic recommendations target the derived phase
        let practices = profile.somatic_practices().unwrap();
        let matched = matcher::somatic_for(practices, latest.phase);
        assert!(matched.iter().all(|p| p.phases.contains(&Archetype::Maiden)));

        // task matching with an empty list is a valid empty result
        assert!(matcher::tasks_for(&profile.tasks, PhaseFilter::Phase(latest.phase)).is_empty());

        // pillar toggle twice restores today's count
        let today = date_key(Utc::now());
        let before = pillars::completed_count(&profile.pillar_completions, &today);
        let profile = state.dispatch(ProfileAction::TogglePillar { index: 2 }).unwrap();
        assert_eq!(pillars::completed_count(&profile.pillar_completions, &today), before + 1);
        let profile = state.dispatch(ProfileAction::TogglePillar { index: 2 }).unwrap();
        assert_eq!(pillars::completed_count(&profile.pillar_completions, &today), before);
    }
}
