//! Saving and restoring open sessions.

use std::collections::BTreeMap;

use sessionkit_config::{FALLBACK_PATH, Profile, Property, PropertyValue};

use super::SessionManager;
use crate::session::{SavedSession, SessionId, SessionState};

impl SessionManager {
    /// Snapshot of every live session: the profile it was created from, its
    /// working directory and its runtime changes.
    pub fn save_sessions(&self) -> SessionState {
        let sessions = self
            .sessions
            .values()
            .map(|entry| {
                let overlay = entry.overlay.and_then(|id| self.store.get(id));
                let base = overlay.and_then(Profile::parent).unwrap_or(entry.profile);
                let profile_path = self
                    .store
                    .get(base)
                    .and_then(Profile::path)
                    .unwrap_or(FALLBACK_PATH)
                    .to_string();
                let overrides = overlay
                    .map(|profile| {
                        profile
                            .values()
                            .iter()
                            .map(|(property, value)| (property.name().to_string(), value.to_yaml()))
                            .collect::<BTreeMap<_, _>>()
                    })
                    .unwrap_or_default();

                SavedSession {
                    profile_path,
                    working_directory: entry.backend.current_working_directory(),
                    overrides,
                }
            })
            .collect();

        SessionState {
            saved_at: chrono::Utc::now().to_rfc3339(),
            sessions,
        }
    }

    /// Recreate saved sessions. Profiles that can no longer be loaded are
    /// replaced by the default profile.
    pub fn restore_sessions(&mut self, state: &SessionState) -> Vec<SessionId> {
        let mut restored = Vec::new();
        for saved in &state.sessions {
            let profile = self.load_profile(&saved.profile_path).unwrap_or_else(|| {
                log::warn!(
                    "Profile {:?} not found, restoring session with the default profile",
                    saved.profile_path
                );
                self.default_profile
            });
            let session = match self.create_session(Some(profile)) {
                Ok(session) => session,
                Err(e) => {
                    log::warn!("Failed to restore session: {e}");
                    continue;
                }
            };

            let overrides: Vec<(Property, PropertyValue)> = saved
                .overrides
                .iter()
                .filter_map(|(name, value)| {
                    let property = Property::lookup_by_name(name)?;
                    PropertyValue::from_yaml(property.kind(), value).map(|value| (property, value))
                })
                .collect();
            if !overrides.is_empty()
                && let Err(e) = self.change_session_overlay(session, overrides)
            {
                log::warn!("Failed to restore changes of session {session}: {e}");
            }

            if let Some(directory) = &saved.working_directory
                && let Some(entry) = self.sessions.get_mut(&session)
            {
                entry.backend.set_initial_working_directory(directory);
            }
            restored.push(session);
        }
        log::info!("Restored {} of {} sessions", restored.len(), state.sessions.len());
        restored
    }
}
