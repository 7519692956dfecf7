//! Session lifecycle, runtime profile changes and profile edits.

use std::collections::BTreeMap;
use std::path::PathBuf;

use sessionkit_config::{Profile, ProfileId, Property, PropertyValue, parse_profile_command};
use sessionkit_ssh::{classify_ssh_args, is_ssh_program};
use tokio::sync::mpsc::UnboundedSender;

use super::apply::apply_to_session;
use super::{SessionEntry, SessionManager};
use crate::error::{Result, SessionError};
use crate::session::SessionId;

impl SessionManager {
    /// Create a session from `profile`, or from the default profile.
    pub fn create_session(&mut self, profile: Option<ProfileId>) -> Result<SessionId> {
        let profile = profile.unwrap_or(self.default_profile);
        if !self.store.contains(profile) {
            return Err(SessionError::UnknownProfile(profile));
        }
        self.register(profile);

        let id = self.next_session_id;
        self.next_session_id += 1;

        let mut entry = SessionEntry {
            backend: self.factory.create_session(id),
            profile,
            overlay: None,
            applied: BTreeMap::new(),
        };
        apply_to_session(&self.store, &mut entry, false);
        self.sessions.insert(id, entry);

        log::info!(
            "Created session {} from profile {:?}",
            id,
            self.profile_name(profile)
        );
        Ok(id)
    }

    /// Ids of live sessions
    pub fn sessions(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }

    /// Profile a session is currently bound to
    pub fn session_profile(&self, session: SessionId) -> Option<ProfileId> {
        self.sessions.get(&session).map(|entry| entry.profile)
    }

    /// The private profile holding a session's runtime changes, if any
    pub fn session_overlay(&self, session: SessionId) -> Option<ProfileId> {
        self.sessions.get(&session).and_then(|entry| entry.overlay)
    }

    /// Rebind a session to another profile.
    ///
    /// A session with runtime changes keeps its overlay, which now inherits
    /// from `profile`, so the changes stay in effect.
    pub fn set_session_profile(&mut self, session: SessionId, profile: ProfileId) -> Result<()> {
        if !self.store.contains(profile) {
            return Err(SessionError::UnknownProfile(profile));
        }
        let entry = self
            .sessions
            .get_mut(&session)
            .ok_or(SessionError::UnknownSession(session))?;
        entry.profile = match entry.overlay {
            Some(overlay) if overlay != profile => {
                self.store.set_parent(overlay, Some(profile));
                overlay
            }
            Some(overlay) => overlay,
            None => profile,
        };
        self.update_session(session)
    }

    /// Re-apply every value of the session's profile
    pub fn update_session(&mut self, session: SessionId) -> Result<()> {
        let entry = self
            .sessions
            .get_mut(&session)
            .ok_or(SessionError::UnknownSession(session))?;
        apply_to_session(&self.store, entry, false);
        Ok(())
    }

    /// Handle a profile change request sent by the program running in a
    /// session, e.g. `ColorScheme=Dark;HistorySize=5000`.
    ///
    /// Changes go to a hidden profile private to the session, so the profile
    /// the session was created from is never modified.
    pub fn session_profile_command_received(&mut self, session: SessionId, text: &str) -> Result<()> {
        self.change_session_overlay(session, parse_profile_command(text))
    }

    /// Store changes in the session's overlay, creating it on first use, and
    /// apply what changed.
    pub(super) fn change_session_overlay(
        &mut self,
        session: SessionId,
        changes: impl IntoIterator<Item = (Property, PropertyValue)>,
    ) -> Result<()> {
        let entry = self
            .sessions
            .get_mut(&session)
            .ok_or(SessionError::UnknownSession(session))?;
        let overlay = match entry.overlay {
            Some(overlay) => overlay,
            None => {
                let mut profile = Profile::new(Some(entry.profile));
                profile.set_hidden(true);
                let overlay = self.store.insert(profile);
                entry.overlay = Some(overlay);
                overlay
            }
        };
        if let Some(profile) = self.store.get_mut(overlay) {
            profile.set_properties(changes);
        }
        entry.profile = overlay;
        apply_to_session(&self.store, entry, true);
        Ok(())
    }

    /// Change properties of a profile and update every session.
    ///
    /// Groups pass the changes on to each member. With `persistent`, named
    /// profiles that are not hidden are written back to storage.
    pub fn change_profile(
        &mut self,
        profile: ProfileId,
        changes: impl IntoIterator<Item = (Property, PropertyValue)>,
        persistent: bool,
    ) -> Result<()> {
        let changes: Vec<(Property, PropertyValue)> = changes.into_iter().collect();
        let target = self
            .store
            .get(profile)
            .ok_or(SessionError::UnknownProfile(profile))?;

        if target.is_group() {
            for member in target.members().to_vec() {
                self.change_profile(member, changes.clone(), persistent)?;
            }
            self.store.update_group_values(profile);
            return Ok(());
        }

        if let Some(target) = self.store.get_mut(profile) {
            target.set_properties(changes);
        }
        for entry in self.sessions.values_mut() {
            apply_to_session(&self.store, entry, true);
        }

        let savable = self
            .store
            .get(profile)
            .is_some_and(|p| !p.is_hidden() && p.name().is_some_and(|name| !name.is_empty()));
        if persistent && savable {
            self.save_profile(profile)?;
        }
        Ok(())
    }

    /// Write a profile through the profile writer and record where it went
    pub fn save_profile(&mut self, profile: ProfileId) -> Result<PathBuf> {
        let stored = self
            .store
            .get(profile)
            .ok_or(SessionError::UnknownProfile(profile))?;
        let path = self.writer.profile_path(stored);
        let parent_path = stored
            .parent()
            .filter(|parent| *parent != self.fallback)
            .and_then(|parent| self.store.get(parent))
            .and_then(Profile::path)
            .map(String::from);
        self.writer
            .write_profile(&path, stored, parent_path.as_deref())?;

        if let Some(stored) = self.store.get_mut(profile) {
            stored.set_property(Property::Path, path.to_string_lossy().into_owned());
        }
        Ok(path)
    }

    /// Delete a profile and its backing file.
    ///
    /// If the file cannot be removed nothing else changes. Otherwise the
    /// profile is dropped from favorites, shortcuts and the registered set,
    /// and marked hidden. Sessions using it keep their values.
    pub fn delete_profile(&mut self, profile: ProfileId) -> Result<()> {
        if profile == self.fallback {
            return Err(SessionError::ProtectedProfile);
        }
        let stored = self
            .store
            .get(profile)
            .ok_or(SessionError::UnknownProfile(profile))?;

        if let Some(path) = stored.path().map(PathBuf::from) {
            self.writer
                .remove_profile(&path)
                .map_err(|source| SessionError::DeleteFailed {
                    path: path.clone(),
                    source,
                })?;
        }

        self.set_favorite(profile, false);
        self.set_shortcut(profile, None);
        self.loaded.retain(|id| *id != profile);
        if let Some(stored) = self.store.get_mut(profile) {
            stored.set_hidden(true);
        }

        if self.default_profile == profile {
            let first = self.profiles().first().copied().unwrap_or(self.fallback);
            if let Err(e) = self.set_default_profile(first) {
                log::warn!("Failed to persist new default profile: {e}");
            }
        }
        log::info!("Deleted profile {:?}", profile);
        Ok(())
    }

    /// Forget a session that has finished. Returns false for unknown ids.
    pub fn session_terminated(&mut self, session: SessionId) -> bool {
        let Some(entry) = self.sessions.remove(&session) else {
            return false;
        };
        if let Some(overlay) = entry.overlay {
            self.store.remove(overlay);
        }
        log::info!("Session {} terminated", session);
        true
    }

    /// Sender for reporting finished sessions from other threads
    pub fn termination_sender(&self) -> UnboundedSender<SessionId> {
        self.terminations_tx.clone()
    }

    /// Remove every session reported through [`Self::termination_sender`].
    /// Returns how many sessions were removed.
    pub fn process_terminations(&mut self) -> usize {
        let mut removed = 0;
        while let Ok(session) = self.terminations_rx.try_recv() {
            if self.session_terminated(session) {
                removed += 1;
            }
        }
        removed
    }

    /// Close every session
    pub fn close_all(&mut self) {
        for (_, mut entry) in std::mem::take(&mut self.sessions) {
            entry.backend.close();
            if let Some(overlay) = entry.overlay {
                self.store.remove(overlay);
            }
        }
    }

    /// Tab title for a session running `ssh`, built from its
    /// RemoteTabTitleFormat. `None` when the program is not ssh.
    pub fn remote_title(&self, session: SessionId) -> Option<String> {
        let entry = self.sessions.get(&session)?;
        let program = entry.applied.get(&Property::Command)?.as_str()?;
        if !is_ssh_program(program) {
            return None;
        }
        let arguments = entry
            .applied
            .get(&Property::Arguments)
            .and_then(PropertyValue::as_string_list)
            .unwrap_or_default();
        let format = entry
            .applied
            .get(&Property::RemoteTabTitleFormat)
            .and_then(PropertyValue::as_str)?;
        Some(classify_ssh_args(arguments).format(format))
    }
}
