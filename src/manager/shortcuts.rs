//! Key sequences bound to profiles.
//!
//! Bindings are read from the settings file as key text and profile path.
//! The profile behind a binding is only loaded the first time the key is
//! looked up.

use std::collections::BTreeMap;

use sessionkit_config::{Profile, ProfileId};

use super::SessionManager;
use crate::shortcut::KeySequence;

/// The profile a key sequence opens
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortcutEntry {
    /// Set once the profile has been loaded
    pub profile: Option<ProfileId>,
    pub profile_path: String,
}

impl ShortcutEntry {
    fn refers_to(&self, profile: ProfileId, path: &str) -> bool {
        self.profile == Some(profile) || (!path.is_empty() && self.profile_path == path)
    }
}

impl SessionManager {
    fn ensure_shortcuts_loaded(&mut self) {
        if self.shortcuts.is_some() {
            return;
        }
        let mut shortcuts = BTreeMap::new();
        for (text, path) in &self.settings.shortcuts {
            match KeySequence::parse(text) {
                Ok(key) => {
                    shortcuts.insert(
                        key,
                        ShortcutEntry {
                            profile: None,
                            profile_path: path.clone(),
                        },
                    );
                }
                Err(e) => log::warn!("Ignoring shortcut {text:?}: {e}"),
            }
        }
        self.shortcuts = Some(shortcuts);
    }

    /// Bind `key` to a profile, replacing the profile's previous binding and
    /// any profile previously bound to `key`. `None` only removes.
    pub fn set_shortcut(&mut self, profile: ProfileId, key: Option<KeySequence>) {
        self.ensure_shortcuts_loaded();
        let path = self
            .store
            .get(profile)
            .and_then(Profile::path)
            .unwrap_or_default()
            .to_string();

        let shortcuts = self.shortcuts.get_or_insert_with(BTreeMap::new);
        shortcuts.retain(|_, entry| !entry.refers_to(profile, &path));

        if let Some(key) = key {
            shortcuts.insert(
                key,
                ShortcutEntry {
                    profile: Some(profile),
                    profile_path: path,
                },
            );
        }
    }

    /// Key sequence bound to a profile
    pub fn shortcut(&mut self, profile: ProfileId) -> Option<KeySequence> {
        self.ensure_shortcuts_loaded();
        let path = self
            .store
            .get(profile)
            .and_then(Profile::path)
            .unwrap_or_default();
        self.shortcuts
            .as_ref()?
            .iter()
            .find(|(_, entry)| entry.refers_to(profile, path))
            .map(|(key, _)| *key)
    }

    /// Profile bound to a key sequence, loading it on first use.
    ///
    /// A binding whose profile cannot be loaded is removed.
    pub fn find_by_shortcut(&mut self, key: KeySequence) -> Option<ProfileId> {
        self.ensure_shortcuts_loaded();
        let entry = self.shortcuts.as_ref()?.get(&key)?.clone();
        if let Some(profile) = entry.profile {
            return Some(profile);
        }

        let loaded = self.load_profile(&entry.profile_path);
        let shortcuts = self.shortcuts.get_or_insert_with(BTreeMap::new);
        match loaded {
            Some(profile) => {
                if let Some(entry) = shortcuts.get_mut(&key) {
                    entry.profile = Some(profile);
                }
            }
            None => {
                log::warn!(
                    "Removing shortcut {}: profile {:?} could not be loaded",
                    key,
                    entry.profile_path
                );
                shortcuts.remove(&key);
            }
        }
        loaded
    }

    /// Every bound key sequence
    pub fn shortcut_keys(&mut self) -> Vec<KeySequence> {
        self.ensure_shortcuts_loaded();
        self.shortcuts
            .as_ref()
            .map(|shortcuts| shortcuts.keys().copied().collect())
            .unwrap_or_default()
    }
}
