//! Favorite profiles and menu ordering.

use sessionkit_config::{ProfileId, Property};

use super::SessionManager;

impl SessionManager {
    fn ensure_favorites_loaded(&mut self) {
        if self.favorites.is_some() {
            return;
        }
        let mut favorites = Vec::new();
        for path in self.settings.favorite_paths() {
            match self.load_profile(&path) {
                Some(id) if !favorites.contains(&id) => favorites.push(id),
                Some(_) => {}
                None => log::debug!("Favorite profile {path:?} could not be loaded"),
            }
        }
        self.favorites = Some(favorites);
    }

    /// Favorite profiles, loaded from the settings file on first use
    pub fn favorites(&mut self) -> Vec<ProfileId> {
        self.ensure_favorites_loaded();
        self.favorites.clone().unwrap_or_default()
    }

    pub fn is_favorite(&mut self, profile: ProfileId) -> bool {
        self.ensure_favorites_loaded();
        self.favorites
            .as_ref()
            .is_some_and(|favorites| favorites.contains(&profile))
    }

    /// Add or remove a favorite. The profile is registered if it was not.
    pub fn set_favorite(&mut self, profile: ProfileId, favorite: bool) {
        if self.store.contains(profile) {
            self.register(profile);
        }
        self.ensure_favorites_loaded();

        let favorites = self.favorites.get_or_insert_with(Vec::new);
        if favorite && !favorites.contains(&profile) {
            favorites.push(profile);
        } else if !favorite {
            favorites.retain(|id| *id != profile);
        }
    }

    /// Order profiles for menus and renumber their MenuIndex from 1.
    ///
    /// Profiles with a MenuIndex come first, by index; the rest follow by
    /// name. The fallback profile is left out.
    pub fn sort_profiles(&mut self, profiles: &[ProfileId]) -> Vec<ProfileId> {
        let (mut indexed, mut unindexed): (Vec<ProfileId>, Vec<ProfileId>) = profiles
            .iter()
            .copied()
            .filter(|id| *id != self.fallback && self.store.contains(*id))
            .partition(|id| self.store.menu_index(*id) != 0);

        indexed.sort_by_key(|id| self.store.menu_index(*id));
        unindexed.sort_by_key(|id| {
            self.profile_name(*id)
                .map(str::to_lowercase)
                .unwrap_or_default()
        });

        let sorted: Vec<ProfileId> = indexed.into_iter().chain(unindexed).collect();
        for (position, id) in sorted.iter().enumerate() {
            if let Some(profile) = self.store.get_mut(*id) {
                profile.set_property(Property::MenuIndex, (position + 1).to_string());
            }
        }
        sorted
    }

    /// Favorites in menu order
    pub fn sorted_favorites(&mut self) -> Vec<ProfileId> {
        let favorites = self.favorites();
        self.sort_profiles(&favorites)
    }
}
