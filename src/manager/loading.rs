//! Loading profiles and their parent chains from storage.

use std::path::{Path, PathBuf};

use sessionkit_config::{FALLBACK_PATH, PROFILE_EXTENSION, Profile, ProfileId};

use super::SessionManager;

impl SessionManager {
    /// Load a profile by file name or path and register it.
    ///
    /// `FALLBACK/` returns the fallback profile. A name without the `.profile`
    /// extension gets it appended, and relative names are looked up in the
    /// search directories. Loading the same file twice returns the profile
    /// loaded the first time. Returns `None` for directories and for files
    /// that cannot be read.
    pub fn load_profile(&mut self, short_path: &str) -> Option<ProfileId> {
        if short_path == FALLBACK_PATH {
            return Some(self.fallback);
        }
        let path = self.resolve_profile_path(short_path)?;

        if let Some(id) = self.find_loaded_by_path(&path) {
            return Some(id);
        }

        if self.load_stack.contains(&path) {
            log::warn!("Ignoring attempt to load profile recursively from {:?}", path);
            return Some(self.fallback);
        }
        self.load_stack.push(path.clone());
        let loaded = self.read_with_parent(&path);
        self.load_stack.pop();

        let id = loaded?;
        self.register(id);
        Some(id)
    }

    fn read_with_parent(&mut self, path: &Path) -> Option<ProfileId> {
        let mut profile = Profile::new(Some(self.fallback));
        let parent_path = match self.reader.read_profile(path, &mut profile) {
            Ok(parent_path) => parent_path,
            Err(e) => {
                log::warn!("Could not load profile from {:?}: {}", path, e);
                return None;
            }
        };

        let id = self.store.insert(profile);
        if let Some(parent_path) = parent_path
            && let Some(parent) = self.load_profile(&parent_path)
        {
            self.store.set_parent(id, Some(parent));
        }
        log::info!("Loaded profile {:?}", path);
        Some(id)
    }

    /// Normalize a profile name into the path it is read from
    fn resolve_profile_path(&self, short_path: &str) -> Option<PathBuf> {
        let mut path = PathBuf::from(short_path);
        if short_path.is_empty() || path.is_dir() {
            return None;
        }
        if path.extension().is_none_or(|ext| ext != PROFILE_EXTENSION) {
            path = PathBuf::from(format!("{short_path}.{PROFILE_EXTENSION}"));
        }
        if path.is_absolute() {
            return Some(path);
        }

        let relative = path.to_string_lossy();
        Some(
            self.locations
                .locate(&relative)
                .unwrap_or_else(|| self.locations.save_dir.join(&path)),
        )
    }

    fn find_loaded_by_path(&self, path: &Path) -> Option<ProfileId> {
        let path = path.to_string_lossy();
        self.loaded.iter().copied().find(|id| {
            self.store
                .get(*id)
                .and_then(Profile::path)
                .is_some_and(|p| p == path)
        })
    }

    /// Paths of every profile file the reader can find
    pub fn available_profile_paths(&self) -> Vec<PathBuf> {
        self.reader.find_profiles()
    }

    /// Load every available profile. Only the first call reads from storage.
    pub fn load_all_profiles(&mut self) {
        if self.loaded_all_profiles {
            return;
        }
        for path in self.reader.find_profiles() {
            self.load_profile(&path.to_string_lossy());
        }
        self.loaded_all_profiles = true;
    }
}
