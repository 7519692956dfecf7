//! Session manager: the profile registry and the sessions using it.
//!
//! `SessionManager` owns every profile (through a [`ProfileStore`]), knows
//! which profiles are registered, which is the default, which are favorites
//! and which key sequences open them. It creates sessions through a
//! [`SessionFactory`] and pushes resolved profile values into them.
//!
//! ## Sub-modules
//!
//! - [`loading`]: loading profiles and their parent chains from disk
//! - [`apply`]: translating resolved properties into session setters
//! - [`runtime`]: session lifecycle, runtime overlays and profile edits
//! - [`favorites`]: favorite profiles and menu ordering
//! - [`shortcuts`]: key sequence bindings
//! - [`state`]: saving and restoring open sessions

mod apply;
mod favorites;
mod loading;
mod runtime;
mod shortcuts;
mod state;

use std::collections::BTreeMap;
use std::path::Path;

use sessionkit_config::{
    ManagerSettings, Profile, ProfileId, ProfileLocations, ProfileReader, ProfileStore,
    ProfileWriter, Property, PropertyValue, SettingsFile, YamlProfileReader, YamlProfileWriter,
    fallback_profile,
};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender, unbounded_channel};

use crate::error::{Result, SessionError};
use crate::session::{SessionFactory, SessionId, TerminalSession};
use crate::shortcut::KeySequence;

pub use shortcuts::ShortcutEntry;

/// Where the manager reads and writes its files
#[derive(Debug, Clone, Default)]
pub struct ManagerOptions {
    pub locations: ProfileLocations,
    pub settings_file: SettingsFile,
}

impl ManagerOptions {
    /// Profiles and settings under one directory, for tests and portable setups
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            locations: ProfileLocations::new(dir.join("profiles")),
            settings_file: SettingsFile::new(dir.join("sessionkit.yaml")),
        }
    }
}

/// A live session and the profile state behind it
struct SessionEntry {
    backend: Box<dyn TerminalSession>,
    /// Profile the session currently uses; the overlay once one exists
    profile: ProfileId,
    /// Private profile holding changes requested by the running program
    overlay: Option<ProfileId>,
    /// Resolved value last pushed into the backend, per property
    applied: BTreeMap<Property, PropertyValue>,
}

/// Manages profiles and the sessions created from them
pub struct SessionManager {
    store: ProfileStore,
    fallback: ProfileId,
    /// Registered profiles in registration order
    loaded: Vec<ProfileId>,
    default_profile: ProfileId,
    /// `None` until first use
    favorites: Option<Vec<ProfileId>>,
    /// `None` until first use
    shortcuts: Option<BTreeMap<KeySequence, ShortcutEntry>>,
    loaded_all_profiles: bool,

    sessions: BTreeMap<SessionId, SessionEntry>,
    next_session_id: SessionId,
    terminations_tx: UnboundedSender<SessionId>,
    terminations_rx: UnboundedReceiver<SessionId>,

    /// Paths of profiles currently being loaded
    load_stack: Vec<std::path::PathBuf>,
    locations: ProfileLocations,
    reader: Box<dyn ProfileReader>,
    writer: Box<dyn ProfileWriter>,
    settings_file: SettingsFile,
    settings: ManagerSettings,
    factory: Box<dyn SessionFactory>,
}

impl SessionManager {
    /// Create a manager using YAML profile files
    pub fn new(options: ManagerOptions, factory: Box<dyn SessionFactory>) -> Self {
        let reader = Box::new(YamlProfileReader::new(options.locations.clone()));
        let writer = Box::new(YamlProfileWriter::new(options.locations.clone()));
        Self::with_adapters(options, reader, writer, factory)
    }

    /// Create a manager with custom profile readers and writers
    pub fn with_adapters(
        options: ManagerOptions,
        reader: Box<dyn ProfileReader>,
        writer: Box<dyn ProfileWriter>,
        factory: Box<dyn SessionFactory>,
    ) -> Self {
        let settings = options.settings_file.load().unwrap_or_else(|e| {
            log::warn!("Ignoring unreadable settings: {e:#}");
            ManagerSettings::default()
        });

        let mut store = ProfileStore::new();
        let fallback = store.insert(fallback_profile());
        let (terminations_tx, terminations_rx) = unbounded_channel();

        let mut manager = Self {
            store,
            fallback,
            loaded: Vec::new(),
            default_profile: fallback,
            favorites: None,
            shortcuts: None,
            loaded_all_profiles: false,
            sessions: BTreeMap::new(),
            next_session_id: 1,
            terminations_tx,
            terminations_rx,
            load_stack: Vec::new(),
            locations: options.locations,
            reader,
            writer,
            settings_file: options.settings_file,
            settings,
            factory,
        };
        manager.register(fallback);

        let default_file = manager.settings.default_profile_file().to_string();
        if !default_file.is_empty()
            && let Some(profile) = manager.load_profile(&default_file)
        {
            manager.default_profile = profile;
        }

        crate::debug_info!(
            "MANAGER",
            "Session manager ready, default profile {:?}",
            manager.profile_name(manager.default_profile)
        );
        manager
    }

    /// All profiles known to the manager, registered or not
    pub fn store(&self) -> &ProfileStore {
        &self.store
    }

    pub fn profile(&self, id: ProfileId) -> Option<&Profile> {
        self.store.get(id)
    }

    /// Resolved value of a property
    pub fn property(&self, id: ProfileId, property: Property) -> Option<&PropertyValue> {
        self.store.property(id, property)
    }

    pub fn profile_name(&self, id: ProfileId) -> Option<&str> {
        self.store.get(id).and_then(Profile::name)
    }

    /// The built-in profile every loaded profile inherits from
    pub fn fallback_profile(&self) -> ProfileId {
        self.fallback
    }

    pub fn locations(&self) -> &ProfileLocations {
        &self.locations
    }

    /// Add a new profile to the arena and register it
    pub fn add_profile(&mut self, profile: Profile) -> ProfileId {
        let id = self.store.insert(profile);
        self.register(id);
        id
    }

    /// Register a profile already in the arena. The first registered profile
    /// becomes the default.
    pub(crate) fn register(&mut self, id: ProfileId) {
        if self.loaded.contains(&id) {
            return;
        }
        if self.loaded.is_empty() {
            self.default_profile = id;
        }
        self.loaded.push(id);
        crate::debug_log!("MANAGER", "Registered profile {:?}", self.profile_name(id));
    }

    /// Create a group over `members` for editing them together
    pub fn create_group(&mut self, members: impl IntoIterator<Item = ProfileId>) -> ProfileId {
        self.store.create_group(members)
    }

    pub fn is_registered(&self, id: ProfileId) -> bool {
        self.loaded.contains(&id)
    }

    /// Registered profiles in registration order, hidden ones included
    pub fn loaded_profiles(&self) -> &[ProfileId] {
        &self.loaded
    }

    /// Registered profiles that are not hidden
    pub fn profiles(&self) -> Vec<ProfileId> {
        self.loaded
            .iter()
            .copied()
            .filter(|id| self.store.get(*id).is_some_and(|p| !p.is_hidden()))
            .collect()
    }

    pub fn default_profile(&self) -> ProfileId {
        self.default_profile
    }

    /// Make a registered profile the default and record its file name in the
    /// settings file.
    pub fn set_default_profile(&mut self, id: ProfileId) -> Result<()> {
        debug_assert!(
            self.loaded.contains(&id),
            "default profile must be registered"
        );
        if !self.loaded.contains(&id) {
            return Err(SessionError::NotRegistered(id));
        }
        self.default_profile = id;

        let file_name = if id == self.fallback {
            String::new()
        } else {
            self.store
                .get(id)
                .and_then(Profile::path)
                .and_then(|path| Path::new(path).file_name())
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_default()
        };
        self.settings.default_profile = Some(file_name);
        self.settings_file
            .save(&self.settings)
            .map_err(SessionError::Settings)
    }

    /// Write the default profile, favorites and shortcuts to the settings file
    pub fn save_settings(&mut self) -> Result<()> {
        if let Some(favorites) = &self.favorites {
            self.settings.favorites = Some(
                favorites
                    .iter()
                    .filter_map(|id| self.store.get(*id).and_then(Profile::path))
                    .map(String::from)
                    .collect(),
            );
        }
        if let Some(shortcuts) = &self.shortcuts {
            self.settings.shortcuts = shortcuts
                .iter()
                .filter_map(|(key, entry)| {
                    let path = entry
                        .profile
                        .and_then(|id| self.store.get(id))
                        .and_then(Profile::path)
                        .unwrap_or(entry.profile_path.as_str());
                    (!path.is_empty()).then(|| (key.to_string(), path.to_string()))
                })
                .collect();
        }
        self.settings_file
            .save(&self.settings)
            .map_err(SessionError::Settings)
    }
}
