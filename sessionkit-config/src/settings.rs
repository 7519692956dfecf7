//! Manager-level settings file.
//!
//! Stored in `~/.config/sessionkit/sessionkit.yaml`:
//!
//! ```yaml
//! default_profile: Work.profile
//! favorites:
//!   - /home/user/.config/sessionkit/profiles/Work.profile
//! shortcuts:
//!   Ctrl+Alt+W: /home/user/.config/sessionkit/profiles/Work.profile
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::PathBuf;

/// Profile file loaded as the default when the settings name none
pub const DEFAULT_PROFILE_FILE: &str = "Shell.profile";

/// Default profile, favorites and shortcut bindings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManagerSettings {
    /// File name of the default profile
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_profile: Option<String>,

    /// Paths of favorite profiles. `None` means never written.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub favorites: Option<Vec<String>>,

    /// Key sequence text to profile path
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub shortcuts: BTreeMap<String, String>,
}

impl ManagerSettings {
    pub fn default_profile_file(&self) -> &str {
        self.default_profile
            .as_deref()
            .unwrap_or(DEFAULT_PROFILE_FILE)
    }

    /// Favorite paths, `Shell.profile` when the key was never written
    pub fn favorite_paths(&self) -> Vec<String> {
        match &self.favorites {
            Some(favorites) => favorites.clone(),
            None => vec![DEFAULT_PROFILE_FILE.to_string()],
        }
    }
}

/// Location of the settings file on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    path: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/sessionkit/sessionkit.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sessionkit")
            .join("sessionkit.yaml")
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// Load settings, returning defaults if the file does not exist
    pub fn load(&self) -> Result<ManagerSettings> {
        if !self.path.exists() {
            log::debug!("No settings file at {:?}, using defaults", self.path);
            return Ok(ManagerSettings::default());
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;
        if contents.trim().is_empty() {
            return Ok(ManagerSettings::default());
        }

        serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse settings from {:?}", self.path))
    }

    pub fn save(&self, settings: &ManagerSettings) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml = serde_yaml_ng::to_string(settings).context("Failed to serialize settings")?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)
            .with_context(|| format!("Failed to write settings to {:?}", temp_path))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace settings file {:?}", self.path))?;

        log::info!("Saved settings to {:?}", self.path);
        Ok(())
    }
}

impl Default for SettingsFile {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}
