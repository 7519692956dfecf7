//! Session state file.
//!
//! Stored in `~/.config/sessionkit/last_session.yaml`:
//!
//! ```yaml
//! saved_at: 2026-01-01T00:00:00+00:00
//! sessions:
//!   - profile_path: /home/user/.config/sessionkit/profiles/Work.profile
//!     working_directory: /srv/work
//!     overrides:
//!       Icon: network
//!       Arguments: [sh, -c, "echo a, b"]
//! ```

use super::SessionState;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Location of the saved session state on disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionStateFile {
    path: PathBuf,
}

impl SessionStateFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// `~/.config/sessionkit/last_session.yaml`
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sessionkit")
            .join("last_session.yaml")
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the state, replacing any previous file
    pub fn save(&self, state: &SessionState) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let yaml = serde_yaml_ng::to_string(state).context("Failed to serialize session state")?;

        let temp_path = self.path.with_extension("yaml.tmp");
        fs::write(&temp_path, &yaml)
            .with_context(|| format!("Failed to write session state to {:?}", temp_path))?;
        fs::rename(&temp_path, &self.path)
            .with_context(|| format!("Failed to replace session state {:?}", self.path))?;

        log::info!(
            "Saved {} sessions to {:?}",
            state.sessions.len(),
            self.path
        );
        Ok(())
    }

    /// Read the state. A missing or empty file is `None`, an unparsable one
    /// is an error.
    pub fn load(&self) -> Result<Option<SessionState>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&self.path)
            .with_context(|| format!("Failed to read session state from {:?}", self.path))?;
        if contents.trim().is_empty() {
            return Ok(None);
        }

        let state: SessionState = serde_yaml_ng::from_str(&contents)
            .with_context(|| format!("Failed to parse session state from {:?}", self.path))?;
        log::debug!(
            "Loaded {} sessions from {:?}",
            state.sessions.len(),
            self.path
        );
        Ok(Some(state))
    }

    /// Remove the file if present
    pub fn clear(&self) -> Result<()> {
        if self.path.exists() {
            fs::remove_file(&self.path)
                .with_context(|| format!("Failed to remove session state {:?}", self.path))?;
        }
        Ok(())
    }
}

impl Default for SessionStateFile {
    fn default() -> Self {
        Self::new(Self::default_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::SavedSession;
    use std::collections::BTreeMap;
    use tempfile::tempdir;

    fn sample_state() -> SessionState {
        SessionState {
            saved_at: "2026-01-01T00:00:00Z".to_string(),
            sessions: vec![SavedSession {
                profile_path: "/home/user/.config/sessionkit/profiles/Work.profile".to_string(),
                working_directory: Some("/home/user/work".to_string()),
                overrides: BTreeMap::from([(
                    "ColorScheme".to_string(),
                    serde_yaml_ng::Value::String("Solarized".to_string()),
                )]),
            }],
        }
    }

    #[test]
    fn test_missing_or_empty_file_is_none() {
        let temp = tempdir().unwrap();
        let file = SessionStateFile::new(temp.path().join("last_session.yaml"));
        assert!(file.load().unwrap().is_none());

        fs::write(file.path(), "  \n").unwrap();
        assert!(file.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let temp = tempdir().unwrap();
        let file = SessionStateFile::new(temp.path().join("last_session.yaml"));
        fs::write(file.path(), "sessions: [[[").unwrap();
        assert!(file.load().is_err());
    }

    #[test]
    fn test_save_creates_directories_and_leaves_no_temp_file() {
        let temp = tempdir().unwrap();
        let file = SessionStateFile::new(temp.path().join("nested").join("last_session.yaml"));

        let state = sample_state();
        file.save(&state).unwrap();
        assert!(!file.path().with_extension("yaml.tmp").exists());

        let loaded = file.load().unwrap().unwrap();
        assert_eq!(loaded.saved_at, state.saved_at);
        assert_eq!(loaded.sessions, state.sessions);
    }

    #[test]
    fn test_clear() {
        let temp = tempdir().unwrap();
        let file = SessionStateFile::new(temp.path().join("last_session.yaml"));
        file.save(&sample_state()).unwrap();

        file.clear().unwrap();
        assert!(!file.path().exists());
        // Clearing a missing file is not an error
        file.clear().unwrap();
    }
}
