//! Errors returned by the session manager.

use sessionkit_config::{ProfileError, ProfileId};
use std::path::PathBuf;
use thiserror::Error;

use crate::session::SessionId;

/// Errors produced by [`SessionManager`](crate::manager::SessionManager) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Reading or writing a profile file failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// No live session has this id.
    #[error("Unknown session {0}")]
    UnknownSession(SessionId),

    /// The profile id is not in the arena.
    #[error("Unknown profile {0}")]
    UnknownProfile(ProfileId),

    /// The profile exists but has not been registered with the manager.
    #[error("Profile {0} is not registered")]
    NotRegistered(ProfileId),

    /// The profile file could not be removed; nothing was changed.
    #[error("Failed to delete profile file {path:?}: {source}")]
    DeleteFailed {
        /// Path of the profile file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The built-in fallback profile cannot be deleted.
    #[error("The fallback profile cannot be deleted")]
    ProtectedProfile,

    /// Reading or writing the settings file failed.
    #[error("Settings error: {0:#}")]
    Settings(anyhow::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
