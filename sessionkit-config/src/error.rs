//! Typed error variants for the sessionkit-config crate.
//!
//! Profile readers and writers return these so the session manager can tell a
//! missing profile file apart from one that exists but cannot be parsed.

use std::path::PathBuf;
use thiserror::Error;

/// Errors produced while reading or writing profile files.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile file does not exist (or is not a regular file).
    #[error("Profile file not found: {0:?}")]
    NotFound(PathBuf),

    /// An I/O error occurred reading or writing the profile file.
    #[error("I/O error for profile {path:?}: {source}")]
    Io {
        /// Path of the profile file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The profile file contained invalid YAML.
    #[error("YAML parse error in profile {path:?}: {source}")]
    Parse {
        /// Path of the profile file.
        path: PathBuf,
        /// Underlying YAML error.
        #[source]
        source: serde_yaml_ng::Error,
    },

    /// The YAML parsed but does not have the expected shape.
    #[error("Malformed profile {path:?}: {message}")]
    Format {
        /// Path of the profile file.
        path: PathBuf,
        /// What was wrong with the document.
        message: String,
    },

    /// The profile could not be serialized for writing.
    #[error("Failed to serialize profile: {0}")]
    Serialize(#[from] serde_yaml_ng::Error),
}

impl ProfileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ProfileError::Io {
            path: path.into(),
            source,
        }
    }
}
