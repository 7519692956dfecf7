//! Shared integration test helpers for sessionkit.
//!
//! # Usage
//!
//! ```ignore
//! mod common;
//! use common::TestContext;
//! ```
//!
//! The `#![allow(dead_code)]` attribute suppresses warnings when only a
//! subset of helpers are used per file.

#![allow(dead_code)]

use sessionkit::{ManagerOptions, RecordingFactory, SessionManager};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A temporary profile directory and settings file, plus a recording
/// session factory to inspect what sessions were told.
///
/// Layout:
/// ```text
/// <tmp>/
///   profiles/          # search and save directory
///   sessionkit.yaml    # settings file
/// ```
pub struct TestContext {
    /// Kept alive for the lifetime of the context.
    pub dir: TempDir,
    pub factory: RecordingFactory,
}

impl TestContext {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        fs::create_dir_all(dir.path().join("profiles")).expect("Failed to create profiles dir");
        Self {
            dir,
            factory: RecordingFactory::new(),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn profiles_dir(&self) -> PathBuf {
        self.dir.path().join("profiles")
    }

    pub fn settings_path(&self) -> PathBuf {
        self.dir.path().join("sessionkit.yaml")
    }

    pub fn options(&self) -> ManagerOptions {
        ManagerOptions::in_dir(self.dir.path())
    }

    /// Write a profile file into the profiles directory and return its path
    pub fn write_profile(&self, file_name: &str, contents: &str) -> PathBuf {
        let path = self.profiles_dir().join(file_name);
        fs::write(&path, contents).expect("Failed to write profile");
        path
    }

    pub fn write_settings(&self, contents: &str) {
        fs::write(self.settings_path(), contents).expect("Failed to write settings");
    }

    /// A manager over this context's files, creating recording sessions
    pub fn manager(&self) -> SessionManager {
        SessionManager::new(self.options(), Box::new(self.factory.clone()))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
