//! Reading and writing profile files.
//!
//! A profile file is a YAML document with a top-level `Parent` entry and one
//! mapping per [`Section`], keyed by canonical property names:
//!
//! ```yaml
//! Parent: /home/user/.config/sessionkit/profiles/Base.profile
//! General:
//!   Name: Work
//!   Command: ssh -p 2222 build-host
//! Scrolling:
//!   HistorySize: 5000
//! ```
//!
//! The program and its arguments share one `Command` entry, quoted with
//! shell rules.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde_yaml_ng::{Mapping, Value};

use crate::error::ProfileError;
use crate::profile_types::Profile;
use crate::property::{Property, Section};
use crate::shell_command::ShellCommand;
use crate::value::PropertyValue;

/// File extension of profile files, without the dot
pub const PROFILE_EXTENSION: &str = "profile";

/// Top-level key naming the parent profile's path
pub const PARENT_KEY: &str = "Parent";

const COMMAND_KEY: &str = "Command";

/// Where profiles are looked up and saved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileLocations {
    /// Searched in order when resolving bare file names
    pub search_dirs: Vec<PathBuf>,
    /// New and edited profiles are written here
    pub save_dir: PathBuf,
}

impl ProfileLocations {
    /// Save to (and search) `save_dir` only
    pub fn new(save_dir: impl Into<PathBuf>) -> Self {
        let save_dir = save_dir.into();
        Self {
            search_dirs: vec![save_dir.clone()],
            save_dir,
        }
    }

    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    /// `~/.config/sessionkit/profiles`
    pub fn default_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("sessionkit")
            .join("profiles")
    }

    /// First search directory containing `file_name`
    pub fn locate(&self, file_name: &str) -> Option<PathBuf> {
        self.search_dirs
            .iter()
            .map(|dir| dir.join(file_name))
            .find(|candidate| candidate.is_file())
    }
}

impl Default for ProfileLocations {
    fn default() -> Self {
        Self::new(Self::default_dir())
    }
}

/// Reads profiles from storage
pub trait ProfileReader {
    /// Paths of every profile this reader can find
    fn find_profiles(&self) -> Vec<PathBuf> {
        Vec::new()
    }

    /// Fill `profile` from the file at `path`.
    ///
    /// Returns the path of the declared parent profile, if any.
    fn read_profile(&self, path: &Path, profile: &mut Profile) -> Result<Option<String>, ProfileError>;
}

/// Writes profiles to storage
pub trait ProfileWriter {
    /// Path a profile should be saved to
    fn profile_path(&self, profile: &Profile) -> PathBuf;

    fn write_profile(
        &self,
        path: &Path,
        profile: &Profile,
        parent_path: Option<&str>,
    ) -> Result<(), ProfileError>;

    /// Remove a stored profile. A missing file is not an error.
    fn remove_profile(&self, path: &Path) -> std::io::Result<()> {
        if path.is_file() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}

/// YAML profile reader
#[derive(Debug, Clone, Default)]
pub struct YamlProfileReader {
    locations: ProfileLocations,
}

impl YamlProfileReader {
    pub fn new(locations: ProfileLocations) -> Self {
        Self { locations }
    }
}

impl ProfileReader for YamlProfileReader {
    fn find_profiles(&self) -> Vec<PathBuf> {
        let mut found = Vec::new();
        for dir in &self.locations.search_dirs {
            let Ok(entries) = fs::read_dir(dir) else {
                continue;
            };
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok().map(|e| e.path()))
                .filter(|path| {
                    path.is_file()
                        && path.extension().is_some_and(|ext| ext == PROFILE_EXTENSION)
                })
                .collect();
            paths.sort();
            found.extend(paths);
        }
        found
    }

    fn read_profile(&self, path: &Path, profile: &mut Profile) -> Result<Option<String>, ProfileError> {
        if !path.is_file() {
            return Err(ProfileError::NotFound(path.to_path_buf()));
        }
        let contents = fs::read_to_string(path).map_err(|e| ProfileError::io(path, e))?;
        let document: Value = if contents.trim().is_empty() {
            Value::Mapping(Mapping::new())
        } else {
            serde_yaml_ng::from_str(&contents).map_err(|source| ProfileError::Parse {
                path: path.to_path_buf(),
                source,
            })?
        };
        let Value::Mapping(root) = document else {
            return Err(ProfileError::Format {
                path: path.to_path_buf(),
                message: "expected a mapping at the top level".to_string(),
            });
        };

        profile.set_property(Property::Path, path.to_string_lossy().into_owned());

        for section in Section::ALL {
            let Some(entries) = root.get(section.name()) else {
                continue;
            };
            let Value::Mapping(entries) = entries else {
                log::warn!("{:?}: section {} is not a mapping", path, section.name());
                continue;
            };
            for (key, value) in entries {
                let Some(key) = key.as_str() else {
                    continue;
                };
                read_entry(path, profile, key, value);
            }
        }

        Ok(root
            .get(PARENT_KEY)
            .and_then(Value::as_str)
            .filter(|parent| !parent.is_empty())
            .map(String::from))
    }
}

fn read_entry(path: &Path, profile: &mut Profile, key: &str, value: &Value) {
    if key == COMMAND_KEY {
        if let Some(text) = value.as_str() {
            let command = ShellCommand::parse(text);
            profile.set_property(Property::Command, command.command);
            profile.set_property(Property::Arguments, command.arguments);
        }
        return;
    }

    let Some(property) = Property::lookup_by_name(key).filter(|p| p.name() == key) else {
        log::debug!("{path:?}: ignoring unknown entry {key:?}");
        return;
    };
    match PropertyValue::from_yaml(property.kind(), value) {
        Some(value) => profile.set_property(property, value),
        None => log::warn!(
            "{path:?}: value for {property} is not a valid {}",
            property.kind()
        ),
    }
}

/// YAML profile writer
#[derive(Debug, Clone, Default)]
pub struct YamlProfileWriter {
    locations: ProfileLocations,
}

impl YamlProfileWriter {
    pub fn new(locations: ProfileLocations) -> Self {
        Self { locations }
    }

    /// Build the YAML document for a profile
    pub fn to_document(profile: &Profile, parent_path: Option<&str>) -> Mapping {
        let mut root = Mapping::new();
        if let Some(parent) = parent_path {
            root.insert(PARENT_KEY.into(), parent.into());
        }

        let mut sections: BTreeMap<Section, Mapping> = BTreeMap::new();

        if let Some(command) = profile.local_value(Property::Command).and_then(PropertyValue::as_str) {
            let arguments = profile
                .local_value(Property::Arguments)
                .and_then(PropertyValue::as_string_list)
                .unwrap_or_default();
            let full = ShellCommand::from_parts(command, arguments).full_command();
            sections.entry(Section::General).or_default().insert(COMMAND_KEY.into(), full.into());
        }

        for (property, value) in profile.values() {
            if let Some(section) = property.section() {
                sections.entry(section).or_default().insert(property.name().into(), value.to_yaml());
            }
        }

        for (section, entries) in sections {
            root.insert(section.name().into(), Value::Mapping(entries));
        }
        root
    }
}

impl ProfileWriter for YamlProfileWriter {
    /// Keep the existing path when it is inside the save directory, otherwise
    /// `<save dir>/<Name>.profile`
    fn profile_path(&self, profile: &Profile) -> PathBuf {
        if let Some(existing) = profile.path()
            && Path::new(existing).starts_with(&self.locations.save_dir)
        {
            return PathBuf::from(existing);
        }
        let name = profile.name().unwrap_or("Profile");
        self.locations
            .save_dir
            .join(format!("{name}.{PROFILE_EXTENSION}"))
    }

    fn write_profile(
        &self,
        path: &Path,
        profile: &Profile,
        parent_path: Option<&str>,
    ) -> Result<(), ProfileError> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(|e| ProfileError::io(dir, e))?;
        }
        let yaml = serde_yaml_ng::to_string(&Value::Mapping(Self::to_document(profile, parent_path)))?;

        // Atomic save: write to temp file then rename to prevent corruption on crash
        let temp_path = path.with_extension("profile.tmp");
        fs::write(&temp_path, &yaml).map_err(|e| ProfileError::io(&temp_path, e))?;
        fs::rename(&temp_path, path).map_err(|e| ProfileError::io(path, e))?;

        log::info!("Saved profile {:?} to {:?}", profile.name(), path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FontSpec;
    use tempfile::tempdir;

    #[test]
    fn test_write_then_read_with_parent() {
        let dir = tempdir().unwrap();
        let locations = ProfileLocations::new(dir.path());
        let writer = YamlProfileWriter::new(locations.clone());
        let reader = YamlProfileReader::new(locations);

        let mut profile = Profile::new(None);
        profile.set_property(Property::Name, "Work");
        profile.set_property(Property::Command, "ssh");
        profile.set_property(
            Property::Arguments,
            vec!["ssh".to_string(), "-p".to_string(), "2222".to_string(), "build host".to_string()],
        );
        profile.set_property(Property::HistorySize, 5000i64);
        profile.set_property(Property::Font, FontSpec::new("Hack", 12.0));
        profile.set_property(Property::FlowControlEnabled, false);
        profile.set_property(Property::Title, "not persisted");

        let path = writer.profile_path(&profile);
        assert_eq!(path, dir.path().join("Work.profile"));
        writer
            .write_profile(&path, &profile, Some("/profiles/Base.profile"))
            .unwrap();

        let mut loaded = Profile::new(None);
        let parent = reader.read_profile(&path, &mut loaded).unwrap();
        assert_eq!(parent.as_deref(), Some("/profiles/Base.profile"));
        assert_eq!(loaded.name(), Some("Work"));
        assert_eq!(loaded.path(), Some(&*path.to_string_lossy()));
        assert_eq!(
            loaded.local_value(Property::Command),
            Some(&PropertyValue::String("ssh".to_string()))
        );
        assert_eq!(
            loaded.local_value(Property::Arguments),
            profile.local_value(Property::Arguments)
        );
        assert_eq!(
            loaded.local_value(Property::HistorySize),
            Some(&PropertyValue::Int(5000))
        );
        assert_eq!(
            loaded.local_value(Property::Font),
            Some(&PropertyValue::Font(FontSpec::new("Hack", 12.0)))
        );
        assert_eq!(
            loaded.local_value(Property::FlowControlEnabled),
            Some(&PropertyValue::Bool(false))
        );
        assert!(!loaded.is_set(Property::Title));
    }

    #[test]
    fn test_read_coerces_loose_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Loose.profile");
        fs::write(
            &path,
            "General:\n  Name: Loose\n  SilenceSeconds: \"30\"\n  Bogus: 1\nScrolling:\n  HistorySize: many\n",
        )
        .unwrap();

        let reader = YamlProfileReader::new(ProfileLocations::new(dir.path()));
        let mut profile = Profile::new(None);
        let parent = reader.read_profile(&path, &mut profile).unwrap();
        assert_eq!(parent, None);
        assert_eq!(
            profile.local_value(Property::SilenceSeconds),
            Some(&PropertyValue::Int(30))
        );
        assert!(!profile.is_set(Property::HistorySize));
    }

    #[test]
    fn test_read_errors() {
        let dir = tempdir().unwrap();
        let reader = YamlProfileReader::new(ProfileLocations::new(dir.path()));
        let mut profile = Profile::new(None);

        let missing = dir.path().join("Missing.profile");
        assert!(matches!(
            reader.read_profile(&missing, &mut profile),
            Err(ProfileError::NotFound(_))
        ));

        let list = dir.path().join("List.profile");
        fs::write(&list, "- a\n- b\n").unwrap();
        assert!(matches!(
            reader.read_profile(&list, &mut profile),
            Err(ProfileError::Format { .. })
        ));

        let broken = dir.path().join("Broken.profile");
        fs::write(&broken, "General: [unclosed\n").unwrap();
        assert!(matches!(
            reader.read_profile(&broken, &mut profile),
            Err(ProfileError::Parse { .. })
        ));
    }

    #[test]
    fn test_profile_path_outside_save_dir() {
        let dir = tempdir().unwrap();
        let writer = YamlProfileWriter::new(ProfileLocations::new(dir.path().join("save")));

        let mut profile = Profile::new(None);
        profile.set_property(Property::Name, "System");
        profile.set_property(Property::Path, "/usr/share/sessionkit/System.profile");
        assert_eq!(
            writer.profile_path(&profile),
            dir.path().join("save").join("System.profile")
        );

        let inside = dir.path().join("save").join("Custom.profile");
        profile.set_property(Property::Path, inside.to_string_lossy().into_owned());
        assert_eq!(writer.profile_path(&profile), inside);
    }

    #[test]
    fn test_find_profiles() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("B.profile"), "").unwrap();
        fs::write(dir.path().join("A.profile"), "").unwrap();
        fs::write(dir.path().join("notes.txt"), "").unwrap();

        let reader = YamlProfileReader::new(ProfileLocations::new(dir.path()));
        let found = reader.find_profiles();
        assert_eq!(
            found,
            vec![dir.path().join("A.profile"), dir.path().join("B.profile")]
        );
    }

    #[test]
    fn test_remove_profile() {
        let dir = tempdir().unwrap();
        let writer = YamlProfileWriter::new(ProfileLocations::new(dir.path()));
        let path = dir.path().join("Gone.profile");
        fs::write(&path, "General:\n  Name: Gone\n").unwrap();

        writer.remove_profile(&path).unwrap();
        assert!(!path.exists());
        writer.remove_profile(&path).unwrap();
    }
}
