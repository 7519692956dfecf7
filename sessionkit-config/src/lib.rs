//! Profile model for the sessionkit session engine.
//!
//! This crate provides the data side of terminal profiles:
//!
//! - The property table (names, aliases, kinds, sections)
//! - Typed property values and their coercion from text and YAML
//! - The profile arena with inherited-value resolution and group editing
//! - The built-in fallback profile
//! - YAML profile readers and writers
//! - The runtime profile change request parser
//! - The manager settings file

pub mod command_parser;
pub mod defaults;
pub mod error;
pub mod persistence;
pub mod profile_types;
pub mod property;
pub mod settings;
pub mod shell_command;
mod types;
pub mod value;

pub use command_parser::parse_profile_command;
pub use defaults::{FALLBACK_PATH, fallback_profile};
pub use error::ProfileError;
pub use persistence::{
    PROFILE_EXTENSION, ProfileLocations, ProfileReader, ProfileWriter, YamlProfileReader,
    YamlProfileWriter,
};
pub use profile_types::{Profile, ProfileId, ProfileKind, ProfileStore};
pub use property::{Property, PropertyInfo, PropertyKind, Section, properties_info_list, property_table};
pub use settings::{DEFAULT_PROFILE_FILE, ManagerSettings, SettingsFile};
pub use shell_command::ShellCommand;
pub use types::{
    CursorShape, HistoryMode, NewTabBehavior, ScrollBarPosition, TabBarMode, TabBarPosition,
    TripleClickMode,
};
pub use value::{Color, FontSpec, PropertyValue};
