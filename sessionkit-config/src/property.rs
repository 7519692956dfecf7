//! Property table: the closed set of profile properties, their names,
//! aliases, value kinds and persistence sections.
//!
//! Several names may map to one property. The canonical name comes first in
//! the table and is the one used when reading and writing profile files; the
//! aliases are shorter spellings accepted by runtime change requests.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One configuration axis of a profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Property {
    Path,
    Name,
    Title,
    Icon,
    Command,
    Arguments,
    Environment,
    Directory,
    LocalTabTitleFormat,
    RemoteTabTitleFormat,
    ShowMenuBar,
    ShowTerminalSizeHint,
    SaveGeometryOnExit,
    TabBarMode,
    TabBarPosition,
    NewTabBehavior,
    StartInCurrentSessionDir,
    ShowNewAndCloseTabButtons,
    MenuIndex,
    SilenceSeconds,
    Font,
    ColorScheme,
    AntiAliasFonts,
    BoldIntense,
    KeyBindings,
    HistoryMode,
    HistorySize,
    ScrollBarPosition,
    BlinkingTextEnabled,
    FlowControlEnabled,
    AllowProgramsToResizeWindow,
    BidiRenderingEnabled,
    CJKAmbiguousWide,
    BlinkingCursorEnabled,
    UseCustomCursorColor,
    CursorShape,
    CustomCursorColor,
    WordCharacters,
    TripleClickMode,
    UnderlineLinksEnabled,
    DefaultEncoding,
}

/// Declared value kind of a property.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PropertyKind {
    String,
    StringList,
    Bool,
    Int,
    Color,
    Font,
}

impl fmt::Display for PropertyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PropertyKind::String => "string",
            PropertyKind::StringList => "string-list",
            PropertyKind::Bool => "bool",
            PropertyKind::Int => "int",
            PropertyKind::Color => "color",
            PropertyKind::Font => "font",
        };
        f.write_str(name)
    }
}

/// Section a property is stored under in a profile file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Section {
    General,
    Appearance,
    Keyboard,
    Scrolling,
    TerminalFeatures,
    CursorOptions,
    InteractionOptions,
    EncodingOptions,
}

impl Section {
    /// All sections in file order
    pub const ALL: &'static [Section] = &[
        Section::General,
        Section::Appearance,
        Section::Keyboard,
        Section::Scrolling,
        Section::TerminalFeatures,
        Section::CursorOptions,
        Section::InteractionOptions,
        Section::EncodingOptions,
    ];

    /// Name of the section as written to disk
    pub fn name(&self) -> &'static str {
        match self {
            Section::General => "General",
            Section::Appearance => "Appearance",
            Section::Keyboard => "Keyboard",
            Section::Scrolling => "Scrolling",
            Section::TerminalFeatures => "Terminal Features",
            Section::CursorOptions => "Cursor Options",
            Section::InteractionOptions => "Interaction Options",
            Section::EncodingOptions => "Encoding Options",
        }
    }
}

/// Describes one name for a property.
#[derive(Debug, Clone, Copy)]
pub struct PropertyInfo {
    pub property: Property,
    pub name: &'static str,
    /// `None` for aliases and for properties that are not written as their own entry
    pub section: Option<Section>,
    pub kind: PropertyKind,
}

const fn info(
    property: Property,
    name: &'static str,
    section: Option<Section>,
    kind: PropertyKind,
) -> PropertyInfo {
    PropertyInfo {
        property,
        name,
        section,
        kind,
    }
}

use PropertyKind as K;
use Section as S;

static PROPERTY_TABLE: &[PropertyInfo] = &[
    // General
    info(Property::Path, "Path", None, K::String),
    info(Property::Name, "Name", Some(S::General), K::String),
    info(Property::Title, "Title", None, K::String),
    info(Property::Icon, "Icon", Some(S::General), K::String),
    info(Property::Command, "Command", None, K::String),
    info(Property::Arguments, "Arguments", None, K::StringList),
    info(Property::Environment, "Environment", Some(S::General), K::StringList),
    info(Property::Directory, "Directory", Some(S::General), K::String),
    info(Property::LocalTabTitleFormat, "LocalTabTitleFormat", Some(S::General), K::String),
    info(Property::LocalTabTitleFormat, "tabtitle", None, K::String),
    info(Property::RemoteTabTitleFormat, "RemoteTabTitleFormat", Some(S::General), K::String),
    info(Property::ShowMenuBar, "ShowMenuBar", Some(S::General), K::Bool),
    info(Property::ShowTerminalSizeHint, "ShowTerminalSizeHint", Some(S::General), K::Bool),
    info(Property::SaveGeometryOnExit, "SaveGeometryOnExit", Some(S::General), K::Bool),
    info(Property::TabBarMode, "TabBarMode", Some(S::General), K::Int),
    info(Property::TabBarPosition, "TabBarPosition", Some(S::General), K::Int),
    info(Property::NewTabBehavior, "NewTabBehavior", Some(S::General), K::Int),
    info(Property::StartInCurrentSessionDir, "StartInCurrentSessionDir", Some(S::General), K::Bool),
    info(Property::ShowNewAndCloseTabButtons, "ShowNewAndCloseTabButtons", Some(S::General), K::Bool),
    info(Property::MenuIndex, "MenuIndex", Some(S::General), K::String),
    info(Property::SilenceSeconds, "SilenceSeconds", Some(S::General), K::Int),
    // Appearance
    info(Property::Font, "Font", Some(S::Appearance), K::Font),
    info(Property::ColorScheme, "ColorScheme", Some(S::Appearance), K::String),
    info(Property::ColorScheme, "colors", None, K::String),
    info(Property::AntiAliasFonts, "AntiAliasFonts", Some(S::Appearance), K::Bool),
    info(Property::BoldIntense, "BoldIntense", Some(S::Appearance), K::Bool),
    // Keyboard
    info(Property::KeyBindings, "KeyBindings", Some(S::Keyboard), K::String),
    // Scrolling
    info(Property::HistoryMode, "HistoryMode", Some(S::Scrolling), K::Int),
    info(Property::HistorySize, "HistorySize", Some(S::Scrolling), K::Int),
    info(Property::ScrollBarPosition, "ScrollBarPosition", Some(S::Scrolling), K::Int),
    // Terminal features
    info(Property::BlinkingTextEnabled, "BlinkingTextEnabled", Some(S::TerminalFeatures), K::Bool),
    info(Property::FlowControlEnabled, "FlowControlEnabled", Some(S::TerminalFeatures), K::Bool),
    info(
        Property::AllowProgramsToResizeWindow,
        "AllowProgramsToResizeWindow",
        Some(S::TerminalFeatures),
        K::Bool,
    ),
    info(Property::BidiRenderingEnabled, "BidiRenderingEnabled", Some(S::TerminalFeatures), K::Bool),
    info(Property::CJKAmbiguousWide, "CJKAmbiguousWide", Some(S::TerminalFeatures), K::Bool),
    info(Property::BlinkingCursorEnabled, "BlinkingCursorEnabled", Some(S::TerminalFeatures), K::Bool),
    // Cursor
    info(Property::UseCustomCursorColor, "UseCustomCursorColor", Some(S::CursorOptions), K::Bool),
    info(Property::CursorShape, "CursorShape", Some(S::CursorOptions), K::Int),
    info(Property::CustomCursorColor, "CustomCursorColor", Some(S::CursorOptions), K::Color),
    // Interaction
    info(Property::WordCharacters, "WordCharacters", Some(S::InteractionOptions), K::String),
    info(Property::TripleClickMode, "TripleClickMode", Some(S::InteractionOptions), K::Int),
    info(Property::UnderlineLinksEnabled, "UnderlineLinksEnabled", Some(S::InteractionOptions), K::Bool),
    // Encoding
    info(Property::DefaultEncoding, "DefaultEncoding", Some(S::EncodingOptions), K::String),
];

/// Every name known to the property table, canonical names before aliases.
pub fn property_table() -> &'static [PropertyInfo] {
    PROPERTY_TABLE
}

/// One "Name : kind" line per canonical property
pub fn properties_info_list() -> Vec<String> {
    Property::ALL
        .iter()
        .map(|p| format!("{} : {}", p.name(), p.kind()))
        .collect()
}

impl Property {
    /// All properties in declaration order
    pub const ALL: &'static [Property] = &[
        Property::Path,
        Property::Name,
        Property::Title,
        Property::Icon,
        Property::Command,
        Property::Arguments,
        Property::Environment,
        Property::Directory,
        Property::LocalTabTitleFormat,
        Property::RemoteTabTitleFormat,
        Property::ShowMenuBar,
        Property::ShowTerminalSizeHint,
        Property::SaveGeometryOnExit,
        Property::TabBarMode,
        Property::TabBarPosition,
        Property::NewTabBehavior,
        Property::StartInCurrentSessionDir,
        Property::ShowNewAndCloseTabButtons,
        Property::MenuIndex,
        Property::SilenceSeconds,
        Property::Font,
        Property::ColorScheme,
        Property::AntiAliasFonts,
        Property::BoldIntense,
        Property::KeyBindings,
        Property::HistoryMode,
        Property::HistorySize,
        Property::ScrollBarPosition,
        Property::BlinkingTextEnabled,
        Property::FlowControlEnabled,
        Property::AllowProgramsToResizeWindow,
        Property::BidiRenderingEnabled,
        Property::CJKAmbiguousWide,
        Property::BlinkingCursorEnabled,
        Property::UseCustomCursorColor,
        Property::CursorShape,
        Property::CustomCursorColor,
        Property::WordCharacters,
        Property::TripleClickMode,
        Property::UnderlineLinksEnabled,
        Property::DefaultEncoding,
    ];

    /// Canonical table entry for this property
    pub fn info(self) -> &'static PropertyInfo {
        PROPERTY_TABLE
            .iter()
            .find(|info| info.property == self)
            .unwrap_or_else(|| unreachable!("property {self:?} missing from table"))
    }

    /// Canonical name used in profile files
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Declared value kind
    pub fn kind(self) -> PropertyKind {
        self.info().kind
    }

    /// Section the property is written under, if any
    pub fn section(self) -> Option<Section> {
        self.info().section
    }

    /// Alternative names accepted by `lookup_by_name`
    pub fn aliases(self) -> impl Iterator<Item = &'static str> {
        let canonical = self.name();
        PROPERTY_TABLE
            .iter()
            .filter(move |info| info.property == self && info.name != canonical)
            .map(|info| info.name)
    }

    /// Name and Path belong to a single profile and never resolve through a parent.
    pub fn is_inheritable(self) -> bool {
        !matches!(self, Property::Name | Property::Path)
    }

    /// Case-insensitive lookup over canonical names and aliases.
    ///
    /// Returns `None` when no property has that name.
    pub fn lookup_by_name(name: &str) -> Option<Property> {
        PROPERTY_TABLE
            .iter()
            .find(|info| info.name.eq_ignore_ascii_case(name))
            .map(|info| info.property)
    }
}

impl fmt::Display for Property {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_property_has_a_table_entry() {
        for property in Property::ALL {
            assert_eq!(property.info().property, *property);
        }
        assert_eq!(properties_info_list().len(), Property::ALL.len());
    }

    #[test]
    fn test_lookup_is_case_insensitive() {
        assert_eq!(Property::lookup_by_name("font"), Some(Property::Font));
        assert_eq!(Property::lookup_by_name("FONT"), Some(Property::Font));
        assert_eq!(
            Property::lookup_by_name("historysize"),
            Some(Property::HistorySize)
        );
    }

    #[test]
    fn test_lookup_aliases() {
        assert_eq!(
            Property::lookup_by_name("tabtitle"),
            Some(Property::LocalTabTitleFormat)
        );
        assert_eq!(
            Property::lookup_by_name("Colors"),
            Some(Property::ColorScheme)
        );
        // Aliases never replace the canonical name
        assert_eq!(Property::ColorScheme.name(), "ColorScheme");
        assert_eq!(Property::ColorScheme.aliases().collect::<Vec<_>>(), ["colors"]);
    }

    #[test]
    fn test_lookup_unknown_name() {
        assert_eq!(Property::lookup_by_name("NoSuchProperty"), None);
        assert_eq!(Property::lookup_by_name(""), None);
    }

    #[test]
    fn test_inheritable() {
        assert!(!Property::Name.is_inheritable());
        assert!(!Property::Path.is_inheritable());
        assert!(Property::Font.is_inheritable());
        assert!(Property::Command.is_inheritable());
    }

    #[test]
    fn test_unsectioned_properties() {
        assert_eq!(Property::Path.section(), None);
        assert_eq!(Property::Command.section(), None);
        assert_eq!(Property::Arguments.section(), None);
        assert_eq!(Property::Font.section(), Some(Section::Appearance));
        assert_eq!(Section::TerminalFeatures.name(), "Terminal Features");
    }
}
