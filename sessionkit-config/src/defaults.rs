//! Built-in fallback profile.
//!
//! Every loaded profile ultimately inherits from the fallback, so it sets a
//! value for every property a session needs.

use crate::profile_types::Profile;
use crate::property::Property;
use crate::types::{
    CursorShape, HistoryMode, NewTabBehavior, ScrollBarPosition, TabBarMode, TabBarPosition,
    TripleClickMode,
};
use crate::value::{Color, FontSpec, PropertyValue};

/// Path of the fallback profile. It never names a file on disk.
pub const FALLBACK_PATH: &str = "FALLBACK/";

/// Display name of the fallback profile
pub const FALLBACK_NAME: &str = "Shell";

pub const DEFAULT_FONT_FAMILY: &str = "Monospace";
pub const DEFAULT_WORD_CHARACTERS: &str = ":@-./_~?&=%+#";

/// The user's login shell from `$SHELL`, or `/bin/sh`
pub fn default_shell() -> String {
    std::env::var("SHELL")
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| "/bin/sh".to_string())
}

/// Build the hidden fallback profile
pub fn fallback_profile() -> Profile {
    let shell = default_shell();
    let int = PropertyValue::Int;

    let values: Vec<(Property, PropertyValue)> = vec![
        (Property::Name, FALLBACK_NAME.into()),
        (Property::Path, FALLBACK_PATH.into()),
        (Property::Command, shell.clone().into()),
        (Property::Icon, "utilities-terminal".into()),
        (Property::Arguments, vec![shell].into()),
        (Property::Environment, vec!["TERM=xterm".to_string()].into()),
        (Property::LocalTabTitleFormat, "%D : %n".into()),
        (Property::RemoteTabTitleFormat, "(%u) %H".into()),
        (Property::TabBarMode, int(TabBarMode::AlwaysShow.as_int())),
        (Property::TabBarPosition, int(TabBarPosition::Bottom.as_int())),
        (Property::NewTabBehavior, int(NewTabBehavior::AtEnd.as_int())),
        (Property::ShowMenuBar, true.into()),
        (Property::ShowTerminalSizeHint, true.into()),
        (Property::SaveGeometryOnExit, true.into()),
        (Property::StartInCurrentSessionDir, true.into()),
        (Property::ShowNewAndCloseTabButtons, false.into()),
        (Property::MenuIndex, "0".into()),
        (Property::SilenceSeconds, int(10)),
        (Property::KeyBindings, "default".into()),
        (Property::ColorScheme, "Linux".into()),
        (
            Property::Font,
            FontSpec::new(DEFAULT_FONT_FAMILY, FontSpec::DEFAULT_POINT_SIZE).into(),
        ),
        (Property::HistoryMode, int(HistoryMode::FixedSize.as_int())),
        (Property::HistorySize, int(1000)),
        (Property::ScrollBarPosition, int(ScrollBarPosition::Right.as_int())),
        (Property::FlowControlEnabled, true.into()),
        (Property::AllowProgramsToResizeWindow, true.into()),
        (Property::BlinkingTextEnabled, true.into()),
        (Property::UnderlineLinksEnabled, true.into()),
        (Property::TripleClickMode, int(TripleClickMode::WholeLine.as_int())),
        (Property::BlinkingCursorEnabled, false.into()),
        (Property::BidiRenderingEnabled, false.into()),
        (Property::CJKAmbiguousWide, false.into()),
        (Property::CursorShape, int(CursorShape::Block.as_int())),
        (Property::UseCustomCursorColor, false.into()),
        (Property::CustomCursorColor, Color::BLACK.into()),
        (Property::DefaultEncoding, "UTF-8".into()),
        (Property::AntiAliasFonts, true.into()),
        (Property::BoldIntense, true.into()),
        (Property::WordCharacters, DEFAULT_WORD_CHARACTERS.into()),
    ];

    let mut profile = Profile::new(None);
    profile.set_properties(values);
    profile.set_hidden(true);
    profile
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_profile_defaults() {
        let profile = fallback_profile();
        assert!(profile.is_hidden());
        assert_eq!(profile.name(), Some("Shell"));
        assert_eq!(profile.path(), Some(FALLBACK_PATH));
        assert_eq!(profile.parent(), None);
        assert_eq!(
            profile.local_value(Property::HistorySize),
            Some(&PropertyValue::Int(1000))
        );
        assert_eq!(
            profile.local_value(Property::Environment),
            Some(&PropertyValue::StringList(vec!["TERM=xterm".to_string()]))
        );
    }

    #[test]
    fn test_fallback_values_match_declared_kinds() {
        let profile = fallback_profile();
        for (property, value) in profile.values() {
            assert_eq!(value.kind(), property.kind(), "{property}");
        }
    }
}
