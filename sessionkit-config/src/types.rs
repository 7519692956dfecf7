//! Enumerated settings stored as integers in profiles.

use serde::{Deserialize, Serialize};

/// Defines an enum backed by the integer stored in a profile, with
/// `from_int` / `as_int` conversions.
macro_rules! int_enum {
    (
        $(#[$meta:meta])*
        $name:ident { $($(#[$vmeta:meta])* $variant:ident = $value:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            /// Map a stored integer to a variant, `None` if out of range
            pub fn from_int(value: i64) -> Option<Self> {
                match value {
                    $($value => Some($name::$variant),)+
                    _ => None,
                }
            }

            pub fn as_int(self) -> i64 {
                match self {
                    $($name::$variant => $value,)+
                }
            }
        }
    };
}

int_enum! {
    /// How much scrollback a session keeps
    HistoryMode {
        Disabled = 0,
        /// Keep `HistorySize` lines
        FixedSize = 1,
        Unlimited = 2,
    }
}

int_enum! {
    TabBarMode {
        AlwaysHide = 0,
        AsNeeded = 1,
        AlwaysShow = 2,
    }
}

int_enum! {
    TabBarPosition {
        Bottom = 0,
        Top = 1,
    }
}

int_enum! {
    /// Where a newly opened tab is placed
    NewTabBehavior {
        AtEnd = 0,
        AfterCurrent = 1,
    }
}

int_enum! {
    ScrollBarPosition {
        Left = 0,
        Right = 1,
        Hidden = 2,
    }
}

int_enum! {
    CursorShape {
        Block = 0,
        IBeam = 1,
        Underline = 2,
    }
}

int_enum! {
    /// What a triple click selects
    TripleClickMode {
        WholeLine = 0,
        ForwardsFromCursor = 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_mode_values() {
        assert_eq!(HistoryMode::from_int(0), Some(HistoryMode::Disabled));
        assert_eq!(HistoryMode::from_int(2), Some(HistoryMode::Unlimited));
        assert_eq!(HistoryMode::from_int(3), None);
        assert_eq!(HistoryMode::FixedSize.as_int(), 1);
    }

    #[test]
    fn test_other_enums() {
        assert_eq!(TabBarMode::AlwaysShow.as_int(), 2);
        assert_eq!(ScrollBarPosition::from_int(1), Some(ScrollBarPosition::Right));
        assert_eq!(CursorShape::from_int(-1), None);
        assert_eq!(TripleClickMode::WholeLine.as_int(), 0);
    }
}
