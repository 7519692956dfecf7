//! Key sequences bound to profiles.
//!
//! Parses human-readable strings like "Ctrl+Shift+T" into [`KeySequence`]
//! values. The `Display` form is canonical, so a sequence written to the
//! settings file parses back to the same value.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Error type for key sequence parsing failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(String);

/// Set of active modifiers for a key sequence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Modifiers {
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub super_key: bool,
}

/// Keys with a name instead of a character.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum NamedKey {
    /// F1 to F24
    F(u8),
    Enter,
    Escape,
    Space,
    Tab,
    Backspace,
    Delete,
    Insert,
    Home,
    End,
    PageUp,
    PageDown,
    Up,
    Down,
    Left,
    Right,
}

impl fmt::Display for NamedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamedKey::F(n) => write!(f, "F{n}"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// The non-modifier key of a sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Key {
    /// A single character key, stored uppercase
    Character(char),
    Named(NamedKey),
}

/// A parsed key sequence (modifiers + key).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeySequence {
    pub modifiers: Modifiers,
    pub key: Key,
}

impl KeySequence {
    /// Parse a key sequence string.
    ///
    /// Supported format: "Modifier+Modifier+Key"
    ///
    /// Modifiers:
    /// - `Ctrl`, `Control` - Control key
    /// - `Alt`, `Option` - Alt/Option key
    /// - `Shift` - Shift key
    /// - `Super`, `Cmd`, `Command`, `Meta`, `Win` - Super/Cmd key
    ///
    /// Keys:
    /// - Single characters: `A`, `B`, `1`, etc.
    /// - Named keys: `F1`-`F24`, `Enter`, `Escape`, `Space`, `Tab`, etc.
    pub fn parse(s: &str) -> Result<Self, ParseError> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseError("Empty key sequence".to_string()));
        }
        // "Ctrl++" binds the plus key
        let (head, plus_key) = match s.strip_suffix("++") {
            Some(head) => (head, true),
            None if s == "+" => ("", true),
            None => (s, false),
        };

        let parts: Vec<&str> = if head.is_empty() {
            Vec::new()
        } else {
            head.split('+').map(str::trim).collect()
        };

        let mut modifiers = Modifiers::default();
        let mut key = plus_key.then_some(Key::Character('+'));

        for part in parts {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers.ctrl = true,
                "alt" | "option" => modifiers.alt = true,
                "shift" => modifiers.shift = true,
                "super" | "cmd" | "command" | "meta" | "win" => modifiers.super_key = true,
                _ => {
                    if key.is_some() {
                        return Err(ParseError(format!(
                            "Multiple keys specified: already have key, found '{}'",
                            part
                        )));
                    }
                    key = Some(parse_key(part)?);
                }
            }
        }

        let key = key.ok_or_else(|| {
            ParseError("Key sequence ends with modifier, no key specified".to_string())
        })?;
        Ok(KeySequence { modifiers, key })
    }
}

impl FromStr for KeySequence {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        KeySequence::parse(s)
    }
}

impl fmt::Display for KeySequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        if self.modifiers.ctrl {
            parts.push("Ctrl".to_string());
        }
        if self.modifiers.alt {
            parts.push("Alt".to_string());
        }
        if self.modifiers.shift {
            parts.push("Shift".to_string());
        }
        if self.modifiers.super_key {
            parts.push("Super".to_string());
        }

        match self.key {
            Key::Character(c) => parts.push(c.to_string()),
            Key::Named(n) => parts.push(n.to_string()),
        }

        write!(f, "{}", parts.join("+"))
    }
}

/// Parse a key string into a Key.
fn parse_key(s: &str) -> Result<Key, ParseError> {
    if let Some(named) = parse_named_key(s) {
        return Ok(Key::Named(named));
    }

    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Character(c.to_ascii_uppercase()));
    }

    Err(ParseError(format!("Unknown key: '{}'", s)))
}

/// Parse a named key string (case-insensitive).
fn parse_named_key(s: &str) -> Option<NamedKey> {
    let lower = s.to_lowercase();
    if let Some(number) = lower.strip_prefix('f')
        && let Ok(n) = number.parse::<u8>()
        && (1..=24).contains(&n)
    {
        return Some(NamedKey::F(n));
    }

    let named = match lower.as_str() {
        "enter" | "return" => NamedKey::Enter,
        "escape" | "esc" => NamedKey::Escape,
        "space" => NamedKey::Space,
        "tab" => NamedKey::Tab,
        "backspace" => NamedKey::Backspace,
        "delete" | "del" => NamedKey::Delete,
        "insert" | "ins" => NamedKey::Insert,
        "home" => NamedKey::Home,
        "end" => NamedKey::End,
        "pageup" | "pgup" => NamedKey::PageUp,
        "pagedown" | "pgdn" => NamedKey::PageDown,
        "up" | "arrowup" => NamedKey::Up,
        "down" | "arrowdown" => NamedKey::Down,
        "left" | "arrowleft" => NamedKey::Left,
        "right" | "arrowright" => NamedKey::Right,
        _ => return None,
    };
    Some(named)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple() {
        let seq = KeySequence::parse("Ctrl+Alt+w").unwrap();
        assert!(seq.modifiers.ctrl);
        assert!(seq.modifiers.alt);
        assert!(!seq.modifiers.shift);
        assert_eq!(seq.key, Key::Character('W'));
    }

    #[test]
    fn test_modifier_aliases() {
        let seq = KeySequence::parse("control+option+cmd+F5").unwrap();
        assert!(seq.modifiers.ctrl && seq.modifiers.alt && seq.modifiers.super_key);
        assert_eq!(seq.key, Key::Named(NamedKey::F(5)));
    }

    #[test]
    fn test_display_is_canonical() {
        let seq: KeySequence = "shift + ctrl + pgup".parse().unwrap();
        assert_eq!(seq.to_string(), "Ctrl+Shift+PageUp");
        assert_eq!(KeySequence::parse(&seq.to_string()).unwrap(), seq);
    }

    #[test]
    fn test_plus_key() {
        let seq = KeySequence::parse("Ctrl++").unwrap();
        assert_eq!(seq.key, Key::Character('+'));
        assert_eq!(seq.to_string(), "Ctrl++");
        assert_eq!(KeySequence::parse(&seq.to_string()).unwrap(), seq);
    }

    #[test]
    fn test_parse_errors() {
        assert!(KeySequence::parse("").is_err());
        assert!(KeySequence::parse("Ctrl+Shift").is_err());
        assert!(KeySequence::parse("Ctrl+A+B").is_err());
        assert!(KeySequence::parse("Ctrl+Hyper").is_err());
        assert!(KeySequence::parse("F25").is_err());
    }
}
