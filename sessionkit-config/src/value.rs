//! Typed property values.
//!
//! Profiles store one `PropertyValue` per explicitly-set property. Values are
//! loosely typed on disk and in runtime change requests, so coercion into the
//! property's declared kind happens at those boundaries through
//! [`PropertyValue::from_text`] and [`PropertyValue::from_yaml`].

use crate::property::PropertyKind;
use serde_yaml_ng::Value;
use std::fmt;

/// An RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or `r,g,b`
    pub fn parse(text: &str) -> Option<Color> {
        let text = text.trim();
        if let Some(hex) = text.strip_prefix('#') {
            if hex.len() != 6 {
                return None;
            }
            let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
            return Some(Color::new(channel(0)?, channel(2)?, channel(4)?));
        }

        let parts: Vec<&str> = text.split(',').map(str::trim).collect();
        if let [r, g, b] = parts.as_slice() {
            return Some(Color::new(r.parse().ok()?, g.parse().ok()?, b.parse().ok()?));
        }
        None
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}

/// A font family and point size.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    pub family: String,
    pub point_size: f32,
}

impl FontSpec {
    pub const DEFAULT_POINT_SIZE: f32 = 10.0;

    pub fn new(family: impl Into<String>, point_size: f32) -> Self {
        Self {
            family: family.into(),
            point_size,
        }
    }

    /// Parse `Family,Size[,...]`. Trailing fields are ignored; a missing size
    /// falls back to [`FontSpec::DEFAULT_POINT_SIZE`].
    pub fn parse(text: &str) -> Option<FontSpec> {
        let mut fields = text.split(',').map(str::trim);
        let family = fields.next().filter(|f| !f.is_empty())?;
        let point_size = match fields.next() {
            Some(size) if !size.is_empty() => size.parse::<f32>().ok().filter(|s| *s > 0.0)?,
            _ => Self::DEFAULT_POINT_SIZE,
        };
        Some(FontSpec::new(family, point_size))
    }
}

impl fmt::Display for FontSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.family, self.point_size)
    }
}

/// A property value, tagged by kind.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    String(String),
    StringList(Vec<String>),
    Bool(bool),
    Int(i64),
    Color(Color),
    Font(FontSpec),
}

impl PropertyValue {
    /// Kind of the stored value
    pub fn kind(&self) -> PropertyKind {
        match self {
            PropertyValue::String(_) => PropertyKind::String,
            PropertyValue::StringList(_) => PropertyKind::StringList,
            PropertyValue::Bool(_) => PropertyKind::Bool,
            PropertyValue::Int(_) => PropertyKind::Int,
            PropertyValue::Color(_) => PropertyKind::Color,
            PropertyValue::Font(_) => PropertyKind::Font,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            PropertyValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_string_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::StringList(list) => Some(list),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            PropertyValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            PropertyValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_color(&self) -> Option<Color> {
        match self {
            PropertyValue::Color(c) => Some(*c),
            _ => None,
        }
    }

    pub fn as_font(&self) -> Option<&FontSpec> {
        match self {
            PropertyValue::Font(font) => Some(font),
            _ => None,
        }
    }

    /// Coerce free-form text into a value of the given kind.
    ///
    /// Returns `None` when the text cannot represent that kind
    /// (e.g. `"abc"` for an integer).
    pub fn from_text(kind: PropertyKind, text: &str) -> Option<PropertyValue> {
        match kind {
            PropertyKind::String => Some(PropertyValue::String(text.to_string())),
            PropertyKind::StringList => Some(PropertyValue::StringList(split_list(text))),
            PropertyKind::Bool => parse_bool(text).map(PropertyValue::Bool),
            PropertyKind::Int => text.trim().parse().ok().map(PropertyValue::Int),
            PropertyKind::Color => Color::parse(text).map(PropertyValue::Color),
            PropertyKind::Font => FontSpec::parse(text).map(PropertyValue::Font),
        }
    }

    /// Coerce a YAML value read from a profile file into the given kind.
    pub fn from_yaml(kind: PropertyKind, value: &Value) -> Option<PropertyValue> {
        match (kind, value) {
            (PropertyKind::StringList, Value::Sequence(items)) => items
                .iter()
                .map(scalar_text)
                .collect::<Option<Vec<_>>>()
                .map(PropertyValue::StringList),
            (PropertyKind::Bool, Value::Bool(b)) => Some(PropertyValue::Bool(*b)),
            (PropertyKind::Int, Value::Number(n)) => n.as_i64().map(PropertyValue::Int),
            (PropertyKind::Color, Value::Sequence(items)) => {
                let channels: Vec<u8> = items
                    .iter()
                    .map(|v| v.as_u64().and_then(|n| u8::try_from(n).ok()))
                    .collect::<Option<_>>()?;
                match channels.as_slice() {
                    [r, g, b] => Some(PropertyValue::Color(Color::new(*r, *g, *b))),
                    _ => None,
                }
            }
            (_, Value::Null) => None,
            (kind, other) => PropertyValue::from_text(kind, &scalar_text(other)?),
        }
    }

    /// YAML representation written to profile files
    pub fn to_yaml(&self) -> Value {
        match self {
            PropertyValue::String(s) => Value::String(s.clone()),
            PropertyValue::StringList(list) => {
                Value::Sequence(list.iter().cloned().map(Value::String).collect())
            }
            PropertyValue::Bool(b) => Value::Bool(*b),
            PropertyValue::Int(i) => Value::Number((*i).into()),
            PropertyValue::Color(c) => Value::String(c.to_string()),
            PropertyValue::Font(font) => Value::String(font.to_string()),
        }
    }
}

impl fmt::Display for PropertyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PropertyValue::String(s) => f.write_str(s),
            PropertyValue::StringList(list) => f.write_str(&list.join(",")),
            PropertyValue::Bool(b) => write!(f, "{b}"),
            PropertyValue::Int(i) => write!(f, "{i}"),
            PropertyValue::Color(c) => write!(f, "{c}"),
            PropertyValue::Font(font) => write!(f, "{font}"),
        }
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        PropertyValue::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        PropertyValue::String(s)
    }
}

impl From<Vec<String>> for PropertyValue {
    fn from(list: Vec<String>) -> Self {
        PropertyValue::StringList(list)
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        PropertyValue::Bool(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        PropertyValue::Int(i)
    }
}

impl From<Color> for PropertyValue {
    fn from(c: Color) -> Self {
        PropertyValue::Color(c)
    }
}

impl From<FontSpec> for PropertyValue {
    fn from(font: FontSpec) -> Self {
        PropertyValue::Font(font)
    }
}

fn parse_bool(text: &str) -> Option<bool> {
    match text.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn split_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(String::from)
        .collect()
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
