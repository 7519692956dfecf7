//! Parser for in-band profile change requests sent by a running program.
//!
//! Requests look like `Name=Value;Name=Value`. Property names are letters
//! only and values run until the next `;`. Segments that do not match, name
//! an unknown property, or carry a value that does not fit the property's
//! kind are dropped.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use regex::Regex;

use crate::property::Property;
use crate::value::PropertyValue;

fn assignment_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"([a-zA-Z]+)=([^;]+)").expect("invalid assignment regex"))
}

/// Parse a change request into typed property values
pub fn parse_profile_command(input: &str) -> BTreeMap<Property, PropertyValue> {
    let re = assignment_regex();
    let mut changes = BTreeMap::new();
    let mut offset = 0;

    while let Some(caps) = re.captures_at(input, offset) {
        let name = &caps[1];
        let text = &caps[2];
        match Property::lookup_by_name(name) {
            Some(property) => match PropertyValue::from_text(property.kind(), text) {
                Some(value) => {
                    changes.insert(property, value);
                }
                None => log::debug!(
                    "Ignoring value {text:?} for {property}: expected {}",
                    property.kind()
                ),
            },
            None => log::debug!("Ignoring unknown profile property {name:?}"),
        }

        // Resume after the next separator
        match input[offset..].find(';') {
            Some(pos) => offset += pos + 1,
            None => break,
        }
    }

    changes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_multiple_assignments() {
        let changes = parse_profile_command("ColorScheme=Solarized;HistorySize=5000");
        assert_eq!(changes.len(), 2);
        assert_eq!(
            changes.get(&Property::ColorScheme),
            Some(&PropertyValue::String("Solarized".to_string()))
        );
        assert_eq!(
            changes.get(&Property::HistorySize),
            Some(&PropertyValue::Int(5000))
        );
    }

    #[test]
    fn test_aliases_and_case() {
        let changes = parse_profile_command("colors=DarkPastels;tabtitle=%w");
        assert_eq!(
            changes.get(&Property::ColorScheme),
            Some(&PropertyValue::String("DarkPastels".to_string()))
        );
        assert_eq!(
            changes.get(&Property::LocalTabTitleFormat),
            Some(&PropertyValue::String("%w".to_string()))
        );
    }

    #[test]
    fn test_malformed_segments_ignored() {
        let changes = parse_profile_command("garbage;=nothing;Bogus=1;Icon=terminal;Name=");
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes.get(&Property::Icon),
            Some(&PropertyValue::String("terminal".to_string()))
        );
    }

    #[test]
    fn test_uncoercible_values_dropped() {
        let changes = parse_profile_command("HistorySize=lots;FlowControlEnabled=false");
        assert!(!changes.contains_key(&Property::HistorySize));
        assert_eq!(
            changes.get(&Property::FlowControlEnabled),
            Some(&PropertyValue::Bool(false))
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(parse_profile_command("").is_empty());
        assert!(parse_profile_command(";;;").is_empty());
    }
}
