//! Core `Profile` struct: the locally-set values of one profile.

use std::collections::{BTreeMap, BTreeSet};

use uuid::Uuid;

use crate::property::Property;
use crate::value::PropertyValue;

/// Unique identifier for a profile
pub type ProfileId = Uuid;

/// Whether a profile is an ordinary profile or an aggregate over other profiles
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ProfileKind {
    #[default]
    Plain,
    /// Edits a set of member profiles at once
    Group { members: Vec<ProfileId> },
}

/// A named bundle of property values.
///
/// Only values set directly on this profile are stored here. Inherited values
/// are resolved through [`ProfileStore::property`](super::ProfileStore::property).
#[derive(Debug, Clone)]
pub struct Profile {
    id: ProfileId,
    values: BTreeMap<Property, PropertyValue>,
    /// Properties that resolve to nothing here instead of inheriting
    cleared: BTreeSet<Property>,
    parent: Option<ProfileId>,
    hidden: bool,
    kind: ProfileKind,
}

impl Profile {
    /// Create an empty profile inheriting from `parent`
    pub fn new(parent: Option<ProfileId>) -> Self {
        Self::with_id(Uuid::new_v4(), parent)
    }

    pub fn with_id(id: ProfileId, parent: Option<ProfileId>) -> Self {
        Self {
            id,
            values: BTreeMap::new(),
            cleared: BTreeSet::new(),
            parent,
            hidden: false,
            kind: ProfileKind::Plain,
        }
    }

    /// Create an empty, hidden group profile with no members
    pub fn new_group() -> Self {
        Self {
            hidden: true,
            kind: ProfileKind::Group {
                members: Vec::new(),
            },
            ..Self::new(None)
        }
    }

    pub fn id(&self) -> ProfileId {
        self.id
    }

    /// Value set directly on this profile, ignoring the parent chain
    pub fn local_value(&self, property: Property) -> Option<&PropertyValue> {
        self.values.get(&property)
    }

    /// Store a value locally. The value's kind is not checked against the
    /// property's declared kind.
    pub fn set_property(&mut self, property: Property, value: impl Into<PropertyValue>) {
        self.cleared.remove(&property);
        self.values.insert(property, value.into());
    }

    /// Remove a locally-set value so the property inherits again
    pub fn unset(&mut self, property: Property) -> Option<PropertyValue> {
        self.cleared.remove(&property);
        self.values.remove(&property)
    }

    /// Remove a locally-set value and stop inheriting it, so the property
    /// resolves to nothing until it is set again.
    pub fn clear(&mut self, property: Property) {
        self.values.remove(&property);
        self.cleared.insert(property);
    }

    pub fn is_cleared(&self, property: Property) -> bool {
        self.cleared.contains(&property)
    }

    pub fn is_set(&self, property: Property) -> bool {
        self.values.contains_key(&property)
    }

    pub fn set_properties(&mut self, values: impl IntoIterator<Item = (Property, PropertyValue)>) {
        for (property, value) in values {
            self.set_property(property, value);
        }
    }

    /// Locally-set values in property order
    pub fn values(&self) -> &BTreeMap<Property, PropertyValue> {
        &self.values
    }

    /// True when nothing is set or cleared locally
    pub fn is_empty(&self) -> bool {
        self.values.is_empty() && self.cleared.is_empty()
    }

    pub fn name(&self) -> Option<&str> {
        self.local_value(Property::Name).and_then(PropertyValue::as_str)
    }

    pub fn path(&self) -> Option<&str> {
        self.local_value(Property::Path).and_then(PropertyValue::as_str)
    }

    pub fn parent(&self) -> Option<ProfileId> {
        self.parent
    }

    /// Replace the parent without cycle checks.
    ///
    /// Use [`ProfileStore::set_parent`](super::ProfileStore::set_parent) for
    /// profiles already stored in an arena.
    pub fn set_parent(&mut self, parent: Option<ProfileId>) {
        self.parent = parent;
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    pub fn kind(&self) -> &ProfileKind {
        &self.kind
    }

    pub fn is_group(&self) -> bool {
        matches!(self.kind, ProfileKind::Group { .. })
    }

    /// Group members, empty for plain profiles
    pub fn members(&self) -> &[ProfileId] {
        match &self.kind {
            ProfileKind::Group { members } => members,
            ProfileKind::Plain => &[],
        }
    }

    pub(crate) fn members_mut(&mut self) -> Option<&mut Vec<ProfileId>> {
        match &mut self.kind {
            ProfileKind::Group { members } => Some(members),
            ProfileKind::Plain => None,
        }
    }

    pub(crate) fn clear_values(&mut self) {
        self.values.clear();
        self.cleared.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_profile_is_empty() {
        let parent = Uuid::new_v4();
        let profile = Profile::new(Some(parent));
        assert!(profile.is_empty());
        assert_eq!(profile.parent(), Some(parent));
        assert!(!profile.is_hidden());
        assert!(!profile.is_group());
        assert_eq!(profile.name(), None);
    }

    #[test]
    fn test_set_and_unset() {
        let mut profile = Profile::new(None);
        profile.set_property(Property::Name, "Work");
        profile.set_property(Property::HistorySize, 500i64);
        assert!(profile.is_set(Property::Name));
        assert_eq!(profile.name(), Some("Work"));
        assert_eq!(
            profile.local_value(Property::HistorySize),
            Some(&PropertyValue::Int(500))
        );

        assert_eq!(profile.unset(Property::HistorySize), Some(PropertyValue::Int(500)));
        assert!(!profile.is_set(Property::HistorySize));
    }

    #[test]
    fn test_clear_until_set_again() {
        let mut profile = Profile::new(None);
        profile.set_property(Property::ColorScheme, "Dark");
        profile.clear(Property::ColorScheme);
        assert!(!profile.is_set(Property::ColorScheme));
        assert!(profile.is_cleared(Property::ColorScheme));
        assert!(!profile.is_empty());

        profile.set_property(Property::ColorScheme, "Light");
        assert!(!profile.is_cleared(Property::ColorScheme));
        profile.clear(Property::ColorScheme);
        profile.unset(Property::ColorScheme);
        assert!(profile.is_empty());
    }

    #[test]
    fn test_new_group_is_hidden() {
        let group = Profile::new_group();
        assert!(group.is_group());
        assert!(group.is_hidden());
        assert!(group.members().is_empty());
    }
}
