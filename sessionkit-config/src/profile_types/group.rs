//! Group profiles: edit several profiles through one aggregate.
//!
//! A group stores, for each property, the value every member agrees on. When
//! members disagree nothing is stored, which reads the same as "unset".
//! Setting a property on a group pushes it to every member.

use crate::property::Property;
use crate::value::PropertyValue;

use super::profile::{Profile, ProfileId};
use super::store::ProfileStore;

impl ProfileStore {
    /// Create a group over `members` and compute its shared values
    pub fn create_group(&mut self, members: impl IntoIterator<Item = ProfileId>) -> ProfileId {
        let id = self.insert(Profile::new_group());
        for member in members {
            self.push_member(id, member);
        }
        self.update_group_values(id);
        id
    }

    /// Add a member. Returns false if `group` is not a group or already
    /// contains `member`.
    pub fn add_to_group(&mut self, group: ProfileId, member: ProfileId) -> bool {
        let added = self.push_member(group, member);
        if added {
            self.update_group_values(group);
        }
        added
    }

    pub fn remove_from_group(&mut self, group: ProfileId, member: ProfileId) -> bool {
        let removed = match self.get_mut(group).and_then(Profile::members_mut) {
            Some(members) => {
                let before = members.len();
                members.retain(|m| *m != member);
                members.len() != before
            }
            None => false,
        };
        if removed {
            self.update_group_values(group);
        }
        removed
    }

    /// Members of a group, empty for plain or unknown profiles
    pub fn group_members(&self, group: ProfileId) -> &[ProfileId] {
        self.get(group).map(Profile::members).unwrap_or(&[])
    }

    /// Recompute the group's values from its members.
    ///
    /// With more than one member, Name and Path are skipped. A property is
    /// stored only when every member resolves to the same value.
    pub fn update_group_values(&mut self, group: ProfileId) {
        let members = self.group_members(group).to_vec();
        let shared: Vec<(Property, PropertyValue)> = Property::ALL
            .iter()
            .copied()
            .filter(|p| members.len() <= 1 || p.is_inheritable())
            .filter_map(|p| self.shared_value(&members, p).map(|v| (p, v)))
            .collect();

        if let Some(profile) = self.get_mut(group) {
            profile.clear_values();
            profile.set_properties(shared);
        }
    }

    /// Set a property on any profile.
    ///
    /// For groups the value is stored on the group and every member. Name and
    /// Path are ignored on groups with more than one member.
    pub fn set_property(&mut self, id: ProfileId, property: Property, value: PropertyValue) {
        self.set_property_visiting(id, property, value, &mut Vec::new());
    }

    fn set_property_visiting(
        &mut self,
        id: ProfileId,
        property: Property,
        value: PropertyValue,
        visited: &mut Vec<ProfileId>,
    ) {
        if visited.contains(&id) {
            log::warn!("Group {id:?} contains itself, skipping");
            return;
        }
        visited.push(id);

        let members = self.group_members(id).to_vec();
        let is_group = self.get(id).is_some_and(Profile::is_group);
        if is_group && members.len() > 1 && !property.is_inheritable() {
            return;
        }

        if let Some(profile) = self.get_mut(id) {
            profile.set_property(property, value.clone());
        }
        for member in members {
            self.set_property_visiting(member, property, value.clone(), visited);
        }
    }

    fn push_member(&mut self, group: ProfileId, member: ProfileId) -> bool {
        if group == member {
            return false;
        }
        match self.get_mut(group).and_then(Profile::members_mut) {
            Some(members) if !members.contains(&member) => {
                members.push(member);
                true
            }
            _ => false,
        }
    }

    fn shared_value(&self, members: &[ProfileId], property: Property) -> Option<PropertyValue> {
        let (first, rest) = members.split_first()?;
        let value = self.property(*first, property)?;
        rest.iter()
            .all(|m| self.property(*m, property) == Some(value))
            .then(|| value.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(store: &mut ProfileStore, name: &str, history: i64) -> ProfileId {
        let mut profile = Profile::new(None);
        profile.set_property(Property::Name, name);
        profile.set_property(Property::HistorySize, history);
        profile.set_property(Property::ColorScheme, "Linux");
        store.insert(profile)
    }

    #[test]
    fn test_group_stores_agreed_values_only() {
        let mut store = ProfileStore::new();
        let a = named(&mut store, "A", 1000);
        let b = named(&mut store, "B", 2000);
        let group = store.create_group([a, b]);

        assert_eq!(store.string(group, Property::ColorScheme), Some("Linux"));
        // Mixed values read like unset
        assert_eq!(store.property(group, Property::HistorySize), None);
        assert_eq!(store.property(group, Property::Name), None);
    }

    #[test]
    fn test_single_member_group_includes_name() {
        let mut store = ProfileStore::new();
        let a = named(&mut store, "A", 1000);
        let group = store.create_group([a]);
        assert_eq!(store.string(group, Property::Name), Some("A"));
        assert_eq!(store.int(group, Property::HistorySize), Some(1000));
    }

    #[test]
    fn test_set_property_pushes_to_members() {
        let mut store = ProfileStore::new();
        let a = named(&mut store, "A", 1000);
        let b = named(&mut store, "B", 2000);
        let group = store.create_group([a, b]);

        store.set_property(group, Property::HistorySize, PropertyValue::Int(500));
        assert_eq!(store.int(a, Property::HistorySize), Some(500));
        assert_eq!(store.int(b, Property::HistorySize), Some(500));
        assert_eq!(store.int(group, Property::HistorySize), Some(500));

        // Name is ignored on a multi-member group
        store.set_property(group, Property::Name, "Renamed".into());
        assert_eq!(store.string(a, Property::Name), Some("A"));
        assert_eq!(store.string(b, Property::Name), Some("B"));
    }

    #[test]
    fn test_membership_changes_recompute_values() {
        let mut store = ProfileStore::new();
        let a = named(&mut store, "A", 1000);
        let b = named(&mut store, "B", 2000);
        let group = store.create_group([a]);

        assert!(store.add_to_group(group, b));
        assert!(!store.add_to_group(group, b));
        assert_eq!(store.group_members(group), &[a, b]);
        assert_eq!(store.property(group, Property::HistorySize), None);

        assert!(store.remove_from_group(group, a));
        assert_eq!(store.int(group, Property::HistorySize), Some(2000));
        assert_eq!(store.string(group, Property::Name), Some("B"));
    }

    #[test]
    fn test_plain_profile_is_not_a_group() {
        let mut store = ProfileStore::new();
        let a = named(&mut store, "A", 1000);
        let b = named(&mut store, "B", 2000);
        assert!(!store.add_to_group(a, b));
        assert!(store.group_members(a).is_empty());
    }
}
