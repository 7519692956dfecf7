//! Profile arena and inherited-value resolution.
//!
//! `ProfileStore` owns every profile. Parents, group members and session
//! bindings refer to profiles by [`ProfileId`], so a profile can be shared by
//! any number of holders and removed from listings without invalidating them.

use std::collections::HashMap;

use crate::property::Property;
use crate::value::{Color, FontSpec, PropertyValue};

use super::profile::{Profile, ProfileId};

/// Owns all profiles, keyed by id
#[derive(Debug, Clone, Default)]
pub struct ProfileStore {
    profiles: HashMap<ProfileId, Profile>,
}

impl ProfileStore {
    pub fn new() -> Self {
        Self {
            profiles: HashMap::new(),
        }
    }

    /// Add a profile, replacing any profile with the same id. Returns the id.
    pub fn insert(&mut self, profile: Profile) -> ProfileId {
        let id = profile.id();
        self.profiles.insert(id, profile);
        id
    }

    pub fn get(&self, id: ProfileId) -> Option<&Profile> {
        self.profiles.get(&id)
    }

    pub fn get_mut(&mut self, id: ProfileId) -> Option<&mut Profile> {
        self.profiles.get_mut(&id)
    }

    pub fn remove(&mut self, id: ProfileId) -> Option<Profile> {
        self.profiles.remove(&id)
    }

    pub fn contains(&self, id: ProfileId) -> bool {
        self.profiles.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ProfileId> {
        self.profiles.keys()
    }

    /// Resolve a property: the profile's own value, else the nearest
    /// ancestor's value for inheritable properties.
    ///
    /// Returns `None` when the property is unset along the whole chain, when
    /// a profile on the way has cleared it, when `id` is unknown, or when the
    /// parent chain is broken or cyclic.
    pub fn property(&self, id: ProfileId, property: Property) -> Option<&PropertyValue> {
        let mut current = self.profiles.get(&id)?;
        if let Some(value) = current.local_value(property) {
            return Some(value);
        }
        if !property.is_inheritable() || current.is_cleared(property) {
            return None;
        }

        let mut visited = vec![id];
        while let Some(parent_id) = current.parent() {
            if visited.contains(&parent_id) {
                log::warn!(
                    "Circular profile inheritance detected: {:?} -> {:?}",
                    current.id(),
                    parent_id
                );
                return None;
            }
            let Some(parent) = self.profiles.get(&parent_id) else {
                log::warn!(
                    "Parent profile {:?} not found for profile {:?}",
                    parent_id,
                    current.id()
                );
                return None;
            };
            if let Some(value) = parent.local_value(property) {
                return Some(value);
            }
            if parent.is_cleared(property) {
                return None;
            }
            visited.push(parent_id);
            current = parent;
        }
        None
    }

    pub fn string(&self, id: ProfileId, property: Property) -> Option<&str> {
        self.property(id, property).and_then(PropertyValue::as_str)
    }

    pub fn string_list(&self, id: ProfileId, property: Property) -> Option<&[String]> {
        self.property(id, property)
            .and_then(PropertyValue::as_string_list)
    }

    pub fn bool(&self, id: ProfileId, property: Property) -> Option<bool> {
        self.property(id, property).and_then(PropertyValue::as_bool)
    }

    pub fn int(&self, id: ProfileId, property: Property) -> Option<i64> {
        self.property(id, property).and_then(PropertyValue::as_int)
    }

    pub fn color(&self, id: ProfileId, property: Property) -> Option<Color> {
        self.property(id, property).and_then(PropertyValue::as_color)
    }

    pub fn font(&self, id: ProfileId, property: Property) -> Option<&FontSpec> {
        self.property(id, property).and_then(PropertyValue::as_font)
    }

    /// Position in sorted menus, 0 when missing or not a number
    pub fn menu_index(&self, id: ProfileId) -> i64 {
        match self.property(id, Property::MenuIndex) {
            Some(PropertyValue::Int(index)) => *index,
            Some(PropertyValue::String(text)) => text.trim().parse().unwrap_or(0),
            _ => 0,
        }
    }

    /// Re-parent a stored profile. Returns false if `id` is unknown.
    ///
    /// Cycles are not rejected here; resolution stops at the repeated
    /// profile. Check [`ProfileStore::has_ancestor`] first to avoid them.
    pub fn set_parent(&mut self, id: ProfileId, parent: Option<ProfileId>) -> bool {
        match self.profiles.get_mut(&id) {
            Some(profile) => {
                profile.set_parent(parent);
                true
            }
            None => false,
        }
    }

    /// Check if a profile has a specific ancestor in its inheritance chain
    pub fn has_ancestor(&self, id: ProfileId, ancestor: ProfileId) -> bool {
        let mut current_id = id;
        let mut visited = vec![current_id];

        while let Some(profile) = self.profiles.get(&current_id)
            && let Some(parent_id) = profile.parent()
        {
            if parent_id == ancestor {
                return true;
            }
            if visited.contains(&parent_id) {
                return false;
            }
            visited.push(parent_id);
            current_id = parent_id;
        }
        false
    }

    /// Copy every inheritable property of `source` onto `target`.
    ///
    /// With `diff_only`, only properties whose resolved values differ are
    /// copied. Name and Path are never copied. A property unset on `source`
    /// is removed from `target`, and cleared there when `target` would still
    /// inherit a value for it.
    pub fn clone_profile(&mut self, target: ProfileId, source: ProfileId, diff_only: bool) {
        if !self.contains(target) || !self.contains(source) {
            log::warn!("clone_profile: unknown profile {target:?} or {source:?}");
            return;
        }

        let changes: Vec<(Property, Option<PropertyValue>)> = Property::ALL
            .iter()
            .copied()
            .filter(|p| p.is_inheritable())
            .filter_map(|p| {
                let value = self.property(source, p);
                if diff_only && value == self.property(target, p) {
                    return None;
                }
                Some((p, value.cloned()))
            })
            .collect();

        for (property, value) in changes {
            let Some(profile) = self.profiles.get_mut(&target) else {
                return;
            };
            match value {
                Some(value) => profile.set_property(property, value),
                None => {
                    profile.unset(property);
                    if self.property(target, property).is_some()
                        && let Some(profile) = self.profiles.get_mut(&target)
                    {
                        profile.clear(property);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_chain() -> (ProfileStore, ProfileId, ProfileId) {
        let mut store = ProfileStore::new();
        let mut base = Profile::new(None);
        base.set_property(Property::Name, "Base");
        base.set_property(Property::Font, FontSpec::new("Monospace", 10.0));
        base.set_property(Property::HistorySize, 1000i64);
        let base_id = store.insert(base);

        let child_id = store.insert(Profile::new(Some(base_id)));
        (store, base_id, child_id)
    }

    #[test]
    fn test_child_inherits_unset_values() {
        let (mut store, _, child) = store_with_chain();
        assert_eq!(
            store.font(child, Property::Font),
            Some(&FontSpec::new("Monospace", 10.0))
        );

        store
            .get_mut(child)
            .unwrap()
            .set_property(Property::Font, FontSpec::new("Hack", 12.0));
        assert_eq!(store.font(child, Property::Font), Some(&FontSpec::new("Hack", 12.0)));
    }

    #[test]
    fn test_name_is_not_inherited() {
        let (store, base, child) = store_with_chain();
        assert_eq!(store.string(base, Property::Name), Some("Base"));
        assert_eq!(store.string(child, Property::Name), None);
    }

    #[test]
    fn test_unset_everywhere_is_none() {
        let (store, _, child) = store_with_chain();
        assert_eq!(store.property(child, Property::ColorScheme), None);
        assert_eq!(store.property(uuid::Uuid::new_v4(), Property::Font), None);
    }

    #[test]
    fn test_cyclic_parents_terminate() {
        let (mut store, base, child) = store_with_chain();
        assert!(store.has_ancestor(child, base));
        assert!(store.set_parent(base, Some(child)));

        // The child still sees base's values, but a property set on neither
        // resolves to nothing instead of looping forever
        assert_eq!(store.int(child, Property::HistorySize), Some(1000));
        assert_eq!(store.property(child, Property::ColorScheme), None);
        assert_eq!(store.property(base, Property::ColorScheme), None);
    }

    #[test]
    fn test_menu_index_parsing() {
        let (mut store, base, child) = store_with_chain();
        assert_eq!(store.menu_index(base), 0);
        store
            .get_mut(base)
            .unwrap()
            .set_property(Property::MenuIndex, "3");
        assert_eq!(store.menu_index(child), 3);
        store
            .get_mut(child)
            .unwrap()
            .set_property(Property::MenuIndex, "first");
        assert_eq!(store.menu_index(child), 0);
    }

    #[test]
    fn test_clone_profile_diff_only() {
        let (mut store, base, child) = store_with_chain();
        let mut other = Profile::new(None);
        other.set_property(Property::Name, "Other");
        other.set_property(Property::HistorySize, 1000i64);
        other.set_property(Property::ColorScheme, "Solarized");
        let other = store.insert(other);

        store.clone_profile(child, other, true);
        let child_profile = store.get(child).unwrap();
        // HistorySize already resolves to the same value through the parent
        assert!(!child_profile.is_set(Property::HistorySize));
        assert!(child_profile.is_set(Property::ColorScheme));
        assert!(!child_profile.is_set(Property::Name));
        // Font is unset on `other`, so the child stops inheriting it
        assert!(!child_profile.is_set(Property::Font));
        assert!(child_profile.is_cleared(Property::Font));
        assert_eq!(store.font(child, Property::Font), None);
        assert_eq!(store.string(child, Property::Name), None);
        assert_eq!(store.string(base, Property::Name), Some("Base"));
    }

    #[test]
    fn test_clone_profile_full_copy() {
        let (mut store, base, _) = store_with_chain();
        let target = store.insert(Profile::new(None));
        store.clone_profile(target, base, false);
        let copy = store.get(target).unwrap();
        assert!(copy.is_set(Property::Font));
        assert!(copy.is_set(Property::HistorySize));
        assert!(!copy.is_set(Property::Name));
    }

    #[test]
    fn test_clone_profile_hides_values_the_source_lacks() {
        let (mut store, base, _) = store_with_chain();
        store
            .get_mut(base)
            .unwrap()
            .set_property(Property::ColorScheme, "Linux");
        let target = store.insert(Profile::new(Some(base)));
        let source = store.insert(Profile::new(None));

        store.clone_profile(target, source, false);
        for property in [Property::ColorScheme, Property::Font, Property::HistorySize] {
            assert_eq!(
                store.property(target, property),
                store.property(source, property),
                "{property:?}"
            );
        }
        // Nothing to hide for properties the parent chain never sets
        assert!(!store.get(target).unwrap().is_cleared(Property::Icon));

        // Setting the value again ends the clearing
        store
            .get_mut(target)
            .unwrap()
            .set_property(Property::ColorScheme, "Dark");
        assert_eq!(store.string(target, Property::ColorScheme), Some("Dark"));
    }
}
