//! Pushing resolved profile values into sessions.

use std::collections::{BTreeMap, BTreeSet};

use sessionkit_config::{HistoryMode, ProfileId, ProfileStore, Property, PropertyValue};

use super::{SessionEntry, SessionManager};
use crate::error::{Result, SessionError};
use crate::session::{HistoryType, SessionId, TabTitleContext};

/// Properties that have a session-level counterpart
const SESSION_PROPERTIES: &[Property] = &[
    Property::Name,
    Property::Command,
    Property::Arguments,
    Property::Directory,
    Property::Environment,
    Property::Icon,
    Property::KeyBindings,
    Property::LocalTabTitleFormat,
    Property::RemoteTabTitleFormat,
    Property::HistoryMode,
    Property::HistorySize,
    Property::FlowControlEnabled,
    Property::DefaultEncoding,
    Property::SilenceSeconds,
    Property::CJKAmbiguousWide,
];

/// Environment variable naming the profile's start directory
const PROFILE_HOME_VAR: &str = "PROFILEHOME";

impl SessionManager {
    /// Bind `session` to `profile` and push the profile's values into it.
    ///
    /// With `modified_only`, a setter is called only when the resolved value
    /// differs from what was last applied to the session.
    pub fn apply_profile(
        &mut self,
        session: SessionId,
        profile: ProfileId,
        modified_only: bool,
    ) -> Result<()> {
        if !self.store.contains(profile) {
            return Err(SessionError::UnknownProfile(profile));
        }
        let entry = self
            .sessions
            .get_mut(&session)
            .ok_or(SessionError::UnknownSession(session))?;
        entry.profile = profile;
        apply_to_session(&self.store, entry, modified_only);
        Ok(())
    }
}

/// Apply the entry's bound profile to its backend
pub(super) fn apply_to_session(store: &ProfileStore, entry: &mut SessionEntry, modified_only: bool) {
    let resolved: BTreeMap<Property, PropertyValue> = SESSION_PROPERTIES
        .iter()
        .filter_map(|p| store.property(entry.profile, *p).map(|v| (*p, v.clone())))
        .collect();
    let changed: BTreeSet<Property> = SESSION_PROPERTIES
        .iter()
        .copied()
        .filter(|p| !modified_only || resolved.get(p) != entry.applied.get(p))
        .collect();
    let is_changed = |p: Property| changed.contains(&p);
    let text = |p: Property| resolved.get(&p).and_then(PropertyValue::as_str);
    let flag = |p: Property| resolved.get(&p).and_then(PropertyValue::as_bool);

    let backend = &mut entry.backend;

    if is_changed(Property::Name)
        && let Some(title) = text(Property::Name)
    {
        backend.set_title(title);
    }
    if is_changed(Property::Command)
        && let Some(program) = text(Property::Command)
    {
        backend.set_program(program);
    }
    if is_changed(Property::Arguments)
        && let Some(arguments) = resolved
            .get(&Property::Arguments)
            .and_then(PropertyValue::as_string_list)
    {
        backend.set_arguments(arguments);
    }
    if is_changed(Property::Directory)
        && let Some(directory) = text(Property::Directory)
    {
        backend.set_initial_working_directory(directory);
    }

    let environment = resolved
        .get(&Property::Environment)
        .and_then(PropertyValue::as_string_list);
    let directory = text(Property::Directory);
    if (is_changed(Property::Environment) || is_changed(Property::Directory))
        && (environment.is_some() || directory.is_some())
    {
        let mut environment = environment.map(<[String]>::to_vec).unwrap_or_default();
        environment.push(format!("{PROFILE_HOME_VAR}={}", directory.unwrap_or_default()));
        backend.set_environment(&environment);
    }

    if is_changed(Property::Icon)
        && let Some(icon) = text(Property::Icon)
    {
        backend.set_icon_name(icon);
    }
    if is_changed(Property::KeyBindings)
        && let Some(bindings) = text(Property::KeyBindings)
    {
        backend.set_key_bindings(bindings);
    }
    if is_changed(Property::LocalTabTitleFormat)
        && let Some(format) = text(Property::LocalTabTitleFormat)
    {
        backend.set_tab_title_format(TabTitleContext::Local, format);
    }
    if is_changed(Property::RemoteTabTitleFormat)
        && let Some(format) = text(Property::RemoteTabTitleFormat)
    {
        backend.set_tab_title_format(TabTitleContext::Remote, format);
    }

    if (is_changed(Property::HistoryMode) || is_changed(Property::HistorySize))
        && let Some(mode) = resolved.get(&Property::HistoryMode).and_then(PropertyValue::as_int)
    {
        let size = resolved
            .get(&Property::HistorySize)
            .and_then(PropertyValue::as_int)
            .unwrap_or(0);
        match history_type(mode, size) {
            Some(history) => backend.set_history_type(history),
            None => log::warn!("Unknown history mode {mode}"),
        }
    }

    if is_changed(Property::FlowControlEnabled)
        && let Some(enabled) = flag(Property::FlowControlEnabled)
    {
        backend.set_flow_control_enabled(enabled);
    }
    if is_changed(Property::DefaultEncoding)
        && let Some(codec) = text(Property::DefaultEncoding)
    {
        backend.set_codec(codec);
    }
    if is_changed(Property::SilenceSeconds)
        && let Some(seconds) = resolved
            .get(&Property::SilenceSeconds)
            .and_then(PropertyValue::as_int)
    {
        backend.set_monitor_silence_seconds(seconds);
    }
    if is_changed(Property::CJKAmbiguousWide)
        && let Some(wide) = flag(Property::CJKAmbiguousWide)
    {
        backend.set_cjk_ambiguous_wide(wide);
    }

    crate::debug_trace!(
        "APPLY",
        "Applied {} changed properties (modified_only={})",
        changed.len(),
        modified_only
    );
    entry.applied = resolved;
}

/// Map the stored history mode and size to a session history type
fn history_type(mode: i64, size: i64) -> Option<HistoryType> {
    match HistoryMode::from_int(mode)? {
        HistoryMode::Disabled => Some(HistoryType::None),
        HistoryMode::FixedSize => Some(HistoryType::Compact(size.max(0) as usize)),
        HistoryMode::Unlimited => Some(HistoryType::Unlimited),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_type_mapping() {
        assert_eq!(history_type(0, 500), Some(HistoryType::None));
        assert_eq!(history_type(1, 500), Some(HistoryType::Compact(500)));
        assert_eq!(history_type(1, -3), Some(HistoryType::Compact(0)));
        assert_eq!(history_type(2, 500), Some(HistoryType::Unlimited));
        assert_eq!(history_type(7, 500), None);
    }
}
