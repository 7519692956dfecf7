//! Session seams and saved session state.
//!
//! The manager never owns a terminal directly. It talks to each session
//! through [`TerminalSession`] and creates them through a [`SessionFactory`],
//! so the terminal emulation and process transport stay outside this crate.

pub mod recording;
pub mod storage;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Unique identifier for a session
pub type SessionId = u64;

/// Which tab title format a setter refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TabTitleContext {
    /// Used while the foreground process runs locally
    Local,
    /// Used while the foreground process is a remote login
    Remote,
}

/// Scrollback storage a session should use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryType {
    None,
    /// Keep at most this many lines
    Compact(usize),
    Unlimited,
}

/// Setters a terminal session exposes to the manager.
pub trait TerminalSession: Send {
    fn set_title(&mut self, title: &str);
    fn set_program(&mut self, program: &str);
    fn set_arguments(&mut self, arguments: &[String]);
    fn set_initial_working_directory(&mut self, directory: &str);
    fn set_environment(&mut self, environment: &[String]);
    fn set_icon_name(&mut self, icon: &str);
    fn set_key_bindings(&mut self, key_bindings: &str);
    fn set_tab_title_format(&mut self, context: TabTitleContext, format: &str);
    fn set_history_type(&mut self, history: HistoryType);
    fn set_flow_control_enabled(&mut self, enabled: bool);
    fn set_codec(&mut self, codec: &str);
    fn set_monitor_silence_seconds(&mut self, seconds: i64);
    fn set_cjk_ambiguous_wide(&mut self, wide: bool);

    /// Current working directory of the foreground process, if known
    fn current_working_directory(&self) -> Option<String> {
        None
    }

    /// Ask the session to terminate. Completion is reported separately
    /// through the manager's termination channel.
    fn close(&mut self);
}

/// Builds terminal sessions for the manager
pub trait SessionFactory: Send {
    fn create_session(&mut self, id: SessionId) -> Box<dyn TerminalSession>;
}

/// Sessions at the time of save
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SessionState {
    /// Timestamp when the sessions were saved (RFC 3339)
    pub saved_at: String,
    pub sessions: Vec<SavedSession>,
}

/// One saved session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedSession {
    /// Path of the profile the session was created from
    pub profile_path: String,

    /// Working directory of the foreground process
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub working_directory: Option<String>,

    /// Values changed at runtime by the running program, keyed by
    /// property name
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub overrides: BTreeMap<String, serde_yaml_ng::Value>,
}
