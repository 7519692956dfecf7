//! In-memory session backend.
//!
//! `RecordingSession` stores every value the manager pushes into it, so the
//! result of applying a profile can be inspected without a terminal. The
//! `sessionkit apply` command and the integration tests use it.

use parking_lot::Mutex;
use serde::Serialize;
use std::collections::BTreeMap;
use std::sync::Arc;

use super::{HistoryType, SessionFactory, SessionId, TabTitleContext, TerminalSession};

/// Everything a session has been told so far
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SessionSettings {
    pub title: Option<String>,
    pub program: Option<String>,
    pub arguments: Option<Vec<String>>,
    pub initial_working_directory: Option<String>,
    pub environment: Option<Vec<String>>,
    pub icon_name: Option<String>,
    pub key_bindings: Option<String>,
    pub local_tab_title_format: Option<String>,
    pub remote_tab_title_format: Option<String>,
    pub history_type: Option<HistoryType>,
    pub flow_control_enabled: Option<bool>,
    pub codec: Option<String>,
    pub monitor_silence_seconds: Option<i64>,
    pub cjk_ambiguous_wide: Option<bool>,
    pub closed: bool,
    /// Setter names in call order
    pub calls: Vec<&'static str>,
}

impl SessionSettings {
    /// Number of times a setter was called
    pub fn call_count(&self, setter: &str) -> usize {
        self.calls.iter().filter(|c| **c == setter).count()
    }
}

/// Shared handle to a recording session's state
pub type SessionHandle = Arc<Mutex<SessionSettings>>;

/// A [`TerminalSession`] that only records what it receives
#[derive(Debug, Clone, Default)]
pub struct RecordingSession {
    state: SessionHandle,
}

impl RecordingSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn handle(&self) -> SessionHandle {
        Arc::clone(&self.state)
    }

    fn record(&self, setter: &'static str, update: impl FnOnce(&mut SessionSettings)) {
        let mut state = self.state.lock();
        state.calls.push(setter);
        update(&mut state);
    }
}

impl TerminalSession for RecordingSession {
    fn set_title(&mut self, title: &str) {
        self.record("set_title", |s| s.title = Some(title.to_string()));
    }

    fn set_program(&mut self, program: &str) {
        self.record("set_program", |s| s.program = Some(program.to_string()));
    }

    fn set_arguments(&mut self, arguments: &[String]) {
        self.record("set_arguments", |s| s.arguments = Some(arguments.to_vec()));
    }

    fn set_initial_working_directory(&mut self, directory: &str) {
        self.record("set_initial_working_directory", |s| {
            s.initial_working_directory = Some(directory.to_string())
        });
    }

    fn set_environment(&mut self, environment: &[String]) {
        self.record("set_environment", |s| {
            s.environment = Some(environment.to_vec())
        });
    }

    fn set_icon_name(&mut self, icon: &str) {
        self.record("set_icon_name", |s| s.icon_name = Some(icon.to_string()));
    }

    fn set_key_bindings(&mut self, key_bindings: &str) {
        self.record("set_key_bindings", |s| {
            s.key_bindings = Some(key_bindings.to_string())
        });
    }

    fn set_tab_title_format(&mut self, context: TabTitleContext, format: &str) {
        self.record("set_tab_title_format", |s| match context {
            TabTitleContext::Local => s.local_tab_title_format = Some(format.to_string()),
            TabTitleContext::Remote => s.remote_tab_title_format = Some(format.to_string()),
        });
    }

    fn set_history_type(&mut self, history: HistoryType) {
        self.record("set_history_type", |s| s.history_type = Some(history));
    }

    fn set_flow_control_enabled(&mut self, enabled: bool) {
        self.record("set_flow_control_enabled", |s| {
            s.flow_control_enabled = Some(enabled)
        });
    }

    fn set_codec(&mut self, codec: &str) {
        self.record("set_codec", |s| s.codec = Some(codec.to_string()));
    }

    fn set_monitor_silence_seconds(&mut self, seconds: i64) {
        self.record("set_monitor_silence_seconds", |s| {
            s.monitor_silence_seconds = Some(seconds)
        });
    }

    fn set_cjk_ambiguous_wide(&mut self, wide: bool) {
        self.record("set_cjk_ambiguous_wide", |s| s.cjk_ambiguous_wide = Some(wide));
    }

    fn close(&mut self) {
        self.record("close", |s| s.closed = true);
    }
}

/// Creates [`RecordingSession`]s and keeps a handle to each
#[derive(Debug, Clone, Default)]
pub struct RecordingFactory {
    sessions: Arc<Mutex<BTreeMap<SessionId, SessionHandle>>>,
}

impl RecordingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recorded state of a session created by this factory
    pub fn session(&self, id: SessionId) -> Option<SessionSettings> {
        self.sessions.lock().get(&id).map(|handle| handle.lock().clone())
    }

    /// Forget recorded calls so later assertions only see new ones
    pub fn clear_calls(&self, id: SessionId) {
        if let Some(handle) = self.sessions.lock().get(&id) {
            handle.lock().calls.clear();
        }
    }
}

impl SessionFactory for RecordingFactory {
    fn create_session(&mut self, id: SessionId) -> Box<dyn TerminalSession> {
        let session = RecordingSession::new();
        self.sessions.lock().insert(id, session.handle());
        Box::new(session)
    }
}
