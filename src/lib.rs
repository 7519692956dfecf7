// Library exports for testing and embedding
//
// The manager is single-owner: every mutation goes through `&mut SessionManager`.
// Session backends report termination from other threads through the tokio
// channel returned by `SessionManager::termination_sender()`; the owner drains
// it with `process_terminations()`. `parking_lot::Mutex` is used only for the
// shared state of recording sessions.

/// Application version (root crate version, for use by sub-crates).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[macro_use]
pub mod debug;

pub mod cli;
pub mod error;
pub mod manager;
pub mod session;
pub mod shortcut;

pub use error::{Result, SessionError};
pub use manager::{ManagerOptions, SessionManager, ShortcutEntry};
pub use session::recording::{RecordingFactory, RecordingSession, SessionSettings};
pub use session::storage::SessionStateFile;
pub use session::{
    HistoryType, SavedSession, SessionFactory, SessionId, SessionState, TabTitleContext,
    TerminalSession,
};
pub use shortcut::KeySequence;
