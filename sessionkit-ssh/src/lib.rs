//! Remote login helpers for sessionkit.
//!
//! Decomposes `ssh` command lines into user, host, port and remote command,
//! and expands remote tab title formats from the result.

pub mod argv;

pub use argv::{SshCommandInfo, classify_command_line, classify_ssh_args, is_ssh_program};
