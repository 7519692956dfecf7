//! Command-line interface for sessionkit.
//!
//! This module handles CLI argument parsing and dispatches subcommands.
//! The subcommand implementations live in the [`commands`] submodule.

pub mod commands;

use clap::{Parser, Subcommand};
use sessionkit_config::{ProfileLocations, SettingsFile};
use std::path::PathBuf;

use crate::manager::ManagerOptions;
use crate::session::storage::SessionStateFile;

/// sessionkit - Terminal profile and session manager
#[derive(Parser)]
#[command(name = "sessionkit")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Directory profiles are read from and saved to
    #[arg(long, value_name = "DIR")]
    pub profiles_dir: Option<PathBuf>,

    /// Settings file (default profile, favorites, shortcuts)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Saved session state file
    #[arg(long, value_name = "FILE")]
    pub sessions_file: Option<PathBuf>,

    /// Set debug log level (overrides RUST_LOG and DEBUG_LEVEL)
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevelArg>,
}

/// Log level argument for CLI
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum LogLevelArg {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevelArg {
    /// Convert to `log::LevelFilter`
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevelArg::Off => log::LevelFilter::Off,
            LogLevelArg::Error => log::LevelFilter::Error,
            LogLevelArg::Warn => log::LevelFilter::Warn,
            LogLevelArg::Info => log::LevelFilter::Info,
            LogLevelArg::Debug => log::LevelFilter::Debug,
            LogLevelArg::Trace => log::LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// List profiles in menu order
    List,

    /// Show the resolved properties of a profile
    Show {
        /// Profile name or file
        profile: String,
    },

    /// Create a session from a profile and print what it was given
    Apply {
        /// Profile name or file (default profile if omitted)
        profile: Option<String>,

        /// Runtime change request, e.g. "HistorySize=5000;Icon=network"
        #[arg(long, value_name = "CHANGES")]
        change: Option<String>,
    },

    /// Make a profile the default
    SetDefault {
        /// Profile name or file
        profile: String,
    },

    /// Add a profile to the favorites
    Favorite {
        /// Profile name or file
        profile: String,

        /// Remove from the favorites instead
        #[arg(short, long)]
        remove: bool,
    },

    /// Bind a key sequence to a profile
    Shortcut {
        /// Profile name or file
        profile: String,

        /// Key sequence such as "Ctrl+Alt+W" (removes the binding if omitted)
        key: Option<String>,
    },

    /// List every profile property and its kind
    Properties,

    /// Save, restore or clear the saved sessions
    Sessions {
        #[command(subcommand)]
        action: SessionsAction,
    },

    /// Decompose an ssh command line
    Ssh {
        /// Expand a title format (%u, %U, %h, %H, %c) instead of printing JSON
        #[arg(long, value_name = "FORMAT")]
        format: Option<String>,

        /// The ssh command and its arguments
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum SessionsAction {
    /// Open sessions from profiles and save them
    Save {
        /// Profile names or files (default profile if none)
        profiles: Vec<String>,

        /// Runtime change request applied to every session
        #[arg(long, value_name = "CHANGES")]
        change: Option<String>,
    },

    /// Restore the saved sessions and print what each was given
    Restore {
        /// Remove the saved state after restoring
        #[arg(long)]
        clear: bool,
    },

    /// Remove the saved state
    Clear,
}

/// Runtime options passed from CLI to the application
#[derive(Clone, Debug, Default)]
pub struct RuntimeOptions {
    /// Profile directory override
    pub profiles_dir: Option<PathBuf>,
    /// Settings file override
    pub settings: Option<PathBuf>,
    /// Session state file override
    pub sessions_file: Option<PathBuf>,
    /// Log level override from CLI
    pub log_level: Option<log::LevelFilter>,
}

impl RuntimeOptions {
    /// Manager file locations with the CLI overrides applied
    pub fn manager_options(&self) -> ManagerOptions {
        let mut options = ManagerOptions::default();
        if let Some(dir) = &self.profiles_dir {
            options.locations = ProfileLocations::new(dir.clone());
        }
        if let Some(settings) = &self.settings {
            options.settings_file = SettingsFile::new(settings.clone());
        }
        options
    }

    pub fn session_state_file(&self) -> SessionStateFile {
        self.sessions_file
            .clone()
            .map(SessionStateFile::new)
            .unwrap_or_default()
    }
}

/// Result of CLI processing
pub enum CliResult {
    /// Continue with normal startup
    Continue(RuntimeOptions),
    /// Exit with the given code (subcommand completed)
    Exit(i32),
}

/// Process CLI arguments and handle subcommands
pub fn process_cli() -> CliResult {
    let cli = Cli::parse();

    let options = RuntimeOptions {
        profiles_dir: cli.profiles_dir,
        settings: cli.settings,
        sessions_file: cli.sessions_file,
        log_level: cli.log_level.map(LogLevelArg::to_level_filter),
    };

    let Some(command) = cli.command else {
        return CliResult::Continue(options);
    };

    crate::debug::init_log_bridge(options.log_level);
    let result = commands::run(&options, command);
    if let Err(e) = &result {
        eprintln!("sessionkit: error: {e:#}");
    }
    CliResult::Exit(if result.is_ok() { 0 } else { 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_ssh_passthrough() {
        let cli = Cli::try_parse_from([
            "sessionkit", "ssh", "ssh", "-p", "2222", "-l", "bob", "host", "uptime",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Ssh { format, args }) => {
                assert_eq!(format, None);
                assert_eq!(args, vec!["ssh", "-p", "2222", "-l", "bob", "host", "uptime"]);
            }
            _ => panic!("expected ssh subcommand"),
        }
    }

    #[test]
    fn test_parse_global_options() {
        let cli = Cli::try_parse_from([
            "sessionkit",
            "--profiles-dir",
            "/tmp/profiles",
            "--log-level",
            "debug",
            "apply",
            "Work",
            "--change",
            "Icon=network",
        ])
        .unwrap();
        assert_eq!(cli.profiles_dir, Some(PathBuf::from("/tmp/profiles")));
        assert!(matches!(cli.log_level, Some(LogLevelArg::Debug)));
        match cli.command {
            Some(Commands::Apply { profile, change }) => {
                assert_eq!(profile.as_deref(), Some("Work"));
                assert_eq!(change.as_deref(), Some("Icon=network"));
            }
            _ => panic!("expected apply subcommand"),
        }
    }

    #[test]
    fn test_manager_options_overrides() {
        let options = RuntimeOptions {
            profiles_dir: Some(PathBuf::from("/tmp/p")),
            settings: Some(PathBuf::from("/tmp/s.yaml")),
            sessions_file: Some(PathBuf::from("/tmp/last.yaml")),
            log_level: None,
        };
        let manager_options = options.manager_options();
        assert_eq!(manager_options.locations.save_dir, PathBuf::from("/tmp/p"));
        assert_eq!(manager_options.settings_file.path(), &PathBuf::from("/tmp/s.yaml"));
        assert_eq!(
            options.session_state_file().path(),
            PathBuf::from("/tmp/last.yaml").as_path()
        );
    }

    #[test]
    fn test_parse_sessions_save() {
        let cli = Cli::try_parse_from([
            "sessionkit",
            "--sessions-file",
            "/tmp/last.yaml",
            "sessions",
            "save",
            "Work",
            "Home",
            "--change",
            "Icon=x",
        ])
        .unwrap();
        assert_eq!(cli.sessions_file, Some(PathBuf::from("/tmp/last.yaml")));
        match cli.command {
            Some(Commands::Sessions {
                action: SessionsAction::Save { profiles, change },
            }) => {
                assert_eq!(profiles, vec!["Work", "Home"]);
                assert_eq!(change.as_deref(), Some("Icon=x"));
            }
            _ => panic!("expected sessions save subcommand"),
        }
    }
}
