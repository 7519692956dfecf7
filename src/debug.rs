//! Debug logging for sessionkit.
//!
//! Controlled by the `DEBUG_LEVEL` environment variable:
//! - 0 or unset: No debugging
//! - 1: Errors only
//! - 2: Info level (profile loads, session lifecycle)
//! - 3: Debug level (property application, shortcut resolution)
//! - 4: Trace level (every resolved property)
//!
//! Output goes to /tmp/sessionkit_debug.log on Unix/macOS,
//! or %TEMP%\sessionkit_debug.log on Windows, so that embedding
//! applications keep their stdout/stderr clean.
//!
//! [`init_log_bridge`] routes `log` records from every crate into the same
//! file, mirrored to stderr when `RUST_LOG` is set.

use parking_lot::Mutex;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;
use std::sync::OnceLock;
use std::time::{SystemTime, UNIX_EPOCH};

/// Debug level configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DebugLevel {
    Off = 0,
    Error = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

impl DebugLevel {
    fn from_env() -> Self {
        match std::env::var("DEBUG_LEVEL") {
            Ok(val) => Self::from_number(val.trim().parse::<u8>().unwrap_or(0)),
            Err(_) => DebugLevel::Off,
        }
    }

    fn from_number(value: u8) -> Self {
        match value {
            0 => DebugLevel::Off,
            1 => DebugLevel::Error,
            2 => DebugLevel::Info,
            3 => DebugLevel::Debug,
            _ => DebugLevel::Trace,
        }
    }

    fn from_log_level(level: log::Level) -> Self {
        match level {
            log::Level::Error | log::Level::Warn => DebugLevel::Error,
            log::Level::Info => DebugLevel::Info,
            log::Level::Debug => DebugLevel::Debug,
            log::Level::Trace => DebugLevel::Trace,
        }
    }

    fn from_level_filter(filter: log::LevelFilter) -> Self {
        match filter.to_level() {
            Some(level) => Self::from_log_level(level),
            None => DebugLevel::Off,
        }
    }

    fn label(self) -> &'static str {
        match self {
            DebugLevel::Off => "OFF  ",
            DebugLevel::Error => "ERROR",
            DebugLevel::Info => "INFO ",
            DebugLevel::Debug => "DEBUG",
            DebugLevel::Trace => "TRACE",
        }
    }
}

/// Path of the debug log file
pub fn log_path() -> PathBuf {
    #[cfg(windows)]
    {
        std::env::temp_dir().join("sessionkit_debug.log")
    }
    #[cfg(not(windows))]
    {
        PathBuf::from("/tmp/sessionkit_debug.log")
    }
}

/// Global debug logger
struct DebugLogger {
    level: DebugLevel,
    file: Option<std::fs::File>,
}

impl DebugLogger {
    fn new() -> Self {
        let mut logger = DebugLogger {
            level: DebugLevel::from_env(),
            file: None,
        };
        if logger.level != DebugLevel::Off {
            logger.open_file();
        }
        logger
    }

    fn open_file(&mut self) {
        if self.file.is_some() {
            return;
        }
        // Silently skip logging if the file can't be opened
        if let Ok(file) = OpenOptions::new()
            .write(true)
            .truncate(true)
            .create(true)
            .open(log_path())
        {
            self.file = Some(file);
            self.write_raw(&format!(
                "\n{}\nsessionkit debug session started at {} (level={:?})\n{}\n",
                "=".repeat(80),
                get_timestamp(),
                self.level,
                "=".repeat(80)
            ));
        }
    }

    fn set_level(&mut self, level: DebugLevel) {
        self.level = level;
        if level != DebugLevel::Off {
            self.open_file();
        }
    }

    fn write_raw(&mut self, msg: &str) {
        if let Some(ref mut file) = self.file {
            let _ = file.write_all(msg.as_bytes());
            let _ = file.flush();
        }
    }

    fn log(&mut self, level: DebugLevel, category: &str, msg: &str) {
        if level == DebugLevel::Off || level > self.level {
            return;
        }
        self.write_raw(&format!(
            "[{}] [{}] [{}] {}\n",
            get_timestamp(),
            level.label(),
            category,
            msg
        ));
    }
}

static LOGGER: OnceLock<Mutex<DebugLogger>> = OnceLock::new();

fn get_logger() -> &'static Mutex<DebugLogger> {
    LOGGER.get_or_init(|| Mutex::new(DebugLogger::new()))
}

fn get_timestamp() -> String {
    let now = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default();
    format!("{}.{:06}", now.as_secs(), now.subsec_micros())
}

/// Check if debugging is enabled at given level
pub fn is_enabled(level: DebugLevel) -> bool {
    let logger = get_logger().lock();
    level <= logger.level
}

/// Log a message at specified level
pub fn log(level: DebugLevel, category: &str, msg: &str) {
    let mut logger = get_logger().lock();
    logger.log(level, category, msg);
}

/// Log formatted message
pub fn logf(level: DebugLevel, category: &str, args: fmt::Arguments) {
    if is_enabled(level) {
        log(level, category, &format!("{}", args));
    }
}

/// Forwards `log` records to the debug log file
struct LogBridge {
    mirror_to_stderr: bool,
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &log::Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let message = record.args().to_string();
        {
            let mut logger = get_logger().lock();
            logger.write_raw(&format!(
                "[{}] [{:<5}] [{}] {}\n",
                get_timestamp(),
                record.level(),
                record.target(),
                message
            ));
        }
        if self.mirror_to_stderr {
            eprintln!("[{}] {}: {}", record.level(), record.target(), message);
        }
    }

    fn flush(&self) {}
}

static BRIDGE: OnceLock<LogBridge> = OnceLock::new();

/// Install the `log` bridge.
///
/// Level precedence: `level` (from `--log-level`), then `RUST_LOG`, then
/// `DEBUG_LEVEL`. Safe to call more than once; later calls only adjust the level.
pub fn init_log_bridge(level: Option<log::LevelFilter>) {
    let rust_log = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.trim().parse::<log::LevelFilter>().ok());
    let filter = level.or(rust_log).unwrap_or_else(|| {
        match get_logger().lock().level {
            DebugLevel::Off => log::LevelFilter::Off,
            DebugLevel::Error => log::LevelFilter::Warn,
            DebugLevel::Info => log::LevelFilter::Info,
            DebugLevel::Debug => log::LevelFilter::Debug,
            DebugLevel::Trace => log::LevelFilter::Trace,
        }
    });

    {
        let mut logger = get_logger().lock();
        let bridged = DebugLevel::from_level_filter(filter);
        if bridged > logger.level {
            logger.set_level(bridged);
        }
    }

    let bridge = BRIDGE.get_or_init(|| LogBridge {
        mirror_to_stderr: rust_log.is_some(),
    });
    // Another logger may already be installed by an embedding application
    let _ = log::set_logger(bridge);
    log::set_max_level(filter);
}

// Convenience macros for logging
#[macro_export]
macro_rules! debug_error {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Error, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_info {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Info, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_log {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Debug, $category, format_args!($($arg)*))
    };
}

#[macro_export]
macro_rules! debug_trace {
    ($category:expr, $($arg:tt)*) => {
        $crate::debug::logf($crate::debug::DebugLevel::Trace, $category, format_args!($($arg)*))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_ordering() {
        assert!(DebugLevel::Error < DebugLevel::Trace);
        assert_eq!(DebugLevel::from_number(9), DebugLevel::Trace);
        assert_eq!(DebugLevel::from_number(0), DebugLevel::Off);
    }

    #[test]
    fn test_log_level_mapping() {
        assert_eq!(DebugLevel::from_log_level(log::Level::Warn), DebugLevel::Error);
        assert_eq!(
            DebugLevel::from_level_filter(log::LevelFilter::Off),
            DebugLevel::Off
        );
        assert_eq!(
            DebugLevel::from_level_filter(log::LevelFilter::Debug),
            DebugLevel::Debug
        );
    }
}
