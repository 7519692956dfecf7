//! Classifier for `ssh` command lines.
//!
//! Extracts the user, host, port and remote command from the arguments of an
//! `ssh` invocation so a session running it can be given a remote tab title.

use serde::Serialize;
use std::collections::BTreeMap;
use std::net::IpAddr;

/// Flags that never take an argument
const BOOLEAN_FLAGS: &str = "1246AaCfgKkMNnqsTtVvXxYy";

/// Flags followed by an argument, either attached (`-p443`) or as the next token
const ARGUMENT_FLAGS: &str = "bcDeFIiLlmOopRSwEJBPQW";

/// Fields extracted from an `ssh` command line. Undetermined fields are empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SshCommandInfo {
    pub user: String,
    pub host: String,
    pub port: String,
    pub command: String,
}

/// Classify the tokens of an `ssh` invocation.
///
/// The first token is the program name and is skipped.
pub fn classify_ssh_args<S: AsRef<str>>(tokens: &[S]) -> SshCommandInfo {
    let mut info = SshCommandInfo::default();
    let mut args = tokens.iter().map(|token| token.as_ref()).skip(1);

    while let Some(token) = args.next() {
        if let Some(flags) = token.strip_prefix('-') {
            let mut chars = flags.chars();
            let Some(flag) = chars.next() else {
                continue;
            };
            if BOOLEAN_FLAGS.contains(flag) || !ARGUMENT_FLAGS.contains(flag) {
                continue;
            }

            let attached = chars.as_str();
            let value = if attached.is_empty() {
                match args.next() {
                    Some(next) => next,
                    None => break,
                }
            } else {
                attached
            };
            match flag {
                'l' => info.user = value.to_string(),
                'p' => info.port = value.to_string(),
                _ => {}
            }
            continue;
        }

        match token.split_once('@') {
            Some((user, host)) => {
                if info.user.is_empty() {
                    info.user = user.to_string();
                }
                info.host = host.to_string();
            }
            None => info.host = token.to_string(),
        }
        info.command = args.by_ref().collect::<Vec<_>>().join(" ");
        break;
    }

    info
}

/// Split a command line with shell quoting rules and classify it.
///
/// Returns `None` when the line cannot be split or is empty.
pub fn classify_command_line(command_line: &str) -> Option<SshCommandInfo> {
    let tokens = match shell_words::split(command_line) {
        Ok(tokens) => tokens,
        Err(e) => {
            log::debug!("Cannot split command line {command_line:?}: {e}");
            return None;
        }
    };
    if tokens.is_empty() {
        return None;
    }
    Some(classify_ssh_args(&tokens))
}

/// True when `program` names the `ssh` client, with or without a directory
pub fn is_ssh_program(program: &str) -> bool {
    program.rsplit('/').next() == Some("ssh")
}

impl SshCommandInfo {
    /// Field name to value, for callers that want a map
    pub fn fields(&self) -> BTreeMap<&'static str, &str> {
        BTreeMap::from([
            ("user", self.user.as_str()),
            ("host", self.host.as_str()),
            ("port", self.port.as_str()),
            ("command", self.command.as_str()),
        ])
    }

    pub fn port_number(&self) -> Option<u16> {
        self.port.parse().ok()
    }

    /// Host up to the first dot, or the full host for IP addresses
    pub fn short_host(&self) -> &str {
        if self.host.parse::<IpAddr>().is_ok() {
            return &self.host;
        }
        self.host.split('.').next().unwrap_or(&self.host)
    }

    /// Expand a title format.
    ///
    /// | Code | Expands to |
    /// |------|------------|
    /// | `%u` | user |
    /// | `%U` | `user@`, or nothing without a user |
    /// | `%h` | short host |
    /// | `%H` | full host |
    /// | `%c` | remote command |
    ///
    /// Other `%` sequences are kept as written.
    pub fn format(&self, format: &str) -> String {
        let mut out = String::with_capacity(format.len());
        let mut chars = format.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            let expansion = match chars.peek() {
                Some('u') => Some(self.user.clone()),
                Some('U') if self.user.is_empty() => Some(String::new()),
                Some('U') => Some(format!("{}@", self.user)),
                Some('h') => Some(self.short_host().to_string()),
                Some('H') => Some(self.host.clone()),
                Some('c') => Some(self.command.clone()),
                _ => None,
            };
            match expansion {
                Some(text) => {
                    chars.next();
                    out.push_str(&text);
                }
                None => out.push('%'),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_flag_is_boolean() {
        let info = classify_ssh_args(&["ssh", "-Z", "somehost", "uptime"]);
        assert_eq!(info.host, "somehost");
        assert_eq!(info.command, "uptime");
    }

    #[test]
    fn test_trailing_flag_without_argument() {
        let info = classify_ssh_args(&["ssh", "-p"]);
        assert_eq!(info, SshCommandInfo::default());
    }

    #[test]
    fn test_user_flag_wins_over_target_user() {
        let info = classify_ssh_args(&["ssh", "-l", "admin", "someone@somehost"]);
        assert_eq!(info.user, "admin");
        assert_eq!(info.host, "somehost");
    }

    #[test]
    fn test_attached_port() {
        let info = classify_ssh_args(&["ssh", "-p2222", "host"]);
        assert_eq!(info.port, "2222");
        assert_eq!(info.port_number(), Some(2222));
    }

    #[test]
    fn test_short_host() {
        let mut info = SshCommandInfo {
            host: "build.example.com".to_string(),
            ..Default::default()
        };
        assert_eq!(info.short_host(), "build");
        info.host = "192.168.1.10".to_string();
        assert_eq!(info.short_host(), "192.168.1.10");
    }

    #[test]
    fn test_format_keeps_unknown_codes() {
        let info = SshCommandInfo {
            host: "h".to_string(),
            ..Default::default()
        };
        assert_eq!(info.format("%x %H 100%"), "%x h 100%");
    }

    #[test]
    fn test_is_ssh_program() {
        assert!(is_ssh_program("ssh"));
        assert!(is_ssh_program("/usr/bin/ssh"));
        assert!(!is_ssh_program("sshd"));
        assert!(!is_ssh_program("/bin/bash"));
    }
}
