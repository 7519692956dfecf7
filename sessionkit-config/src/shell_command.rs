//! Split and join the `Command` entry of a profile file.

/// A program plus its arguments.
///
/// `arguments` includes the program itself as the first element, the way
/// it is handed to `execvp`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ShellCommand {
    pub command: String,
    pub arguments: Vec<String>,
}

impl ShellCommand {
    /// Split a command line using shell quoting rules.
    ///
    /// Unbalanced quotes fall back to splitting on whitespace.
    pub fn parse(full_command: &str) -> Self {
        let arguments = shell_words::split(full_command).unwrap_or_else(|e| {
            log::warn!("Failed to parse command {full_command:?}: {e}, splitting on whitespace");
            full_command.split_whitespace().map(String::from).collect()
        });
        Self::from_arguments(arguments)
    }

    pub fn from_arguments(arguments: Vec<String>) -> Self {
        Self {
            command: arguments.first().cloned().unwrap_or_default(),
            arguments,
        }
    }

    /// Build from a separately stored program and argument list. When the
    /// argument list is empty the program alone is used.
    pub fn from_parts(command: &str, arguments: &[String]) -> Self {
        if arguments.is_empty() {
            return Self::from_arguments(vec![command.to_string()]);
        }
        Self {
            command: command.to_string(),
            arguments: arguments.to_vec(),
        }
    }

    /// Re-quoted command line
    pub fn full_command(&self) -> String {
        shell_words::join(&self.arguments)
    }

    pub fn is_empty(&self) -> bool {
        self.command.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quoted_arguments() {
        let cmd = ShellCommand::parse("ssh -p 22 'my host'");
        assert_eq!(cmd.command, "ssh");
        assert_eq!(cmd.arguments, ["ssh", "-p", "22", "my host"]);
        assert_eq!(cmd.full_command(), "ssh -p 22 'my host'");
    }

    #[test]
    fn test_parse_unbalanced_quotes() {
        let cmd = ShellCommand::parse("echo 'oops");
        assert_eq!(cmd.arguments, ["echo", "'oops"]);
    }

    #[test]
    fn test_empty_command() {
        let cmd = ShellCommand::parse("   ");
        assert!(cmd.is_empty());
        assert!(cmd.arguments.is_empty());
    }

    #[test]
    fn test_from_parts_without_arguments() {
        let cmd = ShellCommand::from_parts("/bin/zsh", &[]);
        assert_eq!(cmd.arguments, ["/bin/zsh"]);
    }
}
