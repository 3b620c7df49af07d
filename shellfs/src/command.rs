//! Shell commands and their diagnostics.
use std::fmt;

/// A parsed command line. Surplus operands are ignored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Ls(Option<String>),
    Cd(Option<String>),
    Chmod { mode: u32, path: String },
    Rm(String),
    Find(String),
    Exit,
}

impl Command {
    /// Build a command from its name and operands, validating operands the
    /// way each command expects them.
    pub fn parse(name: &str, operands: &[String]) -> Result<Command, CommandError> {
        match name {
            "ls" => Ok(Command::Ls(operands.first().cloned())),
            "cd" => Ok(Command::Cd(operands.first().cloned())),
            "chmod" => {
                let [mode, path] = operands else {
                    return Err(CommandError::MissingOperand("chmod"));
                };
                Ok(Command::Chmod {
                    mode: parse_mode(mode)?,
                    path: path.clone(),
                })
            }
            "rm" => operands
                .first()
                .map(|path| Command::Rm(path.clone()))
                .ok_or(CommandError::MissingOperand("rm")),
            "find" => Ok(Command::Find(operands.first().cloned().unwrap_or_default())),
            "exit" => Ok(Command::Exit),
            other => Err(CommandError::CommandNotFound(other.to_string())),
        }
    }
}

/// Parse an octal mode such as `644`, `0o644` or `7_55`. Single underscores
/// may separate digits (and follow the `0o` prefix); negative modes are
/// invalid.
pub fn parse_mode(text: &str) -> Result<u32, CommandError> {
    let invalid = || CommandError::InvalidMode(text.to_string());
    let unsigned = text.strip_prefix('+').unwrap_or(text);
    let digits = match unsigned
        .strip_prefix("0o")
        .or_else(|| unsigned.strip_prefix("0O"))
    {
        Some(rest) => rest.strip_prefix('_').unwrap_or(rest),
        None => unsigned,
    };
    if digits.starts_with(['_', '+']) || digits.ends_with('_') || digits.contains("__") {
        return Err(invalid());
    }
    u32::from_str_radix(&digits.replace('_', ""), 8).map_err(|_| invalid())
}

/// Every diagnostic a command can report. `Display` renders the exact line
/// shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    CommandNotFound(String),
    MissingOperand(&'static str),
    InvalidMode(String),
    LsNotFound(String),
    LsDenied(String),
    CdNotFound(String),
    CdDenied(String),
    ChmodNotFound(String),
    ChmodDenied(String),
    RmNotFound(String),
    RmDenied(String),
}

impl fmt::Display for CommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandError::CommandNotFound(name) => write!(f, "{name}: command not found"),
            CommandError::MissingOperand(name) => write!(f, "{name}: missing operand"),
            CommandError::InvalidMode(mode) => write!(f, "chmod: invalid mode: '{mode}'"),
            CommandError::LsNotFound(path) => {
                write!(f, "ls: cannot access '{path}': No such file or directory")
            }
            CommandError::LsDenied(name) => {
                write!(f, "ls: cannot open directory '{name}': Permission denied")
            }
            CommandError::CdNotFound(path) => write!(f, "cd: no such file or directory: {path}"),
            CommandError::CdDenied(path) => write!(f, "cd: permission denied: {path}"),
            CommandError::ChmodNotFound(path) => {
                write!(f, "chmod: cannot access '{path}': No such file or directory")
            }
            CommandError::ChmodDenied(path) => {
                write!(f, "chmod: cannot change permissions of '{path}': Permission denied")
            }
            CommandError::RmNotFound(path) => {
                write!(f, "rm: cannot remove '{path}': No such file or directory")
            }
            CommandError::RmDenied(path) => {
                write!(f, "rm: cannot remove '{path}': Permission denied")
            }
        }
    }
}

impl std::error::Error for CommandError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("ls", &[]), Ok(Command::Ls(None)));
        assert_eq!(
            Command::parse("cd", &args(&["dir1", "extra"])),
            Ok(Command::Cd(Some("dir1".to_string())))
        );
        assert_eq!(
            Command::parse("chmod", &args(&["600", "file1.txt"])),
            Ok(Command::Chmod {
                mode: 0o600,
                path: "file1.txt".to_string()
            })
        );
        assert_eq!(
            Command::parse("rm", &args(&["file1.txt"])),
            Ok(Command::Rm("file1.txt".to_string()))
        );
        assert_eq!(Command::parse("find", &[]), Ok(Command::Find(String::new())));
        assert_eq!(Command::parse("exit", &args(&["1"])), Ok(Command::Exit));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            Command::parse("chmod", &args(&["600"])),
            Err(CommandError::MissingOperand("chmod"))
        );
        assert_eq!(
            Command::parse("chmod", &args(&["600", "a", "b"])),
            Err(CommandError::MissingOperand("chmod"))
        );
        assert_eq!(
            Command::parse("chmod", &args(&["rwx", "a"])),
            Err(CommandError::InvalidMode("rwx".to_string()))
        );
        assert_eq!(Command::parse("rm", &[]), Err(CommandError::MissingOperand("rm")));
        assert_eq!(
            Command::parse("mkdir", &args(&["x"])),
            Err(CommandError::CommandNotFound("mkdir".to_string()))
        );
    }

    #[test]
    fn test_parse_mode() {
        assert_eq!(parse_mode("755"), Ok(0o755));
        assert_eq!(parse_mode("0o644"), Ok(0o644));
        assert_eq!(parse_mode("0"), Ok(0));
        assert!(parse_mode("8").is_err());
        assert!(parse_mode("").is_err());
        assert!(parse_mode("-1").is_err());
    }

    #[test]
    fn test_parse_mode_underscores() {
        assert_eq!(parse_mode("7_55"), Ok(0o755));
        assert_eq!(parse_mode("0o6_4_4"), Ok(0o644));
        assert_eq!(parse_mode("+7_00"), Ok(0o700));
        assert!(parse_mode("_755").is_err());
        assert!(parse_mode("755_").is_err());
        assert!(parse_mode("7__55").is_err());
        assert_eq!(parse_mode("0o_7"), Ok(0o7));
        assert_eq!(parse_mode("+0O7"), Ok(0o7));
        assert!(parse_mode("0o__7").is_err());
        assert!(parse_mode("0o+7").is_err());
        assert!(parse_mode("0o_").is_err());
        assert!(parse_mode("_").is_err());
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            CommandError::CommandNotFound("foo".to_string()).to_string(),
            "foo: command not found"
        );
        assert_eq!(
            CommandError::InvalidMode("9z".to_string()).to_string(),
            "chmod: invalid mode: '9z'"
        );
        assert_eq!(
            CommandError::LsDenied("dir1".to_string()).to_string(),
            "ls: cannot open directory 'dir1': Permission denied"
        );
        assert_eq!(
            CommandError::CdNotFound("nonexistent".to_string()).to_string(),
            "cd: no such file or directory: nonexistent"
        );
        assert_eq!(
            CommandError::ChmodDenied("file1.txt".to_string()).to_string(),
            "chmod: cannot change permissions of 'file1.txt': Permission denied"
        );
        assert_eq!(
            CommandError::RmDenied("file1.txt".to_string()).to_string(),
            "rm: cannot remove 'file1.txt': Permission denied"
        );
    }
}
