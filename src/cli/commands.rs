//! Interactive commands read from stdin while the daemon runs

use std::fmt;
use std::str::FromStr;

/// A command typed at the daemon prompt.
///
/// Entry numbers are 1-based as shown by `list`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonCommand {
    List,
    Paste(usize),
    Remove(usize),
    Clear,
    Help,
    Quit,
}

impl DaemonCommand {
    /// Zero-based history index for commands that target an entry
    pub fn index(&self) -> Option<usize> {
        match self {
            Self::Paste(n) | Self::Remove(n) => Some(n - 1),
            _ => None,
        }
    }
}

/// Usage shown by `help` and after a parse error
pub const COMMAND_HELP: &str =
    "commands: list | paste <n> | rm <n> | clear | help | quit";

/// Error when parsing a prompt command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseCommandError {
    pub input: String,
    pub reason: &'static str,
}

impl fmt::Display for ParseCommandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: \"{}\" ({})", self.reason, self.input, COMMAND_HELP)
    }
}

impl std::error::Error for ParseCommandError {}

impl FromStr for DaemonCommand {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = |reason| ParseCommandError {
            input: s.trim().to_string(),
            reason,
        };

        let mut parts = s.split_whitespace();
        let Some(verb) = parts.next() else {
            return Err(err("Empty command"));
        };
        let arg = parts.next();
        if parts.next().is_some() {
            return Err(err("Too many arguments"));
        }

        let number = || -> Result<usize, ParseCommandError> {
            let raw = arg.ok_or_else(|| err("Missing entry number"))?;
            match raw.parse::<usize>() {
                Ok(n) if n >= 1 => Ok(n),
                _ => Err(err("Entry number must be 1 or more")),
            }
        };

        let command = match verb.to_lowercase().as_str() {
            "list" | "ls" | "l" => Self::List,
            "paste" | "p" => Self::Paste(number()?),
            "rm" | "remove" | "del" => Self::Remove(number()?),
            "clear" => Self::Clear,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            _ => return Err(err("Unknown command")),
        };

        if arg.is_some() && command.index().is_none() {
            return Err(err("Unexpected argument"));
        }
        Ok(command)
    }
}
