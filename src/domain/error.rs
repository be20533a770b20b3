//! Domain error types

use thiserror::Error;

/// Error when parsing a hotkey combination string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid hotkey: \"{input}\". {reason}. Expected format: <modifier>+...+<key> (e.g., cmd+ctrl+alt+v, cmd+shift+v)")]
pub struct InvalidHotkeyError {
    pub input: String,
    pub reason: String,
}

impl InvalidHotkeyError {
    pub(crate) fn new(input: &str, reason: impl Into<String>) -> Self {
        Self {
            input: input.to_string(),
            reason: reason.into(),
        }
    }
}

/// Error when a history capacity of zero is requested
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid history capacity: {0}. Capacity must be at least 1")]
pub struct InvalidCapacityError(pub usize);

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
