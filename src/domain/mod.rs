//! Domain layer - Core business logic
//!
//! Contains value objects, state machines, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod history;
pub mod hotkey;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use history::{ClipContent, ClipFormat, ClipboardSnapshot, ContentType, HistoryEntry};
pub use hotkey::{DetectorState, HotkeyCombo, HotkeyMatcher, KeyEvent, Modifiers};
