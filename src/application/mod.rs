//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod extract;
pub mod history_store;
pub mod hotkey;
pub mod monitor;
pub mod ports;
pub mod session;
pub mod writer;

#[cfg(test)]
pub(crate) mod mocks;

// Re-export use cases
pub use extract::ContentExtractor;
pub use history_store::HistoryStore;
pub use hotkey::{HotkeyDetector, HotkeyError};
pub use monitor::ChangeMonitor;
pub use session::{HistorySession, SessionError};
pub use writer::{ClipboardWriter, PasteError};
