//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod cache;
pub mod config;
pub mod event_tap;
pub mod keystroke;
pub mod logger;
pub mod notifier;
pub mod pasteboard;
pub mod permission;
pub mod text_history;

// Re-export common types
pub use cache::{CacheError, CacheStore};
pub use config::ConfigStore;
pub use event_tap::{KeyEventSink, KeyEventTap, TapError, TapHandle};
pub use keystroke::{KeystrokeError, PasteKeystroke};
pub use logger::{LogLevel, Logger, SharedLogger};
pub use notifier::{Notice, NotificationError, Notifier, Severity};
pub use pasteboard::{ClipboardError, Pasteboard};
pub use permission::InputPermission;
pub use text_history::{PersistenceError, StoredText, TextHistoryStore};
