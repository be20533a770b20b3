//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the OS clipboard, keyboard, filesystem, and
//! notification services.

pub mod cache;
pub mod clipboard;
pub mod config;
pub mod event_tap;
pub mod keystroke;
pub mod logging;
pub mod notification;
pub mod permission;
pub mod persistence;

// Re-export adapters
pub use cache::ScratchDirCache;
pub use clipboard::NativePasteboard;
pub use config::XdgConfigStore;
pub use event_tap::create_event_tap;
pub use keystroke::{create_fallback, EnigoPaste, FallbackPreference, FallbackTool};
pub use logging::{build_dispatch, NoOpLogger, TracingLogger};
pub use notification::{create_notifier, NotifyRustNotifier};
pub use permission::{AssumeGranted, EnigoPermission};
pub use persistence::JsonTextHistory;
