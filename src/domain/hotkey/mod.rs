//! Hotkey domain module

mod combo;
mod matcher;
mod state;

pub use combo::{HotkeyCombo, HotkeyKey, Modifiers, DEFAULT_HOTKEY};
pub use matcher::{HotkeyMatcher, KeyEvent, KeyEventKind};
pub use state::{DetectorLifecycle, DetectorState, InvalidStateTransition};
