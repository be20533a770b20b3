//! Key event tap port interface

use thiserror::Error;

use crate::domain::hotkey::{HotkeyCombo, KeyEvent};

/// Event tap errors
#[derive(Debug, Clone, Error)]
pub enum TapError {
    /// The OS refused to install the tap, usually for lack of permission
    #[error("Key event tap refused by the OS: {0}")]
    Refused(String),

    #[error("Failed to install key event tap: {0}")]
    Failed(String),
}

/// Receives every key event observed by the tap.
///
/// May be invoked from a thread other than the one that installed the tap.
pub type KeyEventSink = Box<dyn FnMut(KeyEvent) + Send + 'static>;

/// Installed tap. Events stop flowing once `remove` returns.
pub trait TapHandle: Send {
    /// Detach the tap, blocking until no further events can be delivered.
    fn remove(self: Box<Self>);
}

/// Port for system-wide key event observation.
///
/// Taps are listen-only: events are never consumed or altered.
pub trait KeyEventTap: Send + Sync {
    /// Install the tap.
    ///
    /// `combo` lets registration-based backends subscribe to just the
    /// target chord; taps that see every key may ignore it.
    fn install(
        &self,
        combo: HotkeyCombo,
        sink: KeyEventSink,
    ) -> Result<Box<dyn TapHandle>, TapError>;
}

impl KeyEventTap for Box<dyn KeyEventTap> {
    fn install(
        &self,
        combo: HotkeyCombo,
        sink: KeyEventSink,
    ) -> Result<Box<dyn TapHandle>, TapError> {
        self.as_ref().install(combo, sink)
    }
}
