//! Input simulation permission probe

use enigo::{Enigo, Settings};

use crate::application::ports::InputPermission;

/// Probes input simulation by opening an enigo connection.
///
/// On macOS this fails without the Accessibility permission; on Linux it
/// fails without a reachable display server.
pub struct EnigoPermission;

impl EnigoPermission {
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoPermission {
    fn default() -> Self {
        Self::new()
    }
}

impl InputPermission for EnigoPermission {
    fn is_granted(&self) -> bool {
        Enigo::new(&Settings::default()).is_ok()
    }
}

/// Permission that is always granted, for tool-only paste setups
pub struct AssumeGranted;

impl InputPermission for AssumeGranted {
    fn is_granted(&self) -> bool {
        true
    }
}
