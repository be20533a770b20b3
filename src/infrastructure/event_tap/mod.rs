//! System-wide key event observation

#[cfg(not(target_os = "macos"))]
mod global_hotkey;
#[cfg(target_os = "macos")]
mod quartz;

#[cfg(not(target_os = "macos"))]
pub use self::global_hotkey::GlobalHotkeyTap;
#[cfg(target_os = "macos")]
pub use self::quartz::QuartzEventTap;

use crate::application::ports::KeyEventTap;

/// Create the key event tap for the current platform
pub fn create_event_tap() -> Box<dyn KeyEventTap> {
    #[cfg(target_os = "macos")]
    {
        Box::new(QuartzEventTap::new())
    }

    #[cfg(not(target_os = "macos"))]
    {
        Box::new(GlobalHotkeyTap::new())
    }
}
