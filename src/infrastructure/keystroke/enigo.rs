//! Cross-platform paste keystroke adapter using enigo
//!
//! Works on Windows, macOS, and Linux (X11; Wayland through libei where
//! supported by the compositor).

use std::time::Duration;

use async_trait::async_trait;
use enigo::{Direction, Enigo, Key, Keyboard, Settings};

use crate::application::ports::{KeystrokeError, PasteKeystroke};

/// Modifier conventionally bound to paste on this platform
#[cfg(target_os = "macos")]
const PASTE_MODIFIER: Key = Key::Meta;
#[cfg(not(target_os = "macos"))]
const PASTE_MODIFIER: Key = Key::Control;

/// Paste chord via enigo (Command+V on macOS, Control+V elsewhere)
pub struct EnigoPaste;

impl EnigoPaste {
    /// Create a new enigo paste adapter
    pub fn new() -> Self {
        Self
    }
}

impl Default for EnigoPaste {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteKeystroke for EnigoPaste {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        // enigo operations are blocking, so run in spawn_blocking
        tokio::task::spawn_blocking(move || {
            let mut enigo = Enigo::new(&Settings::default())
                .map_err(|e| KeystrokeError::Unavailable(e.to_string()))?;

            enigo
                .key(PASTE_MODIFIER, Direction::Press)
                .map_err(|e| KeystrokeError::SendFailed(e.to_string()))?;

            let chord = enigo
                .key(Key::Unicode('v'), Direction::Press)
                .and_then(|()| {
                    std::thread::sleep(settle);
                    enigo.key(Key::Unicode('v'), Direction::Release)
                });

            // Always release the modifier so it cannot stick
            let release = enigo.key(PASTE_MODIFIER, Direction::Release);

            chord
                .and(release)
                .map_err(|e| KeystrokeError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| KeystrokeError::SendFailed(format!("Task join error: {}", e)))?
    }

    fn name(&self) -> &'static str {
        "enigo"
    }
}
