//! Ydotool paste adapter (uinput, works on X11 and Wayland)

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

use super::tool::run_tool;

/// Linux input event codes
const KEY_LEFTCTRL: u16 = 29;
const KEY_V: u16 = 47;

/// Ydotool paste adapter
///
/// Requires the ydotoold daemon to be running.
pub struct YdotoolPaste;

impl YdotoolPaste {
    pub fn new() -> Self {
        Self
    }

    fn args(settle: Duration) -> Vec<String> {
        vec![
            "key".to_string(),
            "--key-delay".to_string(),
            settle.as_millis().to_string(),
            format!("{}:1", KEY_LEFTCTRL),
            format!("{}:1", KEY_V),
            format!("{}:0", KEY_V),
            format!("{}:0", KEY_LEFTCTRL),
        ]
    }
}

impl Default for YdotoolPaste {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteKeystroke for YdotoolPaste {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        run_tool("ydotool", &Self::args(settle)).await
    }

    fn name(&self) -> &'static str {
        "ydotool"
    }
}
