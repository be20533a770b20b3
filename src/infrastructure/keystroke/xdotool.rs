//! Xdotool paste adapter for X11

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

use super::tool::run_tool;

/// Xdotool paste adapter
///
/// Presses Control+V with the current modifiers cleared, holding the chord
/// for the settle delay.
pub struct XdotoolPaste;

impl XdotoolPaste {
    pub fn new() -> Self {
        Self
    }

    fn args(settle: Duration) -> Vec<String> {
        vec![
            "keydown".to_string(),
            "--clearmodifiers".to_string(),
            "ctrl+v".to_string(),
            "sleep".to_string(),
            format!("{:.3}", settle.as_secs_f64()),
            "keyup".to_string(),
            "ctrl+v".to_string(),
        ]
    }
}

impl Default for XdotoolPaste {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteKeystroke for XdotoolPaste {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        run_tool("xdotool", &Self::args(settle)).await
    }

    fn name(&self) -> &'static str {
        "xdotool"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_hold_chord_for_settle() {
        let args = XdotoolPaste::args(Duration::from_millis(100));
        assert_eq!(
            args,
            vec!["keydown", "--clearmodifiers", "ctrl+v", "sleep", "0.100", "keyup", "ctrl+v"]
        );
    }
}
