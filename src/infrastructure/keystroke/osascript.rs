//! AppleScript paste adapter for macOS

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

use super::tool::run_tool;

const PASTE_SCRIPT: &str = r#"tell application "System Events" to keystroke "v" using command down"#;

/// Sends Command+V through System Events.
///
/// System Events owns the key timing, so the settle delay is applied before
/// the keystroke instead.
pub struct OsascriptPaste;

impl OsascriptPaste {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OsascriptPaste {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteKeystroke for OsascriptPaste {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        tokio::time::sleep(settle).await;
        run_tool("osascript", &["-e".to_string(), PASTE_SCRIPT.to_string()]).await
    }

    fn name(&self) -> &'static str {
        "osascript"
    }
}
