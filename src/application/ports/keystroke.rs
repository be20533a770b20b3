//! Paste keystroke port interface

use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

/// Keystroke errors
#[derive(Debug, Clone, Error)]
pub enum KeystrokeError {
    #[error("{0} not found. Please install it or choose another paste_fallback.")]
    ToolNotFound(&'static str),

    #[error("Input simulation unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to send paste keystroke: {0}")]
    SendFailed(String),
}

/// Port for simulating the host's paste shortcut
#[async_trait]
pub trait PasteKeystroke: Send + Sync {
    /// Press the paste chord into the focused application.
    ///
    /// # Arguments
    /// * `settle` - Delay between key-down and key-up
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError>;

    /// Short name for logs
    fn name(&self) -> &'static str;
}

/// Blanket implementation for boxed keystroke types
#[async_trait]
impl PasteKeystroke for Box<dyn PasteKeystroke> {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        self.as_ref().send_paste(settle).await
    }

    fn name(&self) -> &'static str {
        self.as_ref().name()
    }
}
