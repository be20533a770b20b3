//! Wtype paste adapter for Wayland

use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{KeystrokeError, PasteKeystroke};

use super::tool::run_tool;

/// Wtype paste adapter (Wayland virtual keyboard protocol)
pub struct WtypePaste;

impl WtypePaste {
    pub fn new() -> Self {
        Self
    }

    fn args(settle: Duration) -> Vec<String> {
        vec![
            "-M".to_string(),
            "ctrl".to_string(),
            "-P".to_string(),
            "v".to_string(),
            "-s".to_string(),
            settle.as_millis().to_string(),
            "-p".to_string(),
            "v".to_string(),
            "-m".to_string(),
            "ctrl".to_string(),
        ]
    }
}

impl Default for WtypePaste {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasteKeystroke for WtypePaste {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        run_tool("wtype", &Self::args(settle)).await
    }

    fn name(&self) -> &'static str {
        "wtype"
    }
}
