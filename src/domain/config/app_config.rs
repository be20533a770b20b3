//! Application configuration value object

use std::path::PathBuf;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::domain::hotkey::{HotkeyCombo, DEFAULT_HOTKEY};

/// Default number of history entries
pub const DEFAULT_MAX_HISTORY: usize = 50;

/// Default clipboard poll cadence
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 500;

/// Allowed poll cadence range
pub const POLL_INTERVAL_RANGE_MS: (u64, u64) = (100, 5000);

/// Default settle delay between paste key-down and key-up
pub const DEFAULT_PASTE_SETTLE_MS: u64 = 100;

/// Default fallback paste tool preference
pub const DEFAULT_PASTE_FALLBACK: &str = "auto";

/// Default log filter
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub max_history: Option<usize>,
    pub poll_interval_ms: Option<u64>,
    pub hotkey: Option<String>,
    pub paste_settle_ms: Option<u64>,
    pub paste_fallback: Option<String>,
    pub cache_dir: Option<String>,
    pub persist_text: Option<bool>,
    pub notify: Option<bool>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            max_history: Some(DEFAULT_MAX_HISTORY),
            poll_interval_ms: Some(DEFAULT_POLL_INTERVAL_MS),
            hotkey: Some(DEFAULT_HOTKEY.to_string()),
            paste_settle_ms: Some(DEFAULT_PASTE_SETTLE_MS),
            paste_fallback: Some(DEFAULT_PASTE_FALLBACK.to_string()),
            cache_dir: None,
            persist_text: Some(false),
            notify: Some(false),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            max_history: other.max_history.or(self.max_history),
            poll_interval_ms: other.poll_interval_ms.or(self.poll_interval_ms),
            hotkey: other.hotkey.or(self.hotkey),
            paste_settle_ms: other.paste_settle_ms.or(self.paste_settle_ms),
            paste_fallback: other.paste_fallback.or(self.paste_fallback),
            cache_dir: other.cache_dir.or(self.cache_dir),
            persist_text: other.persist_text.or(self.persist_text),
            notify: other.notify.or(self.notify),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Get history capacity, or default if not set/zero
    pub fn max_history_or_default(&self) -> usize {
        self.max_history
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_MAX_HISTORY)
    }

    /// Get poll interval, clamped to the allowed range
    pub fn poll_interval_or_default(&self) -> Duration {
        let (min, max) = POLL_INTERVAL_RANGE_MS;
        let ms = self
            .poll_interval_ms
            .unwrap_or(DEFAULT_POLL_INTERVAL_MS)
            .clamp(min, max);
        Duration::from_millis(ms)
    }

    /// Get hotkey as parsed combo, or default if not set/invalid
    pub fn hotkey_or_default(&self) -> HotkeyCombo {
        self.hotkey
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get paste settle delay
    pub fn paste_settle_or_default(&self) -> Duration {
        Duration::from_millis(self.paste_settle_ms.unwrap_or(DEFAULT_PASTE_SETTLE_MS))
    }

    /// Get fallback paste tool preference, or "auto" if not set
    pub fn paste_fallback_or_default(&self) -> &str {
        self.paste_fallback
            .as_deref()
            .unwrap_or(DEFAULT_PASTE_FALLBACK)
    }

    /// Get scratch directory, or `<tmp>/cliptrail-<pid>` if not set
    pub fn cache_dir_or_default(&self) -> PathBuf {
        match self.cache_dir.as_deref().filter(|s| !s.is_empty()) {
            Some(dir) => PathBuf::from(dir),
            None => std::env::temp_dir().join(format!("cliptrail-{}", std::process::id())),
        }
    }

    /// Get text persistence setting, or false if not set
    pub fn persist_text_or_default(&self) -> bool {
        self.persist_text.unwrap_or(false)
    }

    /// Get notify setting, or false if not set
    pub fn notify_or_default(&self) -> bool {
        self.notify.unwrap_or(false)
    }

    /// Get log filter, or "info" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
