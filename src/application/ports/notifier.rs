//! Desktop notification port

use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum NotificationError {
    #[error("Notification service unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to show notification: {0}")]
    SendFailed(String),
}

/// How loudly a notice should present itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    /// Freedesktop icon name
    pub const fn icon_name(&self) -> &'static str {
        match self {
            Self::Info => "edit-paste",
            Self::Warning => "dialog-warning",
            Self::Error => "dialog-error",
        }
    }
}

/// A message raised by the daemon while no terminal may be in view
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub summary: String,
    pub body: String,
    pub severity: Severity,
}

impl Notice {
    pub fn paste_failed(reason: impl Into<String>) -> Self {
        Self {
            summary: "Paste failed".to_string(),
            body: reason.into(),
            severity: Severity::Error,
        }
    }

    pub fn hotkey_unavailable(combo: impl std::fmt::Display, reason: impl Into<String>) -> Self {
        Self {
            summary: format!("Hotkey {} unavailable", combo),
            body: reason.into(),
            severity: Severity::Warning,
        }
    }
}

/// Port for desktop notifications
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn notify(&self, notice: &Notice) -> Result<(), NotificationError>;
}

#[async_trait]
impl Notifier for Box<dyn Notifier> {
    async fn notify(&self, notice: &Notice) -> Result<(), NotificationError> {
        self.as_ref().notify(notice).await
    }
}
