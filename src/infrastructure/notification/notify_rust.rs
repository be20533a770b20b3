//! Desktop notifications via notify-rust

use std::time::Duration;

use async_trait::async_trait;
use notify_rust::{Notification, Timeout};

use crate::application::ports::{NotificationError, Notice, Notifier};

const APP_NAME: &str = "ClipTrail";

/// Shows notices as native desktop notifications
pub struct NotifyRustNotifier {
    timeout: Duration,
}

impl NotifyRustNotifier {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }

    fn build(&self, notice: &Notice) -> Notification {
        let mut notification = Notification::new();
        notification
            .appname(APP_NAME)
            .summary(&notice.summary)
            .body(&notice.body)
            .icon(notice.severity.icon_name())
            .timeout(Timeout::Milliseconds(self.timeout.as_millis() as u32));
        notification
    }
}

impl Default for NotifyRustNotifier {
    fn default() -> Self {
        Self::new(Duration::from_secs(4))
    }
}

#[async_trait]
impl Notifier for NotifyRustNotifier {
    async fn notify(&self, notice: &Notice) -> Result<(), NotificationError> {
        let notification = self.build(notice);

        // show() talks to the notification daemon synchronously
        tokio::task::spawn_blocking(move || {
            notification
                .show()
                .map(|_| ())
                .map_err(|e| NotificationError::SendFailed(e.to_string()))
        })
        .await
        .map_err(|e| NotificationError::Unavailable(e.to_string()))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_fields_carry_over() {
        let notifier = NotifyRustNotifier::default();
        let notification = notifier.build(&Notice::paste_failed("no permission"));
        assert_eq!(notification.summary, "Paste failed");
        assert_eq!(notification.body, "no permission");
        assert_eq!(notification.appname, APP_NAME);
    }
}
