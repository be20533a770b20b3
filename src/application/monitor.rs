//! Clipboard change detection

use super::extract::ContentExtractor;
use super::history_store::HistoryStore;
use super::ports::{Pasteboard, SharedLogger};

const COMPONENT: &str = "monitor";

/// Polls the clipboard change counter and captures new content.
///
/// The first poll always inspects the clipboard so content copied before
/// startup is captured.
pub struct ChangeMonitor<P: Pasteboard> {
    pasteboard: P,
    extractor: ContentExtractor,
    logger: SharedLogger,
    last_seen: Option<u64>,
}

impl<P: Pasteboard> ChangeMonitor<P> {
    pub fn new(pasteboard: P, extractor: ContentExtractor, logger: SharedLogger) -> Self {
        Self {
            pasteboard,
            extractor,
            logger,
            last_seen: None,
        }
    }

    /// Last change counter value processed
    pub fn last_seen(&self) -> Option<u64> {
        self.last_seen
    }

    /// Run one poll cycle. Returns true when an entry was captured.
    ///
    /// Every failure is logged and absorbed. Once a change has been looked
    /// at, the counter advances even if nothing was captured.
    pub async fn poll(&mut self, store: &mut HistoryStore) -> bool {
        let count = match self.pasteboard.change_count().await {
            Ok(count) => count,
            Err(e) => {
                self.logger.warn(COMPONENT, &e.to_string());
                return false;
            }
        };

        if self.last_seen == Some(count) {
            return false;
        }

        let captured = match self.pasteboard.snapshot().await {
            Ok(snapshot) => match self.extractor.extract(&snapshot) {
                Some(entry) => {
                    store.capture(entry);
                    true
                }
                None => {
                    self.logger.debug(COMPONENT, "No recognized clipboard format");
                    false
                }
            },
            Err(e) => {
                self.logger.warn(COMPONENT, &e.to_string());
                false
            }
        };

        self.last_seen = Some(count);
        captured
    }
}
