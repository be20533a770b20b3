//! History session facade for the popup / menu surface

use std::sync::Arc;

use thiserror::Error;

use crate::domain::history::{ClipContent, HistoryEntry};

use super::history_store::HistoryStore;
use super::monitor::ChangeMonitor;
use super::ports::{CacheStore, PasteKeystroke, Pasteboard, SharedLogger, StoredText};
use super::writer::{ClipboardWriter, PasteError};

const COMPONENT: &str = "session";

/// Errors from session operations
#[derive(Debug, Error)]
pub enum SessionError {
    #[error("No history entry at position {0}")]
    NoSuchEntry(usize),

    #[error(transparent)]
    Paste(#[from] PasteError),
}

/// Ties the capture path and the restore path together.
///
/// Everything runs on the caller's loop; the session is the single writer
/// of the history.
pub struct HistorySession<P: Pasteboard, K: PasteKeystroke> {
    store: HistoryStore,
    monitor: ChangeMonitor<P>,
    writer: ClipboardWriter<P, K>,
    cache: Arc<dyn CacheStore>,
    logger: SharedLogger,
    shut_down: bool,
}

impl<P: Pasteboard, K: PasteKeystroke> HistorySession<P, K> {
    pub fn new(
        store: HistoryStore,
        monitor: ChangeMonitor<P>,
        writer: ClipboardWriter<P, K>,
        cache: Arc<dyn CacheStore>,
        logger: SharedLogger,
    ) -> Self {
        Self {
            store,
            monitor,
            writer,
            cache,
            logger,
            shut_down: false,
        }
    }

    /// Run one poll cycle so the history reflects the current clipboard
    pub async fn refresh(&mut self) -> bool {
        self.monitor.poll(&mut self.store).await
    }

    /// Entries, most recent first
    pub fn entries(&self) -> &[HistoryEntry] {
        self.store.get_all()
    }

    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }

    /// Paste the entry at `index` into the focused application
    pub async fn paste_at(&self, index: usize) -> Result<(), SessionError> {
        let entry = self
            .store
            .get(index)
            .ok_or(SessionError::NoSuchEntry(index))?;
        self.writer.try_paste(entry).await?;
        Ok(())
    }

    pub fn remove_at(&mut self, index: usize) -> bool {
        self.store.remove_at(index)
    }

    pub fn clear(&mut self) {
        self.store.clear();
        self.logger.info(COMPONENT, "History cleared");
    }

    /// Seed the history from persisted text entries (most recent first).
    pub fn restore_text(&mut self, entries: Vec<StoredText>) {
        let count = entries.len();
        for stored in entries.into_iter().rev() {
            if stored.text.is_empty() {
                continue;
            }
            self.store.capture(HistoryEntry::new(
                ClipContent::Text(stored.text),
                stored.timestamp,
            ));
        }
        self.logger
            .debug(COMPONENT, &format!("Restored {} text entries", count));
    }

    /// Text entries for persistence, most recent first
    pub fn text_entries(&self) -> Vec<StoredText> {
        self.store
            .get_all()
            .iter()
            .filter_map(|e| {
                e.as_text().map(|text| StoredText {
                    text: text.to_string(),
                    timestamp: e.captured_at(),
                })
            })
            .collect()
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    /// Release every cache file and remove the scratch directory.
    /// Only the first call has an effect.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        self.store.clear();
        if let Err(e) = self.cache.dispose() {
            self.logger.warn(COMPONENT, &e.to_string());
        }
        self.logger.info(COMPONENT, "Session shut down");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::extract::ContentExtractor;
    use crate::application::mocks::{
        FakeKeystroke, FakePasteboard, FakePermission, MemoryCache, RecordingLogger,
    };
    use crate::domain::history::{ClipboardSnapshot, FormatData};
    use chrono::{Duration as ChronoDuration, Local};

    type TestSession = HistorySession<Arc<FakePasteboard>, FakeKeystroke>;

    fn session(capacity: usize) -> (TestSession, Arc<FakePasteboard>, Arc<MemoryCache>) {
        let board = Arc::new(FakePasteboard::new());
        let cache = Arc::new(MemoryCache::new());
        let logger = Arc::new(RecordingLogger::new());
        let store = HistoryStore::new(capacity, cache.clone(), logger.clone()).unwrap();
        let monitor = ChangeMonitor::new(
            board.clone(),
            ContentExtractor::new(cache.clone(), logger.clone()),
            logger.clone(),
        );
        let writer = ClipboardWriter::new(
            board.clone(),
            FakeKeystroke::ok("enigo"),
            Box::new(FakePermission(true)),
            logger.clone(),
        );
        let session = HistorySession::new(store, monitor, writer, cache.clone(), logger);
        (session, board, cache)
    }

    fn copy(board: &FakePasteboard, text: &str) {
        board.set(ClipboardSnapshot::empty().with("text/plain", FormatData::Text(text.to_string())));
    }

    fn texts(session: &TestSession) -> Vec<&str> {
        session.entries().iter().filter_map(|e| e.as_text()).collect()
    }

    #[tokio::test]
    async fn refresh_captures_latest_copy() {
        let (mut session, board, _) = session(10);
        copy(&board, "hello");
        assert!(session.refresh().await);
        assert_eq!(texts(&session), vec!["hello"]);
    }

    #[tokio::test]
    async fn paste_then_refresh_moves_entry_to_front() {
        let (mut session, board, _) = session(10);
        copy(&board, "first");
        session.refresh().await;
        copy(&board, "second");
        session.refresh().await;

        session.paste_at(1).await.unwrap();
        session.refresh().await;
        assert_eq!(texts(&session), vec!["first", "second"]);
    }

    #[tokio::test]
    async fn paste_out_of_range() {
        let (session, _, _) = session(10);
        let err = session.paste_at(3).await.unwrap_err();
        assert!(matches!(err, SessionError::NoSuchEntry(3)));
    }

    #[tokio::test]
    async fn shutdown_disposes_exactly_once() {
        let (mut session, board, cache) = session(10);
        board.set(ClipboardSnapshot::empty().with("image/png", FormatData::Bytes(b"PNG".to_vec())));
        session.refresh().await;
        assert_eq!(cache.file_count(), 1);

        session.shutdown();
        session.shutdown();
        assert!(session.is_empty());
        assert!(session.is_shut_down());
        assert_eq!(cache.file_count(), 0);
        assert_eq!(cache.disposals(), 1);
    }

    #[test]
    fn restore_text_keeps_recency_order() {
        let (mut session, _, _) = session(10);
        let now = Local::now();
        session.restore_text(vec![
            StoredText { text: "newest".into(), timestamp: now },
            StoredText { text: "older".into(), timestamp: now - ChronoDuration::minutes(1) },
            StoredText { text: "newest".into(), timestamp: now - ChronoDuration::minutes(2) },
        ]);
        assert_eq!(texts(&session), vec!["newest", "older"]);
    }

    #[tokio::test]
    async fn text_entries_skip_binary_content() {
        let (mut session, board, _) = session(10);
        copy(&board, "keep");
        session.refresh().await;
        board.set(ClipboardSnapshot::empty().with("image/png", FormatData::Bytes(b"PNG".to_vec())));
        session.refresh().await;

        let stored = session.text_entries();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].text, "keep");
    }
}
