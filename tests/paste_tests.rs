//! Restoring history entries to the clipboard

mod common;

use std::sync::Arc;

use chrono::Local;
use cliptrail::application::ports::CacheStore;
use cliptrail::application::{
    ChangeMonitor, ClipboardWriter, ContentExtractor, HistorySession, HistoryStore, PasteError,
    SessionError,
};
use cliptrail::domain::history::{ClipContent, ClipFormat, FormatData};
use cliptrail::domain::HistoryEntry;
use cliptrail::infrastructure::ScratchDirCache;
use tempfile::TempDir;

use common::{quiet, text, CountingKeystroke, Permission, ScriptedBoard};

fn writer(
    board: &Arc<ScriptedBoard>,
    granted: bool,
) -> (ClipboardWriter<Arc<ScriptedBoard>, CountingKeystroke>, CountingKeystroke) {
    let keystroke = CountingKeystroke::default();
    let writer = ClipboardWriter::new(
        Arc::clone(board),
        keystroke.clone(),
        Box::new(Permission(granted)),
        quiet(),
    );
    (writer, keystroke)
}

#[tokio::test]
async fn text_entry_lands_on_clipboard() {
    let board = ScriptedBoard::new();
    let (writer, keystroke) = writer(&board, true);

    assert!(writer.paste(&HistoryEntry::text("hello")).await);

    let reps = board.current().representations().to_vec();
    assert_eq!(reps.len(), 1);
    assert_eq!(reps[0].format, ClipFormat::Text);
    assert_eq!(reps[0].data, FormatData::Text("hello".to_string()));
    assert_eq!(keystroke.sent(), 1);
}

#[tokio::test]
async fn deleted_file_leaves_clipboard_alone() {
    let board = ScriptedBoard::new();
    board.copy(text("still here"));
    let (writer, keystroke) = writer(&board, true);

    let dir = TempDir::new().unwrap();
    let path = dir.path().join("gone.txt");
    std::fs::write(&path, "x").unwrap();
    let entry = HistoryEntry::new(ClipContent::File(path.clone()), Local::now());
    std::fs::remove_file(&path).unwrap();

    assert!(!writer.paste(&entry).await);
    assert_eq!(board.current(), text("still here"));
    assert!(board.writes().is_empty());
    assert_eq!(keystroke.sent(), 0);
}

#[tokio::test]
async fn existing_file_is_written_as_file_reference() {
    let board = ScriptedBoard::new();
    let (writer, _) = writer(&board, true);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("notes.md");
    std::fs::write(&path, "# notes").unwrap();

    writer
        .try_paste(&HistoryEntry::new(ClipContent::File(path.clone()), Local::now()))
        .await
        .unwrap();

    let reps = board.current().representations().to_vec();
    assert_eq!(reps[0].format, ClipFormat::FileList);
    assert_eq!(reps[0].data, FormatData::Files(vec![path]));
}

#[tokio::test]
async fn missing_permission_changes_nothing() {
    let board = ScriptedBoard::new();
    board.copy(text("before"));
    let (writer, keystroke) = writer(&board, false);

    let err = writer.try_paste(&HistoryEntry::text("after")).await.unwrap_err();

    assert!(matches!(err, PasteError::PermissionDenied));
    assert_eq!(board.current(), text("before"));
    assert_eq!(keystroke.sent(), 0);
}

#[tokio::test]
async fn session_pastes_by_index_and_shuts_down_once() {
    let dir = TempDir::new().unwrap();
    let cache_dir = dir.path().join("cache");
    let cache: Arc<dyn CacheStore> = Arc::new(ScratchDirCache::new(cache_dir.clone()));
    let board = ScriptedBoard::new();
    let (clipboard_writer, keystroke) = writer(&board, true);

    let store = HistoryStore::new(5, Arc::clone(&cache), quiet()).unwrap();
    let monitor = ChangeMonitor::new(
        Arc::clone(&board),
        ContentExtractor::new(Arc::clone(&cache), quiet()),
        quiet(),
    );
    let mut session = HistorySession::new(store, monitor, clipboard_writer, cache, quiet());

    board.copy(text("first"));
    session.refresh().await;
    board.copy(text("second"));
    session.refresh().await;

    session.paste_at(1).await.unwrap();
    assert_eq!(board.current().representations()[0].data, FormatData::Text("first".to_string()));
    assert_eq!(keystroke.sent(), 1);

    assert!(matches!(
        session.paste_at(7).await,
        Err(SessionError::NoSuchEntry(7))
    ));

    session.shutdown();
    session.shutdown();
    assert!(session.is_shut_down());
    assert!(session.is_empty());
    assert!(!cache_dir.exists());
}
