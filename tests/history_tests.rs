//! History capture through the poll loop and the real scratch cache

mod common;

use std::sync::Arc;

use cliptrail::application::ports::CacheStore;
use cliptrail::application::{ChangeMonitor, ContentExtractor, HistoryStore};
use cliptrail::domain::history::{ClipContent, ClipboardSnapshot, FormatData};
use cliptrail::infrastructure::ScratchDirCache;
use tempfile::TempDir;

use common::{quiet, text, ScriptedBoard};

struct Rig {
    board: Arc<ScriptedBoard>,
    monitor: ChangeMonitor<Arc<ScriptedBoard>>,
    store: HistoryStore,
    _dir: TempDir,
}

fn rig(capacity: usize) -> Rig {
    let dir = TempDir::new().unwrap();
    let cache: Arc<dyn CacheStore> = Arc::new(ScratchDirCache::new(dir.path().join("cache")));
    let board = ScriptedBoard::new();
    let store = HistoryStore::new(capacity, Arc::clone(&cache), quiet()).unwrap();
    let monitor = ChangeMonitor::new(
        Arc::clone(&board),
        ContentExtractor::new(cache, quiet()),
        quiet(),
    );
    Rig {
        board,
        monitor,
        store,
        _dir: dir,
    }
}

fn texts(store: &HistoryStore) -> Vec<String> {
    store
        .get_all()
        .iter()
        .map(|e| e.as_text().unwrap_or_default().to_string())
        .collect()
}

fn png(seed: u8) -> ClipboardSnapshot {
    ClipboardSnapshot::empty().with("image/png", FormatData::Bytes(vec![0x89, b'P', b'N', b'G', seed]))
}

#[tokio::test]
async fn recopying_moves_entry_to_front() {
    let mut rig = rig(50);

    for s in ["hello", "hello", "world"] {
        rig.board.copy(text(s));
        rig.monitor.poll(&mut rig.store).await;
    }

    assert_eq!(texts(&rig.store), vec!["world", "hello"]);

    rig.board.copy(text("hello"));
    assert!(rig.monitor.poll(&mut rig.store).await);
    assert_eq!(texts(&rig.store), vec!["hello", "world"]);
}

#[tokio::test]
async fn identical_copy_after_removal_is_captured_again() {
    let mut rig = rig(50);

    rig.board.copy(text("secret"));
    assert!(rig.monitor.poll(&mut rig.store).await);
    assert!(rig.store.remove_at(0));
    assert!(rig.store.is_empty());

    rig.board.copy(text("secret"));
    assert!(rig.monitor.poll(&mut rig.store).await);
    assert_eq!(texts(&rig.store), vec!["secret"]);
}

#[tokio::test]
async fn oldest_entries_fall_off_at_capacity() {
    let mut rig = rig(10);

    for i in 1..=13 {
        rig.board.copy(text(&format!("t{}", i)));
        rig.monitor.poll(&mut rig.store).await;
        assert!(rig.store.len() <= rig.store.capacity());
    }

    let expected: Vec<String> = (4..=13).rev().map(|i| format!("t{}", i)).collect();
    assert_eq!(texts(&rig.store), expected);
}

#[tokio::test]
async fn unchanged_counter_captures_nothing() {
    let mut rig = rig(5);
    rig.board.copy(text("once"));

    assert!(rig.monitor.poll(&mut rig.store).await);
    assert!(!rig.monitor.poll(&mut rig.store).await);
    assert_eq!(rig.store.len(), 1);
}

#[tokio::test]
async fn evicted_image_file_is_deleted() {
    let mut rig = rig(1);

    rig.board.copy(png(1));
    rig.monitor.poll(&mut rig.store).await;
    let cached = rig.store.get(0).unwrap().cache_file().unwrap().to_path_buf();
    assert!(cached.exists());

    rig.board.copy(text("after"));
    rig.monitor.poll(&mut rig.store).await;

    assert!(!cached.exists());
    assert_eq!(texts(&rig.store), vec!["after"]);
}

#[tokio::test]
async fn clear_removes_every_cached_file() {
    let mut rig = rig(5);

    for seed in 0..3 {
        rig.board.copy(png(seed));
        rig.monitor.poll(&mut rig.store).await;
    }
    let files: Vec<_> = rig
        .store
        .get_all()
        .iter()
        .filter_map(|e| e.cache_file().map(|p| p.to_path_buf()))
        .collect();
    assert_eq!(files.len(), 3);

    rig.store.clear();

    assert!(rig.store.is_empty());
    assert!(files.iter().all(|f| !f.exists()));
}

#[tokio::test]
async fn file_copy_wins_over_its_text_uri() {
    let mut rig = rig(5);
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("report.txt");
    std::fs::write(&path, "x").unwrap();

    rig.board.copy(
        ClipboardSnapshot::empty()
            .with("public.utf8-plain-text", FormatData::Text(format!("file://{}", path.display())))
            .with("public.file-url", FormatData::Files(vec![path.clone()])),
    );
    rig.monitor.poll(&mut rig.store).await;

    assert!(matches!(
        rig.store.get(0).unwrap().content(),
        ClipContent::File(p) if *p == path
    ));
}
