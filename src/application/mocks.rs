//! In-memory port implementations for use case tests

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Local};

use crate::domain::history::{ClipboardSnapshot, Representation};
use crate::domain::hotkey::{HotkeyCombo, KeyEvent};

use super::ports::{
    CacheError, CacheStore, ClipboardError, InputPermission, KeyEventSink, KeyEventTap,
    KeystrokeError, LogLevel, Logger, PasteKeystroke, Pasteboard, TapError, TapHandle,
};

pub struct RecordingLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
        }
    }

    pub fn messages(&self, level: LogLevel) -> Vec<String> {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(l, _)| *l == level)
            .map(|(_, m)| m.clone())
            .collect()
    }
}

impl Logger for RecordingLogger {
    fn log(&self, level: LogLevel, _component: &str, message: &str) {
        self.records.lock().unwrap().push((level, message.to_string()));
    }
}

#[derive(Default)]
struct CacheState {
    files: HashMap<PathBuf, Vec<u8>>,
    next: usize,
    fail_saves: bool,
    fail_deletes: bool,
    disposals: usize,
}

pub struct MemoryCache {
    dir: PathBuf,
    state: Mutex<CacheState>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self {
            dir: PathBuf::from("/mem/cache"),
            state: Mutex::new(CacheState::default()),
        }
    }

    pub fn contains(&self, path: &Path) -> bool {
        self.state.lock().unwrap().files.contains_key(path)
    }

    pub fn file_count(&self) -> usize {
        self.state.lock().unwrap().files.len()
    }

    pub fn fail_saves(&self, fail: bool) {
        self.state.lock().unwrap().fail_saves = fail;
    }

    pub fn fail_deletes(&self, fail: bool) {
        self.state.lock().unwrap().fail_deletes = fail;
    }

    pub fn disposals(&self) -> usize {
        self.state.lock().unwrap().disposals
    }
}

impl CacheStore for MemoryCache {
    fn save(
        &self,
        bytes: &[u8],
        extension: &str,
        _captured_at: DateTime<Local>,
    ) -> Result<PathBuf, CacheError> {
        let mut state = self.state.lock().unwrap();
        let path = self.dir.join(format!("clip_{}.{}", state.next, extension));
        if state.fail_saves {
            return Err(CacheError::Write {
                path,
                message: "disk full".to_string(),
            });
        }
        state.next += 1;
        state.files.insert(path.clone(), bytes.to_vec());
        Ok(path)
    }

    fn delete(&self, path: &Path) -> Result<(), CacheError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_deletes {
            return Err(CacheError::Delete {
                path: path.to_path_buf(),
                message: "permission denied".to_string(),
            });
        }
        state.files.remove(path);
        Ok(())
    }

    fn clear(&self) -> Result<(), CacheError> {
        self.state.lock().unwrap().files.clear();
        Ok(())
    }

    fn dispose(&self) -> Result<(), CacheError> {
        let mut state = self.state.lock().unwrap();
        state.files.clear();
        state.disposals += 1;
        Ok(())
    }

    fn dir(&self) -> &Path {
        &self.dir
    }
}

#[derive(Default)]
struct BoardState {
    count: u64,
    snapshot: ClipboardSnapshot,
    written: Vec<Representation>,
    writes: usize,
    fail_reads: bool,
    fail_writes: bool,
}

pub struct FakePasteboard {
    state: Mutex<BoardState>,
}

impl FakePasteboard {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(BoardState::default()),
        }
    }

    /// Simulate another application copying something
    pub fn set(&self, snapshot: ClipboardSnapshot) {
        let mut state = self.state.lock().unwrap();
        state.count += 1;
        state.snapshot = snapshot;
    }

    pub fn written(&self) -> Vec<Representation> {
        self.state.lock().unwrap().written.clone()
    }

    pub fn current(&self) -> ClipboardSnapshot {
        self.state.lock().unwrap().snapshot.clone()
    }

    pub fn writes(&self) -> usize {
        self.state.lock().unwrap().writes
    }

    pub fn fail_reads(&self, fail: bool) {
        self.state.lock().unwrap().fail_reads = fail;
    }

    pub fn fail_writes(&self, fail: bool) {
        self.state.lock().unwrap().fail_writes = fail;
    }
}

#[async_trait]
impl Pasteboard for FakePasteboard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        Ok(self.state.lock().unwrap().count)
    }

    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        let state = self.state.lock().unwrap();
        if state.fail_reads {
            return Err(ClipboardError::ReadFailed("locked".to_string()));
        }
        Ok(state.snapshot.clone())
    }

    async fn write(&self, representations: Vec<Representation>) -> Result<(), ClipboardError> {
        let mut state = self.state.lock().unwrap();
        if state.fail_writes {
            return Err(ClipboardError::WriteFailed("denied".to_string()));
        }
        state.count += 1;
        state.writes += 1;
        state.snapshot = ClipboardSnapshot::new(Vec::new(), representations.clone());
        state.written = representations;
        Ok(())
    }
}

pub struct FakeKeystroke {
    name: &'static str,
    fail: bool,
    calls: Arc<Mutex<Vec<Duration>>>,
}

impl FakeKeystroke {
    pub fn ok(name: &'static str) -> Self {
        Self {
            name,
            fail: false,
            calls: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn failing(name: &'static str) -> Self {
        Self {
            fail: true,
            ..Self::ok(name)
        }
    }

    pub fn calls(&self) -> Arc<Mutex<Vec<Duration>>> {
        Arc::clone(&self.calls)
    }
}

#[async_trait]
impl PasteKeystroke for FakeKeystroke {
    async fn send_paste(&self, settle: Duration) -> Result<(), KeystrokeError> {
        self.calls.lock().unwrap().push(settle);
        if self.fail {
            return Err(KeystrokeError::SendFailed("no display".to_string()));
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        self.name
    }
}

pub struct FakePermission(pub bool);

impl InputPermission for FakePermission {
    fn is_granted(&self) -> bool {
        self.0
    }
}

/// Tap whose events are pushed by the test
#[derive(Clone)]
pub struct FakeTap {
    sink: Arc<Mutex<Option<KeyEventSink>>>,
    refuse: bool,
}

impl FakeTap {
    pub fn new() -> Self {
        Self {
            sink: Arc::new(Mutex::new(None)),
            refuse: false,
        }
    }

    pub fn refusing() -> Self {
        Self {
            refuse: true,
            ..Self::new()
        }
    }

    pub fn is_installed(&self) -> bool {
        self.sink.lock().unwrap().is_some()
    }

    pub fn emit(&self, event: KeyEvent) {
        if let Some(sink) = self.sink.lock().unwrap().as_mut() {
            sink(event);
        }
    }
}

struct FakeTapHandle {
    sink: Arc<Mutex<Option<KeyEventSink>>>,
}

impl TapHandle for FakeTapHandle {
    fn remove(self: Box<Self>) {
        self.sink.lock().unwrap().take();
    }
}

impl KeyEventTap for FakeTap {
    fn install(
        &self,
        _combo: HotkeyCombo,
        sink: KeyEventSink,
    ) -> Result<Box<dyn TapHandle>, TapError> {
        if self.refuse {
            return Err(TapError::Refused("input monitoring not allowed".to_string()));
        }
        *self.sink.lock().unwrap() = Some(sink);
        Ok(Box::new(FakeTapHandle {
            sink: Arc::clone(&self.sink),
        }))
    }
}
