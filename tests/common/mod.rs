//! Scripted adapters shared by the integration tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use cliptrail::application::ports::{
    ClipboardError, InputPermission, KeyEventSink, KeyEventTap, KeystrokeError, PasteKeystroke,
    Pasteboard, SharedLogger, TapError, TapHandle,
};
use cliptrail::domain::history::{ClipboardSnapshot, FormatData, Representation};
use cliptrail::domain::hotkey::{HotkeyCombo, KeyEvent};
use cliptrail::infrastructure::NoOpLogger;

pub fn quiet() -> SharedLogger {
    Arc::new(NoOpLogger::new())
}

pub fn text(s: &str) -> ClipboardSnapshot {
    ClipboardSnapshot::empty().with("public.utf8-plain-text", FormatData::Text(s.to_string()))
}

/// Clipboard driven by the test, bumping its counter on every change
#[derive(Default)]
pub struct ScriptedBoard {
    inner: Mutex<(u64, ClipboardSnapshot)>,
    writes: Mutex<Vec<Vec<Representation>>>,
}

impl ScriptedBoard {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn copy(&self, snapshot: ClipboardSnapshot) {
        let mut inner = self.inner.lock().unwrap();
        inner.0 += 1;
        inner.1 = snapshot;
    }

    pub fn current(&self) -> ClipboardSnapshot {
        self.inner.lock().unwrap().1.clone()
    }

    pub fn writes(&self) -> Vec<Vec<Representation>> {
        self.writes.lock().unwrap().clone()
    }
}

#[async_trait]
impl Pasteboard for ScriptedBoard {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        Ok(self.inner.lock().unwrap().0)
    }

    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        Ok(self.current())
    }

    async fn write(&self, representations: Vec<Representation>) -> Result<(), ClipboardError> {
        self.writes.lock().unwrap().push(representations.clone());
        let mut inner = self.inner.lock().unwrap();
        inner.0 += 1;
        inner.1 = ClipboardSnapshot::new(Vec::new(), representations);
        Ok(())
    }
}

/// Keystroke that counts deliveries
#[derive(Clone, Default)]
pub struct CountingKeystroke {
    sent: Arc<Mutex<usize>>,
}

impl CountingKeystroke {
    pub fn sent(&self) -> usize {
        *self.sent.lock().unwrap()
    }
}

#[async_trait]
impl PasteKeystroke for CountingKeystroke {
    async fn send_paste(&self, _settle: Duration) -> Result<(), KeystrokeError> {
        *self.sent.lock().unwrap() += 1;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "counting"
    }
}

pub struct Permission(pub bool);

impl InputPermission for Permission {
    fn is_granted(&self) -> bool {
        self.0
    }
}

/// Tap that hands events straight to the installed sink.
///
/// Removal keeps the detached sink around so a test can replay an event
/// the OS had already queued when the tap went away.
#[derive(Clone, Default)]
pub struct ManualTap {
    sink: Arc<Mutex<Option<KeyEventSink>>>,
    detached: Arc<Mutex<Option<KeyEventSink>>>,
}

impl ManualTap {
    pub fn press(&self, event: KeyEvent) {
        if let Some(sink) = self.sink.lock().unwrap().as_mut() {
            sink(event);
        }
    }

    pub fn replay_late(&self, event: KeyEvent) {
        if let Some(sink) = self.detached.lock().unwrap().as_mut() {
            sink(event);
        }
    }

    pub fn is_installed(&self) -> bool {
        self.sink.lock().unwrap().is_some()
    }
}

struct ManualHandle {
    sink: Arc<Mutex<Option<KeyEventSink>>>,
    detached: Arc<Mutex<Option<KeyEventSink>>>,
}

impl TapHandle for ManualHandle {
    fn remove(self: Box<Self>) {
        let sink = self.sink.lock().unwrap().take();
        *self.detached.lock().unwrap() = sink;
    }
}

impl KeyEventTap for ManualTap {
    fn install(
        &self,
        _combo: HotkeyCombo,
        sink: KeyEventSink,
    ) -> Result<Box<dyn TapHandle>, TapError> {
        *self.sink.lock().unwrap() = Some(sink);
        Ok(Box::new(ManualHandle {
            sink: Arc::clone(&self.sink),
            detached: Arc::clone(&self.detached),
        }))
    }
}
