//! Emulated clipboard change counter

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::Mutex;

use crate::domain::history::{ClipboardSnapshot, FormatData};

#[derive(Debug, Default)]
struct CounterState {
    count: u64,
    last: Option<u64>,
}

/// Change counter for clipboards that do not expose one.
///
/// Each observed fingerprint that differs from the previous one bumps the
/// counter, so it only ever increases.
#[derive(Debug, Default)]
pub struct ChangeCounter {
    state: Mutex<CounterState>,
}

impl ChangeCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a fingerprint and return the current count
    pub fn observe(&self, fingerprint: u64) -> u64 {
        let mut state = self.state.lock().unwrap_or_else(|p| p.into_inner());
        if state.last != Some(fingerprint) {
            state.count += 1;
            state.last = Some(fingerprint);
        }
        state.count
    }

    /// Hash of the declared formats and their content
    pub fn fingerprint(snapshot: &ClipboardSnapshot) -> u64 {
        let mut hasher = DefaultHasher::new();
        snapshot.declared().hash(&mut hasher);
        for rep in snapshot.representations() {
            rep.format.hash(&mut hasher);
            match &rep.data {
                FormatData::Files(paths) => paths.hash(&mut hasher),
                FormatData::Text(text) => text.hash(&mut hasher),
                FormatData::Bytes(bytes) => bytes.hash(&mut hasher),
            }
        }
        hasher.finish()
    }
}
