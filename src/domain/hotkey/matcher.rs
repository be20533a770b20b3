//! Edge-triggered hotkey matching

use super::combo::{HotkeyCombo, HotkeyKey, Modifiers};

/// Kind of keyboard event delivered by an event tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Down,
    Up,
    /// Only the modifier flags changed
    FlagsChanged,
}

/// Keyboard event as observed by the tap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    /// Non-modifier key, `None` for keys the hotkey cannot target
    pub key: Option<HotkeyKey>,
    /// Modifier flags reported with the event
    pub modifiers: Modifiers,
    /// Set for OS auto-repeat key-down events
    pub is_repeat: bool,
}

impl KeyEvent {
    pub fn down(key: Option<HotkeyKey>, modifiers: Modifiers) -> Self {
        Self {
            kind: KeyEventKind::Down,
            key,
            modifiers,
            is_repeat: false,
        }
    }

    pub fn repeat(key: Option<HotkeyKey>, modifiers: Modifiers) -> Self {
        Self {
            is_repeat: true,
            ..Self::down(key, modifiers)
        }
    }

    pub fn up(key: Option<HotkeyKey>, modifiers: Modifiers) -> Self {
        Self {
            kind: KeyEventKind::Up,
            ..Self::down(key, modifiers)
        }
    }

    pub fn flags_changed(modifiers: Modifiers) -> Self {
        Self {
            kind: KeyEventKind::FlagsChanged,
            ..Self::down(None, modifiers)
        }
    }
}

/// Recognizes one hotkey combination, firing once per physical press.
///
/// The matcher latches after firing and re-arms when the target key is
/// released or the held modifiers stop matching.
#[derive(Debug, Clone)]
pub struct HotkeyMatcher {
    combo: HotkeyCombo,
    latched: bool,
}

impl HotkeyMatcher {
    pub fn new(combo: HotkeyCombo) -> Self {
        Self {
            combo,
            latched: false,
        }
    }

    pub fn combo(&self) -> HotkeyCombo {
        self.combo
    }

    pub fn is_latched(&self) -> bool {
        self.latched
    }

    /// Feed one event; returns true when the hotkey fires
    pub fn feed(&mut self, event: &KeyEvent) -> bool {
        let modifiers_match = event.modifiers == self.combo.modifiers();
        let is_target = event.key == Some(self.combo.key());

        match event.kind {
            KeyEventKind::Down if is_target && modifiers_match => {
                if self.latched || event.is_repeat {
                    return false;
                }
                self.latched = true;
                true
            }
            KeyEventKind::Down => {
                if is_target {
                    self.latched = false;
                }
                false
            }
            KeyEventKind::Up => {
                if is_target {
                    self.latched = false;
                }
                false
            }
            KeyEventKind::FlagsChanged => {
                if !modifiers_match {
                    self.latched = false;
                }
                false
            }
        }
    }
}
