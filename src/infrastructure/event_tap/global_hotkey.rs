//! Hotkey registration tap for Linux (X11) and Windows
//!
//! These platforms offer no listen-only tap without elevated rights, so the
//! target chord is registered with the OS and its press/release events are
//! replayed as key events.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use global_hotkey::hotkey::{Code, HotKey, Modifiers as HkModifiers};
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};

use crate::application::ports::{KeyEventSink, KeyEventTap, TapError, TapHandle};
use crate::domain::hotkey::{HotkeyCombo, HotkeyKey, KeyEvent, Modifiers};

/// How long the worker waits for an event before checking for a stop request
const POLL_SLICE: Duration = Duration::from_millis(50);

/// Tap that registers the chord through global-hotkey
pub struct GlobalHotkeyTap;

impl GlobalHotkeyTap {
    pub fn new() -> Self {
        Self
    }
}

impl Default for GlobalHotkeyTap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyEventTap for GlobalHotkeyTap {
    fn install(
        &self,
        combo: HotkeyCombo,
        sink: KeyEventSink,
    ) -> Result<Box<dyn TapHandle>, TapError> {
        let hotkey = to_hotkey(combo)?;
        let stop = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread_stop = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("cliptrail-hotkey".into())
            .spawn(move || run_registration(combo, hotkey, sink, thread_stop, ready_tx))
            .map_err(|e| TapError::Failed(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Box::new(RegistrationHandle {
                stop,
                thread: Some(thread),
            })),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(TapError::Failed("hotkey thread exited".to_string()))
            }
        }
    }
}

struct RegistrationHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TapHandle for RegistrationHandle {
    fn remove(mut self: Box<Self>) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run_registration(
    combo: HotkeyCombo,
    hotkey: HotKey,
    mut sink: KeyEventSink,
    stop: Arc<AtomicBool>,
    ready: mpsc::Sender<Result<(), TapError>>,
) {
    let manager = match GlobalHotKeyManager::new() {
        Ok(manager) => manager,
        Err(e) => {
            let _ = ready.send(Err(TapError::Failed(e.to_string())));
            return;
        }
    };
    if let Err(e) = manager.register(hotkey) {
        let _ = ready.send(Err(TapError::Refused(e.to_string())));
        return;
    }
    let _ = ready.send(Ok(()));

    let events = GlobalHotKeyEvent::receiver();
    while !stop.load(Ordering::SeqCst) {
        // WM_HOTKEY is queued to this thread; dispatching it feeds `events`
        pump_messages();
        let Ok(event) = events.recv_timeout(POLL_SLICE) else {
            continue;
        };
        if let Some(key_event) = translate(combo, hotkey.id(), &event) {
            sink(key_event);
        }
    }

    let _ = manager.unregister(hotkey);
}

/// Replay a registration event for our hotkey as a key event
fn translate(combo: HotkeyCombo, id: u32, event: &GlobalHotKeyEvent) -> Option<KeyEvent> {
    if event.id() != id {
        return None;
    }
    let key = Some(combo.key());
    Some(match event.state() {
        HotKeyState::Pressed => KeyEvent::down(key, combo.modifiers()),
        HotKeyState::Released => KeyEvent::up(key, combo.modifiers()),
    })
}

/// Drain this thread's Win32 message queue
#[cfg(windows)]
fn pump_messages() {
    use windows_sys::Win32::UI::WindowsAndMessaging::{
        DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
    };

    // SAFETY: MSG is plain data and only this thread's queue is read
    unsafe {
        let mut msg: MSG = std::mem::zeroed();
        while PeekMessageW(&mut msg, std::ptr::null_mut(), 0, 0, PM_REMOVE) != 0 {
            TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}

/// X11 delivery runs on global-hotkey's own thread
#[cfg(not(windows))]
fn pump_messages() {}

fn to_hotkey(combo: HotkeyCombo) -> Result<HotKey, TapError> {
    let code = key_code(combo.key()).ok_or_else(|| {
        TapError::Failed(format!("key '{}' cannot be registered", combo.key()))
    })?;

    let modifiers = [
        (Modifiers::COMMAND, HkModifiers::SUPER),
        (Modifiers::CONTROL, HkModifiers::CONTROL),
        (Modifiers::OPTION, HkModifiers::ALT),
        (Modifiers::SHIFT, HkModifiers::SHIFT),
    ]
    .into_iter()
    .filter(|(m, _)| combo.modifiers().contains(*m))
    .fold(HkModifiers::empty(), |acc, (_, hk)| acc | hk);

    let modifiers = (!modifiers.is_empty()).then_some(modifiers);
    Ok(HotKey::new(modifiers, code))
}

fn key_code(key: HotkeyKey) -> Option<Code> {
    let code = match key.as_char() {
        'A' => Code::KeyA,
        'B' => Code::KeyB,
        'C' => Code::KeyC,
        'D' => Code::KeyD,
        'E' => Code::KeyE,
        'F' => Code::KeyF,
        'G' => Code::KeyG,
        'H' => Code::KeyH,
        'I' => Code::KeyI,
        'J' => Code::KeyJ,
        'K' => Code::KeyK,
        'L' => Code::KeyL,
        'M' => Code::KeyM,
        'N' => Code::KeyN,
        'O' => Code::KeyO,
        'P' => Code::KeyP,
        'Q' => Code::KeyQ,
        'R' => Code::KeyR,
        'S' => Code::KeyS,
        'T' => Code::KeyT,
        'U' => Code::KeyU,
        'V' => Code::KeyV,
        'W' => Code::KeyW,
        'X' => Code::KeyX,
        'Y' => Code::KeyY,
        'Z' => Code::KeyZ,
        '0' => Code::Digit0,
        '1' => Code::Digit1,
        '2' => Code::Digit2,
        '3' => Code::Digit3,
        '4' => Code::Digit4,
        '5' => Code::Digit5,
        '6' => Code::Digit6,
        '7' => Code::Digit7,
        '8' => Code::Digit8,
        '9' => Code::Digit9,
        _ => return None,
    };
    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_combo_registers_v_with_three_modifiers() {
        let hotkey = to_hotkey(HotkeyCombo::default()).unwrap();
        assert_eq!(hotkey.key, Code::KeyV);
        assert_eq!(
            hotkey.mods,
            HkModifiers::SUPER | HkModifiers::CONTROL | HkModifiers::ALT
        );
    }

    #[test]
    fn test_digit_key() {
        let combo: HotkeyCombo = "ctrl+shift+7".parse().unwrap();
        let hotkey = to_hotkey(combo).unwrap();
        assert_eq!(hotkey.key, Code::Digit7);
        assert_eq!(hotkey.mods, HkModifiers::CONTROL | HkModifiers::SHIFT);
    }

    #[test]
    fn test_press_and_release_become_down_and_up() {
        let combo = HotkeyCombo::default();
        let id = to_hotkey(combo).unwrap().id();

        let pressed = GlobalHotKeyEvent {
            id,
            state: HotKeyState::Pressed,
        };
        let released = GlobalHotKeyEvent {
            id,
            state: HotKeyState::Released,
        };

        let down = translate(combo, id, &pressed).unwrap();
        assert_eq!(down, KeyEvent::down(Some(combo.key()), combo.modifiers()));
        let up = translate(combo, id, &released).unwrap();
        assert_eq!(up, KeyEvent::up(Some(combo.key()), combo.modifiers()));
    }

    #[test]
    fn test_other_hotkeys_are_ignored() {
        let combo = HotkeyCombo::default();
        let id = to_hotkey(combo).unwrap().id();
        let event = GlobalHotKeyEvent {
            id: id.wrapping_add(1),
            state: HotKeyState::Pressed,
        };
        assert!(translate(combo, id, &event).is_none());
    }

    #[test]
    fn test_pumping_an_empty_queue_returns() {
        pump_messages();
        pump_messages();
    }

    #[test]
    fn test_every_key_maps() {
        for c in ('a'..='z').chain('0'..='9') {
            let key = HotkeyKey::new(c).unwrap();
            assert!(key_code(key).is_some(), "no code for {}", c);
        }
    }
}
