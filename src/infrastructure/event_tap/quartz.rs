//! macOS key event tap using Quartz event services
//!
//! Requires the Accessibility (input monitoring) permission. Without it
//! the OS refuses to create the tap.

use std::cell::RefCell;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{mpsc, Arc};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use core_foundation::runloop::{kCFRunLoopCommonModes, kCFRunLoopDefaultMode, CFRunLoop};
use core_graphics::event::{
    CGEvent, CGEventFlags, CGEventTap, CGEventTapLocation, CGEventTapOptions,
    CGEventTapPlacement, CGEventType, EventField,
};

use crate::application::ports::{KeyEventSink, KeyEventTap, TapError, TapHandle};
use crate::domain::hotkey::{HotkeyCombo, HotkeyKey, KeyEvent, Modifiers};

/// How often the tap thread checks for a stop request
const RUN_LOOP_SLICE: Duration = Duration::from_millis(100);

/// Listen-only session tap for key down/up and modifier changes
pub struct QuartzEventTap;

impl QuartzEventTap {
    pub fn new() -> Self {
        Self
    }
}

impl Default for QuartzEventTap {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyEventTap for QuartzEventTap {
    fn install(
        &self,
        _combo: HotkeyCombo,
        sink: KeyEventSink,
    ) -> Result<Box<dyn TapHandle>, TapError> {
        let stop = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = mpsc::channel();

        let thread_stop = Arc::clone(&stop);
        let thread = thread::Builder::new()
            .name("cliptrail-event-tap".into())
            .spawn(move || run_tap(sink, thread_stop, ready_tx))
            .map_err(|e| TapError::Failed(e.to_string()))?;

        match ready_rx.recv() {
            Ok(Ok(())) => Ok(Box::new(QuartzTapHandle {
                stop,
                thread: Some(thread),
            })),
            Ok(Err(e)) => {
                let _ = thread.join();
                Err(e)
            }
            Err(_) => {
                let _ = thread.join();
                Err(TapError::Failed("event tap thread exited".to_string()))
            }
        }
    }
}

struct QuartzTapHandle {
    stop: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

impl TapHandle for QuartzTapHandle {
    fn remove(mut self: Box<Self>) {
        self.stop.store(true, Ordering::SeqCst);
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn run_tap(sink: KeyEventSink, stop: Arc<AtomicBool>, ready: mpsc::Sender<Result<(), TapError>>) {
    let sink = RefCell::new(sink);
    let disabled = AtomicBool::new(false);

    let tap = CGEventTap::new(
        CGEventTapLocation::Session,
        CGEventTapPlacement::HeadInsertEventTap,
        CGEventTapOptions::ListenOnly,
        vec![
            CGEventType::KeyDown,
            CGEventType::KeyUp,
            CGEventType::FlagsChanged,
        ],
        |_proxy, event_type, event| {
            match event_type {
                CGEventType::TapDisabledByTimeout | CGEventType::TapDisabledByUserInput => {
                    disabled.store(true, Ordering::SeqCst);
                }
                _ => {
                    if let Some(key_event) = translate(event_type, event) {
                        if let Ok(mut sink) = sink.try_borrow_mut() {
                            (*sink)(key_event);
                        }
                    }
                }
            }
            None
        },
    );

    let tap = match tap {
        Ok(tap) => tap,
        Err(()) => {
            let _ = ready.send(Err(TapError::Refused(
                "grant Accessibility access to this terminal or binary".to_string(),
            )));
            return;
        }
    };

    let source = match tap.mach_port.create_runloop_source(0) {
        Ok(source) => source,
        Err(()) => {
            let _ = ready.send(Err(TapError::Failed(
                "could not create run loop source".to_string(),
            )));
            return;
        }
    };

    let run_loop = CFRunLoop::get_current();
    // SAFETY: kCFRunLoopCommonModes is a constant CFString provided by CoreFoundation
    unsafe { run_loop.add_source(&source, kCFRunLoopCommonModes) };
    tap.enable();
    let _ = ready.send(Ok(()));

    while !stop.load(Ordering::SeqCst) {
        // SAFETY: kCFRunLoopDefaultMode is a constant CFString provided by CoreFoundation
        unsafe {
            CFRunLoop::run_in_mode(kCFRunLoopDefaultMode, RUN_LOOP_SLICE, false);
        }
        // The OS disables taps whose callbacks stall
        if disabled.swap(false, Ordering::SeqCst) {
            tap.enable();
        }
    }

    // SAFETY: same constant as above
    unsafe { run_loop.remove_source(&source, kCFRunLoopCommonModes) };
}

fn translate(event_type: CGEventType, event: &CGEvent) -> Option<KeyEvent> {
    let modifiers = modifiers_from_flags(event.get_flags());
    let keycode = event.get_integer_value_field(EventField::KEYBOARD_EVENT_KEYCODE);
    let key = u16::try_from(keycode)
        .ok()
        .and_then(HotkeyKey::from_mac_keycode);

    match event_type {
        CGEventType::KeyDown => {
            if event.get_integer_value_field(EventField::KEYBOARD_EVENT_AUTOREPEAT) != 0 {
                Some(KeyEvent::repeat(key, modifiers))
            } else {
                Some(KeyEvent::down(key, modifiers))
            }
        }
        CGEventType::KeyUp => Some(KeyEvent::up(key, modifiers)),
        CGEventType::FlagsChanged => Some(KeyEvent::flags_changed(modifiers)),
        _ => None,
    }
}

fn modifiers_from_flags(flags: CGEventFlags) -> Modifiers {
    [
        (CGEventFlags::CGEventFlagCommand, Modifiers::COMMAND),
        (CGEventFlags::CGEventFlagControl, Modifiers::CONTROL),
        (CGEventFlags::CGEventFlagAlternate, Modifiers::OPTION),
        (CGEventFlags::CGEventFlagShift, Modifiers::SHIFT),
    ]
    .into_iter()
    .filter(|(flag, _)| flags.contains(*flag))
    .fold(Modifiers::NONE, |acc, (_, m)| acc | m)
}
