//! Global hotkey detection use case

use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::{Arc, Mutex};

use thiserror::Error;

use crate::domain::hotkey::{
    DetectorLifecycle, DetectorState, HotkeyCombo, HotkeyMatcher, InvalidStateTransition, KeyEvent,
};

use super::ports::{KeyEventSink, KeyEventTap, SharedLogger, TapError, TapHandle};

const COMPONENT: &str = "hotkey";

/// Errors from the hotkey detector
#[derive(Debug, Error)]
pub enum HotkeyError {
    #[error("Keyboard monitoring not permitted ({0}). Grant input monitoring / accessibility access to this application and restart it.")]
    PermissionDenied(String),

    #[error("Failed to install key event tap: {0}")]
    TapFailed(String),

    #[error("Invalid state transition: {0}")]
    InvalidState(#[from] InvalidStateTransition),
}

impl From<TapError> for HotkeyError {
    fn from(e: TapError) -> Self {
        match e {
            TapError::Refused(msg) => Self::PermissionDenied(msg),
            TapError::Failed(msg) => Self::TapFailed(msg),
        }
    }
}

type Callback = Box<dyn FnMut() + Send + 'static>;

/// State shared with the tap's delivery thread
struct Dispatch {
    active: bool,
    matcher: HotkeyMatcher,
    callback: Callback,
}

/// Watches system-wide key events and fires a callback once per press of
/// the configured combination.
///
/// The callback runs on the tap's delivery thread. It must not call back
/// into the detector; hand work to the owning loop instead.
pub struct HotkeyDetector<T: KeyEventTap> {
    tap: T,
    combo: HotkeyCombo,
    lifecycle: DetectorLifecycle,
    dispatch: Option<Arc<Mutex<Dispatch>>>,
    handle: Option<Box<dyn TapHandle>>,
    logger: SharedLogger,
}

impl<T: KeyEventTap> HotkeyDetector<T> {
    pub fn new(tap: T, combo: HotkeyCombo, logger: SharedLogger) -> Self {
        Self {
            tap,
            combo,
            lifecycle: DetectorLifecycle::new(),
            dispatch: None,
            handle: None,
            logger,
        }
    }

    pub fn combo(&self) -> HotkeyCombo {
        self.combo
    }

    pub fn state(&self) -> DetectorState {
        self.lifecycle.state()
    }

    pub fn is_running(&self) -> bool {
        self.lifecycle.is_running()
    }

    /// Install the tap and start matching.
    pub fn start<F>(&mut self, callback: F) -> Result<(), HotkeyError>
    where
        F: FnMut() + Send + 'static,
    {
        self.lifecycle.check_start()?;

        let dispatch = Arc::new(Mutex::new(Dispatch {
            active: true,
            matcher: HotkeyMatcher::new(self.combo),
            callback: Box::new(callback),
        }));

        let sink_dispatch = Arc::clone(&dispatch);
        let logger = Arc::clone(&self.logger);
        let sink: KeyEventSink = Box::new(move |event| deliver(&sink_dispatch, &event, &logger));

        let handle = self.tap.install(self.combo, sink)?;
        self.lifecycle.start()?;
        self.dispatch = Some(dispatch);
        self.handle = Some(handle);

        self.logger
            .info(COMPONENT, &format!("Listening for {}", self.combo));
        Ok(())
    }

    /// Detach the tap.
    ///
    /// Waits for an in-flight callback to finish. No callback fires after
    /// this returns.
    pub fn stop(&mut self) -> Result<(), HotkeyError> {
        self.lifecycle.stop()?;

        if let Some(dispatch) = self.dispatch.take() {
            let mut guard = dispatch.lock().unwrap_or_else(|p| p.into_inner());
            guard.active = false;
        }
        if let Some(handle) = self.handle.take() {
            handle.remove();
        }

        self.logger.info(COMPONENT, "Stopped listening");
        Ok(())
    }
}

impl<T: KeyEventTap> Drop for HotkeyDetector<T> {
    fn drop(&mut self) {
        if self.is_running() {
            let _ = self.stop();
        }
    }
}

fn deliver(dispatch: &Mutex<Dispatch>, event: &KeyEvent, logger: &SharedLogger) {
    let mut guard = dispatch.lock().unwrap_or_else(|p| p.into_inner());
    if !guard.active || !guard.matcher.feed(event) {
        return;
    }

    logger.debug(COMPONENT, "Hotkey pressed");
    if catch_unwind(AssertUnwindSafe(|| (guard.callback)())).is_err() {
        logger.error(COMPONENT, "Hotkey callback panicked; still listening");
    }
}
