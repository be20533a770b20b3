//! Hotkey detector lifecycle state machine

use std::fmt;
use thiserror::Error;

/// Detector states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum DetectorState {
    #[default]
    Stopped,
    Running,
}

impl DetectorState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Running => "running",
        }
    }
}

impl fmt::Display for DetectorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while {current_state}")]
pub struct InvalidStateTransition {
    pub current_state: DetectorState,
    pub action: String,
}

/// Detector lifecycle.
///
/// State machine:
///   STOPPED -> RUNNING (start)
///   RUNNING -> STOPPED (stop)
#[derive(Debug, Default)]
pub struct DetectorLifecycle {
    state: DetectorState,
}

impl DetectorLifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DetectorState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == DetectorState::Running
    }

    /// Check that a start is allowed without transitioning yet
    pub fn check_start(&self) -> Result<(), InvalidStateTransition> {
        if self.state != DetectorState::Stopped {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "start".to_string(),
            });
        }
        Ok(())
    }

    /// Transition from STOPPED to RUNNING
    pub fn start(&mut self) -> Result<(), InvalidStateTransition> {
        self.check_start()?;
        self.state = DetectorState::Running;
        Ok(())
    }

    /// Transition from RUNNING to STOPPED
    pub fn stop(&mut self) -> Result<(), InvalidStateTransition> {
        if self.state != DetectorState::Running {
            return Err(InvalidStateTransition {
                current_state: self.state,
                action: "stop".to_string(),
            });
        }
        self.state = DetectorState::Stopped;
        Ok(())
    }
}
