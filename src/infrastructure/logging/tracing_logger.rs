//! Logger adapter over tracing

use tracing::{dispatcher, Dispatch};
use tracing_subscriber::EnvFilter;

use crate::application::ports::{LogLevel, Logger};

/// Environment variable holding a tracing filter directive
pub const LOG_ENV: &str = "CLIPTRAIL_LOG";

/// Build the subscriber used by the daemon.
///
/// `CLIPTRAIL_LOG` wins over `fallback_filter`; an unparsable fallback
/// degrades to `info`.
pub fn build_dispatch(fallback_filter: &str) -> Dispatch {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(fallback_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .finish();

    Dispatch::new(subscriber)
}

/// Logger that emits tracing events into an injected dispatcher.
///
/// The dispatcher is scoped to each call, so nothing is installed globally.
pub struct TracingLogger {
    dispatch: Dispatch,
}

impl TracingLogger {
    pub fn new(dispatch: Dispatch) -> Self {
        Self { dispatch }
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, component: &str, message: &str) {
        dispatcher::with_default(&self.dispatch, || match level {
            LogLevel::Debug => tracing::debug!(component, "{}", message),
            LogLevel::Info => tracing::info!(component, "{}", message),
            LogLevel::Warn => tracing::warn!(component, "{}", message),
            LogLevel::Error => tracing::error!(component, "{}", message),
        });
    }
}

/// Logger that discards everything
pub struct NoOpLogger;

impl NoOpLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for NoOpLogger {
    fn log(&self, _level: LogLevel, _component: &str, _message: &str) {}
}
