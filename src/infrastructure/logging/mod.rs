//! Logging infrastructure module

mod tracing_logger;

pub use tracing_logger::{build_dispatch, NoOpLogger, TracingLogger, LOG_ENV};
