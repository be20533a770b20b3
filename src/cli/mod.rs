//! CLI layer - Command-line interface
//!
//! Contains argument parsing, config subcommands, output formatting,
//! signal handling, and the daemon runner.

pub mod app;
pub mod args;
pub mod commands;
pub mod config_cmd;
pub mod daemon_app;
#[cfg(unix)]
pub mod pid_file;
pub mod presenter;
pub mod signals;

// Re-export commonly used types
pub use app::{EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, DaemonOptions};
pub use commands::DaemonCommand;
pub use daemon_app::run_daemon;
pub use presenter::Presenter;
