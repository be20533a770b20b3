//! CLI argument definitions using Clap

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};

use crate::domain::HotkeyCombo;

/// ClipTrail - clipboard history with a global recall hotkey
#[derive(Parser, Debug)]
#[command(name = "cliptrail")]
#[command(version)]
#[command(about = "Clipboard history daemon with a global recall hotkey")]
#[command(long_about = None)]
pub struct Cli {
    /// Number of history entries to keep
    #[arg(short = 'm', long, value_name = "N")]
    pub max_history: Option<usize>,

    /// Clipboard poll interval in milliseconds (100-5000)
    #[arg(short = 'p', long, value_name = "MS")]
    pub poll_interval: Option<u64>,

    /// Recall hotkey (e.g., cmd+ctrl+alt+v, cmd+shift+v)
    #[arg(short = 'H', long, value_name = "COMBO")]
    pub hotkey: Option<String>,

    /// Save text entries across restarts
    #[arg(long)]
    pub persist_text: bool,

    /// Show desktop notifications when a paste fails
    #[arg(short = 'n', long)]
    pub notify: bool,

    /// Log at debug level
    #[arg(short = 'v', long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Report input permission, hotkey and paste fallback status
    Check,
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed daemon options
#[derive(Debug, Clone)]
pub struct DaemonOptions {
    pub max_history: usize,
    pub poll_interval: Duration,
    pub hotkey: HotkeyCombo,
    pub paste_settle: Duration,
    pub paste_fallback: String,
    pub cache_dir: PathBuf,
    pub persist_text: bool,
    pub notify: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "max_history",
    "poll_interval_ms",
    "hotkey",
    "paste_settle_ms",
    "paste_fallback",
    "cache_dir",
    "persist_text",
    "notify",
    "log_level",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_parses_defaults() {
        let cli = Cli::parse_from(["cliptrail"]);
        assert!(cli.max_history.is_none());
        assert!(cli.poll_interval.is_none());
        assert!(cli.hotkey.is_none());
        assert!(!cli.persist_text);
        assert!(!cli.notify);
        assert!(!cli.verbose);
        assert!(cli.command.is_none());
    }

    #[test]
    fn cli_parses_numbers() {
        let cli = Cli::parse_from(["cliptrail", "--max-history", "20", "-p", "250"]);
        assert_eq!(cli.max_history, Some(20));
        assert_eq!(cli.poll_interval, Some(250));
    }

    #[test]
    fn cli_rejects_non_numeric_history() {
        assert!(Cli::try_parse_from(["cliptrail", "--max-history", "lots"]).is_err());
    }

    #[test]
    fn cli_parses_hotkey() {
        let cli = Cli::parse_from(["cliptrail", "--hotkey", "cmd+shift+v"]);
        assert_eq!(cli.hotkey, Some("cmd+shift+v".to_string()));
    }

    #[test]
    fn cli_parses_flags() {
        let cli = Cli::parse_from(["cliptrail", "--persist-text", "-n", "-v"]);
        assert!(cli.persist_text);
        assert!(cli.notify);
        assert!(cli.verbose);
    }

    #[test]
    fn cli_parses_config_init() {
        let cli = Cli::parse_from(["cliptrail", "config", "init"]);
        assert!(matches!(
            cli.command,
            Some(Commands::Config {
                action: ConfigAction::Init
            })
        ));
    }

    #[test]
    fn cli_parses_config_set() {
        let cli = Cli::parse_from(["cliptrail", "config", "set", "hotkey", "cmd+shift+v"]);
        if let Some(Commands::Config {
            action: ConfigAction::Set { key, value },
        }) = cli.command
        {
            assert_eq!(key, "hotkey");
            assert_eq!(value, "cmd+shift+v");
        } else {
            panic!("Expected Config Set command");
        }
    }

    #[test]
    fn cli_parses_check() {
        let cli = Cli::parse_from(["cliptrail", "check"]);
        assert!(matches!(cli.command, Some(Commands::Check)));
    }

    #[test]
    fn valid_config_keys() {
        assert!(is_valid_config_key("max_history"));
        assert!(is_valid_config_key("paste_fallback"));
        assert!(!is_valid_config_key("api_key"));
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }
}
