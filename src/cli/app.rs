//! Config resolution and the `check` command

use std::process::ExitCode;

use crate::application::ports::{ConfigStore, InputPermission};
use crate::domain::config::{AppConfig, POLL_INTERVAL_RANGE_MS};
use crate::domain::HotkeyCombo;
use crate::infrastructure::keystroke::{detect_fallback_tool, FallbackPreference, FALLBACK_OPTIONS};
use crate::infrastructure::{EnigoPermission, XdgConfigStore};

use super::args::{Cli, DaemonOptions};
use super::presenter::Presenter;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Config layer built from command-line flags
pub fn cli_config(cli: &Cli) -> AppConfig {
    AppConfig {
        max_history: cli.max_history,
        poll_interval_ms: cli.poll_interval,
        hotkey: cli.hotkey.clone(),
        persist_text: cli.persist_text.then_some(true),
        notify: cli.notify.then_some(true),
        log_level: cli.verbose.then(|| "debug".to_string()),
        ..Default::default()
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load().await.unwrap_or_else(|_| AppConfig::empty());

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}

/// Validate the merged config into daemon options.
///
/// Errors here are usage errors: the user asked for something unusable.
pub fn resolve_options(config: &AppConfig) -> Result<DaemonOptions, String> {
    if config.max_history == Some(0) {
        return Err("Invalid max-history: must be at least 1".to_string());
    }

    if let Some(ms) = config.poll_interval_ms {
        let (min, max) = POLL_INTERVAL_RANGE_MS;
        if !(min..=max).contains(&ms) {
            return Err(format!(
                "Invalid poll-interval: {} (must be between {} and {} ms)",
                ms, min, max
            ));
        }
    }

    let hotkey = match config.hotkey.as_deref() {
        Some(s) => s.parse::<HotkeyCombo>().map_err(|e| e.to_string())?,
        None => HotkeyCombo::default(),
    };

    let paste_fallback = config.paste_fallback_or_default();
    if paste_fallback.parse::<FallbackPreference>().is_err() {
        return Err(format!(
            "Invalid paste_fallback '{}'. Valid options: {}",
            paste_fallback, FALLBACK_OPTIONS
        ));
    }

    Ok(DaemonOptions {
        max_history: config.max_history_or_default(),
        poll_interval: config.poll_interval_or_default(),
        hotkey,
        paste_settle: config.paste_settle_or_default(),
        paste_fallback: paste_fallback.to_string(),
        cache_dir: config.cache_dir_or_default(),
        persist_text: config.persist_text_or_default(),
        notify: config.notify_or_default(),
    })
}

/// Report what the daemon would use on this machine
pub async fn run_check(config: &AppConfig) -> ExitCode {
    let presenter = Presenter::new();

    let options = match resolve_options(config) {
        Ok(options) => options,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
    };

    presenter.key_value("config", &XdgConfigStore::new().path().to_string_lossy());
    presenter.key_value("hotkey", &options.hotkey.to_string());
    presenter.key_value("max_history", &options.max_history.to_string());
    presenter.key_value(
        "poll_interval",
        &format!("{} ms", options.poll_interval.as_millis()),
    );
    presenter.key_value("cache_dir", &options.cache_dir.to_string_lossy());

    let granted = EnigoPermission::new().is_granted();
    presenter.key_value(
        "input_permission",
        if granted { "granted" } else { "missing" },
    );

    let fallback = match options.paste_fallback.parse::<FallbackPreference>() {
        Ok(FallbackPreference::Auto) => detect_fallback_tool()
            .await
            .map(|t| format!("{} (detected)", t))
            .unwrap_or_else(|| "none available".to_string()),
        Ok(preference) => preference.to_string(),
        Err(_) => options.paste_fallback.clone(),
    };
    presenter.key_value("paste_fallback", &fallback);

    if !granted {
        if cfg!(target_os = "macos") {
            presenter.warn("Grant Accessibility access in System Settings > Privacy & Security");
        } else {
            presenter.warn("Input simulation unavailable; pastes rely on the fallback tool");
        }
    }

    ExitCode::from(EXIT_SUCCESS)
}
