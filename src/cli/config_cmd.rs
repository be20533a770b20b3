//! Config command handler

use crate::application::ports::ConfigStore;
use crate::domain::config::{AppConfig, POLL_INTERVAL_RANGE_MS};
use crate::domain::error::ConfigError;
use crate::domain::{HotkeyCombo, InvalidHotkeyError};
use crate::infrastructure::keystroke::{FallbackPreference, FALLBACK_OPTIONS};

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

/// Accepted `log_level` values
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    check_key(key)?;

    let config = store.load().await?;
    match read_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        let value = read_value(&config, key).unwrap_or_else(|| NOT_SET.to_string());
        presenter.key_value(key, &value);
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn check_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

/// Validate a value and store it under `key`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    let invalid = |message: String| ConfigError::ValidationError {
        key: key.to_string(),
        message,
    };

    match key {
        "max_history" => {
            let n: usize = value
                .parse()
                .map_err(|_| invalid("Value must be a positive integer".to_string()))?;
            if n == 0 {
                return Err(invalid("Value must be at least 1".to_string()));
            }
            config.max_history = Some(n);
        }
        "poll_interval_ms" => {
            let (min, max) = POLL_INTERVAL_RANGE_MS;
            let ms: u64 = value
                .parse()
                .ok()
                .filter(|ms| (min..=max).contains(ms))
                .ok_or_else(|| invalid(format!("Value must be between {} and {}", min, max)))?;
            config.poll_interval_ms = Some(ms);
        }
        "hotkey" => {
            let combo: HotkeyCombo = value
                .parse()
                .map_err(|e: InvalidHotkeyError| invalid(e.reason))?;
            config.hotkey = Some(combo.to_string());
        }
        "paste_settle_ms" => {
            let ms: u64 = value
                .parse()
                .map_err(|_| invalid("Value must be a number of milliseconds".to_string()))?;
            config.paste_settle_ms = Some(ms);
        }
        "paste_fallback" => {
            let preference: FallbackPreference = value.parse().map_err(|_| {
                invalid(format!(
                    "Invalid value '{}'. Valid options: {}",
                    value, FALLBACK_OPTIONS
                ))
            })?;
            config.paste_fallback = Some(preference.to_string());
        }
        "cache_dir" => {
            if value.trim().is_empty() {
                return Err(invalid("Value must not be empty".to_string()));
            }
            config.cache_dir = Some(value.to_string());
        }
        "persist_text" => {
            config.persist_text = Some(
                parse_bool(value).map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?,
            );
        }
        "notify" => {
            config.notify = Some(
                parse_bool(value).map_err(|_| invalid("Value must be 'true' or 'false'".to_string()))?,
            );
        }
        "log_level" => {
            let lower = value.to_lowercase();
            if !LOG_LEVELS.contains(&lower.as_str()) {
                return Err(invalid(format!(
                    "Invalid value '{}'. Valid options: {}",
                    value,
                    LOG_LEVELS.join(", ")
                )));
            }
            config.log_level = Some(lower);
        }
        _ => return Err(invalid("Unknown key".to_string())),
    }
    Ok(())
}

fn read_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "max_history" => config.max_history.map(|n| n.to_string()),
        "poll_interval_ms" => config.poll_interval_ms.map(|n| n.to_string()),
        "hotkey" => config.hotkey.clone(),
        "paste_settle_ms" => config.paste_settle_ms.map(|n| n.to_string()),
        "paste_fallback" => config.paste_fallback.clone(),
        "cache_dir" => config.cache_dir.clone(),
        "persist_text" => config.persist_text.map(|b| b.to_string()),
        "notify" => config.notify.map(|b| b.to_string()),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
