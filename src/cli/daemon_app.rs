//! Daemon app runner

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::{interval, MissedTickBehavior};

use crate::application::ports::{
    CacheStore, InputPermission, Notice, Notifier, PasteKeystroke, Pasteboard,
    SharedLogger, TextHistoryStore,
};
use crate::application::{
    ChangeMonitor, ClipboardWriter, ContentExtractor, HistorySession, HistoryStore,
    HotkeyDetector, SessionError,
};
use crate::infrastructure::keystroke::ParseFallbackError;
use crate::infrastructure::{
    build_dispatch, create_event_tap, create_fallback, create_notifier, AssumeGranted, EnigoPaste,
    EnigoPermission, FallbackPreference, JsonTextHistory, NativePasteboard, ScratchDirCache,
    TracingLogger,
};

use super::app::{EXIT_ERROR, EXIT_SUCCESS};
use super::args::DaemonOptions;
use super::commands::{DaemonCommand, COMMAND_HELP};
#[cfg(unix)]
use super::pid_file::{default_pid_path, PidLock};
use super::presenter::Presenter;
use super::signals::{recall_forwarder, DaemonSignal, DaemonSignalHandler};

const COMPONENT: &str = "daemon";

type NativeSession = HistorySession<Arc<NativePasteboard>, EnigoPaste>;

/// Run daemon mode
pub async fn run_daemon(options: DaemonOptions, log_filter: &str) -> ExitCode {
    let presenter = Presenter::new();

    #[cfg(unix)]
    let pid_lock = match PidLock::acquire(default_pid_path()) {
        Ok(lock) => lock,
        Err(e) => {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let logger: SharedLogger = Arc::new(TracingLogger::new(build_dispatch(log_filter)));

    let mut session = match build_session(&options, Arc::clone(&logger)).await {
        Ok(session) => session,
        Err(e) => {
            presenter.error(&e);
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let (mut signals, signal_tx) = match DaemonSignalHandler::new() {
        Ok(s) => s,
        Err(e) => {
            presenter.error(&format!("Failed to setup signal handler: {}", e));
            session.shutdown();
            return ExitCode::from(EXIT_ERROR);
        }
    };

    let notifier = options.notify.then(create_notifier);

    // A missing hotkey leaves the stdin commands usable
    let mut detector = HotkeyDetector::new(create_event_tap(), options.hotkey, Arc::clone(&logger));
    if let Err(e) = detector.start(recall_forwarder(signal_tx.clone())) {
        presenter.warn(&format!("Hotkey {} unavailable: {}", options.hotkey, e));
        if let Some(notifier) = &notifier {
            let notice = Notice::hotkey_unavailable(options.hotkey, e.to_string());
            if let Err(e) = notifier.notify(&notice).await {
                logger.debug(COMPONENT, &e.to_string());
            }
        }
    }

    let text_store = JsonTextHistory::new();
    if options.persist_text {
        match text_store.load().await {
            Ok(entries) => session.restore_text(entries),
            Err(e) => presenter.warn(&e.to_string()),
        }
    }

    presenter.daemon_status("Started, watching the clipboard...");
    presenter.info(&format!(
        "PID: {} | Hotkey: {} | SIGINT: exit",
        std::process::id(),
        options.hotkey
    ));
    presenter.info(COMMAND_HELP);

    let result = daemon_loop(
        &mut session,
        &mut signals,
        &presenter,
        &options,
        notifier.as_deref(),
        &logger,
    )
    .await;

    presenter.daemon_status("Shutting down...");
    if detector.is_running() {
        if let Err(e) = detector.stop() {
            logger.warn(COMPONENT, &e.to_string());
        }
    }

    if options.persist_text {
        if let Err(e) = text_store.save(&session.text_entries()).await {
            presenter.warn(&e.to_string());
        }
    }
    session.shutdown();

    #[cfg(unix)]
    drop(pid_lock);

    if result {
        ExitCode::from(EXIT_SUCCESS)
    } else {
        ExitCode::from(EXIT_ERROR)
    }
}

/// Wire the adapters into a session
async fn build_session(
    options: &DaemonOptions,
    logger: SharedLogger,
) -> Result<NativeSession, String> {
    let cache: Arc<dyn CacheStore> = Arc::new(ScratchDirCache::new(options.cache_dir.clone()));
    let pasteboard = Arc::new(NativePasteboard::new().map_err(|e| e.to_string())?);

    let store = HistoryStore::new(options.max_history, Arc::clone(&cache), Arc::clone(&logger))
        .map_err(|e| e.to_string())?;
    let extractor = ContentExtractor::new(Arc::clone(&cache), Arc::clone(&logger));
    let monitor = ChangeMonitor::new(Arc::clone(&pasteboard), extractor, Arc::clone(&logger));

    let preference: FallbackPreference = options
        .paste_fallback
        .parse()
        .map_err(|e: ParseFallbackError| e.to_string())?;
    let fallback = match create_fallback(preference).await.map_err(|e| e.to_string())? {
        Some((keystroke, tool)) => {
            logger.info(COMPONENT, &format!("Fallback paste tool: {}", tool));
            Some(keystroke)
        }
        None => None,
    };

    // Without enigo the fallback tool is the only delivery path
    let enigo = EnigoPermission::new();
    let permission: Box<dyn InputPermission> = if !enigo.is_granted() && fallback.is_some() {
        Box::new(AssumeGranted)
    } else {
        Box::new(enigo)
    };

    let writer = ClipboardWriter::new(pasteboard, EnigoPaste::new(), permission, Arc::clone(&logger))
        .with_fallback(fallback)
        .with_settle(options.paste_settle);

    Ok(HistorySession::new(store, monitor, writer, cache, logger))
}

async fn daemon_loop<P, K>(
    session: &mut HistorySession<P, K>,
    signals: &mut DaemonSignalHandler,
    presenter: &Presenter,
    options: &DaemonOptions,
    notifier: Option<&dyn Notifier>,
    logger: &SharedLogger,
) -> bool
where
    P: Pasteboard,
    K: PasteKeystroke,
{
    let mut ticker = interval(options.poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                session.refresh().await;
            }
            signal = signals.recv() => match signal {
                Some(DaemonSignal::Recall) => {
                    session.refresh().await;
                    presenter.daemon_status("Recall hotkey pressed");
                    presenter.render_history(session.entries());
                }
                Some(DaemonSignal::Shutdown) => return true,
                None => return false,
            },
            line = lines.next_line(), if stdin_open => match line {
                Ok(Some(line)) if line.trim().is_empty() => {}
                Ok(Some(line)) => match line.parse::<DaemonCommand>() {
                    Ok(command) => {
                        if !handle_command(command, session, presenter, notifier, logger).await {
                            return true;
                        }
                    }
                    Err(e) => presenter.warn(&e.to_string()),
                },
                // Detached from a terminal; keep running on the hotkey alone
                Ok(None) | Err(_) => stdin_open = false,
            },
        }
    }
}

/// Run one prompt command. Returns false when the daemon should exit.
async fn handle_command<P, K>(
    command: DaemonCommand,
    session: &mut HistorySession<P, K>,
    presenter: &Presenter,
    notifier: Option<&dyn Notifier>,
    logger: &SharedLogger,
) -> bool
where
    P: Pasteboard,
    K: PasteKeystroke,
{
    match command {
        DaemonCommand::List => presenter.render_history(session.entries()),
        DaemonCommand::Paste(n) => {
            match session.paste_at(n - 1).await {
                Ok(()) => presenter.success(&format!("Pasted entry {}", n)),
                Err(SessionError::NoSuchEntry(_)) => {
                    presenter.warn(&format!("No history entry at position {}", n));
                }
                Err(e) => {
                    presenter.error(&e.to_string());
                    if let Some(notifier) = notifier {
                        if let Err(e) = notifier.notify(&Notice::paste_failed(e.to_string())).await {
                            logger.debug(COMPONENT, &e.to_string());
                        }
                    }
                }
            }
        }
        DaemonCommand::Remove(n) => {
            if session.remove_at(n - 1) {
                presenter.success(&format!("Removed entry {}", n));
            } else {
                presenter.warn(&format!("No history entry at position {}", n));
            }
        }
        DaemonCommand::Clear => {
            session.clear();
            presenter.success("History cleared");
        }
        DaemonCommand::Help => presenter.info(COMMAND_HELP),
        DaemonCommand::Quit => return false,
    }
    true
}
