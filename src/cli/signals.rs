//! Signal handling for the daemon loop

use colored::Colorize;
use tokio::sync::mpsc;

/// Events delivered to the daemon loop from outside it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DaemonSignal {
    /// The recall hotkey was pressed
    Recall,
    /// Shutdown requested (SIGINT/SIGTERM)
    Shutdown,
}

/// Daemon signal handler
///
/// Handles OS shutdown signals and provides a channel for events raised on
/// other threads (the hotkey tap), so everything is handled on one loop.
pub struct DaemonSignalHandler {
    receiver: mpsc::Receiver<DaemonSignal>,
}

impl DaemonSignalHandler {
    /// Create a new daemon signal handler and start listening for shutdown signals.
    ///
    /// Returns the handler and a sender for other event sources.
    pub fn new() -> Result<(Self, mpsc::Sender<DaemonSignal>), std::io::Error> {
        let (tx, rx) = mpsc::channel(16);
        listen_for_shutdown(tx.clone())?;
        Ok((Self { receiver: rx }, tx))
    }

    /// Wait for the next signal
    pub async fn recv(&mut self) -> Option<DaemonSignal> {
        self.receiver.recv().await
    }
}

/// Hotkey callback that forwards presses onto the daemon loop.
///
/// Runs on the tap thread, so it never blocks: a press arriving while the
/// queue is full is dropped.
pub fn recall_forwarder(tx: mpsc::Sender<DaemonSignal>) -> impl FnMut() + Send + 'static {
    move || {
        let _ = tx.try_send(DaemonSignal::Recall);
    }
}

#[cfg(unix)]
fn listen_for_shutdown(tx: mpsc::Sender<DaemonSignal>) -> Result<(), std::io::Error> {
    use tokio::signal::unix::{signal, SignalKind};

    let tx_int = tx.clone();
    let mut sigint = signal(SignalKind::interrupt())?;
    tokio::spawn(async move {
        sigint.recv().await;
        eprintln!("{} Received SIGINT (shutdown)", "↓".cyan());
        let _ = tx_int.send(DaemonSignal::Shutdown).await;
    });

    let mut sigterm = signal(SignalKind::terminate())?;
    tokio::spawn(async move {
        sigterm.recv().await;
        eprintln!("{} Received SIGTERM (shutdown)", "↓".cyan());
        let _ = tx.send(DaemonSignal::Shutdown).await;
    });

    Ok(())
}

#[cfg(not(unix))]
fn listen_for_shutdown(tx: mpsc::Sender<DaemonSignal>) -> Result<(), std::io::Error> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("{} Received Ctrl+C (shutdown)", "↓".cyan());
            let _ = tx.send(DaemonSignal::Shutdown).await;
        }
    });
    Ok(())
}
