//! CLI presenter for output formatting

use colored::*;

use crate::domain::HistoryEntry;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print daemon status
    pub fn daemon_status(&self, state: &str) {
        eprintln!("{} Daemon: {}", "●".cyan(), state);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Print the history, newest first, numbered from 1
    pub fn render_history(&self, entries: &[HistoryEntry]) {
        if entries.is_empty() {
            println!("{}", "(history is empty)".dimmed());
            return;
        }
        for (i, entry) in entries.iter().enumerate() {
            println!("{}", format_entry(i + 1, entry));
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// One history line: number, type label, capture time, and preview
pub fn format_entry(number: usize, entry: &HistoryEntry) -> String {
    let preview = entry.preview().replace('\n', "⏎");
    format!(
        "{:>3}. [{}] {} {}",
        number,
        entry.content_type(),
        entry.captured_at().format("%H:%M:%S").to_string().dimmed(),
        preview
    )
}
