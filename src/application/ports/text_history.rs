//! Text history persistence port interface

use async_trait::async_trait;
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Clone, Error)]
pub enum PersistenceError {
    #[error("Failed to read history file: {0}")]
    ReadError(String),

    #[error("Failed to parse history file: {0}")]
    ParseError(String),

    #[error("Failed to write history file: {0}")]
    WriteError(String),
}

/// A persisted text entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredText {
    pub text: String,
    pub timestamp: DateTime<Local>,
}

/// Port for saving plain-text entries across restarts
#[async_trait]
pub trait TextHistoryStore: Send + Sync {
    /// Load stored entries, most recent first. A missing file yields none.
    async fn load(&self) -> Result<Vec<StoredText>, PersistenceError>;

    /// Replace the stored entries.
    async fn save(&self, entries: &[StoredText]) -> Result<(), PersistenceError>;
}

/// Blanket implementation for boxed stores
#[async_trait]
impl TextHistoryStore for Box<dyn TextHistoryStore> {
    async fn load(&self) -> Result<Vec<StoredText>, PersistenceError> {
        self.as_ref().load().await
    }

    async fn save(&self, entries: &[StoredText]) -> Result<(), PersistenceError> {
        self.as_ref().save(entries).await
    }
}
