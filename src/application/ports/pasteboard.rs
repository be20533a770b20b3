//! Pasteboard port interface

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::history::{ClipboardSnapshot, Representation};

/// Clipboard errors
#[derive(Debug, Clone, Error)]
pub enum ClipboardError {
    #[error("Clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("Failed to read clipboard: {0}")]
    ReadFailed(String),

    #[error("Failed to write clipboard: {0}")]
    WriteFailed(String),
}

/// Port for the OS shared clipboard
#[async_trait]
pub trait Pasteboard: Send + Sync {
    /// Monotonically increasing counter, bumped on every clipboard change.
    async fn change_count(&self) -> Result<u64, ClipboardError>;

    /// Read the declared formats and the data of every recognized one.
    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError>;

    /// Replace the clipboard content with the given representations.
    ///
    /// Existing formats are dropped and the new ones written in a single
    /// step, so a failed write never leaves the clipboard half-cleared.
    /// All representations describe the same item.
    async fn write(&self, representations: Vec<Representation>) -> Result<(), ClipboardError>;
}

/// Shared pasteboards, used by both the monitor and the writer
#[async_trait]
impl<P: Pasteboard + ?Sized> Pasteboard for Arc<P> {
    async fn change_count(&self) -> Result<u64, ClipboardError> {
        self.as_ref().change_count().await
    }

    async fn snapshot(&self) -> Result<ClipboardSnapshot, ClipboardError> {
        self.as_ref().snapshot().await
    }

    async fn write(&self, representations: Vec<Representation>) -> Result<(), ClipboardError> {
        self.as_ref().write(representations).await
    }
}
