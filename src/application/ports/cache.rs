//! Cache store port interface

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use thiserror::Error;

/// Cache file errors
#[derive(Debug, Clone, Error)]
pub enum CacheError {
    #[error("Failed to create cache directory {path}: {message}")]
    CreateDir { path: PathBuf, message: String },

    #[error("Failed to write cache file {path}: {message}")]
    Write { path: PathBuf, message: String },

    #[error("Failed to delete {path}: {message}")]
    Delete { path: PathBuf, message: String },

    #[error("Cache directory has been disposed")]
    Disposed,
}

/// Port for the on-disk scratch area holding binary payloads.
///
/// Callers treat every failure as advisory: the in-memory history stays
/// authoritative.
pub trait CacheStore: Send + Sync {
    /// Write bytes to a new file named after the capture time.
    fn save(
        &self,
        bytes: &[u8],
        extension: &str,
        captured_at: DateTime<Local>,
    ) -> Result<PathBuf, CacheError>;

    /// Delete a cache file. A missing file is not an error.
    fn delete(&self, path: &Path) -> Result<(), CacheError>;

    /// Delete every file in the scratch directory.
    fn clear(&self) -> Result<(), CacheError>;

    /// Clear and remove the scratch directory. Only the first call acts.
    fn dispose(&self) -> Result<(), CacheError>;

    /// Scratch directory path
    fn dir(&self) -> &Path;
}
