//! JSON file persistence for text history entries

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use crate::application::ports::{PersistenceError, StoredText, TextHistoryStore};

/// Stores text entries as a JSON array, most recent first.
///
/// Binary entries are never written; their cache files do not outlive the
/// process.
pub struct JsonTextHistory {
    path: PathBuf,
}

impl JsonTextHistory {
    /// Create a store at `<data_dir>/cliptrail/history.json`
    pub fn new() -> Self {
        let data_dir = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("~/.local/share"))
            .join("cliptrail");

        Self {
            path: data_dir.join("history.json"),
        }
    }

    /// Create with custom path
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl Default for JsonTextHistory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextHistoryStore for JsonTextHistory {
    async fn load(&self) -> Result<Vec<StoredText>, PersistenceError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(PersistenceError::ReadError(e.to_string())),
        };

        serde_json::from_str(&content).map_err(|e| PersistenceError::ParseError(e.to_string()))
    }

    async fn save(&self, entries: &[StoredText]) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| PersistenceError::WriteError(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(entries)
            .map_err(|e| PersistenceError::WriteError(e.to_string()))?;

        fs::write(&self.path, content)
            .await
            .map_err(|e| PersistenceError::WriteError(e.to_string()))
    }
}
