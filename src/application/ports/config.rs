//! Settings file port

use std::path::Path;

use async_trait::async_trait;

use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;

/// Persistent settings layer sitting between the defaults and the flags
#[async_trait]
pub trait ConfigStore: Send + Sync {
    /// Settings from the file. A missing file is an empty config.
    async fn load(&self) -> Result<AppConfig, ConfigError>;

    async fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;

    fn path(&self) -> &Path;

    /// Write the defaults. Refuses to overwrite an existing file.
    async fn init(&self) -> Result<(), ConfigError>;
}
