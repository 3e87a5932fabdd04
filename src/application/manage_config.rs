//! Config management use case

use crate::error::{CodexError, Result};
use crate::infrastructure::{ArchiveRepository, Config, FileStorage, FileSystemRepository};

/// Service for managing archive configuration
pub struct ConfigService {
    repository: FileSystemRepository,
}

impl ConfigService {
    /// Create a new config service
    pub fn new(repository: FileSystemRepository) -> Self {
        ConfigService { repository }
    }

    /// Get a single config value
    pub fn get(&self, key: &str) -> Result<String> {
        let config = self.repository.load_config()?;

        match key {
            "storage_key" => Ok(config.storage_key.clone()),
            "recent_limit" => Ok(config.recent_limit.to_string()),
            "created" => Ok(config.created.to_rfc3339()),
            _ => Err(CodexError::Config(format!(
                "Unknown config key: '{}'. Valid keys are: storage_key, recent_limit, created",
                key
            ))),
        }
    }

    /// Set a config value
    pub fn set(&self, key: &str, value: &str) -> Result<()> {
        let mut config = self.repository.load_config()?;

        match key {
            "storage_key" => {
                FileStorage::validate_key(value)
                    .map_err(|e| CodexError::Config(e.to_string()))?;
                config.storage_key = value.to_string();
            }
            "recent_limit" => {
                config.recent_limit = value
                    .parse::<usize>()
                    .ok()
                    .filter(|n| *n > 0)
                    .ok_or_else(|| {
                        CodexError::Config(format!(
                            "Invalid recent_limit: '{}'. Expected a positive integer",
                            value
                        ))
                    })?;
            }
            "created" => {
                return Err(CodexError::Config(
                    "Cannot modify 'created' field (read-only)".to_string(),
                ));
            }
            _ => {
                return Err(CodexError::Config(format!(
                    "Unknown config key: '{}'. Valid keys are: storage_key, recent_limit",
                    key
                )));
            }
        }

        self.repository.save_config(&config)?;
        Ok(())
    }

    /// List all config values
    pub fn list(&self) -> Result<Config> {
        self.repository.load_config()
    }
}
