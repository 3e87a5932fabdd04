//! Configuration management

use crate::error::{CodexError, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Storage key used by fresh archives
pub const DEFAULT_STORAGE_KEY: &str = "codex-entries";

/// Number of entries shown under "recent" on the dashboard
pub const DEFAULT_RECENT_LIMIT: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    #[serde(default = "default_recent_limit")]
    pub recent_limit: usize,
    pub created: DateTime<Utc>,
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_recent_limit() -> usize {
    DEFAULT_RECENT_LIMIT
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// Create a new config with default values
    pub fn new() -> Self {
        Config {
            storage_key: default_storage_key(),
            recent_limit: default_recent_limit(),
            created: Utc::now(),
        }
    }

    /// Load config from .codex/config.toml in the given directory
    pub fn load_from_dir(path: &Path) -> Result<Self> {
        let config_path = path.join(".codex").join("config.toml");

        let contents = fs::read_to_string(&config_path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                CodexError::NotCodexDirectory(path.to_path_buf())
            } else {
                CodexError::Io(e)
            }
        })?;

        Ok(toml::from_str(&contents)?)
    }

    /// Save config to .codex/config.toml in the given directory
    pub fn save_to_dir(&self, path: &Path) -> Result<()> {
        let codex_dir = path.join(".codex");
        let config_path = codex_dir.join("config.toml");

        if !codex_dir.exists() {
            fs::create_dir(&codex_dir)?;
        }

        let contents = toml::to_string_pretty(self)?;

        fs::write(&config_path, contents)?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_config_defaults() {
        let config = Config::new();
        assert_eq!(config.storage_key, "codex-entries");
        assert_eq!(config.recent_limit, 3);
    }

    #[test]
    fn test_save_and_load_config() {
        let temp = TempDir::new().unwrap();
        let mut config = Config::new();
        config.recent_limit = 5;

        config.save_to_dir(temp.path()).unwrap();

        assert!(temp.path().join(".codex/config.toml").exists());

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_missing_config() {
        let temp = TempDir::new().unwrap();

        let result = Config::load_from_dir(temp.path());

        match result.unwrap_err() {
            CodexError::NotCodexDirectory(_) => {}
            other => panic!("Expected NotCodexDirectory error, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_optional_keys_use_defaults() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".codex")).unwrap();
        fs::write(
            temp.path().join(".codex/config.toml"),
            "created = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let loaded = Config::load_from_dir(temp.path()).unwrap();
        assert_eq!(loaded.storage_key, DEFAULT_STORAGE_KEY);
        assert_eq!(loaded.recent_limit, DEFAULT_RECENT_LIMIT);
    }

    #[test]
    fn test_malformed_config_is_toml_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".codex")).unwrap();
        fs::write(temp.path().join(".codex/config.toml"), "not = [valid").unwrap();

        let err = Config::load_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, CodexError::TomlDeserialize(_)));
        assert!(err.to_string().starts_with("TOML deserialization error"));
    }

    #[test]
    fn test_wrong_value_type_is_toml_error() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join(".codex")).unwrap();
        fs::write(
            temp.path().join(".codex/config.toml"),
            "recent_limit = \"three\"\ncreated = \"2025-01-17T10:00:00Z\"\n",
        )
        .unwrap();

        let err = Config::load_from_dir(temp.path()).unwrap_err();
        assert!(matches!(err, CodexError::TomlDeserialize(_)));
    }
}
