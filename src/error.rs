//! Error types for codex

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for codex
#[derive(Debug, Error)]
pub enum CodexError {
    #[error("Not a codex directory: {0}")]
    NotCodexDirectory(PathBuf),

    #[error("Entry not found: {0}")]
    EntryNotFound(String),

    #[error("Invalid category: {0}")]
    InvalidCategory(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Storage error: {0}")]
    Storage(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("TOML deserialization error: {0}")]
    TomlDeserialize(#[from] toml::de::Error),

    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),
}

impl CodexError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CodexError::NotCodexDirectory(_) => 2,
            CodexError::EntryNotFound(_) => 3,
            CodexError::InvalidCategory(_) => 4,
            CodexError::Validation(_) => 5,
            _ => 1,
        }
    }

    /// Get a user-friendly error message with suggestions
    pub fn display_with_suggestions(&self) -> String {
        match self {
            CodexError::NotCodexDirectory(path) => {
                format!(
                    "Not a codex directory: {}\n\n\
                    Suggestions:\n\
                    • Run 'codex init' in this directory to create a new archive\n\
                    • Navigate to an existing codex directory\n\
                    • Set CODEX_ROOT environment variable to your archive path",
                    path.display()
                )
            }
            CodexError::EntryNotFound(id) => {
                format!(
                    "No entry with id '{}'\n\n\
                    Suggestions:\n\
                    • Use 'codex list' to see entry ids\n\
                    • Use 'codex search <text>' to find an entry by title, content or tag",
                    id
                )
            }
            CodexError::InvalidCategory(value) => {
                format!(
                    "Invalid category: '{}'\n\n\
                    Valid categories: characters, locations, cultures, magic, technology, timeline, misc\n\
                    Example: codex list --category locations",
                    value
                )
            }
            CodexError::Validation(msg) => {
                format!(
                    "{}\n\n\
                    Every entry needs at least a title and content.\n\
                    Example: codex new --title \"The Iron Spire\" --content \"A black tower.\"",
                    msg
                )
            }
            _ => self.to_string(),
        }
    }
}

/// Result type using CodexError
pub type Result<T> = std::result::Result<T, CodexError>;
