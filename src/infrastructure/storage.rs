//! Durable key-value slots

use crate::error::{CodexError, Result};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// A local key-value persistence facility holding string payloads.
pub trait KeyValueStore {
    /// Read the payload stored under `key`, or `None` if the slot is empty
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replace the payload stored under `key`
    fn set(&mut self, key: &str, value: &str) -> Result<()>;
}

/// In-memory slots for tests and throwaway sessions
#[derive(Debug, Clone, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Storage with one slot already filled
    pub fn with_slot(key: &str, value: &str) -> Self {
        let mut storage = Self::new();
        storage.slots.insert(key.to_string(), value.to_string());
        storage
    }
}

impl KeyValueStore for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// One JSON file per key inside a directory
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: PathBuf) -> Self {
        FileStorage { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Keys are plain names: `[A-Za-z0-9_.-]`, not starting with a dot
    pub fn validate_key(key: &str) -> Result<()> {
        let valid = !key.is_empty()
            && !key.starts_with('.')
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
        if valid {
            Ok(())
        } else {
            Err(CodexError::Storage(format!(
                "Invalid storage key: '{}'. Keys may contain letters, digits, '_', '-' and '.'",
                key
            )))
        }
    }

    fn slot_path(&self, key: &str) -> Result<PathBuf> {
        Self::validate_key(key)?;
        Ok(self.dir.join(format!("{}.json", key)))
    }
}

impl KeyValueStore for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.slot_path(key)?;
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(CodexError::Io(e)),
        }
    }

    /// Write to a temp file in the same directory, then rename into place.
    /// A failed write leaves the previous payload and no temp file behind.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.slot_path(key)?;

        if !self.dir.exists() {
            fs::create_dir_all(&self.dir)?;
        }

        let tmp_path = self
            .dir
            .join(format!("{}.json.codex-tmp-{}", key, std::process::id()));

        let result = replace_with(&tmp_path, &path, value);
        if result.is_err() {
            let _ = fs::remove_file(&tmp_path);
        }
        result
    }
}

/// On Windows, `rename` does not overwrite existing files, so the
/// destination is removed first.
fn replace_with(tmp_path: &Path, path: &Path, value: &str) -> Result<()> {
    fs::write(tmp_path, value)?;

    if cfg!(windows) && path.exists() {
        fs::remove_file(path)?;
    }

    fs::rename(tmp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_memory_get_missing() {
        let storage = MemoryStorage::new();
        assert_eq!(storage.get("codex-entries").unwrap(), None);
    }

    #[test]
    fn test_memory_set_get() {
        let mut storage = MemoryStorage::new();
        storage.set("k", "[1]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[1]"));

        storage.set("k", "[2]").unwrap();
        assert_eq!(storage.get("k").unwrap().as_deref(), Some("[2]"));
        assert_eq!(storage.get("other").unwrap(), None);
    }

    #[test]
    fn test_file_get_missing() {
        let temp = TempDir::new().unwrap();
        let storage = FileStorage::new(temp.path().to_path_buf());
        assert_eq!(storage.get("codex-entries").unwrap(), None);
    }

    #[test]
    fn test_file_set_creates_dir_and_file() {
        let temp = TempDir::new().unwrap();
        let dir = temp.path().join("storage");
        let mut storage = FileStorage::new(dir.clone());

        storage.set("codex-entries", "[]").unwrap();

        assert!(dir.join("codex-entries.json").is_file());
        assert_eq!(storage.get("codex-entries").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn test_file_set_overwrites_and_leaves_no_temp() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().to_path_buf());

        storage.set("codex-entries", "old").unwrap();
        storage.set("codex-entries", "new").unwrap();

        assert_eq!(storage.get("codex-entries").unwrap().as_deref(), Some("new"));
        let names: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .collect();
        assert_eq!(names, vec!["codex-entries.json"]);
    }

    #[cfg(unix)]
    #[test]
    fn test_file_failed_rename_cleans_up_temp() {
        let temp = TempDir::new().unwrap();
        // A non-empty directory where the slot file should go makes the rename fail
        let blocker = temp.path().join("codex-entries.json");
        fs::create_dir(&blocker).unwrap();
        fs::write(blocker.join("keep"), "x").unwrap();

        let mut storage = FileStorage::new(temp.path().to_path_buf());
        assert!(storage.set("codex-entries", "[]").is_err());

        let leftovers: Vec<String> = fs::read_dir(temp.path())
            .unwrap()
            .filter_map(|e| e.ok())
            .map(|e| e.file_name().to_string_lossy().to_string())
            .filter(|name| name.contains("codex-tmp"))
            .collect();
        assert!(leftovers.is_empty(), "temp files left: {:?}", leftovers);
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let temp = TempDir::new().unwrap();
        let mut storage = FileStorage::new(temp.path().to_path_buf());

        for key in ["", "../escape", "a/b", ".hidden", "with space"] {
            let err = storage.set(key, "v").unwrap_err();
            assert!(matches!(err, CodexError::Storage(_)), "key {:?}", key);
        }
        assert!(FileStorage::validate_key("codex-entries.corrupt").is_ok());
    }
}
