//! Archive directory on disk
//!
//! An archive is any directory holding a `.codex/` folder:
//!
//! ```text
//! <root>/.codex/config.toml
//! <root>/.codex/storage/<key>.json
//! ```

use crate::error::{CodexError, Result};
use crate::infrastructure::{Config, FileStorage};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable pinning the archive root
pub const ROOT_ENV_VAR: &str = "CODEX_ROOT";

const CODEX_DIR: &str = ".codex";
const STORAGE_DIR: &str = "storage";

/// Operations on an archive root
pub trait ArchiveRepository {
    fn root(&self) -> &Path;

    fn load_config(&self) -> Result<Config>;

    fn save_config(&self, config: &Config) -> Result<()>;

    /// True once `.codex/` exists under the root
    fn is_initialized(&self) -> bool;

    /// Lay out `.codex/` and its storage folder. Fails on an existing archive.
    fn initialize(&self) -> Result<()>;
}

/// Archive rooted at a directory on the local file system
#[derive(Debug, Clone)]
pub struct FileSystemRepository {
    pub root: PathBuf,
}

impl FileSystemRepository {
    pub fn new(root: PathBuf) -> Self {
        FileSystemRepository { root }
    }

    /// Locate the archive for this process.
    ///
    /// `CODEX_ROOT` wins when set and must point at an archive; otherwise the
    /// nearest archive at or above the working directory is used.
    pub fn discover() -> Result<Self> {
        match std::env::var_os(ROOT_ENV_VAR) {
            Some(pinned) => Self::from_pinned_root(PathBuf::from(pinned)),
            None => Self::discover_from(&std::env::current_dir()?),
        }
    }

    /// Nearest archive at `start` or one of its ancestors
    pub fn discover_from(start: &Path) -> Result<Self> {
        start
            .ancestors()
            .find(|dir| is_archive_root(dir))
            .map(|dir| FileSystemRepository::new(dir.to_path_buf()))
            .ok_or_else(|| CodexError::NotCodexDirectory(start.to_path_buf()))
    }

    fn from_pinned_root(root: PathBuf) -> Result<Self> {
        if is_archive_root(&root) {
            return Ok(FileSystemRepository::new(root));
        }
        Err(CodexError::Config(format!(
            "{} points at '{}', which has no {} folder. \
            Run 'codex init' there or unset {}.",
            ROOT_ENV_VAR,
            root.display(),
            CODEX_DIR,
            ROOT_ENV_VAR
        )))
    }

    fn codex_dir(&self) -> PathBuf {
        self.root.join(CODEX_DIR)
    }

    /// Folder holding one file per storage slot
    pub fn storage_dir(&self) -> PathBuf {
        self.codex_dir().join(STORAGE_DIR)
    }

    pub fn open_storage(&self) -> FileStorage {
        FileStorage::new(self.storage_dir())
    }
}

fn is_archive_root(dir: &Path) -> bool {
    dir.join(CODEX_DIR).is_dir()
}

impl ArchiveRepository for FileSystemRepository {
    fn root(&self) -> &Path {
        &self.root
    }

    fn load_config(&self) -> Result<Config> {
        Config::load_from_dir(&self.root)
    }

    fn save_config(&self, config: &Config) -> Result<()> {
        config.save_to_dir(&self.root)
    }

    fn is_initialized(&self) -> bool {
        is_archive_root(&self.root)
    }

    fn initialize(&self) -> Result<()> {
        if self.is_initialized() {
            return Err(CodexError::Config(format!(
                "Archive already exists at {}",
                self.root.display()
            )));
        }

        fs::create_dir_all(self.storage_dir())?;
        Ok(())
    }
}
