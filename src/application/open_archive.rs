//! Open an initialized archive for a session

use crate::application::EntryStore;
use crate::error::Result;
use crate::infrastructure::{ArchiveRepository, Config, FileStorage, FileSystemRepository};

/// A discovered archive: its config and a loaded entry store
pub struct Archive {
    pub config: Config,
    pub store: EntryStore<FileStorage>,
}

/// Load config and the entry store for `repo`
pub fn open_archive(repo: &FileSystemRepository) -> Result<Archive> {
    let config = repo.load_config()?;
    FileStorage::validate_key(&config.storage_key)?;

    let store = EntryStore::initialize(repo.open_storage(), config.storage_key.clone());
    Ok(Archive { config, store })
}
