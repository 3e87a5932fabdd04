//! Initialize archive use case

use crate::error::Result;
use crate::infrastructure::{ArchiveRepository, Config, FileSystemRepository};
use std::fs;
use std::path::Path;

/// Initialize a new archive at the specified path.
///
/// The entry slot is left empty; the first session starts from the seed set.
pub fn init(path: &Path) -> Result<Config> {
    if !path.exists() {
        fs::create_dir_all(path)?;
    }

    let repo = FileSystemRepository::new(path.to_path_buf());
    repo.initialize()?;

    let config = Config::new();
    repo.save_config(&config)?;

    log::info!(
        "event=archive_init module=app path={} key={}",
        path.display(),
        config.storage_key
    );

    Ok(config)
}
