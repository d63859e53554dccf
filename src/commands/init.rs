//! Initialize a new encrypted store.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::storage::EncryptedFileStore;
use crate::ui;

pub fn run(config: &Config) -> Result<()> {
    let store = create(config)?;
    println!("Store created at {}.", store.path().display());
    Ok(())
}

pub(crate) fn create(config: &Config) -> Result<EncryptedFileStore> {
    let master = ui::read_new_master_password()?;
    EncryptedFileStore::create(&config.store_path, &master, config.kdf.clone())
        .with_context(|| format!("failed to create {}", config.store_path.display()))
}
