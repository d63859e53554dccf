//! List saved passwords.

use std::io::{self, Write};

use anyhow::{Context, Result};

use crate::config::Config;
use crate::storage::EncryptedFileStore;
use crate::vault::{PasswordEntry, Vault};

pub fn run(names_only: bool, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    write_entries(names_only, config, &mut stdout.lock())
}

/// Write one line per saved entry to `out`, in the order they were saved.
pub(crate) fn write_entries(names_only: bool, config: &Config, out: &mut dyn Write) -> Result<()> {
    // no store yet means nothing has been saved
    if !EncryptedFileStore::exists(&config.store_path) {
        writeln!(out, "No saved passwords.")?;
        return Ok(());
    }

    let store = super::open_store(config)?;
    let vault = Vault::load(store).context("failed to load saved passwords")?;

    if vault.is_empty() {
        writeln!(out, "No saved passwords.")?;
        return Ok(());
    }

    for entry in vault.entries() {
        writeln!(out, "{}", render(entry, names_only))?;
    }
    Ok(())
}

fn render(entry: &PasswordEntry, names_only: bool) -> String {
    if names_only {
        entry.name.clone()
    } else {
        format!("{}\t{}", entry.name, entry.password)
    }
}
