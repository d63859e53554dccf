//! Command dispatch.
//!
//! Maps parsed CLI commands to their implementations. Each command lives
//! in its own file and exposes a single `run()` function.

use anyhow::{bail, Context, Result};
use tracing::debug;

use crate::cli::{Cli, Commands, GlobalArgs};
use crate::config::Config;
use crate::storage::EncryptedFileStore;
use crate::ui;

pub mod gen_pw;
pub mod init;
pub mod list;
pub mod save;

pub fn dispatch(cli: Cli) -> Result<()> {
    let config = load_config(&cli.global)?;
    debug!(store = %config.store_path.display(), "configuration loaded");

    match cli.command {
        Commands::Init => init::run(&config),
        Commands::Gen(args) => gen_pw::run(args, &config),
        Commands::Save(args) => save::run(args, &config),
        Commands::List { names_only } => list::run(names_only, &config),
    }
}

/// Defaults, then the config file, then command-line overrides.
pub fn load_config(global: &GlobalArgs) -> Result<Config> {
    let mut config = match &global.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };

    if let Some(store) = &global.store {
        config = config.with_store_path(store);
    }

    Ok(config)
}

/// Unlock the existing store.
pub(crate) fn open_store(config: &Config) -> Result<EncryptedFileStore> {
    let master = ui::read_master_password()?;
    EncryptedFileStore::open(&config.store_path, &master)
        .with_context(|| format!("failed to open {}", config.store_path.display()))
}

/// Unlock the store, offering to create it if it does not exist yet.
pub(crate) fn open_or_create_store(config: &Config) -> Result<EncryptedFileStore> {
    if EncryptedFileStore::exists(&config.store_path) {
        return open_store(config);
    }

    let prompt = format!(
        "No store at {}. Create one?",
        config.store_path.display()
    );
    if std::env::var_os(ui::MASTER_PASSWORD_ENV).is_none() && !ui::prompt_yes(&prompt) {
        bail!("aborted");
    }

    init::create(config)
}
