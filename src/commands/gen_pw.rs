//! Generate a random password, optionally copying and saving it.

use anyhow::{bail, Context, Result};
use zeroize::Zeroizing;

use crate::cli::GenArgs;
use crate::config::Config;
use crate::error::VaultError;
use crate::generator;
use crate::session::Session;
use crate::storage::{MemoryStore, SecureStore};
use crate::ui::{Notifier, SystemClipboard, TerminalNotifier};
use crate::vault::Vault;

pub fn run(args: GenArgs, config: &Config) -> Result<()> {
    if args.save.is_some() {
        let store = super::open_or_create_store(config)?;
        let vault = Vault::load(store).context("failed to load saved passwords")?;
        cycle(Session::new(vault), &args, config)
    } else {
        // nothing is persisted, so a scratch store is enough
        let vault = Vault::load(MemoryStore::new())?;
        cycle(Session::new(vault), &args, config)
    }
}

/// Generate into the session's form, refusing lengths above `max_length`.
///
/// A degenerate length is reported once, through `notifier`.
pub(crate) fn generate_into<S: SecureStore>(
    session: &mut Session<S>,
    length: &str,
    max_length: usize,
    notifier: &mut dyn Notifier,
) -> Result<()> {
    if let Some(n) = generator::parse_length(length) {
        if n > 0 && usize::try_from(n).map_or(true, |n| n > max_length) {
            bail!("length {} is above the maximum of {}", n, max_length);
        }
    }

    session.form.length = length.to_owned();
    if let Some(warning) = session.generate() {
        notifier.show("Warning", &warning.to_string());
    }
    Ok(())
}

fn cycle<S: SecureStore>(mut session: Session<S>, args: &GenArgs, config: &Config) -> Result<()> {
    let mut notifier = TerminalNotifier;
    let mut clipboard = SystemClipboard;

    generate_into(&mut session, &args.length, config.max_length, &mut notifier)?;

    let password = Zeroizing::new(session.form.password.clone());
    println!("{}", *password);

    let mut copied = false;
    if args.copy && !password.is_empty() {
        match session.copy(&mut clipboard, &mut notifier) {
            Ok(()) => copied = true,
            Err(e) => notifier.show("Error", &e.to_string()),
        }
    }

    if let Some(name) = &args.save {
        session.form.name = name.clone();
        match session.save(&mut notifier) {
            Ok(entry) => println!("Saved '{}'.", entry.name),
            Err(VaultError::Validation(_)) => bail!("nothing was saved"),
            Err(e) => return Err(e).context("failed to save password"),
        }
    }

    if copied && config.clipboard_clear_secs > 0 {
        eprintln!(
            "Clipboard will be cleared in {} seconds.",
            config.clipboard_clear_secs
        );
        clipboard.clear_after(&password, config.clipboard_clear_secs)?;
    }

    Ok(())
}
