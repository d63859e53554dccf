//! Save a password under a label.

use anyhow::{bail, Context, Result};
use zeroize::Zeroizing;

use crate::cli::SaveArgs;
use crate::config::Config;
use crate::error::VaultError;
use crate::session::Session;
use crate::ui::{self, TerminalNotifier};
use crate::vault::Vault;

pub fn run(args: SaveArgs, config: &Config) -> Result<()> {
    let password = password_or_prompt(args.password)?;

    let store = super::open_or_create_store(config)?;
    let vault = Vault::load(store).context("failed to load saved passwords")?;

    let mut session = Session::new(vault);
    session.form.name = args.name;
    session.form.password.push_str(&password);

    let mut notifier = TerminalNotifier;
    match session.save(&mut notifier) {
        Ok(entry) => {
            println!("Saved '{}' ({} total).", entry.name, session.entries().len());
            Ok(())
        }
        Err(VaultError::Validation(_)) => bail!("nothing was saved"),
        Err(e) => Err(e).context("failed to save password"),
    }
}

/// The password given on the command line, or one read from a hidden
/// prompt.
fn password_or_prompt(given: Option<String>) -> Result<Zeroizing<String>> {
    match given {
        Some(pw) => Ok(Zeroizing::new(pw)),
        None => ui::prompt_hidden("Password to save: "),
    }
}
