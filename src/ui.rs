//! User interaction helpers.
//!
//! Terminal prompts, the clipboard and user-facing alerts live here. No
//! vault or cryptographic logic should.

use std::io::{self, Write};
use std::thread;
use std::time::Duration;

use anyhow::{bail, Context};
use clipboard::{ClipboardContext, ClipboardProvider};
use tracing::debug;
use zeroize::Zeroizing;

use crate::error::ClipboardError;

/// Environment variable read before prompting for the master password.
pub const MASTER_PASSWORD_ENV: &str = "PASSKEEP_MASTER_PASSWORD";

/// Something that can show a short alert to the user.
pub trait Notifier {
    fn show(&mut self, title: &str, message: &str);
}

/// Something that can put text on the clipboard.
pub trait ClipboardWriter {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Prints alerts to stderr, keeping stdout for generated passwords.
#[derive(Debug, Default)]
pub struct TerminalNotifier;

impl Notifier for TerminalNotifier {
    fn show(&mut self, title: &str, message: &str) {
        eprintln!("{}: {}", title, message);
    }
}

/// The desktop clipboard.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn context() -> Result<ClipboardContext, ClipboardError> {
        ClipboardContext::new().map_err(|e| ClipboardError(format!("init: {}", e)))
    }

    /// Block for `secs` seconds, then clear the clipboard if it still
    /// holds `text`.
    ///
    /// Some platforms drop clipboard contents when the owning process
    /// exits, so the caller stays alive until the timeout is over.
    pub fn clear_after(&self, text: &str, secs: u64) -> Result<(), ClipboardError> {
        thread::sleep(Duration::from_secs(secs));

        let mut ctx = Self::context()?;
        let current = ctx.get_contents().ok();
        if current.as_deref() == Some(text) {
            ctx.set_contents(String::new())
                .map_err(|e| ClipboardError(format!("clear: {}", e)))?;
            debug!("clipboard cleared");
        }
        Ok(())
    }
}

impl ClipboardWriter for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        let mut ctx = Self::context()?;
        ctx.set_contents(text.to_owned())
            .map_err(|e| ClipboardError(format!("set: {}", e)))
    }
}

pub fn prompt_yes(prompt: &str) -> bool {
    eprint!("{} [y/N]: ", prompt);
    io::stderr().flush().ok();
    let mut s = String::new();
    io::stdin().read_line(&mut s).ok();
    matches!(s.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Read a value with a hidden prompt.
pub fn prompt_hidden(prompt: &str) -> anyhow::Result<Zeroizing<String>> {
    rpassword::prompt_password(prompt)
        .map(Zeroizing::new)
        .context("failed to read from terminal")
}

/// Master password for an existing store.
pub fn read_master_password() -> anyhow::Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(MASTER_PASSWORD_ENV) {
        debug!("master password taken from {}", MASTER_PASSWORD_ENV);
        return Ok(Zeroizing::new(pw));
    }
    prompt_hidden("Master password: ")
}

/// Master password for a new store, entered twice.
pub fn read_new_master_password() -> anyhow::Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(MASTER_PASSWORD_ENV) {
        if pw.is_empty() {
            bail!("{} is set but empty", MASTER_PASSWORD_ENV);
        }
        return Ok(Zeroizing::new(pw));
    }

    let first = prompt_hidden("Create master password: ")?;
    if first.is_empty() {
        bail!("master password must not be empty");
    }
    let confirm = prompt_hidden("Confirm master password: ")?;
    if *first != *confirm {
        bail!("passwords do not match");
    }
    Ok(first)
}
