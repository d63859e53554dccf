//! Form state for one generate / copy / save cycle.
//!
//! A [`Session`] owns the vault and the three transient fields a user
//! fills in: the label, the requested length and the generated password.
//! A successful save clears all three.

use tracing::debug;
use zeroize::Zeroize;

use crate::error::{ClipboardError, VaultError};
use crate::generator::{self, GenerationWarning};
use crate::storage::SecureStore;
use crate::ui::{ClipboardWriter, Notifier};
use crate::vault::{PasswordEntry, Vault};

/// Values the user is currently editing.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Form {
    pub name: String,
    pub length: String,
    pub password: String,
}

impl Form {
    /// Reset every field, wiping the password buffer first.
    pub fn clear(&mut self) {
        self.password.zeroize();
        *self = Self::default();
    }
}

pub struct Session<S: SecureStore> {
    vault: Vault<S>,
    pub form: Form,
}

impl<S: SecureStore> Session<S> {
    pub fn new(vault: Vault<S>) -> Self {
        Self {
            vault,
            form: Form::default(),
        }
    }

    /// Generate a password from the length field into the form.
    ///
    /// Returns the warning when the length degraded to an empty password.
    pub fn generate(&mut self) -> Option<GenerationWarning> {
        let generation = generator::generate_from_input(&self.form.length);
        self.form.password = generation.password;
        generation.warning
    }

    /// Copy the current password to the clipboard.
    pub fn copy(
        &self,
        clipboard: &mut dyn ClipboardWriter,
        notifier: &mut dyn Notifier,
    ) -> Result<(), ClipboardError> {
        clipboard.set_text(&self.form.password)?;
        notifier.show("Copied!", "Password copied to the clipboard!");
        Ok(())
    }

    /// Save the form's name and password to the vault.
    ///
    /// Missing input is reported through `notifier` and leaves the form
    /// as it was. On success the form is cleared.
    pub fn save(&mut self, notifier: &mut dyn Notifier) -> Result<PasswordEntry, VaultError> {
        let saved = match self.vault.save(&self.form.name, &self.form.password) {
            Ok(entry) => entry.clone(),
            Err(VaultError::Validation(e)) => {
                notifier.show("Error", &e.to_string());
                return Err(e.into());
            }
            Err(e) => return Err(e),
        };

        self.form.clear();
        debug!(entries = self.vault.len(), "form cleared after save");
        Ok(saved)
    }

    pub fn entries(&self) -> &[PasswordEntry] {
        self.vault.entries()
    }

    pub fn into_vault(self) -> Vault<S> {
        self.vault
    }
}
