//! The saved-password list.
//!
//! A vault is an append-only, ordered list of [`PasswordEntry`] values.
//! The whole list is stored as one JSON array under [`STORAGE_KEY`] in a
//! [`SecureStore`], and is rewritten in full after every append.
//!
//! The in-memory list and the stored copy never diverge: if writing the
//! new list fails, the append is undone before the error is returned.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{ValidationError, VaultError};
use crate::storage::SecureStore;

/// Storage key the list lives under.
pub const STORAGE_KEY: &str = "passwords";

/// A labelled password.
///
/// Field order is part of the stored format.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct PasswordEntry {
    pub name: String,
    pub password: String,
}

impl PasswordEntry {
    pub fn new(name: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            password: password.into(),
        }
    }
}

/// Serialize entries to the stored form: a compact JSON array.
pub fn entries_to_json(entries: &[PasswordEntry]) -> Result<String, serde_json::Error> {
    serde_json::to_string(entries)
}

/// Parse the stored form back into entries.
pub fn entries_from_json(data: &str) -> Result<Vec<PasswordEntry>, serde_json::Error> {
    serde_json::from_str(data)
}

/// Saved passwords backed by a [`SecureStore`].
pub struct Vault<S: SecureStore> {
    store: S,
    entries: Vec<PasswordEntry>,
}

impl<S: SecureStore> Vault<S> {
    /// Load the list from `store`.
    ///
    /// A store with nothing under [`STORAGE_KEY`] gives an empty vault.
    /// Loading is all-or-nothing: undecodable data is an error, never a
    /// partial list.
    pub fn load(store: S) -> Result<Self, VaultError> {
        let entries = match store.get(STORAGE_KEY).map_err(VaultError::Persistence)? {
            Some(data) => entries_from_json(&data).map_err(VaultError::Corrupt)?,
            None => Vec::new(),
        };

        debug!(entries = entries.len(), "loaded vault");
        Ok(Self { store, entries })
    }

    /// Append an entry and persist the whole list.
    ///
    /// Both `name` and `password` must be non-empty; otherwise nothing is
    /// changed and a [`VaultError::Validation`] is returned. If the store
    /// write fails the append is rolled back and
    /// [`VaultError::Persistence`] is returned.
    pub fn save(&mut self, name: &str, password: &str) -> Result<&PasswordEntry, VaultError> {
        if name.is_empty() {
            return Err(ValidationError::MissingName.into());
        }
        if password.is_empty() {
            return Err(ValidationError::MissingPassword.into());
        }

        self.entries.push(PasswordEntry::new(name, password));

        if let Err(e) = self.persist() {
            self.entries.pop();
            warn!(label = name, "saving failed, entry discarded: {}", e);
            return Err(e);
        }

        info!(label = name, entries = self.entries.len(), "saved password");
        Ok(&self.entries[self.entries.len() - 1])
    }

    fn persist(&mut self) -> Result<(), VaultError> {
        let json = entries_to_json(&self.entries)
            .map_err(|e| VaultError::Persistence(e.into()))?;
        self.store
            .set(STORAGE_KEY, &json)
            .map_err(VaultError::Persistence)
    }

    /// Saved entries in insertion order.
    pub fn entries(&self) -> &[PasswordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Stored form of the current list.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        entries_to_json(&self.entries)
    }

    /// Give the backing store back, e.g. to reload from it.
    pub fn into_store(self) -> S {
        self.store
    }
}
