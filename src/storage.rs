//! Secure key-value storage.
//!
//! [`SecureStore`] is the capability the vault persists through: a flat
//! map of string keys to string blobs. Two backends are provided:
//!
//! - [`EncryptedFileStore`]: a single JSON file on disk. Every value is
//!   encrypted independently with XChaCha20-Poly1305 under a key derived
//!   from the master password.
//! - [`MemoryStore`]: an in-process map, useful for tests.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::auth;
use crate::crypto::{self, Key, KdfParams, NONCE_LEN};
use crate::error::StorageError;

/// Minimal secure key-value storage.
pub trait SecureStore {
    /// Read the value stored under `key`, or `None` if there is none.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Unencrypted in-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecureStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

/// Metadata at the top of a store file.
///
/// Holds everything needed to derive the key and to check a master
/// password, without revealing the password itself.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoreHeader {
    /// Store format version
    pub version: u32,

    /// Random salt for key derivation
    pub salt: Vec<u8>,

    /// Argon2id parameters used to derive the key
    #[serde(default)]
    pub kdf_params: KdfParams,

    /// Nonce used to encrypt the verification token
    pub verif_nonce: Vec<u8>,

    /// Encrypted verification token
    pub verif_ciphertext: Vec<u8>,
}

/// One encrypted value.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct EncryptedValue {
    pub nonce: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

/// Complete store file as written to disk.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct StoreFile {
    pub header: StoreHeader,

    /// Encrypted values indexed by key
    #[serde(default)]
    pub values: BTreeMap<String, EncryptedValue>,
}

/// File-backed store, unlocked with a master password.
pub struct EncryptedFileStore {
    path: PathBuf,
    file: StoreFile,
    key: Key,
}

impl std::fmt::Debug for EncryptedFileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EncryptedFileStore")
            .field("path", &self.path)
            .field("keys", &self.file.values.keys().collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl EncryptedFileStore {
    /// Whether a store file exists at `path`.
    pub fn exists(path: &Path) -> bool {
        path.is_file()
    }

    /// Create a new, empty store at `path`.
    ///
    /// Refuses to overwrite an existing file.
    pub fn create(path: &Path, master_password: &str, kdf: KdfParams) -> Result<Self, StorageError> {
        if path.exists() {
            return Err(StorageError::AlreadyExists(path.to_path_buf()));
        }

        let (header, key) = auth::new_header(master_password, kdf)?;
        let store = Self {
            path: path.to_path_buf(),
            file: StoreFile {
                header,
                values: BTreeMap::new(),
            },
            key,
        };
        store.write()?;

        info!(path = %path.display(), "created encrypted store");
        Ok(store)
    }

    /// Open and unlock the store at `path`.
    pub fn open(path: &Path, master_password: &str) -> Result<Self, StorageError> {
        let data = match fs::read_to_string(path) {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(StorageError::NotInitialized(path.to_path_buf()));
            }
            Err(e) => return Err(e.into()),
        };

        let file: StoreFile = serde_json::from_str(&data)
            .map_err(|e| StorageError::Corrupt(format!("{}: {}", path.display(), e)))?;

        let key = auth::verify_master(&file.header, master_password)?;

        debug!(path = %path.display(), values = file.values.len(), "opened encrypted store");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            key,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the whole file, going through a sibling temp file so a
    /// failed write never leaves a half-written store behind.
    fn write(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(&self.file)?;

        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        let tmp = PathBuf::from(tmp);

        fs::write(&tmp, json)?;
        if let Err(e) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }

        debug!(path = %self.path.display(), "wrote encrypted store");
        Ok(())
    }
}

impl SecureStore for EncryptedFileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let Some(value) = self.file.values.get(key) else {
            return Ok(None);
        };

        let nonce: [u8; NONCE_LEN] = value
            .nonce
            .as_slice()
            .try_into()
            .map_err(|_| StorageError::Corrupt(format!("invalid nonce length for '{}'", key)))?;

        let plaintext = crypto::decrypt(&self.key, &value.ciphertext, &nonce)?;
        let text = std::str::from_utf8(&plaintext)
            .map_err(|_| StorageError::Corrupt(format!("value '{}' is not valid UTF-8", key)))?;

        Ok(Some(text.to_owned()))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let (ciphertext, nonce) = crypto::encrypt(&self.key, value.as_bytes())?;

        let previous = self.file.values.insert(
            key.to_owned(),
            EncryptedValue {
                nonce: nonce.to_vec(),
                ciphertext,
            },
        );

        if let Err(e) = self.write() {
            // keep the in-memory file identical to what is on disk
            match previous {
                Some(prev) => self.file.values.insert(key.to_owned(), prev),
                None => self.file.values.remove(key),
            };
            return Err(e);
        }

        Ok(())
    }
}
