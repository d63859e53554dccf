//! Error types for passkeep.
//!
//! Each layer has its own error enum so callers can tell a rejected input
//! apart from a storage failure. The command layer wraps these in
//! `anyhow::Error` for reporting.

use std::path::PathBuf;

use thiserror::Error;

/// Failures of the low-level cryptographic primitives.
#[derive(Error, Debug)]
pub enum CryptoError {
    #[error("invalid Argon2 params: {0}")]
    InvalidParams(String),

    #[error("key derivation failed: {0}")]
    KeyDerivation(String),

    #[error("encryption failed")]
    Encryption,

    #[error("decryption failed")]
    Decryption,
}

/// Failures of a [`SecureStore`](crate::storage::SecureStore) backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no store found at {0}; run `passkeep init` first")]
    NotInitialized(PathBuf),

    #[error("a store already exists at {0}")]
    AlreadyExists(PathBuf),

    #[error("invalid master password")]
    InvalidMasterPassword,

    #[error("store is damaged: {0}")]
    Corrupt(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Crypto(#[from] CryptoError),
}

/// Rejected save input. The message is the one shown to the user.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Fill in the name and generate the password first!")]
    MissingName,

    #[error("Fill in the name and generate the password first!")]
    MissingPassword,
}

/// Failures of vault operations.
#[derive(Error, Debug)]
pub enum VaultError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("could not persist saved passwords: {0}")]
    Persistence(#[source] StorageError),

    #[error("saved passwords could not be decoded: {0}")]
    Corrupt(#[source] serde_json::Error),
}

#[derive(Error, Debug)]
#[error("clipboard error: {0}")]
pub struct ClipboardError(pub String);

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
