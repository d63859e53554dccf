//! passkeep: random password generation with a local encrypted store.
//!
//! - [`generator`] draws passwords from a fixed alphabet
//! - [`vault`] keeps the append-only list of labelled passwords
//! - [`storage`] persists it, encrypted, through the [`storage::SecureStore`] trait
//! - [`session`] ties generation, clipboard and saving together the way the CLI uses them

pub mod auth;
pub mod cli;
pub mod commands;
pub mod config;
pub mod crypto;
pub mod error;
pub mod generator;
pub mod session;
pub mod storage;
pub mod ui;
pub mod vault;

pub use config::Config;
pub use error::{StorageError, ValidationError, VaultError};
pub use generator::{generate, generate_from_input, Generation, GenerationWarning, ALPHABET};
pub use storage::{EncryptedFileStore, MemoryStore, SecureStore};
pub use vault::{PasswordEntry, Vault, STORAGE_KEY};
