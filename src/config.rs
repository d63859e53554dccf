//! Runtime configuration.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::crypto::KdfParams;
use crate::error::ConfigError;

/// Default store file name, relative to the working directory.
pub const DEFAULT_STORE_PATH: &str = "passkeep.json";

/// Seconds before a copied password is cleared from the clipboard.
pub const DEFAULT_CLIPBOARD_CLEAR_SECS: u64 = 10;

/// Longest password `gen` will produce.
pub const DEFAULT_MAX_LENGTH: usize = 4096;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Encrypted store file
    pub store_path: PathBuf,

    /// Clipboard clear delay; 0 leaves the clipboard alone
    pub clipboard_clear_secs: u64,

    /// Upper limit for a generated password's length
    pub max_length: usize,

    /// Key derivation parameters for newly created stores
    pub kdf: KdfParams,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            clipboard_clear_secs: DEFAULT_CLIPBOARD_CLEAR_SECS,
            max_length: DEFAULT_MAX_LENGTH,
            kdf: KdfParams::default(),
        }
    }
}

impl Config {
    /// Load configuration from a JSON file. Missing fields keep their
    /// defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn with_store_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.store_path = path.into();
        self
    }
}
