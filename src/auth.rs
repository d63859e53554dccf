//! Master password checks for the encrypted store.
//!
//! The master password is never stored. Instead the store header keeps a
//! known token encrypted under the derived key; a password is accepted
//! only if that token decrypts back to the expected bytes.

use crate::crypto::{self, Key, KdfParams, NONCE_LEN, SALT_LEN};
use crate::error::StorageError;
use crate::storage::StoreHeader;

const VERIFICATION_TOKEN: &[u8] = b"passkeep-check";

/// Current on-disk format version.
pub const FORMAT_VERSION: u32 = 1;

/// Build a fresh header for `master_password`.
///
/// Returns the header together with the derived key so the caller does
/// not have to run the KDF a second time.
pub fn new_header(master_password: &str, kdf: KdfParams) -> Result<(StoreHeader, Key), StorageError> {
    let salt = crypto::random_bytes::<SALT_LEN>().to_vec();
    let key = crypto::derive_key(master_password, &salt, &kdf)?;
    let (verif_ciphertext, verif_nonce) = crypto::encrypt(&key, VERIFICATION_TOKEN)?;

    let header = StoreHeader {
        version: FORMAT_VERSION,
        salt,
        kdf_params: kdf,
        verif_nonce: verif_nonce.to_vec(),
        verif_ciphertext,
    };

    Ok((header, key))
}

/// Verify `password` against `header`.
///
/// On success returns the derived key. A wrong password yields
/// [`StorageError::InvalidMasterPassword`]; a header with a malformed
/// nonce yields [`StorageError::Corrupt`].
pub fn verify_master(header: &StoreHeader, password: &str) -> Result<Key, StorageError> {
    if header.version != FORMAT_VERSION {
        return Err(StorageError::Corrupt(format!(
            "unsupported store version {}",
            header.version
        )));
    }

    let key = crypto::derive_key(password, &header.salt, &header.kdf_params)?;

    let nonce: [u8; NONCE_LEN] = header
        .verif_nonce
        .as_slice()
        .try_into()
        .map_err(|_| StorageError::Corrupt("invalid verification nonce length".into()))?;

    let plaintext = crypto::decrypt(&key, &header.verif_ciphertext, &nonce)
        .map_err(|_| StorageError::InvalidMasterPassword)?;

    if plaintext.as_slice() != VERIFICATION_TOKEN {
        return Err(StorageError::InvalidMasterPassword);
    }

    Ok(key)
}
