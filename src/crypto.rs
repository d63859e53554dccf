//! Cryptographic primitives behind the encrypted store.
//!
//! This module does no file I/O and no user interaction. It provides:
//! - Argon2id key derivation from a master password
//! - XChaCha20-Poly1305 encryption with a fresh random nonce per call
//! - the matching decryption, which also authenticates the ciphertext

use argon2::{Algorithm, Argon2, Params, Version};
use chacha20poly1305::{
    aead::{Aead, KeyInit},
    XChaCha20Poly1305,
    XNonce,
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use crate::error::CryptoError;

/// Length of a derived key in bytes.
pub const KEY_LEN: usize = 32;

/// Length of an XChaCha20 nonce in bytes.
pub const NONCE_LEN: usize = 24;

/// Length of the random salt stored in the store header.
pub const SALT_LEN: usize = 16;

pub type Key = Zeroizing<[u8; KEY_LEN]>;

/// Argon2id parameters.
///
/// They are stored in the store header so a store created with one set
/// of parameters can still be opened after the defaults change.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct KdfParams {
    /// Memory cost in kibibytes (65536 = 64 MiB)
    pub memory_kib: u32,

    /// Number of iterations (time cost)
    pub iterations: u32,

    /// Degree of parallelism (number of lanes)
    pub parallelism: u32,
}

impl Default for KdfParams {
    fn default() -> Self {
        Self {
            memory_kib: 65_536,
            iterations: 3,
            parallelism: 1,
        }
    }
}

/// Fill a fresh buffer of `N` bytes from the OS RNG.
pub fn random_bytes<const N: usize>() -> [u8; N] {
    let mut out = [0u8; N];
    rand::rngs::OsRng.fill_bytes(&mut out);
    out
}

/// Derive a 32-byte key from `password` and `salt` with Argon2id.
///
/// # Errors
///
/// Returns an error if the parameters are rejected by Argon2 or if
/// derivation itself fails (e.g. a salt that is too short).
pub fn derive_key(password: &str, salt: &[u8], kdf: &KdfParams) -> Result<Key, CryptoError> {
    let params = Params::new(kdf.memory_kib, kdf.iterations, kdf.parallelism, Some(KEY_LEN))
        .map_err(|e| CryptoError::InvalidParams(e.to_string()))?;

    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let password = Zeroizing::new(password.as_bytes().to_vec());

    let mut out = Zeroizing::new([0u8; KEY_LEN]);
    argon2
        .hash_password_into(password.as_ref(), salt, &mut *out)
        .map_err(|e| CryptoError::KeyDerivation(e.to_string()))?;

    Ok(out)
}

/// Encrypt `plaintext` under `key`.
///
/// Returns the ciphertext (tag included) and the nonce that was used.
pub fn encrypt(key: &[u8; KEY_LEN], plaintext: &[u8]) -> Result<(Vec<u8>, [u8; NONCE_LEN]), CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.into());

    let nonce = random_bytes::<NONCE_LEN>();

    let ciphertext = cipher
        .encrypt(XNonce::from_slice(&nonce), plaintext)
        .map_err(|_| CryptoError::Encryption)?;

    Ok((ciphertext, nonce))
}

/// Decrypt `ciphertext` produced by [`encrypt`].
///
/// Fails if the key is wrong or the data was tampered with.
pub fn decrypt(
    key: &[u8; KEY_LEN],
    ciphertext: &[u8],
    nonce: &[u8; NONCE_LEN],
) -> Result<Zeroizing<Vec<u8>>, CryptoError> {
    let cipher = XChaCha20Poly1305::new(key.into());

    cipher
        .decrypt(XNonce::from_slice(nonce), ciphertext)
        .map(Zeroizing::new)
        .map_err(|_| CryptoError::Decryption)
}

#[cfg(test)]
pub(crate) fn test_kdf() -> KdfParams {
    KdfParams {
        memory_kib: 8,
        iterations: 1,
        parallelism: 1,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derive_key_is_deterministic_for_same_salt() {
        let salt = [7u8; SALT_LEN];
        let a = derive_key("hunter2", &salt, &test_kdf()).unwrap();
        let b = derive_key("hunter2", &salt, &test_kdf()).unwrap();
        assert_eq!(*a, *b);

        let c = derive_key("hunter3", &salt, &test_kdf()).unwrap();
        assert_ne!(*a, *c);
    }

    #[test]
    fn derive_key_rejects_bad_params() {
        let kdf = KdfParams {
            memory_kib: 1,
            iterations: 1,
            parallelism: 1,
        };
        let err = derive_key("pw", &[0u8; SALT_LEN], &kdf).unwrap_err();
        assert!(matches!(err, CryptoError::InvalidParams(_)));
    }

    #[test]
    fn encrypt_then_decrypt_recovers_plaintext() {
        let key = derive_key("master", &[1u8; SALT_LEN], &test_kdf()).unwrap();
        let (ct, nonce) = encrypt(&key, b"secret").unwrap();
        assert_ne!(ct.as_slice(), b"secret");

        let pt = decrypt(&key, &ct, &nonce).unwrap();
        assert_eq!(pt.as_slice(), b"secret");
    }

    #[test]
    fn decrypt_with_wrong_key_fails() {
        let key = derive_key("master", &[1u8; SALT_LEN], &test_kdf()).unwrap();
        let other = derive_key("other", &[1u8; SALT_LEN], &test_kdf()).unwrap();
        let (ct, nonce) = encrypt(&key, b"secret").unwrap();

        assert!(matches!(decrypt(&other, &ct, &nonce), Err(CryptoError::Decryption)));
    }

    #[test]
    fn nonces_are_fresh() {
        let key = derive_key("master", &[1u8; SALT_LEN], &test_kdf()).unwrap();
        let (_, n1) = encrypt(&key, b"x").unwrap();
        let (_, n2) = encrypt(&key, b"x").unwrap();
        assert_ne!(n1, n2);
    }
}
