// ## 📂 File: `src/crypto/aead.rs`

//! src/crypto/aead.rs
//! AES-256-GCM wrapper producing and consuming `nonce || ciphertext || tag`.
//!
//! Design notes:
//! - 32-byte key, 12-byte nonce, 16-byte tag; no associated data.
//! - `seal` draws a fresh random nonce per call and prepends it.
//! - Tag verification is constant-time and fails closed (no partial plaintext).
//! - Empty plaintexts are valid: a store whose last key was deleted seals "".

use std::fmt;

// Import AEAD traits from aes_gcm's re-export to avoid duplicate `aead` versions.
use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Nonce};

use crate::crypto::nonce::{generate_nonce, validate_nonce_len};
use crate::crypto::types::{CryptoError, KEY_LEN_32, MIN_PAYLOAD_LEN, NONCE_LEN_12, TAG_LEN};

/// Instantiated AEAD for one open store.
#[derive(Clone)]
pub struct Cipher {
    inner: Aes256Gcm,
}

impl fmt::Debug for Cipher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cipher")
            .field("algorithm", &"AES-256-GCM")
            .finish_non_exhaustive()
    }
}

impl Cipher {
    /// Construct the cipher from a derived 32-byte key.
    pub fn new(key: &[u8]) -> Result<Self, CryptoError> {
        if key.len() != KEY_LEN_32 {
            return Err(CryptoError::InvalidKeyLen {
                expected: KEY_LEN_32,
                actual: key.len(),
            });
        }
        let inner = Aes256Gcm::new_from_slice(key).map_err(|_| CryptoError::InvalidKeyLen {
            expected: KEY_LEN_32,
            actual: key.len(),
        })?;
        Ok(Self { inner })
    }

    /// Seal `plaintext` under a fresh random nonce.
    ///
    /// Returns `nonce || ciphertext || tag`, ready to be written as the payload.
    pub fn seal(&self, plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let nonce = generate_nonce()?;
        self.seal_with_nonce(&nonce, plaintext)
    }

    /// Seal with a caller-supplied nonce.
    ///
    /// The caller owns nonce uniqueness; the store itself only ever calls `seal`.
    pub fn seal_with_nonce(&self, nonce_12: &[u8], plaintext: &[u8]) -> Result<Vec<u8>, CryptoError> {
        validate_nonce_len(nonce_12)?;

        let sealed = self
            .inner
            .encrypt(Nonce::from_slice(nonce_12), plaintext)
            .map_err(|_| CryptoError::Failure("AES-GCM seal failed".into()))?;

        let mut out = Vec::with_capacity(NONCE_LEN_12 + sealed.len());
        out.extend_from_slice(nonce_12);
        out.extend_from_slice(&sealed);
        Ok(out)
    }

    /// Open a `nonce || ciphertext || tag` payload.
    ///
    /// Errors:
    /// - `PayloadTooShort` if the payload cannot hold a nonce and a tag.
    /// - `TagMismatch` on a wrong key or any modified byte.
    pub fn open(&self, payload: &[u8]) -> Result<Vec<u8>, CryptoError> {
        let (nonce_12, ciphertext_and_tag) = split_payload(payload).ok_or(CryptoError::PayloadTooShort {
            have: payload.len(),
            need: MIN_PAYLOAD_LEN,
        })?;
        self.open_parts(nonce_12, ciphertext_and_tag)
    }

    /// Open with the nonce and `ciphertext || tag` already split.
    pub fn open_parts(&self, nonce_12: &[u8], ciphertext_and_tag: &[u8]) -> Result<Vec<u8>, CryptoError> {
        validate_nonce_len(nonce_12)?;

        if ciphertext_and_tag.len() < TAG_LEN {
            return Err(CryptoError::PayloadTooShort {
                have: NONCE_LEN_12 + ciphertext_and_tag.len(),
                need: MIN_PAYLOAD_LEN,
            });
        }

        self.inner
            .decrypt(Nonce::from_slice(nonce_12), ciphertext_and_tag)
            .map_err(|_| CryptoError::TagMismatch)
    }
}

/// Split a payload into its nonce and `ciphertext || tag` parts without decrypting.
pub fn split_payload(payload: &[u8]) -> Option<(&[u8], &[u8])> {
    if payload.len() < MIN_PAYLOAD_LEN {
        return None;
    }
    Some(payload.split_at(NONCE_LEN_12))
}
