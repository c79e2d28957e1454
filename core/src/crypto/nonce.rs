// ## 📂 File: `src/crypto/nonce.rs`

//! crypto/nonce.rs
//! Random salt and nonce generation.
//!
//! Design:
//! - Both draw from the operating system CSPRNG (`OsRng`).
//! - A fresh nonce is drawn for every seal. Nonces are never derived from a
//!   counter or from the payload, so a reopened store cannot replay one.
//!
//! Security notes:
//! - With 96-bit random nonces the collision bound is reached only after
//!   ~2^32 seals under one key, far beyond the intended workload.
//! - A short read from the entropy source is fatal; there is no fallback RNG.

use rand::rngs::OsRng;
use rand::RngCore;

use crate::constants::SALT_LEN;
use crate::crypto::types::{CryptoError, NONCE_LEN_12};

/// Generate the 32-byte PBKDF2 salt for a new store.
pub fn generate_salt() -> Result<[u8; SALT_LEN], CryptoError> {
    let mut salt = [0u8; SALT_LEN];
    fill_random(&mut salt, "salt")?;
    Ok(salt)
}

/// Generate a fresh 12-byte AES-GCM nonce.
pub fn generate_nonce() -> Result<[u8; NONCE_LEN_12], CryptoError> {
    let mut nonce = [0u8; NONCE_LEN_12];
    fill_random(&mut nonce, "nonce")?;
    Ok(nonce)
}

#[inline]
fn fill_random(buf: &mut [u8], what: &'static str) -> Result<(), CryptoError> {
    OsRng.try_fill_bytes(buf).map_err(|e| CryptoError::Entropy {
        what,
        reason: e.to_string(),
    })
}

/// Summary: Validate a nonce slice length before it reaches the cipher.
#[inline]
pub fn validate_nonce_len(nonce: &[u8]) -> Result<(), CryptoError> {
    if nonce.len() != NONCE_LEN_12 {
        return Err(CryptoError::InvalidNonceLen {
            expected: NONCE_LEN_12,
            actual: nonce.len(),
        });
    }
    Ok(())
}
