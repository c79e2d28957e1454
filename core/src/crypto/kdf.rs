// ## src/crypto/kdf.rs

//! crypto/kdf.rs
//! Passphrase-based key derivation for the store cipher.
//!
//! Design:
//! - PBKDF2 with HMAC-SHA-256, 20 000 iterations, 32-byte output.
//! - Salt is the 32 random bytes persisted in the store header.
//!
//! Security notes:
//! - The iteration count is part of the on-disk contract (it is not stored);
//!   changing it makes existing stores unreadable.
//! - The derived key lives in a `Zeroizing` buffer and is wiped on drop.

use pbkdf2::pbkdf2_hmac;
use sha2::Sha256;
use zeroize::Zeroizing;

use crate::constants::{PBKDF2_ITERATIONS, SALT_LEN};
use crate::crypto::types::{CryptoError, KEY_LEN_32};

/// Derive the 32-byte store key from `passphrase` and the header `salt`.
///
/// Errors:
/// - `CryptoError::InvalidSaltLen` if `salt` is not exactly 32 bytes.
///
/// Same inputs always produce the same key; any change to either input
/// produces an unrelated key.
pub fn derive_key(
    passphrase: &[u8],
    salt: &[u8],
) -> Result<Zeroizing<[u8; KEY_LEN_32]>, CryptoError> {
    if salt.len() != SALT_LEN {
        return Err(CryptoError::InvalidSaltLen {
            expected: SALT_LEN,
            actual: salt.len(),
        });
    }

    let mut key = Zeroizing::new([0u8; KEY_LEN_32]);
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, &mut key[..]);
    Ok(key)
}
