// ## 📂 File: `src/crypto/types.rs`

use thiserror::Error;

/// Derived key length (AES-256).
pub const KEY_LEN_32: usize = 32;

/// Standard 12-byte nonce length for AES-GCM.
pub const NONCE_LEN_12: usize = 12;

/// Fixed AEAD tag length (bytes).
pub const TAG_LEN: usize = 16;

/// Smallest well-formed encrypted payload: nonce plus tag over an empty plaintext.
pub const MIN_PAYLOAD_LEN: usize = NONCE_LEN_12 + TAG_LEN;

#[derive(Debug, Error)]
pub enum CryptoError {
    /// The OS random source could not supply enough bytes.
    #[error("entropy source failure while generating {what}: {reason}")]
    Entropy { what: &'static str, reason: String },

    /// Salt handed to the KDF has the wrong size.
    #[error("invalid salt length: expected={expected}, actual={actual}")]
    InvalidSaltLen { expected: usize, actual: usize },

    /// Invalid key length provided to cipher.
    #[error("invalid key length: expected={expected}, actual={actual}")]
    InvalidKeyLen { expected: usize, actual: usize },

    /// Nonce length mismatch (must be 12 bytes).
    #[error("invalid nonce length: expected={expected}, actual={actual}")]
    InvalidNonceLen { expected: usize, actual: usize },

    /// Payload cannot even hold a nonce and a tag.
    #[error("encrypted payload too short: {have} < {need}")]
    PayloadTooShort { have: usize, need: usize },

    /// AEAD tag mismatch (wrong passphrase or tampered payload).
    #[error("AEAD tag mismatch: wrong passphrase or corrupted payload")]
    TagMismatch,

    /// General runtime error with context.
    #[error("crypto failure: {0}")]
    Failure(String),
}
