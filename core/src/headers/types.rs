// ## 📂 File: `src/headers/types.rs`

//! headers/types.rs
//! Store header struct and its errors.
//!
//! Notes:
//! - 34 bytes, fixed length: 2-byte little-endian revision, 32-byte salt.
//! - There is no magic marker and no checksum; integrity of the store comes
//!   from the AEAD tag over the payload, not from the header.
//! - Both fields are written once at creation and never modified.

use thiserror::Error;

use crate::constants::{CURRENT_REVISION, HEADER_LEN, SALT_LEN};

/// Fixed header size in bytes.
pub const HEADER_LEN_V1: usize = HEADER_LEN;

#[derive(Clone, PartialEq, Eq)]
pub struct StoreHeader {
    pub revision: u16,          // format revision
    pub salt: [u8; SALT_LEN],   // PBKDF2 salt (random per store)
}

impl std::fmt::Debug for StoreHeader {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Salt is not secret, but it is never printed in full.
        f.debug_struct("StoreHeader")
            .field("revision", &self.revision)
            .field("salt", &fmt_salt_prefix(&self.salt))
            .finish()
    }
}

impl StoreHeader {
    pub const LEN: usize = HEADER_LEN_V1;

    /// Header for a brand-new store at the current revision.
    pub fn new_with_salt(salt: [u8; SALT_LEN]) -> Self {
        Self {
            revision: CURRENT_REVISION,
            salt,
        }
    }

    /// Whether this header was written by the current format revision.
    pub fn is_current(&self) -> bool {
        self.revision == CURRENT_REVISION
    }
}

/// Short hex prefix used in diagnostics.
pub fn fmt_salt_prefix(salt: &[u8]) -> String {
    let n = salt.len().min(4);
    format!("0x{}…", hex::encode(&salt[..n]))
}

#[derive(Debug, Error)]
pub enum HeaderError {
    /// A header field is cut short by end-of-file.
    #[error("{field} is truncated: have {have} bytes, need {need}")]
    Truncated {
        field: &'static str,
        have: usize,
        need: usize,
    },

    /// Salt supplied for writing has the wrong size.
    #[error("invalid salt length {have}; want {need}")]
    InvalidSaltLen { have: usize, need: usize },
}
