//! constants.rs
//! On-disk layout offsets, key-derivation parameters and format revision.
//!
//! Layout (all multi-byte integers little-endian):
//!
//! ```text
//! offset 0      : revision, 2 bytes
//! offset 2      : salt, 32 bytes
//! offset 34..EOF: payload = nonce (12 bytes) || ciphertext || tag (16 bytes)
//! ```
//!
//! These values define the durable contract. Changing any of them breaks
//! every store written before the change; bump `CURRENT_REVISION` instead.

/// Format revision written into every new store.
pub const CURRENT_REVISION: u16 = 1;

/// Size of the revision field.
pub const REVISION_LEN: usize = 2;

/// Size of the PBKDF2 salt stored after the revision.
pub const SALT_LEN: usize = 32;

/// Offset of the revision field.
pub const REVISION_OFFSET: u64 = 0;

/// Offset of the salt field.
pub const SALT_OFFSET: u64 = REVISION_LEN as u64;

/// Total header length; the encrypted payload starts here.
pub const HEADER_LEN: usize = REVISION_LEN + SALT_LEN;

/// Offset of the encrypted payload.
pub const PAYLOAD_OFFSET: u64 = HEADER_LEN as u64;

/// PBKDF2-HMAC-SHA256 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 20_000;

/// Record encoding delimiters (`{key:base64(value)}`).
pub mod delimiters {
    pub const OPEN: u8 = b'{';
    pub const CLOSE: u8 = b'}';
    pub const SEPARATOR: u8 = b':';
}
