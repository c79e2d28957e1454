// ## 📂 File: `src/headers/decode.rs`
//! src/headers/decode.rs
//!
//! Header decoding utilities.
//!
//! Design notes:
//! - Deserializes the first 34 bytes of a store into `StoreHeader`.
//! - Any revision value is accepted here; policy on unknown revisions lives
//!   in the store.

use crate::constants::{REVISION_LEN, SALT_LEN};
use crate::headers::types::{HeaderError, StoreHeader};

/// Deserialize a little-endian header.
///
/// # Returns
/// - `Ok(StoreHeader)` when `buf` holds at least 34 bytes.
/// - `Err(HeaderError::Truncated)` naming the first field that is cut short.
#[inline]
pub fn decode_header_le(buf: &[u8]) -> Result<StoreHeader, HeaderError> {
    let revision = decode_revision_le(buf)?;
    let salt = decode_salt(&buf[REVISION_LEN..])?;
    Ok(StoreHeader { revision, salt })
}

/// Decode the 2-byte revision field.
#[inline]
pub fn decode_revision_le(buf: &[u8]) -> Result<u16, HeaderError> {
    match buf.get(..REVISION_LEN) {
        Some(b) => Ok(u16::from_le_bytes([b[0], b[1]])),
        None => Err(HeaderError::Truncated {
            field: "revision",
            have: buf.len(),
            need: REVISION_LEN,
        }),
    }
}

/// Decode the 32-byte salt field.
#[inline]
pub fn decode_salt(buf: &[u8]) -> Result<[u8; SALT_LEN], HeaderError> {
    let src = buf.get(..SALT_LEN).ok_or(HeaderError::Truncated {
        field: "salt",
        have: buf.len(),
        need: SALT_LEN,
    })?;
    let mut salt = [0u8; SALT_LEN];
    salt.copy_from_slice(src);
    Ok(salt)
}
