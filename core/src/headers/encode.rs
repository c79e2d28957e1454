// ## 📂 File: `src/headers/encode.rs`
//! src/headers/encode.rs
//!
//! Header encoding utilities.
//!
//! Design notes:
//! - Serializes `StoreHeader` into a fixed 34-byte buffer in little-endian order.
//! - Field order must match `decode.rs` exactly; it is the durable file format.

use crate::headers::types::{StoreHeader, HEADER_LEN_V1};

/// Serialize a `StoreHeader` into a 34-byte buffer.
#[inline]
pub fn encode_header_le(h: &StoreHeader) -> [u8; HEADER_LEN_V1] {
    let mut out = [0u8; HEADER_LEN_V1];
    let mut i = 0usize;

    fn put_u16(out: &mut [u8], i: &mut usize, v: u16) {
        out[*i..*i + 2].copy_from_slice(&v.to_le_bytes());
        *i += 2;
    }
    fn put_bytes(out: &mut [u8], i: &mut usize, b: &[u8]) {
        out[*i..*i + b.len()].copy_from_slice(b);
        *i += b.len();
    }

    put_u16(&mut out, &mut i, h.revision); // 0..2   revision
    put_bytes(&mut out, &mut i, &h.salt);  // 2..34  salt

    debug_assert_eq!(i, HEADER_LEN_V1, "encoding wrote incorrect length");
    out
}
