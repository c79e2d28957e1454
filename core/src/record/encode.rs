// ## 📂 File: `src/record/encode.rs`
//! src/record/encode.rs
//!
//! Record encoding.
//!
//! Design notes:
//! - Emits `{key:base64(value)}` per entry, no separators between tuples.
//! - Tuple order follows map iteration order and is not stable across calls.
//! - Keys are validated on insert, so encoding itself cannot fail.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::constants::delimiters::{CLOSE, OPEN, SEPARATOR};
use crate::record::types::RecordMap;

/// Serialize every entry of `map` into the plaintext that gets sealed.
pub fn encode_records(map: &RecordMap) -> Vec<u8> {
    // base64 expands by 4/3; 3 bytes of framing per tuple.
    let cap = map
        .iter()
        .map(|(k, v)| k.len() + v.len().div_ceil(3) * 4 + 3)
        .sum();
    let mut out = Vec::with_capacity(cap);

    for (key, value) in map.iter() {
        out.push(OPEN);
        out.extend_from_slice(key.as_bytes());
        out.push(SEPARATOR);
        out.extend_from_slice(STANDARD.encode(value).as_bytes());
        out.push(CLOSE);
    }

    debug_assert_eq!(out.len(), cap, "encoded length mismatch");
    out
}
