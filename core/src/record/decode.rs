// ## 📂 File: `src/record/decode.rs`
//! src/record/decode.rs
//!
//! Record decoding.
//!
//! Design notes:
//! - Input is a run of `{key:base64value}` tuples with nothing in between.
//! - Scan: expect `{`, find the next `}`, split the interior on `:` into
//!   exactly two parts, validate the key, base64-decode the value.
//! - There are no length prefixes: the whole blob was authenticated by the
//!   AEAD before it gets here, so it is parsed in one pass and rejected whole.
//! - A repeated key keeps the last value.

use base64::{engine::general_purpose::STANDARD, Engine};

use crate::constants::delimiters::{CLOSE, OPEN, SEPARATOR};
use crate::record::types::{validate_key_bytes, CodecError, RecordMap};

/// Parse decrypted plaintext into a `RecordMap`. Empty input is an empty map.
pub fn decode_records(buf: &[u8]) -> Result<RecordMap, CodecError> {
    let mut map = RecordMap::new();
    let mut i = 0usize;

    while i < buf.len() {
        if buf[i] != OPEN {
            return Err(CodecError::MissingOpenBrace {
                offset: i,
                found: buf[i] as char,
            });
        }

        let close = buf[i..]
            .iter()
            .position(|&b| b == CLOSE)
            .ok_or(CodecError::MissingCloseBrace { offset: i })?;

        let (key, value) = split_tuple(&buf[i + 1..i + close]).ok_or(CodecError::MalformedTuple { offset: i })?;

        validate_key_bytes(key)?;
        // Validated keys are ASCII.
        let key = String::from_utf8_lossy(key);

        let value = STANDARD.decode(value).map_err(|_| CodecError::InvalidBase64 {
            key: key.clone().into_owned(),
        })?;

        map.insert(&key, value)?;
        i += close + 1;
    }

    Ok(map)
}

/// `key:value` with exactly one separator.
#[inline]
fn split_tuple(interior: &[u8]) -> Option<(&[u8], &[u8])> {
    let mut parts = interior.split(|&b| b == SEPARATOR);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(key), Some(value), None) => Some((key, value)),
        _ => None,
    }
}
