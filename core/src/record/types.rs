// ## 📂 File: `src/record/types.rs`

//! record/types.rs
//! Decrypted logical content of a store and its validation rules.
//!
//! Invariants:
//! - Every key is non-empty and matches `[A-Za-z0-9_-]+`. This is what keeps
//!   `{`, `}` and `:` out of keys, so a key can never inject a tuple.
//! - A present key with a zero-length value is distinct from an absent key.

use std::collections::HashMap;
use std::fmt;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CodecError {
    /// Tuple does not start with `{`.
    #[error("expected '{{' for new key/value pair at offset {offset}; got {found:?}")]
    MissingOpenBrace { offset: usize, found: char },

    /// Tuple is never closed.
    #[error("missing closing '}}' for key/value pair at offset {offset}")]
    MissingCloseBrace { offset: usize },

    /// Tuple interior is not exactly `key:value`.
    #[error("malformed key/value pair at offset {offset}")]
    MalformedTuple { offset: usize },

    /// Value part is not standard base64.
    #[error("malformed base64 value for key {key:?}")]
    InvalidBase64 { key: String },

    /// Key is empty.
    #[error("key is empty")]
    EmptyKey,

    /// Key contains characters outside `[A-Za-z0-9_-]`.
    #[error("key {key:?} contains invalid characters (allowed: A-Z a-z 0-9 _ -)")]
    InvalidKey { key: String },
}

impl CodecError {
    /// Whether the failure is a caller-supplied key rather than a corrupt encoding.
    pub fn is_validation(&self) -> bool {
        matches!(self, CodecError::EmptyKey | CodecError::InvalidKey { .. })
    }
}

#[inline]
fn is_key_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Check a key against `[A-Za-z0-9_-]+`.
pub fn validate_key(key: &str) -> Result<(), CodecError> {
    validate_key_bytes(key.as_bytes())
}

pub(crate) fn validate_key_bytes(key: &[u8]) -> Result<(), CodecError> {
    if key.is_empty() {
        return Err(CodecError::EmptyKey);
    }
    if !key.iter().copied().all(is_key_byte) {
        return Err(CodecError::InvalidKey {
            key: String::from_utf8_lossy(key).into_owned(),
        });
    }
    Ok(())
}

/// Key to value mapping. Iteration order is unspecified.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct RecordMap {
    entries: HashMap<String, Vec<u8>>,
}

impl fmt::Debug for RecordMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Values are secrets; show shape only.
        f.debug_map()
            .entries(self.entries.iter().map(|(k, v)| (k, v.len())))
            .finish()
    }
}

impl RecordMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite `key` after validating it.
    pub fn insert(&mut self, key: &str, value: Vec<u8>) -> Result<Option<Vec<u8>>, CodecError> {
        validate_key(key)?;
        Ok(self.entries.insert(key.to_owned(), value))
    }

    pub fn get(&self, key: &str) -> Option<&[u8]> {
        self.entries.get(key).map(Vec::as_slice)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Remove `key`; absence is not an error.
    pub fn remove(&mut self, key: &str) -> Option<Vec<u8>> {
        self.entries.remove(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[u8])> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
