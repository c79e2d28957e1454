use std::fmt;

use thiserror::Error;

use crate::crypto::CryptoError;
use crate::layout::LayoutError;
use crate::record::CodecError;

/// Coarse failure classes exposed to callers (exit codes, retry decisions).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// File open/seek/read/write/truncate/close failure, or a closed store.
    Io,
    /// Truncated header, malformed record tuple, bad base64.
    Format,
    /// Entropy failure, cipher construction, or authentication failure.
    Crypto,
    /// Key outside the allowed character set.
    Validation,
    /// Key not present.
    NotFound,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorKind::Io => "I/O error",
            ErrorKind::Format => "format error",
            ErrorKind::Crypto => "crypto error",
            ErrorKind::Validation => "validation error",
            ErrorKind::NotFound => "not found",
        };
        f.write_str(s)
    }
}

/// Unified store error covering layout, crypto, codec and lifecycle failures.
/// - `From<T>` impls enable `?` across layers.
/// - Messages name fields, offsets and keys, never values or key material.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Layout-level error (I/O or header parse).
    #[error("store file error: {0}")]
    Layout(#[from] LayoutError),

    /// Cryptographic error (KDF, AEAD, entropy).
    #[error("crypto error: {0}")]
    Crypto(#[from] CryptoError),

    /// Record codec error (malformed plaintext or invalid key).
    #[error("record error: {0}")]
    Codec(#[from] CodecError),

    /// Key not present in the store.
    #[error("record not found: {key:?}")]
    NotFound { key: String },

    /// Operation on a store that has been closed.
    #[error("store is closed")]
    Closed,
}

impl StoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StoreError::Layout(LayoutError::Io { .. }) => ErrorKind::Io,
            StoreError::Layout(LayoutError::Header(_)) => ErrorKind::Format,
            StoreError::Crypto(_) => ErrorKind::Crypto,
            StoreError::Codec(e) if e.is_validation() => ErrorKind::Validation,
            StoreError::Codec(_) => ErrorKind::Format,
            StoreError::NotFound { .. } => ErrorKind::NotFound,
            StoreError::Closed => ErrorKind::Io,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
