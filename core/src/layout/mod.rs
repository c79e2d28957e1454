//! layout/mod.rs
//! Persistent layout of a store file: fixed header plus encrypted payload.

pub mod backend;
pub mod file;

pub use backend::*;
pub use file::*;

use std::io;

use thiserror::Error;

use crate::headers::HeaderError;

#[derive(Debug, Error)]
pub enum LayoutError {
    /// Open/seek/read/write/truncate/sync failure.
    #[error("cannot {op}: {source}")]
    Io {
        op: &'static str,
        #[source]
        source: io::Error,
    },

    /// Header bytes missing or malformed.
    #[error(transparent)]
    Header(#[from] HeaderError),
}
