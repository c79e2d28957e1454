//! layout/backend.rs
//! Storage handle abstraction under the store file layout.
//!
//! `StoreFile` only needs positional reads and writes plus truncate; keeping
//! that behind a trait lets the layout run over an in-memory cursor in tests.

use std::fs::File;
use std::io::{self, Cursor, Read, Seek, Write};

/// Seekable, truncatable byte storage.
pub trait Backend: Read + Write + Seek {
    /// Shrink (or extend with zeros) the storage to exactly `len` bytes.
    fn truncate(&mut self, len: u64) -> io::Result<()>;

    /// Flush written data to durable storage.
    fn sync(&mut self) -> io::Result<()>;
}

impl Backend for File {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }
}

impl Backend for Cursor<Vec<u8>> {
    fn truncate(&mut self, len: u64) -> io::Result<()> {
        let len = usize::try_from(len)
            .map_err(|_| io::Error::new(io::ErrorKind::InvalidInput, "length exceeds address space"))?;
        self.get_mut().resize(len, 0);
        Ok(())
    }

    fn sync(&mut self) -> io::Result<()> {
        Ok(())
    }
}
