// ## 📂 File: `src/layout/file.rs`

//! layout/file.rs
//! Positional I/O over the store file: header fields and the payload region.
//!
//! Design notes:
//! - Every read seeks to a fixed offset first; callers never see offsets.
//! - `write_data` truncates to the header length and writes the whole payload.
//!   Every mutation is a full replace; nothing is appended.
//! - A crash between truncate and write leaves an empty payload. That is an
//!   accepted limitation of `InPlace` writes; `replace_atomically` closes it
//!   for file-backed stores at the cost of a rename per write.
//! - No OS-level file lock is taken. Two processes writing the same store
//!   will clobber each other.

use std::fs::File;
use std::io::{self, Read, SeekFrom, Write};
use std::path::Path;

use byteorder::{LittleEndian, WriteBytesExt};
use tempfile::NamedTempFile;

use crate::constants::{HEADER_LEN, PAYLOAD_OFFSET, REVISION_LEN, REVISION_OFFSET, SALT_LEN, SALT_OFFSET};
use crate::headers::{decode_revision_le, decode_salt, encode_header_le, HeaderError, StoreHeader};
use crate::layout::backend::Backend;
use crate::layout::LayoutError;

#[inline]
fn io_err(op: &'static str) -> impl FnOnce(io::Error) -> LayoutError {
    move |source| LayoutError::Io { op, source }
}

/// Read up to `len` bytes, stopping early only at end-of-file.
fn read_exact_or_eof<R: Read>(r: &mut R, len: usize) -> io::Result<Vec<u8>> {
    let mut buf = vec![0u8; len];
    let mut off = 0;

    while off < len {
        match r.read(&mut buf[off..]) {
            Ok(0) => break,
            Ok(n) => off += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }

    buf.truncate(off);
    Ok(buf)
}

/// The on-disk store, addressed by field rather than by offset.
#[derive(Debug)]
pub struct StoreFile<B: Backend> {
    inner: B,
}

impl<B: Backend> StoreFile<B> {
    pub fn new(inner: B) -> Self {
        StoreFile { inner }
    }

    /// Read the 2-byte little-endian revision at offset 0.
    pub fn read_revision(&mut self) -> Result<u16, LayoutError> {
        self.inner
            .seek(SeekFrom::Start(REVISION_OFFSET))
            .map_err(io_err("seek to the revision"))?;
        let buf = read_exact_or_eof(&mut self.inner, REVISION_LEN).map_err(io_err("read revision"))?;
        Ok(decode_revision_le(&buf)?)
    }

    /// Read the 32-byte salt that follows the revision.
    pub fn read_salt(&mut self) -> Result<[u8; SALT_LEN], LayoutError> {
        self.inner
            .seek(SeekFrom::Start(SALT_OFFSET))
            .map_err(io_err("seek to the salt"))?;
        let buf = read_exact_or_eof(&mut self.inner, SALT_LEN).map_err(io_err("read salt"))?;
        Ok(decode_salt(&buf)?)
    }

    /// Read both header fields.
    pub fn read_header(&mut self) -> Result<StoreHeader, LayoutError> {
        let revision = self.read_revision()?;
        let salt = self.read_salt()?;
        Ok(StoreHeader { revision, salt })
    }

    /// Read everything after the header. May be empty.
    pub fn read_data(&mut self) -> Result<Vec<u8>, LayoutError> {
        self.inner
            .seek(SeekFrom::Start(PAYLOAD_OFFSET))
            .map_err(io_err("seek to the data"))?;
        let mut data = Vec::new();
        self.inner.read_to_end(&mut data).map_err(io_err("read data"))?;
        Ok(data)
    }

    /// Write the revision field. Creation time only.
    pub fn write_revision(&mut self, revision: u16) -> Result<(), LayoutError> {
        self.inner
            .seek(SeekFrom::Start(REVISION_OFFSET))
            .map_err(io_err("seek to the revision"))?;
        self.inner
            .write_u16::<LittleEndian>(revision)
            .map_err(io_err("write revision"))?;
        Ok(())
    }

    /// Write the salt field. Creation time only.
    pub fn write_salt(&mut self, salt: &[u8]) -> Result<(), LayoutError> {
        if salt.len() != SALT_LEN {
            return Err(HeaderError::InvalidSaltLen { have: salt.len(), need: SALT_LEN }.into());
        }
        self.inner
            .seek(SeekFrom::Start(SALT_OFFSET))
            .map_err(io_err("seek to the salt"))?;
        self.inner.write_all(salt).map_err(io_err("write salt"))?;
        Ok(())
    }

    /// Write both header fields and flush.
    pub fn write_header(&mut self, header: &StoreHeader) -> Result<(), LayoutError> {
        self.write_revision(header.revision)?;
        self.write_salt(&header.salt)?;
        self.inner.flush().map_err(io_err("flush header"))?;
        Ok(())
    }

    /// Replace the payload region with `payload`.
    pub fn write_data(&mut self, payload: &[u8]) -> Result<(), LayoutError> {
        self.inner
            .truncate(HEADER_LEN as u64)
            .map_err(io_err("truncate file"))?;
        self.inner
            .seek(SeekFrom::Start(PAYLOAD_OFFSET))
            .map_err(io_err("seek to data"))?;
        self.inner.write_all(payload).map_err(io_err("write data"))?;
        self.inner.flush().map_err(io_err("flush data"))?;
        Ok(())
    }

    /// Push written bytes to durable storage.
    pub fn sync(&mut self) -> Result<(), LayoutError> {
        self.inner.sync().map_err(io_err("sync file"))
    }

    /// Release the handle after a final flush.
    pub fn close(mut self) -> Result<(), LayoutError> {
        self.inner.flush().map_err(io_err("flush file on close"))?;
        self.inner.sync().map_err(io_err("sync file on close"))?;
        drop(self.inner);
        Ok(())
    }

    pub fn get_ref(&self) -> &B {
        &self.inner
    }

    pub fn into_inner(self) -> B {
        self.inner
    }
}

impl StoreFile<File> {
    /// Write header and payload to a sibling temporary file, fsync it, then
    /// rename it over `path` and rebind this handle to the new file.
    ///
    /// Readers of the path see either the old or the new store, never a
    /// truncated one. On unix the parent directory is synced after the
    /// rename so the new entry survives a power loss.
    pub fn replace_atomically(
        &mut self,
        path: &Path,
        header: &StoreHeader,
        payload: &[u8],
    ) -> Result<(), LayoutError> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };

        let mut tmp = NamedTempFile::new_in(dir).map_err(io_err("create temporary store file"))?;
        tmp.write_all(&encode_header_le(header))
            .map_err(io_err("write temporary header"))?;
        tmp.write_all(payload).map_err(io_err("write temporary data"))?;
        tmp.as_file().sync_all().map_err(io_err("sync temporary store file"))?;

        let file = tmp.persist(path).map_err(|e| LayoutError::Io {
            op: "rename temporary store file",
            source: e.error,
        })?;
        // The rename is only durable once the directory entry is on disk.
        #[cfg(unix)]
        File::open(dir)
            .and_then(|d| d.sync_all())
            .map_err(io_err("sync store directory"))?;

        self.inner = file;
        Ok(())
    }
}
