// ## 📂 File: `src/store/engine.rs`

//! store/engine.rs
//! The store: open/create, CRUD, and the lock discipline around them.
//!
//! Control flow per operation:
//! - read payload -> open (AEAD) -> decode records
//! - writes only: mutate -> encode -> seal under a fresh nonce -> replace payload
//!
//! Concurrency:
//! - One `RwLock` per store. `get`/`keys` share it; `put`/`delete`/`close`
//!   take it exclusively.
//! - Readers hold the shared lock from the raw read through decode, so a
//!   writer can never swap the payload between read and decrypt.
//! - The file cursor is shared state, so readers serialize the raw read on
//!   an inner mutex. Decrypt and decode still run in parallel.
//! - Nothing is cached between operations; every call starts from disk.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use parking_lot::{Mutex, RwLock};
use tracing::{debug, trace, warn};
use zeroize::Zeroizing;

use crate::constants::CURRENT_REVISION;
use crate::crypto::{derive_key, generate_salt, Cipher};
use crate::headers::StoreHeader;
use crate::layout::{LayoutError, StoreFile};
use crate::record::{decode_records, encode_records, validate_key, RecordMap};
use crate::store::options::{StoreOptions, WriteStrategy};
use crate::types::{Result, StoreError};

/// Handle and cipher owned by an open store.
struct OpenState {
    file: Mutex<StoreFile<File>>,
    cipher: Cipher,
}

impl OpenState {
    /// Snapshot read under the shared lock.
    fn load_shared(&self) -> Result<Option<RecordMap>> {
        let payload = self.file.lock().read_data()?;
        self.decode_payload(&payload)
    }

    /// Read under the exclusive lock; no inner locking needed.
    fn load_exclusive(&mut self) -> Result<Option<RecordMap>> {
        let payload = self.file.get_mut().read_data()?;
        self.decode_payload(&payload)
    }

    /// `None` for a store that has never been written.
    fn decode_payload(&self, payload: &[u8]) -> Result<Option<RecordMap>> {
        if payload.is_empty() {
            return Ok(None);
        }
        let plaintext = Zeroizing::new(self.cipher.open(payload)?);
        Ok(Some(decode_records(&plaintext)?))
    }

    /// Encode, seal and replace the payload. Nothing touches the file until
    /// encoding and sealing have both succeeded.
    fn commit(&mut self, path: &Path, header: &StoreHeader, options: &StoreOptions, records: &RecordMap) -> Result<()> {
        let plaintext = Zeroizing::new(encode_records(records));
        let payload = self.cipher.seal(&plaintext)?;

        let file = self.file.get_mut();
        match options.write_strategy {
            WriteStrategy::InPlace => {
                file.write_data(&payload)?;
                if options.sync_writes {
                    file.sync()?;
                }
            }
            WriteStrategy::AtomicRename => file.replace_atomically(path, header, &payload)?,
        }
        trace!(entries = records.len(), payload_len = payload.len(), "payload replaced");
        Ok(())
    }
}

/// A passphrase-protected key/value store backed by a single file.
///
/// `Store` is `Send + Sync`; share it across threads behind an `Arc`.
pub struct Store {
    path: PathBuf,
    header: StoreHeader,
    options: StoreOptions,
    state: RwLock<Option<OpenState>>,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("revision", &self.header.revision)
            .field("options", &self.options)
            .field("closed", &self.is_closed())
            .finish()
    }
}

fn open_options(create: bool) -> OpenOptions {
    let mut opts = OpenOptions::new();
    opts.read(true).write(true);
    if create {
        opts.create_new(true);
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }
    opts
}

/// Derive the key and build the cipher; the key is wiped when this returns.
fn derive_cipher(passphrase: &str, salt: &[u8]) -> Result<Cipher> {
    let key = derive_key(passphrase.as_bytes(), salt)?;
    Ok(Cipher::new(&key[..])?)
}

#[inline]
fn not_found(key: &str) -> StoreError {
    StoreError::NotFound { key: key.to_owned() }
}

impl Store {
    /// Open the store at `path`, creating it when it does not exist.
    pub fn open<P: AsRef<Path>>(path: P, passphrase: &str) -> Result<Self> {
        Self::open_with(path, passphrase, StoreOptions::default())
    }

    /// Open with explicit options.
    ///
    /// A wrong passphrase is not detected here: the header carries no
    /// verifier, so the first operation that decrypts the payload reports it.
    pub fn open_with<P: AsRef<Path>>(path: P, passphrase: &str, options: StoreOptions) -> Result<Self> {
        let path = path.as_ref();
        match fs::metadata(path) {
            Ok(_) => Self::load(path, passphrase, options),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Self::create(path, passphrase, options),
            Err(source) => Err(LayoutError::Io { op: "stat store path", source }.into()),
        }
    }

    fn create(path: &Path, passphrase: &str, options: StoreOptions) -> Result<Self> {
        let header = StoreHeader::new_with_salt(generate_salt()?);
        let cipher = derive_cipher(passphrase, &header.salt)?;

        let handle = open_options(true)
            .open(path)
            .map_err(|source| LayoutError::Io { op: "create store file", source })?;
        let mut file = StoreFile::new(handle);

        let written = file.write_header(&header).and_then(|()| file.sync());
        if let Err(e) = written {
            drop(file);
            // Do not leave a headerless file behind; it would fail every later open.
            let _ = fs::remove_file(path);
            return Err(e.into());
        }

        debug!(path = %path.display(), revision = header.revision, "created new store");
        Ok(Self::assemble(path, header, options, file, cipher))
    }

    fn load(path: &Path, passphrase: &str, options: StoreOptions) -> Result<Self> {
        let handle = open_options(false)
            .open(path)
            .map_err(|source| LayoutError::Io { op: "open store file", source })?;
        let mut file = StoreFile::new(handle);

        let header = file.read_header()?;
        if !header.is_current() {
            warn!(
                path = %path.display(),
                revision = header.revision,
                current = CURRENT_REVISION,
                "store revision differs from the current format"
            );
        }

        let cipher = derive_cipher(passphrase, &header.salt)?;
        debug!(path = %path.display(), revision = header.revision, "opened store");
        Ok(Self::assemble(path, header, options, file, cipher))
    }

    fn assemble(path: &Path, header: StoreHeader, options: StoreOptions, file: StoreFile<File>, cipher: Cipher) -> Self {
        Store {
            path: path.to_path_buf(),
            header,
            options,
            state: RwLock::new(Some(OpenState {
                file: Mutex::new(file),
                cipher,
            })),
        }
    }

    /// Value stored under `key`.
    ///
    /// Errors: `NotFound` when the key (or any payload at all) is absent.
    pub fn get(&self, key: &str) -> Result<Vec<u8>> {
        let guard = self.state.read();
        let state = guard.as_ref().ok_or(StoreError::Closed)?;

        let records = state.load_shared()?.ok_or_else(|| not_found(key))?;
        let value = records.get(key).ok_or_else(|| not_found(key))?;
        trace!(key, len = value.len(), "get");
        Ok(value.to_vec())
    }

    /// Whether `key` is present.
    pub fn contains(&self, key: &str) -> Result<bool> {
        match self.get(key) {
            Ok(_) => Ok(true),
            Err(e) if e.is_not_found() => Ok(false),
            Err(e) => Err(e),
        }
    }

    /// Insert or overwrite `key`. Zero-length values are allowed.
    ///
    /// On any error before the final write the previous payload is untouched.
    pub fn put(&self, key: &str, value: &[u8]) -> Result<()> {
        validate_key(key)?;

        let mut guard = self.state.write();
        let state = guard.as_mut().ok_or(StoreError::Closed)?;

        let mut records = state.load_exclusive()?.unwrap_or_default();
        records.insert(key, value.to_vec())?;
        state.commit(&self.path, &self.header, &self.options, &records)?;

        trace!(key, len = value.len(), "put");
        Ok(())
    }

    /// Remove `key`. Removing an absent key succeeds.
    ///
    /// A store that has never been written is left untouched; otherwise the
    /// payload is rewritten even when the key was absent.
    pub fn delete(&self, key: &str) -> Result<()> {
        let mut guard = self.state.write();
        let state = guard.as_mut().ok_or(StoreError::Closed)?;

        let Some(mut records) = state.load_exclusive()? else {
            trace!(key, "delete on empty store");
            return Ok(());
        };
        let removed = records.remove(key).is_some();
        state.commit(&self.path, &self.header, &self.options, &records)?;

        trace!(key, removed, "delete");
        Ok(())
    }

    /// All keys, in no particular order.
    pub fn keys(&self) -> Result<Vec<String>> {
        let guard = self.state.read();
        let state = guard.as_ref().ok_or(StoreError::Closed)?;

        let keys: Vec<String> = match state.load_shared()? {
            Some(records) => records.keys().map(str::to_owned).collect(),
            None => Vec::new(),
        };
        trace!(count = keys.len(), "keys");
        Ok(keys)
    }

    /// Header revision read (or written) at open.
    pub fn revision(&self) -> u16 {
        self.header.revision
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn options(&self) -> &StoreOptions {
        &self.options
    }

    pub fn is_closed(&self) -> bool {
        self.state.read().is_none()
    }

    /// Flush and release the file handle. Every later call fails with `Closed`.
    pub fn close(&self) -> Result<()> {
        let state = self.state.write().take().ok_or(StoreError::Closed)?;
        state.file.into_inner().close()?;
        debug!(path = %self.path.display(), "closed store");
        Ok(())
    }
}
