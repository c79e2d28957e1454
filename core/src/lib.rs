//! secret-store
//!
//! Passphrase-protected, single-file key/value store.
//! No CLI, no prompting, no async runtime.
//!
//! ```no_run
//! use secret_store::Store;
//!
//! # fn main() -> Result<(), secret_store::StoreError> {
//! let store = Store::open("secrets.store", "strong_passphrase")?;
//! store.put("password", b"my_very_secret_password")?;
//! assert_eq!(store.get("password")?, b"my_very_secret_password");
//! store.close()?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

// Shared and top level
pub mod constants;
pub mod types;

// Leaf-first layers
pub mod crypto;
pub mod headers;
pub mod layout;
pub mod record;

// Orchestration
pub mod store;

pub use types::{ErrorKind, Result, StoreError};
pub use store::{Store, StoreOptions, WriteStrategy};

// -----------------------------------------------------------------------------
// Prelude (Rust users)
// -----------------------------------------------------------------------------
pub mod prelude {
    pub use crate::store::{Store, StoreOptions, WriteStrategy};
    pub use crate::types::{ErrorKind, StoreError};
}
