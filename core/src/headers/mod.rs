//! headers/mod.rs
//! Public module export for the store file header.
//!
//! Notes:
//! - Fixed-size header (34 bytes) enables plain positional I/O.
//! - Endianness: little-endian for the revision; the salt is raw bytes.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
