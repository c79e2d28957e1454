//! record/mod.rs
//! Plaintext record codec: `{key:base64(value)}` tuples <-> `RecordMap`.

pub mod types;
pub mod encode;
pub mod decode;

pub use types::*;
pub use encode::*;
pub use decode::*;
