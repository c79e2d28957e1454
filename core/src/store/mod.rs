//! store/mod.rs
//! Store orchestration: one file, one cipher, one reader/writer lock.

pub mod engine;
pub mod options;

pub use engine::*;
pub use options::*;
