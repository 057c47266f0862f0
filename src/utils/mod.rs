//! Utils Module - Helper Functions & Shared Utilities
//!
//! Constants, encoding primitives and the in-memory stores.

pub mod cache;
pub mod constants;
pub mod encoding;
pub mod memos;

pub use cache::*;
pub use constants::*;
pub use memos::*;
