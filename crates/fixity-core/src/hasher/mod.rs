//! Hasher module: Streaming content digests
//!
//! Computes the size and digest of a file in fixed-size chunks, so memory
//! use does not depend on file size.

mod algo;
mod content;

pub use algo::{HashAlgo, ParseHashAlgoError};
pub use content::{ContentHasher, DEFAULT_CHUNK_SIZE, FileDigest, HashControl, hash_file};
