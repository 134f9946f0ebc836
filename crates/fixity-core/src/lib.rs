//! fixity-core: Core library for directory integrity manifests
//!
//! Walks a single directory level, canonicalizes every filename to an
//! ASCII key, streams each regular file through a content digest and
//! assembles an ordered manifest of `{name, size, digest, source_path}`
//! records. Per-file failures are collected next to the manifest instead of
//! aborting the scan.
//!
//! # Pipeline
//!
//! - [`scanner::DirectoryWalker`] lists candidate files
//! - [`scanner::normalize`] maps raw names to manifest keys
//! - [`hasher::ContentHasher`] computes size and digest in chunks
//! - [`manifest::ManifestBuilder`] runs the above on a worker pool and
//!   resolves name collisions

pub mod cancel;
pub mod error;
pub mod hasher;
pub mod manifest;
pub mod scanner;

#[cfg(all(test, unix))]
mod fixtures;

// Re-export commonly used types
pub use cancel::CancellationToken;
pub use error::{HashError, ManifestError, ScanError, ScanErrorKind};
pub use hasher::{ContentHasher, FileDigest, HashAlgo, HashControl, hash_file};
pub use manifest::{
    FileRecord, Manifest, ManifestBuilder, ManifestDocument, ScanConfig, ScanHeader, ScanReport,
    ScanSummary, scan,
};
pub use scanner::{DirEntry, DirectoryWalker, Listing, NormalizedName, normalize, normalize_os};
