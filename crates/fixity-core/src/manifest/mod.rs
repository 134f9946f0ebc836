//! Manifest module: Scan orchestration and the resulting manifest
//!
//! Runs listing, normalization and hashing for one directory, resolves
//! name collisions, and provides the JSON document written for a scan.

mod builder;
mod collision;
mod config;
mod document;
mod model;

pub use builder::{ManifestBuilder, scan};
pub use config::ScanConfig;
pub use document::{EntryRecord, ErrorRecord, ManifestDocument, ScanHeader, ScanSummary};
pub use model::{FileRecord, Manifest, ScanReport};

#[cfg(test)]
mod tests;
