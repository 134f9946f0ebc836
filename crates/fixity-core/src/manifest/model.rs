//! Manifest model types

use std::path::PathBuf;

use crate::error::{ScanError, ScanErrorKind};
use crate::scanner::NormalizedName;

/// One successfully hashed file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileRecord {
    /// Manifest key (normalized name, suffixed on collision)
    pub name: NormalizedName,
    /// Content length in bytes
    pub size: u64,
    /// Raw content digest
    pub digest: Vec<u8>,
    /// Path the content was read from
    pub source_path: PathBuf,
}

impl FileRecord {
    /// Lowercase hex encoding of the digest
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

/// Ordered collection of file records with unique keys
///
/// Records appear in directory listing order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Manifest {
    records: Vec<FileRecord>,
}

impl Manifest {
    pub(crate) fn from_records(records: Vec<FileRecord>) -> Self {
        Self { records }
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the manifest has no records
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Look up a record by its key
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&FileRecord> {
        self.records.iter().find(|r| r.name == name)
    }

    /// Iterate records in listing order
    pub fn iter(&self) -> std::slice::Iter<'_, FileRecord> {
        self.records.iter()
    }

    /// Keys in listing order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.records.iter().map(|r| r.name.as_str())
    }

    /// Sum of all record sizes
    #[must_use]
    pub fn total_bytes(&self) -> u64 {
        self.records.iter().map(|r| r.size).sum()
    }

    /// Consume the manifest and return its records
    #[must_use]
    pub fn into_records(self) -> Vec<FileRecord> {
        self.records
    }
}

impl<'a> IntoIterator for &'a Manifest {
    type Item = &'a FileRecord;
    type IntoIter = std::slice::Iter<'a, FileRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Everything one scan produced: the manifest and per-entry errors
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    pub manifest: Manifest,
    pub errors: Vec<ScanError>,
}

impl ScanReport {
    /// Whether any per-entry error was recorded
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// Errors of a single kind, in report order
    pub fn errors_of(&self, kind: ScanErrorKind) -> impl Iterator<Item = &ScanError> + '_ {
        self.errors.iter().filter(move |e| e.kind == kind)
    }
}
