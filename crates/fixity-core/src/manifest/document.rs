//! Persisted manifest document and scan metadata

use std::collections::BTreeMap;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{FileRecord, ScanReport};
use crate::error::{ScanError, ScanErrorKind};
use crate::hasher::HashAlgo;

/// Identity and timing of one scan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanHeader {
    pub id: String,
    pub root: String,
    pub algorithm: HashAlgo,
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
}

impl ScanHeader {
    /// Start a new scan header for `root`
    #[must_use]
    pub fn new(root: impl Into<String>, algorithm: HashAlgo) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            root: root.into(),
            algorithm,
            started_at: Utc::now(),
            finished_at: None,
        }
    }

    /// Mark the scan as finished now
    #[must_use]
    pub fn finished(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }
}

/// Totals for one scan
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanSummary {
    pub files: usize,
    pub total_bytes: u64,
    pub errors: usize,
    pub errors_by_kind: BTreeMap<ScanErrorKind, usize>,
}

impl ScanSummary {
    /// Summarize a scan report
    #[must_use]
    pub fn from_report(report: &ScanReport) -> Self {
        let mut errors_by_kind = BTreeMap::new();
        for error in &report.errors {
            *errors_by_kind.entry(error.kind).or_insert(0) += 1;
        }
        Self {
            files: report.manifest.len(),
            total_bytes: report.manifest.total_bytes(),
            errors: report.errors.len(),
            errors_by_kind,
        }
    }
}

/// Serialized form of a manifest record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryRecord {
    pub name: String,
    pub size: u64,
    pub hash_hex: String,
    pub source_path: String,
}

impl From<&FileRecord> for EntryRecord {
    fn from(record: &FileRecord) -> Self {
        Self {
            name: record.name.to_string(),
            size: record.size,
            hash_hex: record.hash_hex(),
            source_path: record.source_path.display().to_string(),
        }
    }
}

/// Serialized form of a per-entry error
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorRecord {
    pub path: String,
    pub kind: ScanErrorKind,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub message: String,
}

impl From<&ScanError> for ErrorRecord {
    fn from(error: &ScanError) -> Self {
        Self {
            path: error.path.display().to_string(),
            kind: error.kind,
            message: error.message.clone(),
        }
    }
}

/// One JSON object per scan: metadata, totals, entries and errors
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestDocument {
    pub scan: ScanHeader,
    pub summary: ScanSummary,
    pub entries: Vec<EntryRecord>,
    pub errors: Vec<ErrorRecord>,
}

impl ManifestDocument {
    /// Build the document for a finished scan
    #[must_use]
    pub fn new(scan: ScanHeader, report: &ScanReport) -> Self {
        Self {
            scan,
            summary: ScanSummary::from_report(report),
            entries: report.manifest.iter().map(EntryRecord::from).collect(),
            errors: report.errors.iter().map(ErrorRecord::from).collect(),
        }
    }

    /// Serialize to a JSON string
    ///
    /// # Errors
    /// Returns an error if serialization fails.
    pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }

    /// Parse a document previously written by [`ManifestDocument::write`]
    ///
    /// # Errors
    /// Returns an error if `json` is not a valid manifest document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Write the document followed by a newline
    ///
    /// # Errors
    /// Returns an error if serialization or the write fails.
    pub fn write(&self, mut writer: impl Write, pretty: bool) -> io::Result<()> {
        if pretty {
            serde_json::to_writer_pretty(&mut writer, self)?;
        } else {
            serde_json::to_writer(&mut writer, self)?;
        }
        writer.write_all(b"\n")?;
        writer.flush()
    }

    /// Write the document to a file, replacing it if it exists
    ///
    /// # Errors
    /// Returns an error if the file cannot be created or written.
    pub fn write_to(&self, path: &Path, pretty: bool) -> io::Result<()> {
        let file = File::create(path)?;
        self.write(BufWriter::new(file), pretty)
    }
}
