//! Error types for scanning, hashing and per-entry reporting

use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fatal errors: the scan produces no manifest at all
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Directory unavailable: {}: {source}", .path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to build worker pool: {0}")]
    WorkerPool(#[from] rayon::ThreadPoolBuildError),
}

impl ManifestError {
    /// Build a `DirectoryUnavailable` error for `path`
    pub(crate) fn unavailable(path: &Path, source: io::Error) -> Self {
        Self::DirectoryUnavailable {
            path: path.to_path_buf(),
            source,
        }
    }

    /// Whether the root directory itself could not be listed
    #[must_use]
    pub const fn is_directory_unavailable(&self) -> bool {
        matches!(self, Self::DirectoryUnavailable { .. })
    }
}

/// Errors that can occur while hashing a single file
#[derive(Debug, Error)]
pub enum HashError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Not a regular file: {}", .0.display())]
    NotRegularFile(PathBuf),

    #[error("Hashing timed out after {elapsed:?}: {}", .path.display())]
    TimedOut { path: PathBuf, elapsed: Duration },

    #[error("Hashing cancelled: {}", .0.display())]
    Cancelled(PathBuf),
}

impl HashError {
    /// Path of the file that failed
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::Open { path, .. } | Self::Read { path, .. } | Self::TimedOut { path, .. } => path,
            Self::NotRegularFile(path) | Self::Cancelled(path) => path,
        }
    }

    /// Classify this failure for the scan error list
    #[must_use]
    pub fn kind(&self) -> ScanErrorKind {
        match self {
            Self::Open { source, .. } => ScanErrorKind::from_io(source, ScanErrorKind::Unreadable),
            Self::Read { source, .. } => ScanErrorKind::from_io(source, ScanErrorKind::IoError),
            Self::NotRegularFile(_) => ScanErrorKind::NotRegularFile,
            Self::TimedOut { .. } => ScanErrorKind::Timeout,
            Self::Cancelled(_) => ScanErrorKind::Cancelled,
        }
    }
}

/// Kind of a non-fatal, per-entry scan error
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScanErrorKind {
    PermissionDenied,
    NotRegularFile,
    IoError,
    Unreadable,
    NameCollision,
    Timeout,
    Cancelled,
}

impl ScanErrorKind {
    /// Map an I/O error to a kind, using `fallback` unless access was denied
    #[must_use]
    pub fn from_io(err: &io::Error, fallback: Self) -> Self {
        if err.kind() == io::ErrorKind::PermissionDenied {
            Self::PermissionDenied
        } else {
            fallback
        }
    }
}

impl fmt::Display for ScanErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PermissionDenied => "permission_denied",
            Self::NotRegularFile => "not_regular_file",
            Self::IoError => "io_error",
            Self::Unreadable => "unreadable",
            Self::NameCollision => "name_collision",
            Self::Timeout => "timeout",
            Self::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

/// A recoverable problem with one directory entry
///
/// Never fatal to the scan. The entry is either missing from the manifest
/// or, for [`ScanErrorKind::NameCollision`], present under a suffixed key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{kind}: {}: {message}", .path.display())]
pub struct ScanError {
    pub path: PathBuf,
    pub kind: ScanErrorKind,
    pub message: String,
}

impl ScanError {
    /// Create a new scan error
    #[must_use]
    pub fn new(path: impl Into<PathBuf>, kind: ScanErrorKind, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind,
            message: message.into(),
        }
    }
}

impl From<HashError> for ScanError {
    fn from(err: HashError) -> Self {
        Self::new(err.path(), err.kind(), err.to_string())
    }
}
