//! Directory walker: Lists the direct entries of one directory

use std::ffi::OsString;
use std::fs::{self, FileType};
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{ManifestError, ScanError, ScanErrorKind};

/// A directory entry selected for hashing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirEntry {
    /// Path of the entry (root joined with the raw name)
    pub path: PathBuf,
    /// Filename exactly as returned by the OS
    pub raw_name: OsString,
    /// Whether the listing reported a regular file
    pub is_regular_file: bool,
}

/// Result of listing one directory
#[derive(Debug, Default)]
pub struct Listing {
    /// Regular files, in OS listing order
    pub entries: Vec<DirEntry>,
    /// Entries that were excluded and reported
    pub errors: Vec<ScanError>,
    /// Number of subdirectories skipped without a report
    pub skipped_dirs: usize,
}

/// Walker over a single directory level
#[derive(Debug, Clone)]
pub struct DirectoryWalker {
    root: PathBuf,
}

impl DirectoryWalker {
    /// Create a new walker for the given directory
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Get the directory being listed
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List the directory
    ///
    /// Subdirectories are skipped silently. Symlinks, devices, FIFOs and
    /// sockets are excluded and reported as
    /// [`ScanErrorKind::NotRegularFile`]. An entry that cannot be inspected
    /// is reported and enumeration continues with the next one. Symlinks are
    /// never followed. Entries keep the order the OS returns them in.
    ///
    /// # Errors
    /// Returns [`ManifestError::DirectoryUnavailable`] if the directory does
    /// not exist, is not a directory, or cannot be read.
    pub fn list(&self) -> Result<Listing, ManifestError> {
        let metadata =
            fs::metadata(&self.root).map_err(|e| ManifestError::unavailable(&self.root, e))?;
        if !metadata.is_dir() {
            return Err(ManifestError::unavailable(
                &self.root,
                io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
            ));
        }

        let mut listing = Listing::default();
        let walker = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false);

        for item in walker {
            match item {
                Ok(entry) => listing.push(entry),
                Err(err) if err.depth() == 0 => {
                    let source = err
                        .into_io_error()
                        .unwrap_or_else(|| io::Error::other("directory cannot be listed"));
                    return Err(ManifestError::unavailable(&self.root, source));
                }
                Err(err) => listing.push_walk_error(&self.root, &err),
            }
        }

        debug!(
            "Listed {}: {} files, {} reported, {} subdirectories skipped",
            self.root.display(),
            listing.entries.len(),
            listing.errors.len(),
            listing.skipped_dirs
        );
        Ok(listing)
    }
}

impl Listing {
    fn push(&mut self, entry: walkdir::DirEntry) {
        let file_type = entry.file_type();

        if file_type.is_dir() {
            debug!("Skipping directory {}", entry.path().display());
            self.skipped_dirs += 1;
        } else if file_type.is_file() {
            self.entries.push(DirEntry {
                raw_name: entry.file_name().to_os_string(),
                path: entry.into_path(),
                is_regular_file: true,
            });
        } else {
            self.errors.push(ScanError::new(
                entry.path(),
                ScanErrorKind::NotRegularFile,
                format!("skipped {}", describe_file_type(file_type)),
            ));
        }
    }

    fn push_walk_error(&mut self, root: &Path, err: &walkdir::Error) {
        let kind = err
            .io_error()
            .map(|e| ScanErrorKind::from_io(e, ScanErrorKind::IoError))
            .unwrap_or(ScanErrorKind::IoError);
        let path = err.path().unwrap_or(root);
        debug!("Failed to inspect {}: {}", path.display(), err);
        self.errors.push(ScanError::new(path, kind, err.to_string()));
    }
}

#[cfg(unix)]
fn describe_file_type(file_type: FileType) -> &'static str {
    use std::os::unix::fs::FileTypeExt;

    if file_type.is_symlink() {
        "symlink"
    } else if file_type.is_socket() {
        "socket"
    } else if file_type.is_fifo() {
        "fifo"
    } else if file_type.is_block_device() {
        "block device"
    } else if file_type.is_char_device() {
        "character device"
    } else {
        "special file"
    }
}

#[cfg(not(unix))]
fn describe_file_type(file_type: FileType) -> &'static str {
    if file_type.is_symlink() {
        "symlink"
    } else {
        "special file"
    }
}
