//! Manifest builder: Runs listing, normalization and hashing for one directory

use std::path::Path;

use rayon::prelude::*;
use tracing::{debug, info};

use super::collision::{self, Hashed};
use super::{Manifest, ScanConfig, ScanReport};
use crate::cancel::CancellationToken;
use crate::error::{HashError, ManifestError, ScanError};
use crate::hasher::{ContentHasher, HashControl};
use crate::scanner::{DirEntry, DirectoryWalker, Listing, normalize_os};

/// Builds a manifest for one directory per call
#[derive(Debug, Clone, Default)]
pub struct ManifestBuilder {
    config: ScanConfig,
}

impl ManifestBuilder {
    /// Create a builder with the given configuration
    #[must_use]
    pub fn new(config: ScanConfig) -> Self {
        Self { config }
    }

    /// Configuration used for every scan
    #[must_use]
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Scan `directory` without external cancellation
    ///
    /// # Errors
    /// See [`ManifestBuilder::scan_with_cancel`].
    pub fn scan(&self, directory: impl AsRef<Path>) -> Result<ScanReport, ManifestError> {
        self.scan_with_cancel(directory, &CancellationToken::new())
    }

    /// Scan `directory`, stopping early once `cancel` is triggered
    ///
    /// Regular files are hashed on a pool of
    /// [`ScanConfig::worker_count`] threads. Records and errors come back
    /// in directory listing order whatever the scheduling. Listing errors
    /// come first, then per-file errors, then name collisions. After
    /// cancellation, files already hashed stay in the manifest and every
    /// other file is reported as cancelled.
    ///
    /// # Errors
    /// Returns [`ManifestError::DirectoryUnavailable`] if the directory
    /// cannot be listed, or [`ManifestError::WorkerPool`] if the thread pool
    /// cannot be started. No partial manifest is returned in either case.
    pub fn scan_with_cancel(
        &self,
        directory: impl AsRef<Path>,
        cancel: &CancellationToken,
    ) -> Result<ScanReport, ManifestError> {
        let directory = directory.as_ref();
        info!(
            "Scanning {} ({}, {} workers)",
            directory.display(),
            self.config.algo,
            self.config.worker_count()
        );

        let listing = DirectoryWalker::new(directory).list()?;
        self.build(listing, cancel)
    }

    /// Hash the entries of an existing listing and assemble the report
    ///
    /// Entries may have changed since they were listed. A file that is gone
    /// or is no longer a regular file is reported like any other per-file
    /// failure.
    pub(crate) fn build(
        &self,
        listing: Listing,
        cancel: &CancellationToken,
    ) -> Result<ScanReport, ManifestError> {
        let Listing {
            entries,
            mut errors,
            skipped_dirs,
        } = listing;
        debug!(
            "Found {} files to hash ({} subdirectories skipped)",
            entries.len(),
            skipped_dirs
        );

        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.config.worker_count())
            .thread_name(|i| format!("fixity-worker-{i}"))
            .build()?;
        let hasher = ContentHasher::new(self.config.algo).with_chunk_size(self.config.chunk_size);

        // One slot per entry, in listing order
        let slots: Vec<Result<Hashed, ScanError>> = pool.install(|| {
            entries
                .par_iter()
                .map(|entry| self.process_entry(entry, &hasher, cancel))
                .collect()
        });

        let mut hashed = Vec::with_capacity(slots.len());
        for slot in slots {
            match slot {
                Ok(item) => hashed.push(item),
                Err(e) => {
                    debug!("Skipping {}: {}", e.path.display(), e.message);
                    errors.push(e);
                }
            }
        }

        let (records, collisions) = collision::resolve(hashed);
        errors.extend(collisions);

        let manifest = Manifest::from_records(records);
        debug!(
            "Built manifest: {} files, {} bytes, {} errors",
            manifest.len(),
            manifest.total_bytes(),
            errors.len()
        );

        Ok(ScanReport { manifest, errors })
    }

    /// Normalize and hash one entry end to end
    fn process_entry(
        &self,
        entry: &DirEntry,
        hasher: &ContentHasher,
        cancel: &CancellationToken,
    ) -> Result<Hashed, ScanError> {
        if cancel.is_cancelled() {
            return Err(HashError::Cancelled(entry.path.clone()).into());
        }

        let name = normalize_os(&entry.raw_name);

        let mut control = HashControl::new().with_cancel(cancel.clone());
        if let Some(timeout) = self.config.timeout {
            control = control.with_timeout(timeout);
        }
        let digest = hasher.hash(&entry.path, &control)?;

        Ok(Hashed {
            name,
            digest,
            source_path: entry.path.clone(),
        })
    }
}

/// Scan `directory` with `config`
///
/// # Errors
/// Returns an error if the directory cannot be listed or the worker pool
/// cannot be started.
pub fn scan(directory: impl AsRef<Path>, config: &ScanConfig) -> Result<ScanReport, ManifestError> {
    ManifestBuilder::new(config.clone()).scan(directory)
}
