//! Scan configuration

use std::num::NonZeroUsize;
use std::thread;
use std::time::Duration;

use crate::hasher::{DEFAULT_CHUNK_SIZE, HashAlgo};

/// Configuration for a single scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanConfig {
    /// Digest algorithm
    pub algo: HashAlgo,
    /// Worker count; `None` means one per logical CPU
    pub concurrency: Option<NonZeroUsize>,
    /// Per-file hashing deadline
    pub timeout: Option<Duration>,
    /// Read size per chunk in bytes
    pub chunk_size: usize,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self::new(HashAlgo::default())
    }
}

impl ScanConfig {
    /// Create a configuration for `algo` with default limits
    #[must_use]
    pub const fn new(algo: HashAlgo) -> Self {
        Self {
            algo,
            concurrency: None,
            timeout: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the worker count (`0` restores the per-CPU default)
    #[must_use]
    pub fn with_concurrency(mut self, workers: usize) -> Self {
        self.concurrency = NonZeroUsize::new(workers);
        self
    }

    /// Bound the time spent hashing any single file
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Set the read size per chunk
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Number of workers the scan will run
    #[must_use]
    pub fn worker_count(&self) -> usize {
        self.concurrency
            .or_else(|| thread::available_parallelism().ok())
            .map_or(1, NonZeroUsize::get)
    }
}
