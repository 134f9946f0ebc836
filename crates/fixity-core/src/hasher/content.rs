//! Chunked file hashing with cooperative cancellation and deadlines

use std::fs::File;
use std::io::{self, Read};
use std::path::Path;
use std::time::{Duration, Instant};

use md5::Md5;
use sha2::{Digest, Sha256};

use super::HashAlgo;
use crate::cancel::CancellationToken;
use crate::error::HashError;

/// Default read size per chunk (64 KiB)
pub const DEFAULT_CHUNK_SIZE: usize = 64 * 1024;

/// Size and raw digest of a file's content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDigest {
    /// Total bytes read
    pub size: u64,
    /// Raw digest bytes
    pub digest: Vec<u8>,
}

impl FileDigest {
    /// Lowercase hex encoding of the digest
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(&self.digest)
    }
}

/// Limits checked before every chunk read
///
/// The clock for `timeout` starts when the control is created, so build one
/// per file right before hashing it.
#[derive(Debug, Clone)]
pub struct HashControl {
    cancel: Option<CancellationToken>,
    timeout: Option<Duration>,
    started: Instant,
}

impl HashControl {
    /// No cancellation, no timeout
    #[must_use]
    pub fn new() -> Self {
        Self {
            cancel: None,
            timeout: None,
            started: Instant::now(),
        }
    }

    /// Abort once `token` is cancelled
    #[must_use]
    pub fn with_cancel(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(token);
        self
    }

    /// Abort once `timeout` has elapsed since this control was created
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn check(&self, path: &Path) -> Result<(), HashError> {
        if self.cancel.as_ref().is_some_and(CancellationToken::is_cancelled) {
            return Err(HashError::Cancelled(path.to_path_buf()));
        }
        if let Some(timeout) = self.timeout {
            let elapsed = self.started.elapsed();
            if elapsed >= timeout {
                return Err(HashError::TimedOut {
                    path: path.to_path_buf(),
                    elapsed,
                });
            }
        }
        Ok(())
    }
}

impl Default for HashControl {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming hasher for one algorithm
#[derive(Debug, Clone, Copy)]
pub struct ContentHasher {
    algo: HashAlgo,
    chunk_size: usize,
}

impl ContentHasher {
    /// Create a hasher with the default chunk size
    #[must_use]
    pub const fn new(algo: HashAlgo) -> Self {
        Self {
            algo,
            chunk_size: DEFAULT_CHUNK_SIZE,
        }
    }

    /// Set the read size per chunk (at least one byte)
    #[must_use]
    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Algorithm this hasher uses
    #[must_use]
    pub const fn algo(&self) -> HashAlgo {
        self.algo
    }

    /// Read size per chunk
    #[must_use]
    pub const fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    /// Hash the file at `path`
    ///
    /// The file is opened read-only and without blocking, so a FIFO put in
    /// place of a listed file is rejected instead of waiting for a writer.
    /// `control` is checked before every chunk read, so a cancelled or
    /// timed-out hash still completes the chunk it is reading before it stops.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, is not a regular file,
    /// fails mid-read, or `control` cancels or times out the read.
    pub fn hash(&self, path: &Path, control: &HashControl) -> Result<FileDigest, HashError> {
        let file = open_source(path).map_err(|source| HashError::Open {
            path: path.to_path_buf(),
            source,
        })?;

        // The entry may have been swapped since it was listed
        let metadata = file.metadata().map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        if !metadata.is_file() {
            return Err(HashError::NotRegularFile(path.to_path_buf()));
        }
        restore_blocking(&file).map_err(|source| HashError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match self.algo {
            HashAlgo::Md5 => self.stream::<Md5>(file, path, control),
            HashAlgo::Sha256 => self.stream::<Sha256>(file, path, control),
        }
    }

    fn stream<D: Digest>(
        &self,
        mut reader: impl Read,
        path: &Path,
        control: &HashControl,
    ) -> Result<FileDigest, HashError> {
        let mut hasher = D::new();
        let mut buffer = vec![0u8; self.chunk_size];
        let mut size: u64 = 0;

        loop {
            control.check(path)?;

            let bytes_read = match reader.read(&mut buffer) {
                Ok(0) => break,
                Ok(n) => n,
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(source) => {
                    return Err(HashError::Read {
                        path: path.to_path_buf(),
                        source,
                    });
                }
            };

            hasher.update(&buffer[..bytes_read]);
            size += bytes_read as u64;
        }

        Ok(FileDigest {
            size,
            digest: hasher.finalize().to_vec(),
        })
    }
}

/// Open `path` for reading without waiting on a FIFO writer
///
/// An entry listed as a regular file can be replaced by a FIFO before it is
/// hashed. A blocking open would then wait for a writer forever.
#[cfg(unix)]
fn open_source(path: &Path) -> io::Result<File> {
    use std::fs::OpenOptions;
    use std::os::unix::fs::OpenOptionsExt;

    OpenOptions::new()
        .read(true)
        .custom_flags(libc::O_NONBLOCK)
        .open(path)
}

#[cfg(not(unix))]
fn open_source(path: &Path) -> io::Result<File> {
    File::open(path)
}

/// Clear `O_NONBLOCK` once the handle is known to be a regular file
#[cfg(unix)]
#[allow(unsafe_code)]
fn restore_blocking(file: &File) -> io::Result<()> {
    use std::os::unix::io::AsRawFd;

    let fd = file.as_raw_fd();
    // SAFETY: `fd` is owned by `file`, which outlives both calls
    let flags = unsafe { libc::fcntl(fd, libc::F_GETFL) };
    if flags < 0 {
        return Err(io::Error::last_os_error());
    }
    // SAFETY: as above
    if unsafe { libc::fcntl(fd, libc::F_SETFL, flags & !libc::O_NONBLOCK) } < 0 {
        return Err(io::Error::last_os_error());
    }
    Ok(())
}

#[cfg(not(unix))]
#[allow(clippy::unnecessary_wraps)]
fn restore_blocking(_file: &File) -> io::Result<()> {
    Ok(())
}

/// Hash a file with default settings and no limits
///
/// # Errors
/// Returns an error if the file cannot be opened or read.
pub fn hash_file(path: &Path, algo: HashAlgo) -> Result<FileDigest, HashError> {
    ContentHasher::new(algo).hash(path, &HashControl::new())
}
