//! Tests for ScanConfig

use std::num::NonZeroUsize;
use std::time::Duration;

use crate::hasher::{DEFAULT_CHUNK_SIZE, HashAlgo};
use crate::manifest::ScanConfig;

#[test]
fn test_default_config() {
    let config = ScanConfig::default();

    assert_eq!(config.algo, HashAlgo::Sha256);
    assert_eq!(config.concurrency, None);
    assert_eq!(config.timeout, None);
    assert_eq!(config.chunk_size, DEFAULT_CHUNK_SIZE);
}

#[test]
fn test_builder_methods() {
    let config = ScanConfig::new(HashAlgo::Md5)
        .with_concurrency(3)
        .with_timeout(Duration::from_secs(5))
        .with_chunk_size(4096);

    assert_eq!(config.algo, HashAlgo::Md5);
    assert_eq!(config.concurrency, NonZeroUsize::new(3));
    assert_eq!(config.timeout, Some(Duration::from_secs(5)));
    assert_eq!(config.chunk_size, 4096);
    assert_eq!(config.worker_count(), 3);
}

#[test]
fn test_zero_concurrency_means_default() {
    let config = ScanConfig::default().with_concurrency(0);

    assert_eq!(config.concurrency, None);
    assert!(config.worker_count() >= 1);
}
