//! Scan command: hash one directory level and emit a JSON manifest
//!
//! Hashing runs on a blocking task so that Ctrl-C can still be observed on
//! the runtime. An interrupt flips the shared token; files not yet finished
//! are reported as cancelled and the partial manifest is still written.

use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use fixity_core::{
    CancellationToken, ManifestBuilder, ManifestDocument, ScanConfig, ScanError, ScanHeader,
    ScanSummary,
};
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::types::ScanArgs;

/// Exit status when the directory itself cannot be listed
pub const EXIT_ROOT_UNAVAILABLE: u8 = 2;

/// How a scan finished
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// A manifest was written, possibly with per-file errors
    Completed { files: usize, errors: usize },
    /// The root directory was missing, unreadable or not a directory
    RootUnavailable,
}

impl ScanOutcome {
    /// Process exit status for this outcome
    #[must_use]
    pub const fn exit_status(self) -> u8 {
        match self {
            Self::Completed { .. } => 0,
            Self::RootUnavailable => EXIT_ROOT_UNAVAILABLE,
        }
    }
}

// ============================================================================
// Main entry point
// ============================================================================

/// Run the scan command
///
/// # Errors
/// Returns an error if the worker pool cannot start or the manifest cannot
/// be written.
pub async fn run(args: &ScanArgs) -> Result<ScanOutcome> {
    info!("Scanning directory: {}", args.directory.display());

    let token = CancellationToken::new();
    let watcher = cancel_on_ctrl_c(token.clone());

    let owned = args.clone();
    let outcome = tokio::task::spawn_blocking(move || execute_scan(&owned, &token))
        .await
        .context("Scan task failed")?;

    watcher.abort();
    outcome
}

/// Execute the scan, write the document and report the outcome
///
/// # Errors
/// Returns an error for any failure other than an unavailable root.
pub fn execute_scan(args: &ScanArgs, token: &CancellationToken) -> Result<ScanOutcome> {
    // Entries keep the path as given; the header records the absolute root
    let root = &args.directory;
    let absolute_root = root.canonicalize().unwrap_or_else(|_| root.clone());
    let config = args.to_config();
    log_scan_config(&absolute_root, &config);

    let header = ScanHeader::new(absolute_root.display().to_string(), config.algo);
    let report = match ManifestBuilder::new(config).scan_with_cancel(root, token) {
        Ok(report) => report,
        Err(e) if e.is_directory_unavailable() => {
            error!("{e}");
            return Ok(ScanOutcome::RootUnavailable);
        }
        Err(e) => return Err(e.into()),
    };

    log_scan_errors(&report.errors);

    let document = ManifestDocument::new(header.finished(), &report);
    write_document(&document, args.output.as_deref(), !args.compact)?;

    log_scan_summary(&document.summary);
    Ok(ScanOutcome::Completed {
        files: document.summary.files,
        errors: document.summary.errors,
    })
}

/// Write the document to `output`, or to stdout when no path is given
fn write_document(document: &ManifestDocument, output: Option<&Path>, pretty: bool) -> Result<()> {
    match output {
        Some(path) => {
            document
                .write_to(path, pretty)
                .with_context(|| format!("Failed to write manifest to {}", path.display()))?;
            info!("Manifest written to {}", path.display());
        }
        None => document
            .write(io::stdout().lock(), pretty)
            .context("Failed to write manifest to stdout")?,
    }
    Ok(())
}

fn cancel_on_ctrl_c(token: CancellationToken) -> JoinHandle<()> {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling remaining files");
            token.cancel();
        }
    })
}

fn log_scan_config(root: &Path, config: &ScanConfig) {
    debug!(
        "Scan config: root={}, algo={}, workers={}, timeout={:?}, chunk_size={}",
        root.display(),
        config.algo,
        config.worker_count(),
        config.timeout,
        config.chunk_size
    );
}

fn log_scan_errors(errors: &[ScanError]) {
    for e in errors {
        warn!("{e}");
    }
}

fn log_scan_summary(summary: &ScanSummary) {
    info!(
        "✓ Scan completed: {} files, {} bytes, {} errors",
        summary.files, summary.total_bytes, summary.errors
    );
    for (kind, count) in &summary.errors_by_kind {
        debug!("  {kind}: {count}");
    }
}
