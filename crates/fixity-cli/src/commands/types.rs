//! Command types shared between main and library

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use fixity_core::hasher::DEFAULT_CHUNK_SIZE;
use fixity_core::{HashAlgo, ScanConfig};

#[derive(Debug, Parser)]
#[command(name = "fixity")]
#[command(about = "Build integrity manifests for directories", long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Hash every regular file in a directory and emit a JSON manifest
    Scan(ScanArgs),
}

/// Digest algorithm accepted on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum AlgoArg {
    Md5,
    #[default]
    Sha256,
}

impl From<AlgoArg> for HashAlgo {
    fn from(arg: AlgoArg) -> Self {
        match arg {
            AlgoArg::Md5 => Self::Md5,
            AlgoArg::Sha256 => Self::Sha256,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct ScanArgs {
    /// Directory to scan (not recursive)
    pub directory: PathBuf,

    /// Digest algorithm
    #[arg(long, value_enum, default_value_t = AlgoArg::Sha256)]
    pub algo: AlgoArg,

    /// Number of hashing workers (defaults to one per CPU)
    #[arg(long)]
    pub concurrency: Option<NonZeroUsize>,

    /// Per-file hashing timeout, e.g. `500ms`, `30s`, `2m`
    #[arg(long, value_parser = parse_duration)]
    pub timeout: Option<Duration>,

    /// Write the manifest here instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Read size per chunk in bytes
    #[arg(long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Emit single-line JSON
    #[arg(long)]
    pub compact: bool,
}

impl ScanArgs {
    /// Convert the parsed flags into a core scan configuration
    #[must_use]
    pub fn to_config(&self) -> ScanConfig {
        let mut config = ScanConfig::new(self.algo.into())
            .with_concurrency(self.concurrency.map_or(0, NonZeroUsize::get))
            .with_chunk_size(self.chunk_size);
        if let Some(timeout) = self.timeout {
            config = config.with_timeout(timeout);
        }
        config
    }
}

/// Parse a duration such as `250ms`, `1.5s`, `2m`, `1h` or bare seconds
///
/// # Errors
/// Returns a message when the number or unit is not recognized.
pub fn parse_duration(raw: &str) -> Result<Duration, String> {
    let raw = raw.trim();
    let split = raw
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(raw.len());
    let (number, unit) = raw.split_at(split);

    let value: f64 = number
        .parse()
        .map_err(|_| format!("invalid duration '{raw}'"))?;
    let secs = match unit.trim() {
        "" | "s" => value,
        "ms" => value / 1000.0,
        "m" => value * 60.0,
        "h" => value * 3600.0,
        other => return Err(format!("unknown duration unit '{other}' (use ms, s, m or h)")),
    };

    Duration::try_from_secs_f64(secs).map_err(|e| format!("invalid duration '{raw}': {e}"))
}
