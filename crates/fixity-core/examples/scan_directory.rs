//! Print the manifest of a directory as JSON
//! Run with: cargo run --example scan_directory -p fixity-core -- <dir> [md5|sha256]

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;

use fixity_core::{HashAlgo, ManifestDocument, ScanConfig, ScanHeader, scan};

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(root) = args.next().map(PathBuf::from) else {
        eprintln!("usage: scan_directory <dir> [md5|sha256]");
        return ExitCode::from(2);
    };
    let algo = match args.next().map(|s| s.parse::<HashAlgo>()).transpose() {
        Ok(algo) => algo.unwrap_or_default(),
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    let header = ScanHeader::new(root.display().to_string(), algo);
    let report = match scan(&root, &ScanConfig::new(algo)) {
        Ok(report) => report,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::from(2);
        }
    };

    for error in &report.errors {
        eprintln!("warning: {error}");
    }

    match ManifestDocument::new(header.finished(), &report).to_json(true) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}
