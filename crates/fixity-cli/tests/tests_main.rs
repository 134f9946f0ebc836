//! Tests for fixity CLI argument parsing
//!
//! These tests validate CLI argument parsing and command structure
//! through the public API (clap's Parser trait).

#![allow(clippy::unwrap_used)]

use std::path::PathBuf;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use fixity_cli::{AlgoArg, Cli, Commands, ScanArgs};

fn parse_scan(args: &[&str]) -> (bool, ScanArgs) {
    let cli = Cli::try_parse_from(args).unwrap();
    match cli.command {
        Commands::Scan(scan) => (cli.verbose, scan),
    }
}

#[test]
fn test_cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn test_scan_command_with_only_directory() {
    let (verbose, scan) = parse_scan(&["fixity", "scan", "/path/to/dir"]);

    assert!(!verbose);
    assert_eq!(scan.directory, PathBuf::from("/path/to/dir"));
    assert_eq!(scan.algo, AlgoArg::Sha256);
}

#[test]
fn test_scan_command_with_all_args() {
    let (_, scan) = parse_scan(&[
        "fixity",
        "scan",
        "/path/to/dir",
        "--algo",
        "md5",
        "--concurrency",
        "4",
        "--timeout",
        "2m",
        "--output",
        "out.json",
        "--chunk-size",
        "1024",
        "--compact",
    ]);

    assert_eq!(scan.algo, AlgoArg::Md5);
    assert_eq!(scan.concurrency.map(|n| n.get()), Some(4));
    assert_eq!(scan.timeout, Some(Duration::from_secs(120)));
    assert_eq!(scan.output, Some(PathBuf::from("out.json")));
    assert_eq!(scan.chunk_size, 1024);
    assert!(scan.compact);
}

#[test]
fn test_short_output_flag() {
    let (_, scan) = parse_scan(&["fixity", "scan", "dir", "-o", "m.json"]);
    assert_eq!(scan.output, Some(PathBuf::from("m.json")));
}

#[test]
fn test_verbose_flag_before_and_after_subcommand() {
    let (before, _) = parse_scan(&["fixity", "-v", "scan", "dir"]);
    let (after, _) = parse_scan(&["fixity", "scan", "dir", "--verbose"]);

    assert!(before);
    assert!(after);
}

#[test]
fn test_scan_requires_directory() {
    assert!(Cli::try_parse_from(["fixity", "scan"]).is_err());
}

#[test]
fn test_missing_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["fixity"]).is_err());
}

#[test]
fn test_unknown_algorithm_is_rejected() {
    let result = Cli::try_parse_from(["fixity", "scan", "dir", "--algo", "sha1"]);
    assert!(result.is_err());
}

#[test]
fn test_invalid_timeout_is_rejected() {
    let result = Cli::try_parse_from(["fixity", "scan", "dir", "--timeout", "soon"]);
    assert!(result.is_err());
}
