//! Tests for the scan::run command
//!
//! These drive the async entry point end to end against temporary
//! directories and check the JSON written to disk.

#![allow(clippy::expect_used)]

use std::fs;
use std::path::{Path, PathBuf};

use fixity_cli::commands::scan::{ScanOutcome, run};
use fixity_cli::{AlgoArg, ScanArgs};
use serde_json::Value;
use tempfile::TempDir;

fn scan_args(directory: &Path, output: PathBuf, algo: AlgoArg) -> ScanArgs {
    ScanArgs {
        directory: directory.to_path_buf(),
        algo,
        concurrency: None,
        timeout: None,
        output: Some(output),
        chunk_size: 64 * 1024,
        compact: false,
    }
}

fn read_json(path: &Path) -> Value {
    let text = fs::read_to_string(path).expect("Failed to read manifest");
    serde_json::from_str(&text).expect("Failed to parse manifest")
}

// ============================================================================
// Successful scans
// ============================================================================

#[tokio::test]
async fn test_run_writes_expected_document() {
    let data = TempDir::new().expect("Failed to create temp dir");
    fs::write(data.path().join("a.txt"), "hi").expect("Failed to write file");
    fs::write(data.path().join("b.txt"), "hello").expect("Failed to write file");
    fs::create_dir(data.path().join("sub")).expect("Failed to create subdir");
    let out = TempDir::new().expect("Failed to create temp dir");
    let output = out.path().join("manifest.json");

    let outcome = run(&scan_args(data.path(), output.clone(), AlgoArg::Sha256))
        .await
        .expect("Failed to run scan");

    assert_eq!(outcome, ScanOutcome::Completed { files: 2, errors: 0 });
    assert_eq!(outcome.exit_status(), 0);

    let json = read_json(&output);
    assert_eq!(json["scan"]["algorithm"], "sha256");
    assert!(json["scan"]["id"].as_str().is_some_and(|id| !id.is_empty()));
    assert_eq!(json["summary"]["files"], 2);
    assert_eq!(json["summary"]["total_bytes"], 7);
    assert_eq!(json["summary"]["errors"], 0);

    let entries = json["entries"].as_array().expect("entries array");
    assert_eq!(entries.len(), 2);
    let b = entries
        .iter()
        .find(|e| e["name"] == "b.txt")
        .expect("b.txt in manifest");
    assert_eq!(b["size"], 5);
    assert_eq!(
        b["hash_hex"],
        "2cf24dba5fb0a30e26e83b2ac5b9e29e1b161e5c1fa7425e73043362938b9824"
    );
    assert!(json["errors"].as_array().is_some_and(Vec::is_empty));
}

#[tokio::test]
async fn test_run_md5_with_collision() {
    let data = TempDir::new().expect("Failed to create temp dir");
    fs::write(data.path().join("cafe"), "hello").expect("Failed to write file");
    fs::write(data.path().join("café"), "hello").expect("Failed to write file");
    let out = TempDir::new().expect("Failed to create temp dir");
    let output = out.path().join("manifest.json");

    let outcome = run(&scan_args(data.path(), output.clone(), AlgoArg::Md5))
        .await
        .expect("Failed to run scan");

    assert_eq!(outcome, ScanOutcome::Completed { files: 2, errors: 1 });

    let json = read_json(&output);
    let names: Vec<_> = json["entries"]
        .as_array()
        .expect("entries array")
        .iter()
        .filter_map(|e| e["name"].as_str())
        .collect();
    assert!(names.contains(&"cafe"));
    assert!(names.contains(&"cafe__2"));
    for entry in json["entries"].as_array().expect("entries array") {
        assert_eq!(entry["hash_hex"], "5d41402abc4b2a76b9719d911017c592");
    }
    assert_eq!(json["errors"][0]["kind"], "name_collision");
    assert_eq!(json["summary"]["errors_by_kind"]["name_collision"], 1);
}

// ============================================================================
// Failures
// ============================================================================

#[tokio::test]
async fn test_run_missing_directory_exits_two() {
    let out = TempDir::new().expect("Failed to create temp dir");
    let output = out.path().join("manifest.json");
    let missing = out.path().join("gone");

    let outcome = run(&scan_args(&missing, output.clone(), AlgoArg::Sha256))
        .await
        .expect("unavailable root is reported as an outcome");

    assert_eq!(outcome, ScanOutcome::RootUnavailable);
    assert_eq!(outcome.exit_status(), 2);
    assert!(!output.exists());
}

#[tokio::test]
async fn test_run_file_as_root_exits_two() {
    let data = TempDir::new().expect("Failed to create temp dir");
    let file = data.path().join("plain.txt");
    fs::write(&file, "x").expect("Failed to write file");

    let outcome = run(&scan_args(&file, data.path().join("m.json"), AlgoArg::Sha256))
        .await
        .expect("unavailable root is reported as an outcome");

    assert_eq!(outcome, ScanOutcome::RootUnavailable);
}
