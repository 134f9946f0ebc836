//! Tests for the persisted manifest document

#![allow(clippy::expect_used)]

use std::fs;

use tempfile::TempDir;

use crate::error::{ScanError, ScanErrorKind};
use crate::hasher::HashAlgo;
use crate::manifest::{ManifestDocument, ScanConfig, ScanHeader, ScanReport, ScanSummary, scan};

fn scanned_report() -> (TempDir, ScanReport) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    fs::write(temp_dir.path().join("a.txt"), "hi").expect("Failed to write file");
    fs::write(temp_dir.path().join("b.txt"), "hello").expect("Failed to write file");
    let mut report = scan(temp_dir.path(), &ScanConfig::default()).expect("Failed to scan");
    report.errors.push(ScanError::new(
        temp_dir.path().join("gone.txt"),
        ScanErrorKind::Unreadable,
        "vanished",
    ));
    (temp_dir, report)
}

#[test]
fn test_scan_header_new() {
    let header = ScanHeader::new("/data", HashAlgo::Md5);

    assert_eq!(header.root, "/data");
    assert_eq!(header.algorithm, HashAlgo::Md5);
    assert_eq!(header.id.len(), 36);
    assert!(header.finished_at.is_none());
}

#[test]
fn test_scan_header_ids_are_unique() {
    let a = ScanHeader::new("/data", HashAlgo::Sha256);
    let b = ScanHeader::new("/data", HashAlgo::Sha256);

    assert_ne!(a.id, b.id);
}

#[test]
fn test_scan_header_finished_sets_timestamp() {
    let header = ScanHeader::new("/data", HashAlgo::Sha256).finished();

    let finished_at = header.finished_at.expect("finished_at should be set");
    assert!(finished_at >= header.started_at);
}

#[test]
fn test_summary_counts() {
    let (_dir, report) = scanned_report();

    let summary = ScanSummary::from_report(&report);

    assert_eq!(summary.files, 2);
    assert_eq!(summary.total_bytes, 7);
    assert_eq!(summary.errors, 1);
    assert_eq!(summary.errors_by_kind.get(&ScanErrorKind::Unreadable), Some(&1));
}

#[test]
fn test_document_json_layout() {
    let (dir, report) = scanned_report();
    let header = ScanHeader::new(dir.path().display().to_string(), HashAlgo::Sha256).finished();

    let document = ManifestDocument::new(header, &report);
    let json = document.to_json(false).expect("Failed to serialize");
    let value: serde_json::Value = serde_json::from_str(&json).expect("Invalid JSON");

    let entries = value["entries"].as_array().expect("entries should be an array");
    assert_eq!(entries.len(), 2);
    for entry in entries {
        assert!(entry["name"].is_string());
        assert!(entry["size"].is_u64());
        assert_eq!(entry["hash_hex"].as_str().map(str::len), Some(64));
        assert!(entry["source_path"].is_string());
    }

    let errors = value["errors"].as_array().expect("errors should be an array");
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["kind"], "unreadable");
    assert!(errors[0]["path"]
        .as_str()
        .is_some_and(|p| p.ends_with("gone.txt")));

    assert_eq!(value["scan"]["algorithm"], "sha256");
    assert_eq!(value["summary"]["files"], 2);
    assert_eq!(value["summary"]["errors_by_kind"]["unreadable"], 1);
}

#[test]
fn test_document_entry_order_follows_manifest() {
    let (dir, report) = scanned_report();
    let document = ManifestDocument::new(ScanHeader::new("x", HashAlgo::Sha256), &report);

    let document_names: Vec<&str> = document.entries.iter().map(|e| e.name.as_str()).collect();
    let manifest_names: Vec<&str> = report.manifest.names().collect();

    assert_eq!(document_names, manifest_names);
    drop(dir);
}

#[test]
fn test_document_write_and_read_back() {
    let (dir, report) = scanned_report();
    let document = ManifestDocument::new(ScanHeader::new("x", HashAlgo::Sha256).finished(), &report);
    let out = dir.path().join("manifest.json");

    document.write_to(&out, true).expect("Failed to write manifest");
    let written = fs::read_to_string(&out).expect("Failed to read manifest");

    assert!(written.ends_with('\n'));
    let parsed = ManifestDocument::from_json(&written).expect("Failed to parse manifest");
    assert_eq!(parsed, document);
}

#[test]
fn test_error_record_omits_empty_message() {
    let report = ScanReport {
        errors: vec![ScanError::new("/x", ScanErrorKind::Cancelled, "")],
        ..ScanReport::default()
    };
    let document = ManifestDocument::new(ScanHeader::new("/", HashAlgo::Md5), &report);

    let json = document.to_json(false).expect("Failed to serialize");

    assert!(json.contains(r#"{"path":"/x","kind":"cancelled"}"#));
}
