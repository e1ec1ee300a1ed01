//! File Store Tests
//!
//! The `run_jsonl` entry point end to end: reports, payload key order
//! through the file round trip, and the failure modes of bad files.

use crate::*;
use docket::PublishedLog;
use std::fs::OpenOptions;
use std::io::Write;
use tempfile::tempdir;

#[test]
fn test_run_jsonl_reports_counts() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let stream = StreamId::new();
    JsonlEventLog::write_records(
        &source_path,
        &[
            hearing_record(stream, 0),
            unknown_record(stream, 1),
            offences_record(stream, 2, false, false, true),
        ],
    )
    .unwrap();

    let report = court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    assert_eq!(report.events_scanned, 3);
    assert_eq!(report.events_published, 3);
    assert_eq!(report.transformed, 2);
    assert_eq!(report.passed_through, 1);
    assert_eq!(report.last_sequence, 3);

    let published = JsonlEventLog::open(&published_path).unwrap();
    assert_eq!(published.events().unwrap().len(), 3);
}

#[test]
fn test_payload_key_order_survives_file_migration() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let stream = StreamId::new();
    let record = unknown_record(stream, 0);
    let original = encoded(&record.payload);
    JsonlEventLog::write_records(&source_path, &[record]).unwrap();

    court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    let published = JsonlEventLog::open(&published_path).unwrap();
    let events = published.events().unwrap();
    // "zulu" was written first and must still lead after the round trip
    assert_eq!(encoded(&events[0].payload), original);
    assert!(original.starts_with(r#"{"zulu""#));
}

#[test]
fn test_missing_source_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = court_migrator()
        .run_jsonl(dir.path().join("absent.jsonl"), dir.path().join("out.jsonl"))
        .unwrap_err();
    assert!(matches!(err, Error::Io(_)), "got: {err:?}");
    // The missing source must not be created as a side effect
    assert!(!dir.path().join("absent.jsonl").exists());
}

#[test]
fn test_corrupt_source_line_reports_position() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let stream = StreamId::new();
    JsonlEventLog::write_records(
        &source_path,
        &[hearing_record(stream, 0), hearing_record(stream, 1)],
    )
    .unwrap();
    let mut file = OpenOptions::new().append(true).open(&source_path).unwrap();
    writeln!(file, "{{truncated").unwrap();

    let err = court_migrator()
        .run_jsonl(&source_path, dir.path().join("out.jsonl"))
        .unwrap_err();

    assert!(err.is_data_error());
    assert!(err.to_string().contains("line 3"), "got: {err}");
}

#[test]
fn test_abort_leaves_published_prefix_readable() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let stream = StreamId::new();
    JsonlEventLog::write_records(
        &source_path,
        &[
            offences_record(stream, 0, false, false, false),
            poison_record(stream, 1),
        ],
    )
    .unwrap();

    let err = court_migrator()
        .run_jsonl(&source_path, &published_path)
        .unwrap_err();
    assert!(err.is_shape_mismatch());

    // The record published before the abort is intact on disk
    let published = JsonlEventLog::open(&published_path).unwrap();
    let events = published.events().unwrap();
    assert_eq!(events.len(), 1);
    assert!(verify_chain(&events).is_valid);
}
