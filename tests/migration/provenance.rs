//! Stream Provenance Tests
//!
//! File-level checks on the published log: each migrated stream gets exactly
//! one `migration.stream-cloned` marker, written before the stream's first
//! published record, and the source file itself is never touched.

use crate::*;
use docket::{PublishedLog, SourceLog};
use serde_json::Value as Json;
use std::fs;
use tempfile::tempdir;

fn read_lines(path: &std::path::Path) -> Vec<Json> {
    fs::read_to_string(path)
        .unwrap()
        .lines()
        .map(|line| serde_json::from_str(line).unwrap())
        .collect()
}

fn marker_index(lines: &[Json], stream: StreamId) -> Option<usize> {
    lines.iter().position(|line| {
        line["record"] == "cloned-stream" && line["originating_stream"] == stream.to_string()
    })
}

fn first_published_index(lines: &[Json], stream: StreamId) -> Option<usize> {
    lines
        .iter()
        .position(|line| line["record"] == "published" && line["stream_id"] == stream.to_string())
}

#[test]
fn test_marker_written_before_first_stream_record() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let first = StreamId::new();
    let second = StreamId::new();
    JsonlEventLog::write_records(
        &source_path,
        &[
            hearing_record(first, 0),
            hearing_record(second, 0),
            hearing_record(first, 1),
        ],
    )
    .unwrap();

    court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    let lines = read_lines(&published_path);
    for stream in [first, second] {
        let marker = marker_index(&lines, stream).expect("marker missing");
        let event = first_published_index(&lines, stream).expect("events missing");
        assert!(marker < event, "marker at {marker} must precede event at {event}");
    }
}

#[test]
fn test_exactly_one_marker_per_stream() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let first = StreamId::new();
    let second = StreamId::new();
    JsonlEventLog::write_records(
        &source_path,
        &[
            hearing_record(first, 0),
            hearing_record(second, 0),
            hearing_record(first, 1),
            hearing_record(second, 1),
        ],
    )
    .unwrap();

    let report = court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    assert_eq!(report.streams_cloned, 2);
    let lines = read_lines(&published_path);
    let markers = lines
        .iter()
        .filter(|line| line["record"] == "cloned-stream")
        .count();
    assert_eq!(markers, 2);
}

#[test]
fn test_source_file_bytes_untouched() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let stream = StreamId::new();
    JsonlEventLog::write_records(
        &source_path,
        &[hearing_record(stream, 0), unknown_record(stream, 1)],
    )
    .unwrap();
    let before = fs::read(&source_path).unwrap();

    court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    assert_eq!(fs::read(&source_path).unwrap(), before);
}

#[test]
fn test_source_streams_stay_active() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let stream = StreamId::new();
    JsonlEventLog::write_records(&source_path, &[hearing_record(stream, 0)]).unwrap();

    court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    let source = JsonlEventLog::open(&source_path).unwrap();
    let streams = source.streams().unwrap();
    assert_eq!(streams.len(), 1);
    assert!(streams[0].active);
}

#[test]
fn test_resumed_file_run_adds_no_second_marker() {
    let dir = tempdir().unwrap();
    let source_path = dir.path().join("events.jsonl");
    let published_path = dir.path().join("published.jsonl");
    let stream = StreamId::new();
    let records = vec![
        hearing_record(stream, 0),
        hearing_record(stream, 1),
        hearing_record(stream, 2),
    ];
    JsonlEventLog::write_records(&source_path, &records[..2]).unwrap();

    let first = court_migrator().run_jsonl(&source_path, &published_path).unwrap();

    // Stage the grown source and resume into the same published file
    JsonlEventLog::write_records(&source_path, &records).unwrap();
    let resumed = Migrator::builder()
        .reference_data(reference())
        .resume_from(first.cursor)
        .build()
        .unwrap()
        .run_jsonl(&source_path, &published_path)
        .unwrap();

    assert_eq!(resumed.streams_cloned, 0);
    let lines = read_lines(&published_path);
    let markers = lines
        .iter()
        .filter(|line| line["record"] == "cloned-stream")
        .count();
    assert_eq!(markers, 1);

    let published = JsonlEventLog::open(&published_path).unwrap();
    let events = published.events().unwrap();
    assert_eq!(events.len(), 3);
    assert!(verify_chain(&events).is_valid);
}
