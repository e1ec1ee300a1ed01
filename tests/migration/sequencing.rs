//! Sequence Chain Tests
//!
//! The published log carries one global gapless sequence chain: each record
//! links to the previously issued number, fresh runs demand an empty sink,
//! and resumed runs extend the chain without a gap.

use crate::*;

#[test]
fn test_chain_starts_at_one_with_gapless_previous() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![
        hearing_record(stream, 0),
        unknown_record(stream, 1),
        offences_record(stream, 2, false, true, false),
    ]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let events = sink.events().unwrap();
    assert_eq!(
        events.iter().map(|e| e.previous_sequence_number).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        events.iter().map(|e| e.sequence_number).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert!(verify_chain(&events).is_valid);
}

#[test]
fn test_sequence_spans_streams_in_scan_order() {
    let first = StreamId::new();
    let second = StreamId::new();
    let source = MemoryEventLog::with_records(vec![
        hearing_record(first, 0),
        hearing_record(second, 0),
        hearing_record(first, 1),
        hearing_record(second, 1),
    ]);
    let mut sink = MemoryEventLog::new();

    let report = court_migrator().run(&source, &mut sink).unwrap();

    assert_eq!(report.last_sequence, 4);
    let events = sink.events().unwrap();
    // One shared counter, not one per stream
    assert_eq!(
        events.iter().map(|e| e.sequence_number).collect::<Vec<_>>(),
        vec![1, 2, 3, 4]
    );
    assert!(verify_chain(&events).is_valid);
}

#[test]
fn test_skipped_record_leaves_no_gap() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![
        offences_record(stream, 0, false, false, false),
        poison_record(stream, 1),
        offences_record(stream, 2, true, false, true),
    ]);
    let mut sink = MemoryEventLog::new();

    let report = skipping_migrator().run(&source, &mut sink).unwrap();

    assert_eq!(report.skipped, 1);
    let events = sink.events().unwrap();
    assert_eq!(
        events.iter().map(|e| e.sequence_number).collect::<Vec<_>>(),
        vec![1, 2]
    );
    assert!(verify_chain(&events).is_valid);
}

#[test]
fn test_fresh_run_requires_empty_published_log() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![hearing_record(stream, 0)]);
    let mut sink = MemoryEventLog::new();

    let migrator = court_migrator();
    migrator.run(&source, &mut sink).unwrap();
    let err = migrator.run(&source, &mut sink).unwrap_err();

    assert!(err.is_sequence_corrupt());
    assert!(
        err.to_string().contains("expected last sequence 0"),
        "got: {err}"
    );
}

#[test]
fn test_resume_extends_chain_and_cursor_accumulates() {
    let stream = StreamId::new();
    let mut source = MemoryEventLog::with_records(vec![
        hearing_record(stream, 0),
        hearing_record(stream, 1),
    ]);
    let mut sink = MemoryEventLog::new();

    let first = court_migrator().run(&source, &mut sink).unwrap();
    assert_eq!(first.last_sequence, 2);
    assert_eq!(first.cursor.records_consumed, 2);

    // The source keeps growing between batches
    source.push_record(hearing_record(stream, 2));

    let resumed = Migrator::builder()
        .reference_data(reference())
        .resume_from(first.cursor)
        .build()
        .unwrap()
        .run(&source, &mut sink)
        .unwrap();

    assert_eq!(resumed.events_scanned, 1);
    assert_eq!(resumed.last_sequence, 3);
    assert_eq!(resumed.cursor.records_consumed, 3);

    let events = sink.events().unwrap();
    assert_eq!(events.len(), 3);
    assert!(verify_chain(&events).is_valid);
}
