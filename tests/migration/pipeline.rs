//! Pipeline Shape Tests
//!
//! Cardinality, ordering, byte fidelity, identifier enrichment and
//! idempotence of whole runs over in-memory logs.

use crate::*;

// =============================================================================
// CARDINALITY AND ORDER
// =============================================================================

#[test]
fn test_one_output_per_input_in_scan_order() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![
        hearing_record(stream, 0),
        unknown_record(stream, 1),
        offences_record(stream, 2, true, false, false),
    ]);
    let mut sink = MemoryEventLog::new();

    let report = court_migrator().run(&source, &mut sink).unwrap();

    assert_eq!(report.events_scanned, 3);
    assert_eq!(report.events_published, 3);
    assert_eq!(report.transformed, 2);
    assert_eq!(report.passed_through, 1);

    let events = sink.events().unwrap();
    assert_eq!(
        events.iter().map(|e| e.position_in_stream).collect::<Vec<_>>(),
        vec![0, 1, 2]
    );
    assert_eq!(
        events.iter().map(|e| e.name.as_str()).collect::<Vec<_>>(),
        vec![
            "hearing-resulted",
            "laa-reference-updated",
            "defendant-case-offences-updated"
        ]
    );
}

#[test]
fn test_metadata_identity_preserved_through_transform() {
    let stream = StreamId::new();
    let record = hearing_record(stream, 4);
    let source_meta = record.metadata.clone();
    let source = MemoryEventLog::with_records(vec![record]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let events = sink.events().unwrap();
    assert_eq!(events[0].metadata, source_meta);
    assert_eq!(events[0].stream_id, stream);
    assert_eq!(events[0].position_in_stream, 4);
}

// =============================================================================
// BYTE FIDELITY
// =============================================================================

#[test]
fn test_passthrough_payload_byte_identical() {
    let stream = StreamId::new();
    let record = migrated_hearing_record(stream, 0);
    let original = encoded(&record.payload);
    let source = MemoryEventLog::with_records(vec![record]);
    let mut sink = MemoryEventLog::new();

    let report = court_migrator().run(&source, &mut sink).unwrap();

    assert_eq!(report.passed_through, 1);
    assert_eq!(report.transformed, 0);
    assert_eq!(encoded(&sink.events().unwrap()[0].payload), original);
}

#[test]
fn test_transform_touches_only_owned_paths() {
    let stream = StreamId::new();
    let record = hearing_record(stream, 0);
    let applicant_before = encoded(node_at(
        &record.payload,
        "hearing.prosecutionCases.0.applicant",
    ));
    let source = MemoryEventLog::with_records(vec![record]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let events = sink.events().unwrap();
    let payload = &events[0].payload;
    // The applicant sibling sits beside an owned path and must not move
    assert_eq!(
        encoded(node_at(payload, "hearing.prosecutionCases.0.applicant")),
        applicant_before
    );
    assert_eq!(
        node_at(
            payload,
            "hearing.prosecutionCases.0.defendants.0.offences.0.judicialResults.0.rollUpPrompts"
        ),
        &Value::Bool(true)
    );
}

#[test]
fn test_full_payload_bytes_after_migration() {
    let stream = StreamId::new();
    let source =
        MemoryEventLog::with_records(vec![offences_record(stream, 0, false, false, false)]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let expected = format!(
        r#"{{"defendantId":"d-8821","offences":[{{"offenceDefinition":{{"offenceCode":"TH68001","wording":"Theft from a shop","offenceDefinitionId":"{}"}},"plea":{{"pleaValue":"NOT_GUILTY","pleaDate":"2020-04-12"}},"judicialResults":[{{"label":"Fine","publishedAsAPrompt":false,"excludedFromResults":false,"alwaysPublished":false,"rollUpPrompts":true,"publishedForNows":false}}]}}]}}"#,
        definition_id()
    );
    assert_eq!(encoded(&sink.events().unwrap()[0].payload), expected);
}

// =============================================================================
// IDENTIFIER ENRICHMENT
// =============================================================================

#[test]
fn test_court_centre_identifier_injected() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![hearing_record(stream, 0)]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let events = sink.events().unwrap();
    let payload = &events[0].payload;
    assert_eq!(
        node_at(payload, "hearing.courtCentre.id"),
        &Value::String(centre_id().to_string())
    );
    // Existing keys stay in place ahead of the injected one
    assert_eq!(
        node_at(payload, "hearing.courtCentre.roomName"),
        &Value::String("Courtroom 3".into())
    );
}

#[test]
fn test_unknown_court_centre_code_left_unresolved() {
    let stream = StreamId::new();
    let record = EventRecord::new(
        stream,
        0,
        "hearing-resulted",
        doc(r#"{"hearing":{"courtCentre":{"code":"ZZ99X"},"prosecutionCases":[]}}"#),
    );
    let source = MemoryEventLog::with_records(vec![record]);
    let mut sink = MemoryEventLog::new();

    let migrator = court_migrator();
    let report = migrator.run(&source, &mut sink).unwrap();

    // The record is still published, the unresolved node unchanged
    assert_eq!(report.events_published, 1);
    let events = sink.events().unwrap();
    let payload = &events[0].payload;
    assert!(node_at(payload, "hearing.courtCentre")
        .as_object()
        .unwrap()
        .get("id")
        .is_none());
    // A later run with richer reference data would pick the node up again
    assert!(migrator
        .registry()
        .requires_migration(EventKind::HearingResulted, payload));
}

// =============================================================================
// IDEMPOTENCE
// =============================================================================

#[test]
fn test_rerun_over_migrated_output_is_all_passthrough() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![
        hearing_record(stream, 0),
        offences_record(stream, 1, true, true, false),
        unknown_record(stream, 2),
    ]);
    let mut first_sink = MemoryEventLog::new();
    let migrator = court_migrator();
    migrator.run(&source, &mut first_sink).unwrap();

    // Feed the published output back in as a fresh source log
    let first_pass: Vec<String> = first_sink
        .events()
        .unwrap()
        .iter()
        .map(|e| encoded(&e.payload))
        .collect();
    let replay = MemoryEventLog::with_records(
        first_sink
            .events()
            .unwrap()
            .into_iter()
            .map(|e| EventRecord::new(e.stream_id, e.position_in_stream, e.name, e.payload))
            .collect(),
    );
    let mut second_sink = MemoryEventLog::new();
    let report = migrator.run(&replay, &mut second_sink).unwrap();

    assert_eq!(report.transformed, 0);
    assert_eq!(report.passed_through, 3);
    let second_pass: Vec<String> = second_sink
        .events()
        .unwrap()
        .iter()
        .map(|e| encoded(&e.payload))
        .collect();
    assert_eq!(second_pass, first_pass);
}

// =============================================================================
// RUN REPORT
// =============================================================================

#[test]
fn test_report_window_and_summary() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![hearing_record(stream, 0)]);
    let mut sink = MemoryEventLog::new();

    let report = court_migrator().run(&source, &mut sink).unwrap();

    assert!(report.finished_at >= report.started_at);
    assert!(report.duration() >= chrono::Duration::zero());
    let summary = report.summary();
    assert!(summary.contains("1 scanned"), "got: {summary}");
    assert!(summary.contains("1 transformed"), "got: {summary}");
}
