//! Courtroom Scenario Tests
//!
//! The acceptance scenarios for the flag-derivation migration: derived
//! routing flags on defendant case offences, the alwaysPublished override,
//! mandatory flags missing under both mismatch policies, and events of
//! unregistered kinds.

use crate::*;

// =============================================================================
// DERIVED FLAG SCENARIOS
// =============================================================================

#[test]
fn test_offences_updated_gains_derived_flags() {
    let stream = StreamId::new();
    let source =
        MemoryEventLog::with_records(vec![offences_record(stream, 0, false, false, false)]);
    let mut sink = MemoryEventLog::new();

    let report = court_migrator().run(&source, &mut sink).unwrap();
    assert_eq!(report.transformed, 1);

    let events = sink.events().unwrap();
    let result = node_at(&events[0].payload, "offences.0.judicialResults.0");
    assert_eq!(node_at(result, "rollUpPrompts"), &Value::Bool(true));
    assert_eq!(node_at(result, "publishedForNows"), &Value::Bool(false));
    // Source keys survive in place
    assert_eq!(node_at(result, "label"), &Value::String("Fine".into()));
    assert_eq!(node_at(result, "alwaysPublished"), &Value::Bool(false));
}

#[test]
fn test_derived_flags_leave_sibling_objects_untouched() {
    let stream = StreamId::new();
    let record = offences_record(stream, 0, false, false, false);
    let plea_before = encoded(node_at(&record.payload, "offences.0.plea"));
    let source = MemoryEventLog::with_records(vec![record]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let events = sink.events().unwrap();
    assert_eq!(encoded(node_at(&events[0].payload, "offences.0.plea")), plea_before);
}

#[test]
fn test_always_published_forces_roll_up_false() {
    let stream = StreamId::new();
    let source =
        MemoryEventLog::with_records(vec![offences_record(stream, 0, false, false, true)]);
    let mut sink = MemoryEventLog::new();

    court_migrator().run(&source, &mut sink).unwrap();

    let events = sink.events().unwrap();
    let result = node_at(&events[0].payload, "offences.0.judicialResults.0");
    assert_eq!(node_at(result, "rollUpPrompts"), &Value::Bool(false));
    assert_eq!(node_at(result, "publishedForNows"), &Value::Bool(true));
}

// =============================================================================
// MANDATORY FLAG VIOLATIONS
// =============================================================================

#[test]
fn test_missing_mandatory_flags_abort_run() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![poison_record(stream, 0)]);
    let mut sink = MemoryEventLog::new();

    let err = court_migrator().run(&source, &mut sink).unwrap_err();

    assert!(err.is_shape_mismatch());
    let message = err.to_string();
    assert!(message.contains("offences.0.judicialResults.0"), "got: {message}");
    assert!(message.contains("Fine"), "offending node should be included: {message}");
    // No output was produced for the rejected input
    assert!(sink.events().unwrap().is_empty());
}

#[test]
fn test_missing_mandatory_flags_skip_policy_drops_record() {
    let stream = StreamId::new();
    let source = MemoryEventLog::with_records(vec![
        poison_record(stream, 0),
        offences_record(stream, 1, false, false, false),
    ]);
    let mut sink = MemoryEventLog::new();

    let report = skipping_migrator().run(&source, &mut sink).unwrap();

    assert_eq!(report.skipped, 1);
    assert_eq!(report.events_published, 1);
    let events = sink.events().unwrap();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].position_in_stream, 1);
}

// =============================================================================
// UNREGISTERED KINDS
// =============================================================================

#[test]
fn test_unregistered_event_kind_passes_through_verbatim() {
    let stream = StreamId::new();
    let record = unknown_record(stream, 0);
    let original = encoded(&record.payload);
    let source = MemoryEventLog::with_records(vec![record]);
    let mut sink = MemoryEventLog::new();

    let report = court_migrator().run(&source, &mut sink).unwrap();

    assert_eq!(report.transformed, 0);
    assert_eq!(report.passed_through, 1);
    let events = sink.events().unwrap();
    assert_eq!(events[0].name, "laa-reference-updated");
    assert_eq!(encoded(&events[0].payload), original);
}
