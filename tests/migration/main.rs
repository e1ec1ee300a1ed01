//! Migration Pipeline Test Suite
//!
//! End-to-end tests driving the public `Migrator` facade over in-memory and
//! file-backed event logs, using the built-in court rule set.
//!
//! ## Key Verification Points
//!
//! 1. Exactly one published record per surviving source record, in scan order
//! 2. Content outside a rule's owned paths survives byte-identically
//! 3. The published sequence chain is gapless and verifiable
//! 4. Each stream's provenance marker lands before its first published record
//! 5. Re-running over already-migrated output changes nothing
//!
//! ## Running Tests
//!
//! ```bash
//! # Run the whole suite
//! cargo test --test migration
//!
//! # Run the courtroom scenario tests only
//! cargo test --test migration scenarios::
//! ```

use std::sync::Arc;

use docket::{
    decode_document, encode_document, verify_chain, Error, EventKind, EventRecord, JsonlEventLog,
    MemoryEventLog, Migrator, PublishedLog, ReferenceData, StaticReferenceData, StreamId, Value,
};
use uuid::Uuid;

// Test modules
pub mod pipeline;
pub mod provenance;
pub mod scenarios;
pub mod sequencing;
pub mod stores;

// =============================================================================
// SHARED TEST UTILITIES
// =============================================================================

/// Install a test-friendly tracing subscriber (idempotent)
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

/// Court centre id resolved for code `B01LY`
pub fn centre_id() -> Uuid {
    Uuid::parse_str("f0b60e2b-c69d-4c35-b1e1-c1e2a1b7a001").unwrap()
}

/// Offence definition id resolved for code `TH68001`
pub fn definition_id() -> Uuid {
    Uuid::parse_str("8e7a2f45-3b1c-4d6e-9f80-5a4b3c2d1e0f").unwrap()
}

/// Reference tables shared by every test migrator
pub fn reference() -> Arc<dyn ReferenceData> {
    Arc::new(
        StaticReferenceData::new()
            .with_court_centre("B01LY", centre_id())
            .with_offence_definition("TH68001", definition_id()),
    )
}

/// Court rule set, default options (abort on shape mismatch)
pub fn court_migrator() -> Migrator {
    init_tracing();
    Migrator::court(reference()).unwrap()
}

/// Court rule set, dropping unmigratable records instead of aborting
pub fn skipping_migrator() -> Migrator {
    init_tracing();
    Migrator::builder()
        .reference_data(reference())
        .skip_mismatches()
        .build()
        .unwrap()
}

/// Decode a JSON fixture
pub fn doc(text: &str) -> Value {
    decode_document(text).unwrap()
}

/// Canonical encoding of a payload node
pub fn encoded(value: &Value) -> String {
    encode_document(value).unwrap()
}

/// Walk a dotted path (decimal segments index arrays) to a node
pub fn node_at<'a>(value: &'a Value, path: &str) -> &'a Value {
    let mut current = value;
    for segment in path.split('.') {
        current = match current {
            Value::Object(obj) => obj
                .get(segment)
                .unwrap_or_else(|| panic!("no key '{segment}' while walking '{path}'")),
            Value::Array(items) => {
                let index: usize = segment
                    .parse()
                    .unwrap_or_else(|_| panic!("non-index segment '{segment}' in '{path}'"));
                &items[index]
            }
            other => panic!("cannot descend into {} at '{segment}' in '{path}'", other.type_name()),
        };
    }
    current
}

// =============================================================================
// FIXTURE RECORDS
// =============================================================================

/// A hearing-resulted record with unmigrated flags and an applicant sibling
pub fn hearing_record(stream: StreamId, position: u64) -> EventRecord {
    let payload = doc(
        r#"{"hearing":{"courtCentre":{"code":"B01LY","roomName":"Courtroom 3"},"prosecutionCases":[{"applicant":{"name":"Crown Prosecution Service"},"defendants":[{"offences":[{"wording":"Theft","judicialResults":[{"label":"Fine","publishedAsAPrompt":false,"excludedFromResults":false,"alwaysPublished":false}]}]}]}]}}"#,
    );
    EventRecord::new(stream, position, "hearing-resulted", payload)
}

/// The payload shape `hearing_record` settles into after one migration
pub fn migrated_hearing_record(stream: StreamId, position: u64) -> EventRecord {
    let payload = doc(&format!(
        r#"{{"hearing":{{"courtCentre":{{"code":"B01LY","roomName":"Courtroom 3","id":"{}"}},"prosecutionCases":[{{"applicant":{{"name":"Crown Prosecution Service"}},"defendants":[{{"offences":[{{"wording":"Theft","judicialResults":[{{"label":"Fine","publishedAsAPrompt":false,"excludedFromResults":false,"alwaysPublished":false,"rollUpPrompts":true,"publishedForNows":false}}]}}]}}]}}]}}}}"#,
        centre_id()
    ));
    EventRecord::new(stream, position, "hearing-resulted", payload)
}

/// A defendant-case-offences-updated record with the given routing flags
pub fn offences_record(
    stream: StreamId,
    position: u64,
    prompt: bool,
    excluded: bool,
    always: bool,
) -> EventRecord {
    let payload = doc(&format!(
        r#"{{"defendantId":"d-8821","offences":[{{"offenceDefinition":{{"offenceCode":"TH68001","wording":"Theft from a shop"}},"plea":{{"pleaValue":"NOT_GUILTY","pleaDate":"2020-04-12"}},"judicialResults":[{{"label":"Fine","publishedAsAPrompt":{prompt},"excludedFromResults":{excluded},"alwaysPublished":{always}}}]}}]}}"#
    ));
    EventRecord::new(stream, position, "defendant-case-offences-updated", payload)
}

/// A judicial result carrying none of the mandatory routing flags
pub fn poison_record(stream: StreamId, position: u64) -> EventRecord {
    let payload = doc(r#"{"offences":[{"judicialResults":[{"label":"Fine"}]}]}"#);
    EventRecord::new(stream, position, "defendant-case-offences-updated", payload)
}

/// An event of a kind the registry knows nothing about
pub fn unknown_record(stream: StreamId, position: u64) -> EventRecord {
    let payload =
        doc(r#"{"zulu":{"mike":true},"alpha":[1,2.5,"three"],"caseReference":"05PP1000915"}"#);
    EventRecord::new(stream, position, "laa-reference-updated", payload)
}
