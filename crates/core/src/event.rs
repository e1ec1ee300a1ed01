//! Event records, streams and provenance markers
//!
//! These types define the structure of records in the source and published
//! event logs. Source records are immutable; migration derives new published
//! records and never writes back.

use crate::error::CoreError;
use crate::ids::{EventId, StreamId};
use crate::sequence::SequencePair;
use crate::value::{Object, Value};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event name recorded for stream provenance markers
///
/// When a source stream is migrated, one marker event with this name is
/// appended to the published log before the stream's first migrated record.
/// The name is reserved: no business event may use it.
pub const CLONED_STREAM_EVENT_NAME: &str = "migration.stream-cloned";

/// Identity and audit metadata carried by every event record
///
/// Migration preserves all of these verbatim; a published record answers
/// "which source event am I?" through this block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventMetadata {
    /// Identity of the event record
    pub id: EventId,
    /// Event that caused this one, when known
    pub causation: Option<EventId>,
    /// Correlation across a whole case progression
    pub correlation_id: Option<Uuid>,
    /// User on whose behalf the event was recorded
    pub user_id: Option<String>,
    /// When the event was recorded
    pub created_at: DateTime<Utc>,
}

impl EventMetadata {
    /// Fresh metadata with a new id and the current time
    pub fn new() -> Self {
        Self {
            id: EventId::new(),
            causation: None,
            correlation_id: None,
            user_id: None,
            created_at: Utc::now(),
        }
    }
}

impl Default for EventMetadata {
    fn default() -> Self {
        Self::new()
    }
}

/// One record of the source log
///
/// `position_in_stream` orders records within their stream; the scan order
/// of the whole log is append order across streams.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    /// Stream this record belongs to
    pub stream_id: StreamId,
    /// Zero-based position within the stream
    pub position_in_stream: u64,
    /// Event name, e.g. `defendant-case-offences-updated`
    pub name: String,
    /// Payload document
    pub payload: Value,
    /// Identity and audit metadata
    pub metadata: EventMetadata,
}

impl EventRecord {
    /// Build a record with fresh metadata
    pub fn new(
        stream_id: StreamId,
        position_in_stream: u64,
        name: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            stream_id,
            position_in_stream,
            name: name.into(),
            payload,
            metadata: EventMetadata::new(),
        }
    }
}

/// One record of the published log
///
/// Identity fields come verbatim from the source record; the sequence pair
/// is issued at append time and forms the verifiable global chain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublishedEvent {
    /// Stream this record belongs to (reused from the source record)
    pub stream_id: StreamId,
    /// Zero-based position within the stream (preserved)
    pub position_in_stream: u64,
    /// Global sequence number of this record
    pub sequence_number: u64,
    /// Sequence number of the previously published record
    pub previous_sequence_number: u64,
    /// Event name (source name, or the registered rename)
    pub name: String,
    /// Outgoing payload document
    pub payload: Value,
    /// Identity and audit metadata (preserved)
    pub metadata: EventMetadata,
}

impl PublishedEvent {
    /// Derive a published record from a source record
    ///
    /// `name` and `payload` are the outgoing values (transformed or verbatim);
    /// everything else is carried over from the source record.
    pub fn derive(
        source: &EventRecord,
        pair: SequencePair,
        name: impl Into<String>,
        payload: Value,
    ) -> Self {
        Self {
            stream_id: source.stream_id,
            position_in_stream: source.position_in_stream,
            sequence_number: pair.sequence,
            previous_sequence_number: pair.previous,
            name: name.into(),
            payload,
            metadata: source.metadata.clone(),
        }
    }
}

/// Directory entry for one event stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventStream {
    /// Stream identity
    pub stream_id: StreamId,
    /// Whether the stream accepts reads; migration never deactivates streams
    pub active: bool,
}

impl EventStream {
    /// An active stream entry
    pub fn active(stream_id: StreamId) -> Self {
        Self {
            stream_id,
            active: true,
        }
    }
}

/// Provenance marker linking a published stream back to its source stream
///
/// Appended once per migrated stream under [`CLONED_STREAM_EVENT_NAME`].
/// Markers ride alongside the sequenced chain and do not consume sequence
/// numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClonedStreamLink {
    /// Stream the published records were derived from
    pub originating_stream: StreamId,
}

impl ClonedStreamLink {
    /// Marker for one source stream
    pub fn new(originating_stream: StreamId) -> Self {
        Self { originating_stream }
    }

    /// Marker payload document: `{"originatingStream": "<uuid>"}`
    pub fn marker_payload(&self) -> Value {
        let mut obj = Object::with_capacity(1);
        obj.insert(
            "originatingStream",
            Value::String(self.originating_stream.to_string()),
        );
        Value::Object(obj)
    }
}

/// Validate a payload document for the log boundary
///
/// The root must be an object and every float must be finite. Both source
/// loads and published appends run this check.
pub fn validate_payload(payload: &Value) -> Result<(), CoreError> {
    if !matches!(payload, Value::Object(_)) {
        return Err(CoreError::PayloadNotObject(payload.type_name()));
    }
    if let Some(path) = payload.first_non_finite_float() {
        return Err(CoreError::NonFiniteFloat(path.render()));
    }
    Ok(())
}
