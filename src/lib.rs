//! # Docket
//!
//! Schema-migration engine for court case progression event logs.
//!
//! Docket replays an append-only source log through a frozen set of
//! transformation rules and publishes the result as a new log: one outgoing
//! record per incoming record, in order, on a fresh gapless sequence chain,
//! with a provenance marker linking each published stream back to its
//! source. Untouched payload content survives byte-identically; the source
//! log is never written to.
//!
//! ## Quick Start
//!
//! ```ignore
//! use docket::prelude::*;
//!
//! // Reference tables the identifier rules resolve against
//! let reference = Arc::new(
//!     StaticReferenceData::new()
//!         .with_court_centre("B01LY", centre_id)
//!         .with_offence_definition("TH68001", definition_id),
//! );
//!
//! // Court rule set, default options
//! let migrator = Migrator::court(reference)?;
//!
//! // Migrate one JSONL log into another
//! let report = migrator.run_jsonl("./events.jsonl", "./published.jsonl")?;
//! println!("{}", report.summary());
//! ```
//!
//! ## How a Run Works
//!
//! 1. **Classify** - each record's name is parsed into a known event kind;
//!    unknown names and already-migrated payloads pass through verbatim.
//! 2. **Transform** - the kind's rule chain rewrites only the payload nodes
//!    each rule owns, leaving every sibling untouched.
//! 3. **Publish** - the record is appended under the next sequence number,
//!    preceded by a one-time provenance marker for its stream.
//!
//! Transforms are idempotent at the node level, so re-running over already
//! published output changes nothing.
//!
//! ## Pieces
//!
//! - [`Migrator`] - configured entry point driving whole runs
//! - [`TransformerRegistry`] - the frozen rule set, validated at build time
//! - [`JsonlEventLog`] / [`MemoryEventLog`] - file and in-memory log stores
//! - [`ReferenceData`] - external lookups the identifier rules degrade on
//! - [`MigrationReport`] - per-run counts and the resume cursor

#![warn(missing_docs)]

mod error;
mod migrator;

pub mod prelude;

// Re-export main entry points
pub use error::{Error, Result};
pub use migrator::{Migrator, MigratorBuilder};

// Re-export the payload data model
pub use docket_core::{
    validate_payload, verify_chain, ChainVerification, ClonedStreamLink, EventId, EventMetadata,
    EventRecord, EventStream, NodePath, Object, PathSegment, PublishedEvent, SequencePair,
    Sequencer, StreamId, Value, CLONED_STREAM_EVENT_NAME,
};

// Re-export the wire codec
pub use docket_wire::{decode_document, encode_document, DecodeError, EncodeError};

// Re-export the rule machinery
pub use docket_transform::{
    any_node, clone_with, court_registry, court_rules, CachingReferenceData, EventClassifier,
    EventKind, LookupError, MigrationAction, NodeTransform, PathPattern, PatternError,
    ReferenceData, RegistryBuilder, RegistryError, StaticReferenceData, TransformError,
    TransformRule, TransformerRegistry,
};

// Re-export log stores
pub use docket_log::{
    JsonlEventLog, LogError, MemoryEventLog, PublishedLog, ResumeCursor, ScanFilter, SourceLog,
};

// Re-export the run driver
pub use docket_runner::{
    MigrationReport, MigrationRunner, MismatchPolicy, RunOptions, RunnerError,
};
