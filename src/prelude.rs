//! Convenient imports for Docket.
//!
//! This module re-exports the most commonly used types so you can get started
//! with a single import:
//!
//! ```ignore
//! use docket::prelude::*;
//!
//! let migrator = Migrator::court(reference)?;
//! let report = migrator.run_jsonl("./events.jsonl", "./published.jsonl")?;
//! ```

// Main entry point
pub use crate::migrator::{Migrator, MigratorBuilder};

// Error handling
pub use crate::error::{Error, Result};

// Payload model
pub use docket_core::{NodePath, Object, Value};

// Log records and streams
pub use docket_core::{ClonedStreamLink, EventRecord, EventStream, PublishedEvent, StreamId};

// Log stores
pub use docket_log::{
    JsonlEventLog, MemoryEventLog, PublishedLog, ResumeCursor, ScanFilter, SourceLog,
};

// Rule set and reference data
pub use docket_transform::{
    court_registry, EventKind, ReferenceData, StaticReferenceData, TransformerRegistry,
};

// Run configuration and outcome
pub use docket_runner::{MigrationReport, MismatchPolicy, RunOptions};

// Wire codec
pub use docket_wire::{decode_document, encode_document};

// Re-export Arc and Uuid for convenience
pub use std::sync::Arc;
pub use uuid::Uuid;
