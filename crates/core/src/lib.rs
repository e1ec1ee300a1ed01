//! Core types for Docket
//!
//! This crate defines the data model the whole migration engine is built on:
//!
//! - [`Value`] / [`Object`]: order-preserving payload trees
//! - [`NodePath`] / [`PathSegment`]: dotted paths identifying payload nodes
//! - [`EventRecord`] / [`PublishedEvent`]: source and published log records
//! - [`EventStream`] / [`ClonedStreamLink`]: stream directory and provenance
//! - [`Sequencer`] / [`verify_chain`]: the global sequence-number chain
//!
//! ## Ordering Contract
//!
//! Payload objects preserve insertion order end to end. Migration rewrites
//! targeted subtrees and must leave every sibling byte-identical on the
//! wire, which is only possible when the in-memory model never reorders
//! keys.
//!
//! ## Sequence Chain
//!
//! | record | previous | sequence |
//! |--------|----------|----------|
//! | 1st    | 0        | 1        |
//! | n-th   | n-1      | n        |
//!
//! `previous` values of a full run form a gapless series starting at zero;
//! [`verify_chain`] checks the linkage.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod error;
pub mod event;
pub mod ids;
pub mod path;
pub mod sequence;
pub mod value;

pub use error::{CoreError, Result};
pub use event::{
    validate_payload, ClonedStreamLink, EventMetadata, EventRecord, EventStream, PublishedEvent,
    CLONED_STREAM_EVENT_NAME,
};
pub use ids::{EventId, StreamId};
pub use path::{NodePath, PathSegment};
pub use sequence::{verify_chain, ChainVerification, SequencePair, Sequencer};
pub use value::{Object, Value};
