//! Store traits
//!
//! Migration reads one log and appends to another; these two traits are that
//! whole surface. The source side is strictly read-only, so a run can never
//! damage the log it migrates from. The published side takes `&mut self` on
//! appends: the single-writer rule is enforced by exclusive borrow rather
//! than by a lock.

use crate::error::Result;
use crate::filter::ScanFilter;
use docket_core::{ClonedStreamLink, EventRecord, EventStream, PublishedEvent};

/// Read side of a migration: the log being migrated from
pub trait SourceLog {
    /// All records passing the filter, in append order
    fn scan(&self, filter: &ScanFilter) -> Result<Vec<EventRecord>>;

    /// Stream directory, in first-seen order
    fn streams(&self) -> Result<Vec<EventStream>>;
}

/// Write side of a migration: the log being published to
pub trait PublishedLog {
    /// Append one published record
    fn append(&mut self, event: PublishedEvent) -> Result<()>;

    /// Append one stream provenance marker
    ///
    /// Markers are carried next to the published chain and do not consume
    /// sequence numbers.
    fn append_clone_marker(&mut self, link: ClonedStreamLink) -> Result<()>;

    /// All published records, in append order
    fn events(&self) -> Result<Vec<PublishedEvent>>;

    /// All provenance markers, in append order
    fn markers(&self) -> Result<Vec<ClonedStreamLink>>;
}
