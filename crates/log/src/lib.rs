//! Event log stores for docket
//!
//! A migration run touches exactly two logs: it scans a read-only
//! [`SourceLog`] and appends to a [`PublishedLog`]. Two stores implement
//! both sides, [`MemoryEventLog`] for tests and ephemeral runs and
//! [`JsonlEventLog`] for files, plus a [`ResumeCursor`] a driver can
//! persist between batches.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cursor;
pub mod error;
pub mod filter;
pub mod jsonl;
pub mod memory;
pub mod store;

pub use cursor::ResumeCursor;
pub use error::{LogError, Result};
pub use filter::ScanFilter;
pub use jsonl::JsonlEventLog;
pub use memory::MemoryEventLog;
pub use store::{PublishedLog, SourceLog};
