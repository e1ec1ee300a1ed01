//! Migration run orchestration for docket
//!
//! [`MigrationRunner`] ties the other crates together: it scans a source
//! log, classifies and transforms each record against a frozen registry,
//! and appends the published chain with its provenance markers. See the
//! [`migration`] module for the lifecycle and policies.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod migration;

pub use migration::{MigrationReport, MigrationRunner, MismatchPolicy, RunOptions, RunnerError};
