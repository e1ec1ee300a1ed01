//! Main migration entry point for Docket.
//!
//! This module provides the `Migrator` struct, the primary entry point for
//! running schema migrations over event logs.

use crate::error::Result;
use docket_log::{JsonlEventLog, PublishedLog, ResumeCursor, ScanFilter, SourceLog};
use docket_runner::{MigrationReport, MigrationRunner, MismatchPolicy, RunOptions};
use docket_transform::{
    court_registry, ReferenceData, RegistryBuilder, StaticReferenceData, TransformerRegistry,
};
use std::path::Path;
use std::sync::Arc;

/// The Docket migrator.
///
/// This is the main entry point for running migrations. Create a migrator
/// using [`Migrator::court`] or [`Migrator::builder`], then point it at a
/// source log and a published log.
///
/// # Example
///
/// ```ignore
/// use docket::prelude::*;
///
/// // Court rule set with reference data
/// let reference = Arc::new(
///     StaticReferenceData::new().with_court_centre("B01LY", centre_id),
/// );
/// let migrator = Migrator::court(reference)?;
///
/// // Migrate one log into another
/// let report = migrator.run_jsonl("./events.jsonl", "./published.jsonl")?;
/// println!("{}", report.summary());
/// ```
#[derive(Debug)]
pub struct Migrator {
    /// The frozen rule set every run consults
    registry: Arc<TransformerRegistry>,

    /// The run driver, configured once at build time
    runner: MigrationRunner,
}

impl Migrator {
    /// Create a migrator over the built-in court rule set.
    ///
    /// Uses default run options (scan everything, abort on the first shape
    /// mismatch, start from the beginning of the log).
    ///
    /// # Arguments
    ///
    /// * `reference` - Reference tables the identifier rules resolve against
    ///
    /// # Example
    ///
    /// ```ignore
    /// let migrator = Migrator::court(reference)?;
    /// ```
    pub fn court(reference: Arc<dyn ReferenceData>) -> Result<Self> {
        Self::builder().reference_data(reference).build()
    }

    /// Create a builder for migrator configuration.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let migrator = Migrator::builder()
    ///     .reference_data(reference)
    ///     .skip_mismatches()
    ///     .build()?;
    /// ```
    pub fn builder() -> MigratorBuilder {
        MigratorBuilder::new()
    }

    /// Run one migration pass from `source` into `sink`.
    ///
    /// Appends exactly one published record per surviving source record,
    /// in scan order, plus one provenance marker per cloned stream. The
    /// source log is never written to.
    pub fn run<S, P>(&self, source: &S, sink: &mut P) -> Result<MigrationReport>
    where
        S: SourceLog,
        P: PublishedLog,
    {
        self.runner.run(source, sink).map_err(Into::into)
    }

    /// Run one migration pass between two JSONL files.
    ///
    /// Opens `source` read-only in effect and appends to `published`,
    /// creating it if absent. Re-running against the same pair resumes only
    /// if the options carry a matching cursor; a fresh run demands an empty
    /// published file.
    pub fn run_jsonl(
        &self,
        source: impl AsRef<Path>,
        published: impl AsRef<Path>,
    ) -> Result<MigrationReport> {
        // Opening creates missing files; a missing source is an error
        std::fs::metadata(source.as_ref())?;
        let source_log = JsonlEventLog::open(source.as_ref())?;
        let mut sink = JsonlEventLog::open(published.as_ref())?;
        self.run(&source_log, &mut sink)
    }

    /// Get the frozen rule set this migrator runs.
    pub fn registry(&self) -> &TransformerRegistry {
        &self.registry
    }
}

/// Builder for migrator configuration.
///
/// # Example
///
/// ```ignore
/// // Court rules, drop unmigratable events instead of aborting
/// let migrator = Migrator::builder()
///     .reference_data(reference)
///     .skip_mismatches()
///     .build()?;
///
/// // Custom rule set, resume a previous run
/// let migrator = Migrator::builder()
///     .rules(my_rules)
///     .resume_from(cursor)
///     .build()?;
/// ```
pub struct MigratorBuilder {
    reference: Option<Arc<dyn ReferenceData>>,
    rules: Option<RegistryBuilder>,
    options: RunOptions,
}

impl MigratorBuilder {
    /// Create a new builder with default settings.
    pub fn new() -> Self {
        Self {
            reference: None,
            rules: None,
            options: RunOptions::new(),
        }
    }

    /// Set the reference tables for the built-in court rule set.
    ///
    /// Without this, identifier lookups all miss and the nodes they would
    /// enrich pass through unchanged.
    pub fn reference_data(mut self, reference: Arc<dyn ReferenceData>) -> Self {
        self.reference = Some(reference);
        self
    }

    /// Use a custom rule set instead of the built-in court rules.
    ///
    /// The rules are validated when [`build`](MigratorBuilder::build) is
    /// called; any reference data set on the builder is ignored.
    pub fn rules(mut self, rules: RegistryBuilder) -> Self {
        self.rules = Some(rules);
        self
    }

    /// Scan only the given event names.
    pub fn event_names<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = self.options.event_names(names);
        self
    }

    /// Scan with an explicit filter.
    pub fn filter(mut self, filter: ScanFilter) -> Self {
        self.options = self.options.filter(filter);
        self
    }

    /// Drop events a rule cannot migrate instead of aborting the run.
    ///
    /// Each drop is logged and counted in the report. The default aborts at
    /// the first mismatch, leaving the published prefix intact.
    pub fn skip_mismatches(mut self) -> Self {
        self.options = self.options.on_shape_mismatch(MismatchPolicy::SkipEvent);
        self
    }

    /// Set the shape-mismatch policy explicitly.
    pub fn on_shape_mismatch(mut self, policy: MismatchPolicy) -> Self {
        self.options = self.options.on_shape_mismatch(policy);
        self
    }

    /// Skip this many records from the front of the scan order.
    pub fn start_offset(mut self, offset: u64) -> Self {
        self.options = self.options.start_offset(offset);
        self
    }

    /// Continue a previous run from its saved cursor.
    ///
    /// The published log must end at the cursor's sequence number or the
    /// run fails fast before any append.
    pub fn resume_from(mut self, cursor: ResumeCursor) -> Self {
        self.options = self.options.resume_from(cursor);
        self
    }

    /// Build the migrator, validating the rule set.
    ///
    /// Rule-set validation rejects duplicate rule names, overlapping path
    /// claims within an event kind, and renames onto the reserved marker
    /// name. The rule set is frozen from here on.
    pub fn build(self) -> Result<Migrator> {
        let registry = match self.rules {
            Some(rules) => rules.build()?,
            None => {
                let reference = self
                    .reference
                    .unwrap_or_else(|| Arc::new(StaticReferenceData::new()));
                court_registry(reference)?
            }
        };
        let registry = Arc::new(registry);
        let runner = MigrationRunner::new(Arc::clone(&registry), self.options);
        Ok(Migrator { registry, runner })
    }
}

impl Default for MigratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
