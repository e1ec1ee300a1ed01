//! The migration run driver
//!
//! One run scans a source log in order and appends exactly one published
//! record per scanned record, transformed where the registry still has work
//! to do and verbatim otherwise. Each record moves through a fixed
//! lifecycle:
//!
//! ```text
//! Received -> Classified -> (Rewritten) -> Appended -> Done
//! ```
//!
//! A shape mismatch ends the lifecycle early: the record is either skipped
//! or aborts the whole run, per [`MismatchPolicy`]. Source logs are never
//! written to, so an aborted run damages nothing and a rerun starts clean.

use chrono::{DateTime, Utc};
use docket_core::{ClonedStreamLink, EventId, PublishedEvent, Sequencer, StreamId};
use docket_log::{LogError, PublishedLog, ResumeCursor, ScanFilter, SourceLog};
use docket_transform::{
    EventClassifier, MigrationAction, TransformError, TransformerRegistry,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, error, info, trace};

// ============================================================================
// Run Options
// ============================================================================

/// Per-run configuration
///
/// Defaults scan every record, abort on the first shape mismatch, and start
/// from the beginning of the log.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    filter: ScanFilter,
    policy: MismatchPolicy,
    start_offset: u64,
    start_sequence: u64,
}

impl RunOptions {
    /// Default options
    pub fn new() -> Self {
        Self::default()
    }

    /// Scan only the given event names
    pub fn event_names<I, S>(self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filter(ScanFilter::event_names(names))
    }

    /// Scan with an explicit filter
    pub fn filter(mut self, filter: ScanFilter) -> Self {
        self.filter = filter;
        self
    }

    /// What to do when a rule rejects an event's shape
    pub fn on_shape_mismatch(mut self, policy: MismatchPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Skip this many records from the front of the scan order
    pub fn start_offset(mut self, offset: u64) -> Self {
        self.start_offset = offset;
        self
    }

    /// Continue a previous run from its saved cursor
    ///
    /// Sets the scan offset and seeds the sequencer so the published chain
    /// continues without a gap.
    pub fn resume_from(mut self, cursor: ResumeCursor) -> Self {
        self.start_offset = cursor.records_consumed;
        self.start_sequence = cursor.last_sequence;
        self
    }
}

/// Policy for events a rule cannot migrate
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MismatchPolicy {
    /// Stop the run at the first mismatch; the published prefix stays intact
    #[default]
    AbortRun,
    /// Log the mismatch, publish nothing for that record, continue
    SkipEvent,
}

// ============================================================================
// Migration Report
// ============================================================================

/// Outcome counts for one completed run
#[derive(Debug, Clone)]
pub struct MigrationReport {
    /// Records consumed from the scan order this run
    pub events_scanned: u64,
    /// Records appended to the published log
    pub events_published: u64,
    /// Published records that went through the rule chain
    pub transformed: u64,
    /// Published records copied verbatim
    pub passed_through: u64,
    /// Records dropped under [`MismatchPolicy::SkipEvent`]
    pub skipped: u64,
    /// Provenance markers appended this run
    pub streams_cloned: u64,
    /// Last sequence number issued to the published log
    pub last_sequence: u64,
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the run finished
    pub finished_at: DateTime<Utc>,
    /// Cursor a driver can persist to resume after this run
    ///
    /// Cumulative across batches: it accounts for records consumed by
    /// earlier runs the options resumed from.
    pub cursor: ResumeCursor,
}

impl MigrationReport {
    /// Wall-clock duration of the run
    pub fn duration(&self) -> chrono::Duration {
        self.finished_at - self.started_at
    }

    /// Whether any record was dropped
    pub fn has_skips(&self) -> bool {
        self.skipped > 0
    }

    /// Human-readable one-line summary
    pub fn summary(&self) -> String {
        format!(
            "Migration complete: {} scanned, {} published ({} transformed, {} verbatim), {} skipped, {} streams cloned, last sequence {}, {:.2}ms",
            self.events_scanned,
            self.events_published,
            self.transformed,
            self.passed_through,
            self.skipped,
            self.streams_cloned,
            self.last_sequence,
            self.duration().num_microseconds().unwrap_or(0) as f64 / 1000.0
        )
    }
}

// ============================================================================
// Runner Error
// ============================================================================

/// Run failure
#[derive(Debug, Error)]
pub enum RunnerError {
    /// A log store failed
    #[error(transparent)]
    Log(#[from] LogError),

    /// A rule rejected an event under [`MismatchPolicy::AbortRun`]
    #[error("event {event_id} cannot be migrated: {source}")]
    Transform {
        /// Identity of the rejected event
        event_id: EventId,
        /// The underlying shape mismatch
        #[source]
        source: TransformError,
    },

    /// The published log does not line up with the configured resume point
    #[error("published log out of step: expected last sequence {expected}, found {found}")]
    SequenceCorrupt {
        /// Sequence the options resume from
        expected: u64,
        /// Last sequence actually present in the published log
        found: u64,
    },
}

// ============================================================================
// Migration Runner
// ============================================================================

/// Drives one migration run over a frozen registry
#[derive(Debug)]
pub struct MigrationRunner {
    registry: Arc<TransformerRegistry>,
    classifier: EventClassifier,
    options: RunOptions,
}

impl MigrationRunner {
    /// Build a runner over a registry and per-run options
    pub fn new(registry: Arc<TransformerRegistry>, options: RunOptions) -> Self {
        let classifier = EventClassifier::new(Arc::clone(&registry));
        Self {
            registry,
            classifier,
            options,
        }
    }

    /// Scan `source` and publish every surviving record into `sink`
    ///
    /// The published log must line up with the resume point (empty for a
    /// fresh run); anything else fails fast with
    /// [`RunnerError::SequenceCorrupt`] before any append.
    pub fn run<S, P>(&self, source: &S, sink: &mut P) -> Result<MigrationReport, RunnerError>
    where
        S: SourceLog,
        P: PublishedLog,
    {
        let started_at = Utc::now();

        let found = sink
            .events()?
            .last()
            .map(|event| event.sequence_number)
            .unwrap_or(0);
        if found != self.options.start_sequence {
            return Err(RunnerError::SequenceCorrupt {
                expected: self.options.start_sequence,
                found,
            });
        }
        let mut cloned_streams: Vec<StreamId> = sink
            .markers()?
            .iter()
            .map(|marker| marker.originating_stream)
            .collect();

        let mut sequencer = Sequencer::resuming_from(self.options.start_sequence);
        let records = source.scan(&self.options.filter)?;

        let mut events_scanned = 0u64;
        let mut transformed_count = 0u64;
        let mut passed_through = 0u64;
        let mut skipped = 0u64;
        let mut streams_cloned = 0u64;

        for record in records.into_iter().skip(self.options.start_offset as usize) {
            events_scanned += 1;
            trace!(
                event_id = %record.metadata.id,
                stream = %record.stream_id,
                name = %record.name,
                "received"
            );

            let action = self.classifier.action_for(&record.name, &record.payload);
            trace!(event_id = %record.metadata.id, ?action, "classified");

            let (name, payload, transformed) = match action {
                MigrationAction::NoAction => (record.name.clone(), record.payload.clone(), false),
                MigrationAction::Transform(kind) => {
                    match self.registry.apply(kind, &record.metadata, &record.payload) {
                        Ok(payload) => {
                            let name = self.registry.publish_name(kind, &record.name).to_string();
                            (name, payload, true)
                        }
                        Err(mismatch) => match self.options.policy {
                            MismatchPolicy::SkipEvent => {
                                error!(
                                    event_id = %record.metadata.id,
                                    error = %mismatch,
                                    "skipping unmigratable event"
                                );
                                skipped += 1;
                                continue;
                            }
                            MismatchPolicy::AbortRun => {
                                return Err(RunnerError::Transform {
                                    event_id: record.metadata.id,
                                    source: mismatch,
                                });
                            }
                        },
                    }
                }
            };

            if !cloned_streams.contains(&record.stream_id) {
                sink.append_clone_marker(ClonedStreamLink::new(record.stream_id))?;
                cloned_streams.push(record.stream_id);
                streams_cloned += 1;
                debug!(stream = %record.stream_id, "stream clone marker appended");
            }

            let published = PublishedEvent::derive(&record, sequencer.issue(), name, payload);
            debug!(
                event_id = %published.metadata.id,
                sequence = published.sequence_number,
                transformed,
                "appended"
            );
            sink.append(published)?;
            if transformed {
                transformed_count += 1;
            } else {
                passed_through += 1;
            }
        }

        let last_sequence = sequencer.last_sequence();
        let report = MigrationReport {
            events_scanned,
            events_published: transformed_count + passed_through,
            transformed: transformed_count,
            passed_through,
            skipped,
            streams_cloned,
            last_sequence,
            started_at,
            finished_at: Utc::now(),
            cursor: ResumeCursor {
                records_consumed: self.options.start_offset + events_scanned,
                last_sequence,
            },
        };
        info!(
            scanned = report.events_scanned,
            published = report.events_published,
            skipped = report.skipped,
            "migration run complete"
        );
        Ok(report)
    }
}
