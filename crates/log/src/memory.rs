//! In-memory event log
//!
//! Backs unit and integration tests and the facade's ephemeral mode. One
//! instance can serve as a preloaded source, a captured sink, or both.

use crate::error::Result;
use crate::filter::ScanFilter;
use crate::store::{PublishedLog, SourceLog};
use docket_core::{ClonedStreamLink, EventRecord, EventStream, PublishedEvent};

/// Event log held entirely in memory
#[derive(Debug, Default)]
pub struct MemoryEventLog {
    records: Vec<EventRecord>,
    streams: Vec<EventStream>,
    published: Vec<PublishedEvent>,
    markers: Vec<ClonedStreamLink>,
}

impl MemoryEventLog {
    /// Empty log
    pub fn new() -> Self {
        Self::default()
    }

    /// Log preloaded with source records, in the given order
    pub fn with_records(records: Vec<EventRecord>) -> Self {
        let mut log = Self::new();
        for record in records {
            log.push_record(record);
        }
        log
    }

    /// Append one source record, registering its stream on first sight
    pub fn push_record(&mut self, record: EventRecord) {
        if !self
            .streams
            .iter()
            .any(|stream| stream.stream_id == record.stream_id)
        {
            self.streams.push(EventStream::active(record.stream_id));
        }
        self.records.push(record);
    }

    /// Number of source records held
    pub fn record_count(&self) -> usize {
        self.records.len()
    }

    /// Number of published records held
    pub fn published_count(&self) -> usize {
        self.published.len()
    }
}

impl SourceLog for MemoryEventLog {
    fn scan(&self, filter: &ScanFilter) -> Result<Vec<EventRecord>> {
        Ok(self
            .records
            .iter()
            .filter(|record| filter.matches(&record.name))
            .cloned()
            .collect())
    }

    fn streams(&self) -> Result<Vec<EventStream>> {
        Ok(self.streams.clone())
    }
}

impl PublishedLog for MemoryEventLog {
    fn append(&mut self, event: PublishedEvent) -> Result<()> {
        self.published.push(event);
        Ok(())
    }

    fn append_clone_marker(&mut self, link: ClonedStreamLink) -> Result<()> {
        self.markers.push(link);
        Ok(())
    }

    fn events(&self) -> Result<Vec<PublishedEvent>> {
        Ok(self.published.clone())
    }

    fn markers(&self) -> Result<Vec<ClonedStreamLink>> {
        Ok(self.markers.clone())
    }
}
