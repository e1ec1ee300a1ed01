//! File-backed event log
//!
//! One JSON record per line. Source records, published records and
//! provenance markers share a file format and are told apart by the
//! `record` tag on each line:
//!
//! ```text
//! {"record":"event","stream_id":"...","position_in_stream":0,...}
//! {"record":"cloned-stream","originating_stream":"..."}
//! {"record":"published","stream_id":"...","sequence_number":1,...}
//! ```
//!
//! Payload key order survives the round trip: the payload serde impls emit
//! and rebuild keys in stored order, and `serde_json` keeps whatever order
//! it is handed. Appends are flushed and fsynced one line at a time so an
//! interrupted run leaves a readable prefix, never a torn record.

use crate::error::{LogError, Result};
use crate::filter::ScanFilter;
use crate::store::{PublishedLog, SourceLog};
use docket_core::{
    validate_payload, ClonedStreamLink, EventRecord, EventStream, PublishedEvent,
};
use serde::{Deserialize, Serialize};
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// One line of the store file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "record", rename_all = "kebab-case")]
enum Envelope {
    /// A source record
    Event(EventRecord),
    /// A published record
    Published(PublishedEvent),
    /// A stream provenance marker
    ClonedStream(ClonedStreamLink),
}

/// Event log stored as one JSON record per line
pub struct JsonlEventLog {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl JsonlEventLog {
    /// Open a log file for reading and appending, creating it if absent
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        debug!(path = %path.display(), "opened jsonl event log");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Create an empty log file, truncating any existing content
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)?;
        debug!(path = %path.display(), "created jsonl event log");
        Ok(Self {
            path,
            writer: BufWriter::new(file),
        })
    }

    /// Location of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write a whole source log in one shot
    ///
    /// Used to stage fixture and export files. The content lands under a
    /// temporary name and is moved into place with an atomic rename, so
    /// readers never observe a half-written file.
    pub fn write_records(path: &Path, records: &[EventRecord]) -> Result<()> {
        for record in records {
            validate_payload(&record.payload)?;
        }
        let tmp = path.with_extension("tmp");
        {
            let mut writer = BufWriter::new(File::create(&tmp)?);
            for record in records {
                let line = serde_json::to_string(&Envelope::Event(record.clone()))?;
                writeln!(writer, "{line}")?;
            }
            writer.flush()?;
            writer.get_ref().sync_all()?;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    fn append_envelope(&mut self, envelope: Envelope) -> Result<()> {
        let line = serde_json::to_string(&envelope)?;
        writeln!(self.writer, "{line}")?;
        self.writer.flush()?;
        self.writer.get_ref().sync_all()?;
        Ok(())
    }

    fn read_envelopes(&self) -> Result<Vec<Envelope>> {
        let reader = BufReader::new(File::open(&self.path)?);
        let mut envelopes = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let envelope = serde_json::from_str(&line).map_err(|source| LogError::Decode {
                line: index + 1,
                source,
            })?;
            envelopes.push(envelope);
        }
        Ok(envelopes)
    }
}

impl SourceLog for JsonlEventLog {
    fn scan(&self, filter: &ScanFilter) -> Result<Vec<EventRecord>> {
        let records: Vec<EventRecord> = self
            .read_envelopes()?
            .into_iter()
            .filter_map(|envelope| match envelope {
                Envelope::Event(record) if filter.matches(&record.name) => Some(record),
                _ => None,
            })
            .collect();
        debug!(path = %self.path.display(), count = records.len(), "scanned source records");
        Ok(records)
    }

    fn streams(&self) -> Result<Vec<EventStream>> {
        let mut streams: Vec<EventStream> = Vec::new();
        for record in self.scan(&ScanFilter::all())? {
            if !streams.iter().any(|s| s.stream_id == record.stream_id) {
                streams.push(EventStream::active(record.stream_id));
            }
        }
        Ok(streams)
    }
}

impl PublishedLog for JsonlEventLog {
    fn append(&mut self, event: PublishedEvent) -> Result<()> {
        validate_payload(&event.payload)?;
        self.append_envelope(Envelope::Published(event))
    }

    fn append_clone_marker(&mut self, link: ClonedStreamLink) -> Result<()> {
        self.append_envelope(Envelope::ClonedStream(link))
    }

    fn events(&self) -> Result<Vec<PublishedEvent>> {
        Ok(self
            .read_envelopes()?
            .into_iter()
            .filter_map(|envelope| match envelope {
                Envelope::Published(event) => Some(event),
                _ => None,
            })
            .collect())
    }

    fn markers(&self) -> Result<Vec<ClonedStreamLink>> {
        Ok(self
            .read_envelopes()?
            .into_iter()
            .filter_map(|envelope| match envelope {
                Envelope::ClonedStream(link) => Some(link),
                _ => None,
            })
            .collect())
    }
}
