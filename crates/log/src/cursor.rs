//! Resume cursor
//!
//! The engine itself is safe to re-run from scratch, but a driver working
//! through a large log can persist a cursor after each batch and resume
//! later: `records_consumed` becomes the next run's start offset and
//! `last_sequence` seeds its sequencer. Offsets count scanned records, not
//! published ones; the two differ once events have been skipped.

use crate::error::{LogError, Result};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Progress marker for a resumable migration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResumeCursor {
    /// Records consumed from the front of the scan order
    pub records_consumed: u64,
    /// Last sequence number issued to the published log
    pub last_sequence: u64,
}

impl ResumeCursor {
    /// Cursor at the very start of a migration
    pub fn start() -> Self {
        Self::default()
    }

    /// Persist the cursor, replacing the file atomically
    pub fn save(&self, path: &Path) -> Result<()> {
        let tmp = path.with_extension("tmp");
        {
            let mut file = File::create(&tmp)?;
            file.write_all(serde_json::to_string_pretty(self)?.as_bytes())?;
            file.sync_all()?;
        }
        std::fs::rename(&tmp, path)?;
        Ok(())
    }

    /// Load a previously saved cursor
    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)?;
        serde_json::from_str(&data).map_err(|source| LogError::Decode { line: 1, source })
    }
}
