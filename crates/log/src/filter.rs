//! Scan filtering

/// Event-name filter for source log scans
///
/// An unrestricted filter matches everything. Name comparison is
/// case-insensitive, matching event kind parsing.
#[derive(Debug, Clone, Default)]
pub struct ScanFilter {
    names: Option<Vec<String>>,
}

impl ScanFilter {
    /// Match every record
    pub fn all() -> Self {
        Self { names: None }
    }

    /// Match only the given event names
    pub fn event_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: Some(names.into_iter().map(Into::into).collect()),
        }
    }

    /// Whether a record with this event name passes the filter
    pub fn matches(&self, name: &str) -> bool {
        match &self.names {
            None => true,
            Some(names) => names.iter().any(|candidate| candidate.eq_ignore_ascii_case(name)),
        }
    }

    /// Whether the filter restricts names at all
    pub fn is_restricted(&self) -> bool {
        self.names.is_some()
    }
}
