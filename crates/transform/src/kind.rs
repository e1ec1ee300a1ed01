//! Known transformable event kinds
//!
//! The set of event types the engine may rewrite is a closed enum, fixed at
//! compile time. Everything else is passed through untouched. Matching is
//! case-insensitive on the kebab-case event name.

use once_cell::sync::Lazy;
use rustc_hash::FxHashMap;
use std::fmt;

/// Event kinds with registered transforms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// `hearing-resulted`: a hearing concluded and results were recorded
    HearingResulted,
    /// `defendant-case-offences-updated`: offences on a defendant case changed
    DefendantCaseOffencesUpdated,
}

static NAME_TABLE: Lazy<FxHashMap<&'static str, EventKind>> = Lazy::new(|| {
    EventKind::ALL.iter().map(|kind| (kind.name(), *kind)).collect()
});

impl EventKind {
    /// Every known kind
    pub const ALL: [EventKind; 2] = [
        EventKind::HearingResulted,
        EventKind::DefendantCaseOffencesUpdated,
    ];

    /// Canonical kebab-case event name
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::HearingResulted => "hearing-resulted",
            EventKind::DefendantCaseOffencesUpdated => "defendant-case-offences-updated",
        }
    }

    /// Case-insensitive lookup by event name
    pub fn parse(name: &str) -> Option<EventKind> {
        NAME_TABLE.get(name.to_ascii_lowercase().as_str()).copied()
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
