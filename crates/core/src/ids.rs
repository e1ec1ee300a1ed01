//! Identifier newtypes
//!
//! This module defines the fundamental identifiers used throughout the system:
//! - [`EventId`]: identity of one event record
//! - [`StreamId`]: identity of one event stream
//!
//! Both wrap UUIDs; the newtypes exist so the two can never be swapped in a
//! signature.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for an event record
///
/// Assigned when the event is first recorded and preserved verbatim by
/// migration: a published event carries the id of the source event it was
/// derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Create a new random EventId using UUID v4
    ///
    /// # Examples
    ///
    /// ```
    /// use docket_core::EventId;
    ///
    /// let id1 = EventId::new();
    /// let id2 = EventId::new();
    /// assert_ne!(id1, id2); // Each EventId is unique
    /// ```
    pub fn new() -> Self {
        EventId(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        EventId(uuid)
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for EventId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique identifier for an event stream
///
/// Streams group the events of one aggregate (one case progression). The
/// migration output reuses source stream ids so provenance stays traceable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StreamId(Uuid);

impl StreamId {
    /// Create a new random StreamId using UUID v4
    pub fn new() -> Self {
        StreamId(Uuid::new_v4())
    }

    /// Wrap an existing UUID
    pub fn from_uuid(uuid: Uuid) -> Self {
        StreamId(uuid)
    }

    /// Underlying UUID
    pub fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for StreamId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for StreamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
