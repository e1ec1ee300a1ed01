//! Event classification
//!
//! The classifier decides, per scanned event, whether the rule chain has any
//! work left to do. Unknown event names and payloads whose owned nodes all
//! carry their post-migration fields classify as [`MigrationAction::NoAction`]
//! and are republished verbatim.

use crate::kind::EventKind;
use crate::registry::TransformerRegistry;
use docket_core::Value;
use std::sync::Arc;
use tracing::trace;

/// What the runner should do with one scanned event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MigrationAction {
    /// Fold the payload through the kind's rule chain
    Transform(EventKind),
    /// Republish the event verbatim
    NoAction,
}

/// Stateless classifier over a frozen registry
#[derive(Debug, Clone)]
pub struct EventClassifier {
    registry: Arc<TransformerRegistry>,
}

impl EventClassifier {
    /// Wrap a registry
    pub fn new(registry: Arc<TransformerRegistry>) -> Self {
        Self { registry }
    }

    /// Classify one event by name and payload
    ///
    /// Names that parse to no known kind get [`MigrationAction::NoAction`],
    /// as do payloads the registry has already fully migrated or never owns
    /// a node of.
    pub fn action_for(&self, event_name: &str, payload: &Value) -> MigrationAction {
        let Some(kind) = EventKind::parse(event_name) else {
            trace!(event_name, "event name not registered, passing through");
            return MigrationAction::NoAction;
        };
        if self.registry.requires_migration(kind, payload) {
            MigrationAction::Transform(kind)
        } else {
            trace!(event_name, "payload already migrated, passing through");
            MigrationAction::NoAction
        }
    }
}
