//! The transformer registry
//!
//! One registry instance is built at startup and then never changes. It maps
//! each known [`EventKind`] to its ordered rule chain and optional outgoing
//! rename. Building the registry validates the rule set, so a misconfigured
//! deployment fails before the first event is read:
//!
//! - rule names must be unique within a kind
//! - rules of one kind must own disjoint paths; the check is syntactic and
//!   conservative (no pattern may equal or be a prefix of a sibling's),
//!   which is exactly the ancestor/descendant overlap that makes rule
//!   ordering observable
//! - renames must not collide with the reserved provenance marker name

use crate::error::TransformError;
use crate::kind::EventKind;
use crate::rule::TransformRule;
use docket_core::{EventMetadata, Value, CLONED_STREAM_EVENT_NAME};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Registry construction failure
#[derive(Debug, Error)]
pub enum RegistryError {
    /// Two rules of one kind share a name
    #[error("duplicate rule name '{name}' for event kind '{kind}'")]
    DuplicateRuleName {
        /// Kind the rules were registered under
        kind: EventKind,
        /// The repeated name
        name: &'static str,
    },

    /// Two rules of one kind claim overlapping paths
    #[error(
        "rules '{first}' and '{second}' for event kind '{kind}' claim overlapping paths \
         ('{first_pattern}' vs '{second_pattern}')"
    )]
    OverlappingPaths {
        /// Kind the rules were registered under
        kind: EventKind,
        /// First rule name
        first: &'static str,
        /// Second rule name
        second: &'static str,
        /// First rule's pattern
        first_pattern: String,
        /// Second rule's pattern
        second_pattern: String,
    },

    /// A rename collides with the reserved provenance marker name
    #[error("outgoing event name '{0}' is reserved for stream provenance markers")]
    ReservedName(String),

    /// A path pattern failed to compile
    #[error(transparent)]
    Pattern(#[from] crate::matcher::PatternError),
}

struct KindEntry {
    rules: Vec<TransformRule>,
    publish_as: Option<String>,
}

/// Immutable rule registry, built once at startup
pub struct TransformerRegistry {
    entries: FxHashMap<EventKind, KindEntry>,
}

impl TransformerRegistry {
    /// Start an empty builder
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder {
            entries: FxHashMap::default(),
        }
    }

    /// Rules registered for a kind, in registration order
    pub fn transformers_for(&self, kind: EventKind) -> &[TransformRule] {
        self.entries
            .get(&kind)
            .map(|entry| entry.rules.as_slice())
            .unwrap_or(&[])
    }

    /// Kinds with at least one registered rule
    pub fn kinds(&self) -> impl Iterator<Item = EventKind> + '_ {
        self.entries.keys().copied()
    }

    /// Outgoing event name for a kind
    ///
    /// The source name, unless an intentional rename was registered.
    pub fn publish_name<'a>(&'a self, kind: EventKind, source_name: &'a str) -> &'a str {
        self.entries
            .get(&kind)
            .and_then(|entry| entry.publish_as.as_deref())
            .unwrap_or(source_name)
    }

    /// Migration-marker probe for a whole payload
    ///
    /// True while any registered rule still has an owned node lacking its
    /// post-migration fields. Payloads with no owned nodes at all probe
    /// false: there is nothing to do and re-runs stay no-ops.
    pub fn requires_migration(&self, kind: EventKind, payload: &Value) -> bool {
        self.transformers_for(kind)
            .iter()
            .any(|rule| rule.requires_migration(payload))
    }

    /// Fold a payload through the kind's rule chain in registration order
    ///
    /// Each rule runs one full-tree pass over the previous rule's output.
    /// The input payload is never mutated.
    pub fn apply(
        &self,
        kind: EventKind,
        meta: &EventMetadata,
        payload: &Value,
    ) -> Result<Value, TransformError> {
        let mut current = payload.clone();
        for rule in self.transformers_for(kind) {
            current = rule.apply_payload(meta, &current)?;
        }
        Ok(current)
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self
            .entries
            .iter()
            .map(|(kind, entry)| (kind.name(), entry.rules.len()))
            .collect();
        kinds.sort();
        f.debug_struct("TransformerRegistry")
            .field("kinds", &kinds)
            .finish()
    }
}

/// Accumulates rules, then validates into a [`TransformerRegistry`]
pub struct RegistryBuilder {
    entries: FxHashMap<EventKind, KindEntry>,
}

impl RegistryBuilder {
    /// Register a rule for a kind; rules apply in registration order
    pub fn rule(mut self, kind: EventKind, rule: TransformRule) -> Self {
        self.entries
            .entry(kind)
            .or_insert_with(|| KindEntry {
                rules: Vec::new(),
                publish_as: None,
            })
            .rules
            .push(rule);
        self
    }

    /// Register an intentional outgoing rename for a kind
    pub fn publish_as(mut self, kind: EventKind, name: impl Into<String>) -> Self {
        self.entries
            .entry(kind)
            .or_insert_with(|| KindEntry {
                rules: Vec::new(),
                publish_as: None,
            })
            .publish_as = Some(name.into());
        self
    }

    /// Validate and freeze the registry
    pub fn build(self) -> Result<TransformerRegistry, RegistryError> {
        for (kind, entry) in &self.entries {
            if let Some(name) = &entry.publish_as {
                if name.eq_ignore_ascii_case(CLONED_STREAM_EVENT_NAME) {
                    return Err(RegistryError::ReservedName(name.clone()));
                }
            }

            for (i, rule) in entry.rules.iter().enumerate() {
                for other in &entry.rules[i + 1..] {
                    if rule.name() == other.name() {
                        return Err(RegistryError::DuplicateRuleName {
                            kind: *kind,
                            name: rule.name(),
                        });
                    }
                    let a = rule.pattern().source();
                    let b = other.pattern().source();
                    if a.starts_with(b) || b.starts_with(a) {
                        return Err(RegistryError::OverlappingPaths {
                            kind: *kind,
                            first: rule.name(),
                            second: other.name(),
                            first_pattern: a.to_string(),
                            second_pattern: b.to_string(),
                        });
                    }
                }
            }
        }
        Ok(TransformerRegistry {
            entries: self.entries,
        })
    }
}
