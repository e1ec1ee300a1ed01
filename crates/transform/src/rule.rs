//! Transform rules
//!
//! A rule binds a compiled path pattern to a node transform. Applying a rule
//! to a payload runs one [`clone_with`](crate::tree::clone_with) pass: nodes
//! whose path matches are handed to the transform, everything else is
//! rebuilt as-is.

use crate::error::TransformError;
use crate::matcher::PathPattern;
use crate::tree::{any_node, clone_with};
use docket_core::{EventMetadata, NodePath, Object, Value};

/// Rewrites one owned node
///
/// Implementations must be idempotent at the node level: applying to an
/// already-transformed node must reproduce it, since re-runs see their own
/// output. `Ok(None)` leaves the node unchanged (the degrade path for
/// reference lookup misses); a [`TransformError`] rejects the whole event.
pub trait NodeTransform: Send + Sync {
    /// Rewrite a matched node, or leave it (`Ok(None)`)
    fn apply(
        &self,
        meta: &EventMetadata,
        node: &Object,
        path: &NodePath,
    ) -> Result<Option<Object>, TransformError>;

    /// Migration-marker probe: true while the node still lacks the
    /// post-migration fields
    fn requires_migration(&self, node: &Object) -> bool;
}

/// A named path-to-transform binding
pub struct TransformRule {
    name: &'static str,
    pattern: PathPattern,
    transform: Box<dyn NodeTransform>,
}

impl TransformRule {
    /// Bind a transform to the paths it owns
    pub fn new(
        name: &'static str,
        pattern: PathPattern,
        transform: Box<dyn NodeTransform>,
    ) -> Self {
        Self {
            name,
            pattern,
            transform,
        }
    }

    /// Rule name (unique within its event kind)
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The owned path pattern
    pub fn pattern(&self) -> &PathPattern {
        &self.pattern
    }

    /// Apply this rule across a payload
    ///
    /// One full-tree pass; matched nodes must be objects. Returns the new
    /// payload, leaving the input untouched.
    pub fn apply_payload(
        &self,
        meta: &EventMetadata,
        payload: &Value,
    ) -> Result<Value, TransformError> {
        clone_with(payload, &mut |node, path| {
            if !self.pattern.matches(path) {
                return Ok(None);
            }
            let obj = match node.as_object() {
                Some(obj) => obj,
                None => {
                    return Err(TransformError::shape_mismatch(
                        self.name,
                        path,
                        "an object",
                        node,
                    ))
                }
            };
            Ok(self.transform.apply(meta, obj, path)?.map(Value::Object))
        })
    }

    /// True when any owned node still needs migrating
    pub fn requires_migration(&self, payload: &Value) -> bool {
        any_node(payload, &mut |node, path| {
            node.as_object()
                .map(|obj| self.pattern.matches(path) && self.transform.requires_migration(obj))
                .unwrap_or(false)
        })
    }
}

impl std::fmt::Debug for TransformRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformRule")
            .field("name", &self.name)
            .field("pattern", &self.pattern.source())
            .finish()
    }
}
