//! Transform error types

use docket_core::{NodePath, Value};
use thiserror::Error;

/// Errors raised while applying transforms to a payload
///
/// A shape mismatch means a node the rule owns does not carry the mandatory
/// source fields; the event cannot be migrated and the error carries enough
/// context to find the offending node. Reference-data lookup misses are NOT
/// errors: they degrade to an unchanged node inside the transform.
#[derive(Debug, Error)]
pub enum TransformError {
    /// A node owned by a rule does not have the shape the rule requires
    #[error("rule '{rule}' expected {expected} at '{path}', found {node}")]
    ShapeMismatch {
        /// Name of the rule that rejected the node
        rule: &'static str,
        /// Dotted path of the offending node
        path: String,
        /// What the rule required
        expected: &'static str,
        /// The offending node, rendered as JSON
        node: String,
    },
}

impl TransformError {
    /// Build a shape mismatch carrying the rendered offending node
    pub fn shape_mismatch(
        rule: &'static str,
        path: &NodePath,
        expected: &'static str,
        node: &Value,
    ) -> Self {
        let rendered = docket_wire::encode_document(node)
            .unwrap_or_else(|_| "<unencodable node>".to_string());
        TransformError::ShapeMismatch {
            rule,
            path: path.render(),
            expected,
            node: rendered,
        }
    }
}

/// Result alias for transform operations
pub type Result<T> = std::result::Result<T, TransformError>;
