//! Offence definition identifier enrichment
//!
//! Offence definitions in legacy defendant-case-offences-updated payloads
//! are keyed by `offenceCode` alone. The rule injects the reference-data
//! `offenceDefinitionId` beside it, with the same best-effort degrade as
//! court centres: unknown codes keep the node unchanged for a later run.

use crate::error::TransformError;
use crate::matcher::{PathPattern, PatternError};
use crate::reference::ReferenceData;
use crate::rule::{NodeTransform, TransformRule};
use docket_core::{EventMetadata, NodePath, Object, Value};
use std::sync::Arc;
use tracing::warn;

const RULE_NAME: &str = "offence-definition-identifier";

const OFFENCE_DEFINITION_PATH: &str = r"offences\.\d+\.offenceDefinition";

/// Injects `offenceDefinitionId` beside the `offenceCode`
pub struct OffenceDefinitionIdentifier {
    reference: Arc<dyn ReferenceData>,
}

impl OffenceDefinitionIdentifier {
    /// Enrich via the given reference source
    pub fn new(reference: Arc<dyn ReferenceData>) -> Self {
        Self { reference }
    }
}

impl NodeTransform for OffenceDefinitionIdentifier {
    fn apply(
        &self,
        _meta: &EventMetadata,
        node: &Object,
        path: &NodePath,
    ) -> Result<Option<Object>, TransformError> {
        let Some(code) = node.get("offenceCode").and_then(Value::as_str) else {
            return Err(TransformError::shape_mismatch(
                RULE_NAME,
                path,
                "a string 'offenceCode'",
                &Value::Object(node.clone()),
            ));
        };
        match self.reference.offence_definition_id(code) {
            Ok(Some(id)) => {
                let mut out = node.clone();
                out.insert("offenceDefinitionId", Value::String(id.to_string()));
                Ok(Some(out))
            }
            Ok(None) => {
                warn!(code, path = %path, "offence code not found, leaving node unchanged");
                Ok(None)
            }
            Err(err) => {
                warn!(code, path = %path, error = %err, "offence definition lookup failed, leaving node unchanged");
                Ok(None)
            }
        }
    }

    fn requires_migration(&self, node: &Object) -> bool {
        !node.contains_key("offenceDefinitionId")
    }
}

/// Offence definition rule for defendant-case-offences-updated payloads
pub fn rule(reference: Arc<dyn ReferenceData>) -> Result<TransformRule, PatternError> {
    Ok(TransformRule::new(
        RULE_NAME,
        PathPattern::compile(OFFENCE_DEFINITION_PATH)?,
        Box::new(OffenceDefinitionIdentifier::new(reference)),
    ))
}
