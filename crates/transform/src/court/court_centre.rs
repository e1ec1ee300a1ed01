//! Court centre identifier enrichment
//!
//! Legacy hearing-resulted payloads carry only the court centre `code`; the
//! current schema also wants the reference-data `id`. The lookup is
//! best-effort: a code the reference source does not know, or a source
//! failure, leaves the node unchanged so a later run can pick it up once the
//! data is there.

use crate::error::TransformError;
use crate::matcher::{PathPattern, PatternError};
use crate::reference::ReferenceData;
use crate::rule::{NodeTransform, TransformRule};
use docket_core::{EventMetadata, NodePath, Object, Value};
use std::sync::Arc;
use tracing::warn;

const RULE_NAME: &str = "court-centre-identifier";

const COURT_CENTRE_PATH: &str = r"hearing\.courtCentre";

/// Injects the reference-data `id` beside the court centre `code`
pub struct CourtCentreIdentifier {
    reference: Arc<dyn ReferenceData>,
}

impl CourtCentreIdentifier {
    /// Enrich via the given reference source
    pub fn new(reference: Arc<dyn ReferenceData>) -> Self {
        Self { reference }
    }
}

impl NodeTransform for CourtCentreIdentifier {
    fn apply(
        &self,
        _meta: &EventMetadata,
        node: &Object,
        path: &NodePath,
    ) -> Result<Option<Object>, TransformError> {
        let Some(code) = node.get("code").and_then(Value::as_str) else {
            return Err(TransformError::shape_mismatch(
                RULE_NAME,
                path,
                "a string 'code'",
                &Value::Object(node.clone()),
            ));
        };
        match self.reference.court_centre_id(code) {
            Ok(Some(id)) => {
                let mut out = node.clone();
                out.insert("id", Value::String(id.to_string()));
                Ok(Some(out))
            }
            Ok(None) => {
                warn!(code, path = %path, "court centre code not found, leaving node unchanged");
                Ok(None)
            }
            Err(err) => {
                warn!(code, path = %path, error = %err, "court centre lookup failed, leaving node unchanged");
                Ok(None)
            }
        }
    }

    fn requires_migration(&self, node: &Object) -> bool {
        !node.contains_key("id")
    }
}

/// Court centre rule for hearing-resulted payloads
pub fn rule(reference: Arc<dyn ReferenceData>) -> Result<TransformRule, PatternError> {
    Ok(TransformRule::new(
        RULE_NAME,
        PathPattern::compile(COURT_CENTRE_PATH)?,
        Box::new(CourtCentreIdentifier::new(reference)),
    ))
}
