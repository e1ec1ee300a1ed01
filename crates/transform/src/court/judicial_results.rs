//! Judicial result publishing flags
//!
//! Downstream publication routing is derived from three source flags on
//! every judicial result:
//!
//! ```text
//! rollUpPrompts    = !alwaysPublished && !publishedAsAPrompt
//! publishedForNows = alwaysPublished || (publishedAsAPrompt && !excludedFromResults)
//! ```
//!
//! The three source flags are mandatory booleans. A result missing any of
//! them cannot be routed at all, so the rule raises a shape mismatch rather
//! than guessing a default.

use crate::error::TransformError;
use crate::matcher::{PathPattern, PatternError};
use crate::rule::{NodeTransform, TransformRule};
use docket_core::{EventMetadata, NodePath, Object, Value};

const RULE_NAME: &str = "judicial-result-publishing-flags";

/// Judicial result paths inside a hearing-resulted payload
const HEARING_RESULTS_PATH: &str =
    r"hearing\.prosecutionCases\.\d+\.defendants\.\d+\.offences\.\d+\.judicialResults\.\d+";

/// Judicial result paths inside a defendant-case-offences-updated payload
const OFFENCES_RESULTS_PATH: &str = r"offences\.\d+\.judicialResults\.\d+";

const REQUIRED_FLAGS: [(&str, &str); 3] = [
    ("publishedAsAPrompt", "a boolean 'publishedAsAPrompt'"),
    ("excludedFromResults", "a boolean 'excludedFromResults'"),
    ("alwaysPublished", "a boolean 'alwaysPublished'"),
];

/// Derives `rollUpPrompts` and `publishedForNows` on judicial result nodes
pub struct JudicialResultFlags;

impl NodeTransform for JudicialResultFlags {
    fn apply(
        &self,
        _meta: &EventMetadata,
        node: &Object,
        path: &NodePath,
    ) -> Result<Option<Object>, TransformError> {
        let mut flags = [false; 3];
        for (slot, (key, expected)) in flags.iter_mut().zip(REQUIRED_FLAGS) {
            match node.get(key).and_then(Value::as_bool) {
                Some(value) => *slot = value,
                None => {
                    return Err(TransformError::shape_mismatch(
                        RULE_NAME,
                        path,
                        expected,
                        &Value::Object(node.clone()),
                    ))
                }
            }
        }
        let [published_as_a_prompt, excluded_from_results, always_published] = flags;

        let roll_up_prompts = !always_published && !published_as_a_prompt;
        let published_for_nows =
            always_published || (published_as_a_prompt && !excluded_from_results);

        let mut out = node.clone();
        out.insert("rollUpPrompts", Value::Bool(roll_up_prompts));
        out.insert("publishedForNows", Value::Bool(published_for_nows));
        Ok(Some(out))
    }

    fn requires_migration(&self, node: &Object) -> bool {
        !(node.contains_key("rollUpPrompts") && node.contains_key("publishedForNows"))
    }
}

/// Flags rule for hearing-resulted payloads
pub fn hearing_rule() -> Result<TransformRule, PatternError> {
    Ok(TransformRule::new(
        RULE_NAME,
        PathPattern::compile(HEARING_RESULTS_PATH)?,
        Box::new(JudicialResultFlags),
    ))
}

/// Flags rule for defendant-case-offences-updated payloads
pub fn offences_rule() -> Result<TransformRule, PatternError> {
    Ok(TransformRule::new(
        RULE_NAME,
        PathPattern::compile(OFFENCES_RESULTS_PATH)?,
        Box::new(JudicialResultFlags),
    ))
}
