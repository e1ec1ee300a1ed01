//! The production court rule set
//!
//! Four rules across the two known event kinds, registered flags-first so
//! publication routing is derived before identifier enrichment:
//!
//! | kind | rule | owned paths |
//! |------|------|-------------|
//! | hearing-resulted | judicial-result-publishing-flags | `hearing.prosecutionCases.N.defendants.N.offences.N.judicialResults.N` |
//! | hearing-resulted | court-centre-identifier | `hearing.courtCentre` |
//! | defendant-case-offences-updated | judicial-result-publishing-flags | `offences.N.judicialResults.N` |
//! | defendant-case-offences-updated | offence-definition-identifier | `offences.N.offenceDefinition` |
//!
//! Within each kind the owned paths are sibling subtrees, so the registry's
//! overlap validation accepts the set and rule order is unobservable in the
//! output.

pub mod court_centre;
pub mod judicial_results;
pub mod offence_definitions;

use crate::kind::EventKind;
use crate::reference::ReferenceData;
use crate::registry::{RegistryBuilder, RegistryError, TransformerRegistry};
use std::sync::Arc;

/// The production rules as a builder, open for further registration
pub fn court_rules(reference: Arc<dyn ReferenceData>) -> Result<RegistryBuilder, RegistryError> {
    Ok(TransformerRegistry::builder()
        .rule(EventKind::HearingResulted, judicial_results::hearing_rule()?)
        .rule(
            EventKind::HearingResulted,
            court_centre::rule(Arc::clone(&reference))?,
        )
        .rule(
            EventKind::DefendantCaseOffencesUpdated,
            judicial_results::offences_rule()?,
        )
        .rule(
            EventKind::DefendantCaseOffencesUpdated,
            offence_definitions::rule(reference)?,
        ))
}

/// The production registry, validated and frozen
pub fn court_registry(
    reference: Arc<dyn ReferenceData>,
) -> Result<TransformerRegistry, RegistryError> {
    court_rules(reference)?.build()
}
