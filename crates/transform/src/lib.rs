//! Payload transformation for docket
//!
//! Everything between a scanned event and its migrated payload lives here:
//! path ownership ([`PathPattern`]), the structural rewrite walk
//! ([`clone_with`]), named rules ([`TransformRule`]), the frozen per-kind
//! registry ([`TransformerRegistry`]), event classification
//! ([`EventClassifier`]), and the concrete court rule set ([`court`]).
//!
//! Transforms never mutate their input. A rule either returns a rebuilt
//! payload or a typed [`TransformError`] naming the offending node; reference
//! lookup misses degrade to unchanged nodes instead of failing the event.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod classifier;
pub mod court;
pub mod error;
pub mod kind;
pub mod matcher;
pub mod reference;
pub mod registry;
pub mod rule;
pub mod tree;

pub use classifier::{EventClassifier, MigrationAction};
pub use court::{court_registry, court_rules};
pub use error::{Result, TransformError};
pub use kind::EventKind;
pub use matcher::{PathPattern, PatternError};
pub use reference::{CachingReferenceData, LookupError, ReferenceData, StaticReferenceData};
pub use registry::{RegistryBuilder, RegistryError, TransformerRegistry};
pub use rule::{NodeTransform, TransformRule};
pub use tree::{any_node, clone_with};
