//! External reference-data lookups
//!
//! Some transforms derive identifiers from external reference tables (court
//! centres, offence definitions). The engine only sees this trait; where the
//! data actually lives is the caller's concern.
//!
//! Lookup outcomes and how transforms treat them:
//!
//! | outcome | meaning | transform behavior |
//! |---------|---------|--------------------|
//! | `Ok(Some(id))` | resolved | derived field injected |
//! | `Ok(None)` | code unknown | warn, node unchanged |
//! | `Err(_)` | source unavailable | warn, node unchanged |
//!
//! A miss never fails the event: the node keeps its original shape and a
//! later run retries the lookup.

use parking_lot::RwLock;
use rustc_hash::FxHashMap;
use thiserror::Error;
use uuid::Uuid;

/// Reference-data source failure
#[derive(Debug, Error)]
#[error("reference data unavailable: {0}")]
pub struct LookupError(pub String);

/// External cross-reference resolution
pub trait ReferenceData: Send + Sync {
    /// Resolve a court centre code (e.g. `B01LY`) to its identifier
    fn court_centre_id(&self, code: &str) -> Result<Option<Uuid>, LookupError>;

    /// Resolve an offence code (e.g. `TH68001`) to its definition identifier
    fn offence_definition_id(&self, code: &str) -> Result<Option<Uuid>, LookupError>;
}

/// In-memory reference tables
///
/// Used for bootstrap data and tests; built up with the `with_*` methods.
#[derive(Debug, Default)]
pub struct StaticReferenceData {
    court_centres: FxHashMap<String, Uuid>,
    offence_definitions: FxHashMap<String, Uuid>,
}

impl StaticReferenceData {
    /// Empty tables; every lookup resolves to `Ok(None)`
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a court centre entry
    pub fn with_court_centre(mut self, code: impl Into<String>, id: Uuid) -> Self {
        self.court_centres.insert(code.into(), id);
        self
    }

    /// Add an offence definition entry
    pub fn with_offence_definition(mut self, code: impl Into<String>, id: Uuid) -> Self {
        self.offence_definitions.insert(code.into(), id);
        self
    }
}

impl ReferenceData for StaticReferenceData {
    fn court_centre_id(&self, code: &str) -> Result<Option<Uuid>, LookupError> {
        Ok(self.court_centres.get(code).copied())
    }

    fn offence_definition_id(&self, code: &str) -> Result<Option<Uuid>, LookupError> {
        Ok(self.offence_definitions.get(code).copied())
    }
}

/// Memoizing wrapper around another reference source
///
/// Caches successful resolutions only: unknown codes and source errors are
/// retried on the next ask, so a reference table fixed mid-run is picked up.
#[derive(Debug)]
pub struct CachingReferenceData<R> {
    inner: R,
    court_centres: RwLock<FxHashMap<String, Uuid>>,
    offence_definitions: RwLock<FxHashMap<String, Uuid>>,
}

impl<R: ReferenceData> CachingReferenceData<R> {
    /// Wrap a reference source
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            court_centres: RwLock::new(FxHashMap::default()),
            offence_definitions: RwLock::new(FxHashMap::default()),
        }
    }
}

impl<R: ReferenceData> ReferenceData for CachingReferenceData<R> {
    fn court_centre_id(&self, code: &str) -> Result<Option<Uuid>, LookupError> {
        if let Some(id) = self.court_centres.read().get(code) {
            return Ok(Some(*id));
        }
        let resolved = self.inner.court_centre_id(code)?;
        if let Some(id) = resolved {
            self.court_centres.write().insert(code.to_string(), id);
        }
        Ok(resolved)
    }

    fn offence_definition_id(&self, code: &str) -> Result<Option<Uuid>, LookupError> {
        if let Some(id) = self.offence_definitions.read().get(code) {
            return Ok(Some(*id));
        }
        let resolved = self.inner.offence_definition_id(code)?;
        if let Some(id) = resolved {
            self.offence_definitions.write().insert(code.to_string(), id);
        }
        Ok(resolved)
    }
}
