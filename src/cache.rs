//! Per-tenant cache of compiled rule sets. Each entry pairs a source version
//! marker with an `Arc<RuleSet>`; publishing a recompiled set replaces the
//! whole entry, so readers either see the old set or the new one, never a
//! torn one.

use std::sync::Arc;

use dashmap::DashMap;
use tracing::{debug, warn};

use crate::{RuleSet, RulesError};

/// Caches the most recently compiled [`RuleSet`] per tenant.
///
/// Reads for different tenants never contend on the same entry. Concurrent
/// callers that miss on the same tenant may each compile redundantly;
/// correctness only requires that a published set is complete, which the
/// atomic entry replacement guarantees.
///
/// A failed compilation leaves the previous entry untouched, so a tenant
/// keeps serving its last valid rule set until a corrected document compiles.
#[derive(Debug, Default)]
pub struct RuleCache {
    entries: DashMap<String, CachedRules>,
}

#[derive(Debug, Clone)]
struct CachedRules {
    marker: String,
    rules: Arc<RuleSet>,
}

impl RuleCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached rule set for a tenant, if its version marker matches.
    #[must_use]
    pub fn get(&self, tenant: &str, marker: &str) -> Option<Arc<RuleSet>> {
        let entry = self.entries.get(tenant)?;
        if entry.marker == marker {
            debug!(tenant, "rule cache hit");
            Some(Arc::clone(&entry.rules))
        } else {
            debug!(tenant, "rule cache marker mismatch");
            None
        }
    }

    /// Compile a rules document and publish it for the tenant under the given
    /// version marker.
    ///
    /// # Errors
    ///
    /// Returns [`RulesError`] when the document does not compile; the
    /// tenant's previous entry, if any, keeps serving.
    pub fn compile_and_store(
        &self,
        tenant: &str,
        marker: &str,
        text: &str,
    ) -> Result<Arc<RuleSet>, RulesError> {
        debug!(tenant, marker, "compiling circulation rules");
        let rules = match RuleSet::from_text(text) {
            Ok(rules) => Arc::new(rules),
            Err(err) => {
                warn!(tenant, error = %err, "rule compilation failed; keeping previous set");
                return Err(err);
            }
        };
        self.entries.insert(
            tenant.to_owned(),
            CachedRules {
                marker: marker.to_owned(),
                rules: Arc::clone(&rules),
            },
        );
        Ok(rules)
    }

    /// The cached rule set for a tenant, compiling on a miss or marker
    /// mismatch. `fetch` supplies the rule text and is the only point where a
    /// caller may wait on external I/O.
    ///
    /// # Errors
    ///
    /// Returns the fetch error, or the compilation error converted into `E`.
    pub fn get_or_compile<F, E>(
        &self,
        tenant: &str,
        marker: &str,
        fetch: F,
    ) -> Result<Arc<RuleSet>, E>
    where
        F: FnOnce() -> Result<String, E>,
        E: From<RulesError>,
    {
        if let Some(rules) = self.get(tenant, marker) {
            return Ok(rules);
        }
        let text = fetch()?;
        self.compile_and_store(tenant, marker, &text).map_err(E::from)
    }

    /// Drop a tenant's entry.
    pub fn invalidate(&self, tenant: &str) {
        self.entries.remove(tenant);
    }

    /// Number of cached tenants.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the cache is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Version marker derived from the source text itself (BLAKE3, hex), for
    /// callers that do not track their own version identifiers.
    #[must_use]
    pub fn source_marker(text: &str) -> String {
        blake3::hash(text.as_bytes()).to_hex().to_string()
    }
}
