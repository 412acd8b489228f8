//! Per-unit state (spec §3): the pieces of the data model that are
//! immutable for the duration of a unit ([`PluginContext`]) and the pieces
//! threaded mutably through the whole-unit pass and the per-node traversal
//! ([`UnitState`]).

use rustc_hash::FxHashMap;

use xform_diagnostic::DiagnosticQueue;
use xform_ir::{FileSet, Interner};
use xform_types::TypeInferenceService;

use crate::config::Config;
use crate::names::NameAllocator;

/// Tracks which monomorphized `Option<T>` declarations have already been
/// emitted for a unit, keyed by the sanitized type name (spec §4.8) — each
/// distinct instantiation gets its declaration exactly once.
#[derive(Default)]
pub struct MonoCache {
    emitted: FxHashMap<String, bool>,
}

impl MonoCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` the first time this key is seen, `false` on every
    /// later call — mirroring `warn_once`'s shape.
    pub fn claim(&mut self, key: &str) -> bool {
        if self.emitted.contains_key(key) {
            return false;
        }
        self.emitted.insert(key.to_string(), true);
        true
    }
}

/// The read-only half of the plugin context: file positions, the validated
/// configuration, and the type-inference service. Handed to every plugin
/// via `on_context` once per unit, and passed alongside `UnitState` on every
/// `process_unit`/`transform` call.
pub struct PluginContext<'a> {
    pub file_set: &'a FileSet,
    pub config: &'a Config,
    pub types: &'a TypeInferenceService<'a>,
}

/// The mutable half: working state a plugin reads and writes while
/// traversing one unit.
pub struct UnitState<'a> {
    pub interner: &'a mut Interner,
    pub names: &'a mut NameAllocator,
    pub mono_cache: &'a mut MonoCache,
    pub diagnostics: &'a mut DiagnosticQueue,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_cache_claims_each_key_exactly_once() {
        let mut cache = MonoCache::new();
        assert!(cache.claim("Option_int"));
        assert!(!cache.claim("Option_int"));
        assert!(cache.claim("Option_string"));
    }
}
