//! Scoped, single-flight memoization of tracking computations.

use std::sync::{Arc, Mutex, OnceLock};

use super::{AheadBehindSet, QueryScope};

/// One cache generation: the scope it was computed for plus the compute-once
/// cell every observer of the generation shares.
struct Generation {
    scope: QueryScope,
    cell: Arc<OnceLock<Option<Arc<AheadBehindSet>>>>,
}

/// Per-provider cache slot.
///
/// The mutex protects only the check-and-create step; the computation itself
/// runs inside the shared `OnceLock`, so a slow git query blocks only the
/// callers awaiting that same generation.
pub(crate) struct ScopeCache {
    slot: Mutex<Option<Generation>>,
}

impl ScopeCache {
    pub(crate) fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// Return the cached result for `scope`, computing it through `fetch`
    /// when this is the first request of the generation.
    ///
    /// A branch-scoped request reuses whatever generation is cached; callers
    /// only narrow the scope when a broader result is unnecessary. An
    /// all-branches request invalidates a cached single-branch generation
    /// first. A generation that computed `None` is discarded immediately so
    /// the next request starts over.
    pub(crate) fn request(
        &self,
        scope: QueryScope,
        fetch: impl FnOnce(&QueryScope) -> Option<AheadBehindSet>,
    ) -> Option<Arc<AheadBehindSet>> {
        let (cell, generation_scope) = {
            let mut slot = self.slot.lock().unwrap();

            let widening = matches!(
                (&scope, slot.as_ref().map(|generation| &generation.scope)),
                (QueryScope::AllBranches, Some(QueryScope::Branch(_)))
            );
            if widening {
                log::warn!(
                    "all-branches tracking requested while a single branch was cached; resetting"
                );
                *slot = None;
            }

            let generation = slot.get_or_insert_with(|| Generation {
                scope: scope.clone(),
                cell: Arc::new(OnceLock::new()),
            });
            (generation.cell.clone(), generation.scope.clone())
        };

        let result = cell
            .get_or_init(|| fetch(&generation_scope).map(Arc::new))
            .clone();

        if result.is_none() {
            // Failed computations are not cached.
            let mut slot = self.slot.lock().unwrap();
            if slot
                .as_ref()
                .is_some_and(|generation| Arc::ptr_eq(&generation.cell, &cell))
            {
                *slot = None;
            }
        }

        result
    }

    /// Drop any cached or in-flight generation.
    pub(crate) fn reset(&self) {
        *self.slot.lock().unwrap() = None;
    }
}
