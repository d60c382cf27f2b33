use std::{hash::Hash, sync::{PoisonError, RwLock}};

use ahash::AHashMap;

/// Geometry-derived metrics of a unioned district set; `None` when the
/// geometry could not be measured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) struct ShapeMetrics {
    pub(crate) compactness: Option<f64>,
    pub(crate) convexity: Option<f64>,
}

/// Sorted district indices identifying a district set.
pub(crate) type SetKey = Box<[u32]>;

/// Thread-safe memo table. District data never changes during a run, so
/// entries are never invalidated.
#[derive(Debug)]
pub(crate) struct Memo<K, V> {
    entries: RwLock<AHashMap<K, V>>,
}

impl<K: Eq + Hash, V: Copy> Memo<K, V> {
    pub(crate) fn new() -> Self { Self { entries: RwLock::new(AHashMap::new()) } }

    /// Look up `key`, computing and storing the value on a miss. The value is
    /// computed outside the lock, so concurrent misses may compute it twice.
    pub(crate) fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        let cached = self.entries.read().unwrap_or_else(PoisonError::into_inner).get(&key).copied();
        if let Some(value) = cached { return value }

        let value = compute();
        self.entries.write().unwrap_or_else(PoisonError::into_inner).insert(key, value);
        value
    }

    /// Get the number of cached entries.
    pub(crate) fn len(&self) -> usize { self.entries.read().unwrap_or_else(PoisonError::into_inner).len() }
}

/// Per-run caches of the expensive, order-independent constituency metrics.
#[derive(Debug)]
pub(crate) struct MetricCache {
    pub(crate) shapes: Memo<SetKey, ShapeMetrics>,
    pub(crate) relevance: Memo<(String, SetKey), f64>,
}

impl MetricCache {
    pub(crate) fn new() -> Self { Self { shapes: Memo::new(), relevance: Memo::new() } }
}

/// Canonical key of a set of district indices (which must already be sorted).
pub(crate) fn set_key(nodes: &[usize]) -> SetKey {
    debug_assert!(nodes.is_sorted(), "set keys are built from sorted indices");
    nodes.iter().map(|&n| n as u32).collect()
}
