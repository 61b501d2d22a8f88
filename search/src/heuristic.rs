//! Heuristic memoization.
//!
//! Heuristics are pure, so each distinct node key is estimated once per
//! run. The cache can be owned by the caller and reused across runs that
//! share a heuristic and goal.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Node key → heuristic estimate, with hit/miss counters.
#[derive(Debug, Clone)]
pub struct HeuristicCache<K> {
    values: FxHashMap<K, f64>,
    hits: u64,
    misses: u64,
}

impl<K: Hash + Eq> HeuristicCache<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            values: FxHashMap::default(),
            hits: 0,
            misses: 0,
        }
    }

    /// Cached estimate for `key`, counting the lookup as a hit or a miss.
    pub fn get(&mut self, key: &K) -> Option<f64> {
        let value = self.values.get(key).copied();
        if value.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        value
    }

    pub fn insert(&mut self, key: K, estimate: f64) {
        self.values.insert(key, estimate);
    }

    /// Drop every cached estimate and reset the counters.
    ///
    /// Required whenever the heuristic or the goal it estimates changes.
    pub fn invalidate(&mut self) {
        self.values.clear();
        self.hits = 0;
        self.misses = 0;
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits
    }

    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses
    }
}

impl<K: Hash + Eq> Default for HeuristicCache<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// A heuristic function bound to a cache.
pub struct MemoizedHeuristic<'a, K, F> {
    heuristic: F,
    cache: &'a mut HeuristicCache<K>,
    evaluations: u64,
}

impl<'a, K: Hash + Eq, F> MemoizedHeuristic<'a, K, F> {
    pub fn new(heuristic: F, cache: &'a mut HeuristicCache<K>) -> Self {
        Self {
            heuristic,
            cache,
            evaluations: 0,
        }
    }

    /// Estimate for `node`, calling the wrapped heuristic only when `key`
    /// has no cached value.
    pub fn estimate<N>(&mut self, key: &K, node: &N) -> f64
    where
        K: Clone,
        F: Fn(&N) -> f64,
    {
        if let Some(value) = self.cache.get(key) {
            return value;
        }
        let value = (self.heuristic)(node);
        self.evaluations += 1;
        self.cache.insert(key.clone(), value);
        value
    }

    /// Calls made to the wrapped heuristic through this memoizer.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations
    }
}
