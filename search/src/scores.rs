//! Score bookkeeping: g/f tables, predecessors, and the node arena.
//!
//! All tables are keyed by the graph's canonical node key, never by
//! reference identity.

use std::hash::Hash;

use rustc_hash::FxHashMap;

/// Node key → cost. Absent keys read as `+∞`.
#[derive(Debug, Clone)]
pub struct ScoreTable<K> {
    scores: FxHashMap<K, f64>,
}

impl<K: Hash + Eq> ScoreTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            scores: FxHashMap::default(),
        }
    }

    #[must_use]
    pub fn get(&self, key: &K) -> f64 {
        self.scores.get(key).copied().unwrap_or(f64::INFINITY)
    }

    pub fn set(&mut self, key: K, score: f64) {
        self.scores.insert(key, score);
    }

    #[must_use]
    pub fn contains(&self, key: &K) -> bool {
        self.scores.contains_key(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scores.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scores.is_empty()
    }
}

impl<K: Hash + Eq> Default for ScoreTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Best-known previous hop (`came_from`). Used only to rebuild paths.
#[derive(Debug, Clone)]
pub struct PredecessorTable<K> {
    came_from: FxHashMap<K, K>,
}

impl<K: Hash + Eq + Clone> PredecessorTable<K> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            came_from: FxHashMap::default(),
        }
    }

    /// Record (or replace) the predecessor of `node`.
    pub fn record(&mut self, node: K, previous: K) {
        self.came_from.insert(node, previous);
    }

    #[must_use]
    pub fn get(&self, node: &K) -> Option<&K> {
        self.came_from.get(node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.came_from.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.came_from.is_empty()
    }

    /// Keys from the root of `end`'s chain to `end`, inclusive.
    ///
    /// The walk stops after `len() + 1` keys, so a corrupted (cyclic) table
    /// cannot loop forever.
    #[must_use]
    pub fn walk_back(&self, end: &K) -> Vec<K> {
        let mut chain = vec![end.clone()];
        let mut current = end;
        while let Some(previous) = self.came_from.get(current) {
            if chain.len() > self.came_from.len() {
                break;
            }
            chain.push(previous.clone());
            current = previous;
        }
        chain.reverse();
        chain
    }
}

impl<K: Hash + Eq + Clone> Default for PredecessorTable<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// Key → node store, so key chains can be turned back into node paths.
#[derive(Debug, Clone)]
pub struct NodeArena<K, N> {
    nodes: FxHashMap<K, N>,
}

impl<K: Hash + Eq, N> NodeArena<K, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: FxHashMap::default(),
        }
    }

    /// Store `node` under `key`, replacing the previous representative.
    ///
    /// Nodes with equal keys may still differ in fields outside the key
    /// (e.g. the action that produced them); the latest one is the one on
    /// the best-known path.
    pub fn insert(&mut self, key: K, node: N) {
        self.nodes.insert(key, node);
    }

    #[must_use]
    pub fn get(&self, key: &K) -> Option<&N> {
        self.nodes.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl<K: Hash + Eq, N> Default for NodeArena<K, N> {
    fn default() -> Self {
        Self::new()
    }
}
