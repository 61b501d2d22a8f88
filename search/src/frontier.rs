//! Best-first open set.
//!
//! Stale entries are never removed in place. A node whose score improves is
//! pushed again, and the engine discards the superseded entry when it
//! surfaces (lazy deletion).

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use crate::node::{FrontierKey, ScoredNode};

/// A heap entry wrapping a node with its ordering key.
///
/// `BinaryHeap` is a max-heap, so we use `Reverse<FrontierKey>` to get
/// min-heap behavior (lowest `f_cost` first).
#[derive(Debug)]
struct FrontierEntry<K, N> {
    key: Reverse<FrontierKey>,
    scored: ScoredNode<K, N>,
}

impl<K, N> PartialEq for FrontierEntry<K, N> {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl<K, N> Eq for FrontierEntry<K, N> {}

impl<K, N> PartialOrd for FrontierEntry<K, N> {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, N> Ord for FrontierEntry<K, N> {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key.cmp(&other.key)
    }
}

/// Priority queue of scored nodes ordered by [`FrontierKey`].
///
/// Creation order is assigned here, one tick per push, so ties on `f_cost`
/// and depth resolve in insertion order.
#[derive(Debug)]
pub struct OpenSet<K, N> {
    heap: BinaryHeap<FrontierEntry<K, N>>,
    next_creation_order: u64,
    high_water: u64,
}

impl<K, N> OpenSet<K, N> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_creation_order: 0,
            high_water: 0,
        }
    }

    /// Queue `node` and return the creation order it was given.
    pub fn push(&mut self, key: K, node: N, g_cost: f64, f_cost: f64, depth: u32) -> u64 {
        let creation_order = self.next_creation_order;
        self.next_creation_order += 1;
        let scored = ScoredNode {
            key,
            node,
            g_cost,
            f_cost,
            depth,
            creation_order,
        };
        self.heap.push(FrontierEntry {
            key: Reverse(scored.frontier_key()),
            scored,
        });
        let len = self.heap.len() as u64;
        if len > self.high_water {
            self.high_water = len;
        }
        creation_order
    }

    /// Remove and return the entry with the lowest [`FrontierKey`].
    pub fn pop(&mut self) -> Option<ScoredNode<K, N>> {
        self.heap.pop().map(|entry| entry.scored)
    }

    /// Key of the entry [`OpenSet::pop`] would return next.
    #[must_use]
    pub fn peek_key(&self) -> Option<FrontierKey> {
        self.heap.peek().map(|entry| entry.key.0)
    }

    /// Entries currently queued, stale ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Largest number of entries ever queued at once.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Total pushes so far.
    #[must_use]
    pub fn pushed(&self) -> u64 {
        self.next_creation_order
    }
}

impl<K, N> Default for OpenSet<K, N> {
    fn default() -> Self {
        Self::new()
    }
}
