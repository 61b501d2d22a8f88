//! Edges, the scored-node wrapper, and the frontier ordering key.

use std::cmp::Ordering;

/// A directed, non-negatively weighted transition.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge<N> {
    pub from: N,
    pub to: N,
    pub cost: f64,
}

impl<N> Edge<N> {
    #[must_use]
    pub fn new(from: N, to: N, cost: f64) -> Self {
        Self { from, to, cost }
    }
}

/// The frontier ordering key: `(f_cost, depth, creation_order)`.
///
/// Lower `f_cost` first (IEEE total order), then shallower depth, then
/// older `creation_order`. Among equal-cost optimal paths this prefers the
/// one discovered first in edge order, so replays are deterministic.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f_cost: f64,
    pub depth: u32,
    pub creation_order: u64,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.f_cost
            .total_cmp(&other.f_cost)
            .then(self.depth.cmp(&other.depth))
            .then(self.creation_order.cmp(&other.creation_order))
    }
}

/// A domain node paired with its key and the scores it was queued with.
///
/// `f_cost` is the estimate at insertion time. The engine compares it with
/// the authoritative f table on pop to discard superseded entries.
#[derive(Debug, Clone)]
pub struct ScoredNode<K, N> {
    pub key: K,
    pub node: N,
    pub g_cost: f64,
    pub f_cost: f64,
    /// Edges from the start along the recorded path (start = 0).
    pub depth: u32,
    /// Global insertion counter for deterministic tie-breaking.
    pub creation_order: u64,
}

impl<K, N> ScoredNode<K, N> {
    #[must_use]
    pub fn frontier_key(&self) -> FrontierKey {
        FrontierKey {
            f_cost: self.f_cost,
            depth: self.depth,
            creation_order: self.creation_order,
        }
    }
}
