//! Graph contract: the single capability the search engine depends on.

use std::cmp::Ordering;
use std::hash::Hash;

use crate::node::Edge;

/// A directed graph whose edges are produced on demand.
///
/// # Contract
///
/// - `compare_nodes(a, b) == Ordering::Equal` exactly when
///   `node_key(a) == node_key(b)`. Only the equal/not-equal signal is
///   load-bearing; the engine never relies on the ordering otherwise.
/// - `outgoing_edges` is deterministic: same node, same edges, same order.
///   Expansion order (and so the choice among equal-cost paths) follows it.
/// - Edge costs are finite and non-negative. Negative costs void the
///   optimality guarantee.
pub trait Graph {
    /// Immutable search state.
    type Node: Clone;
    /// Canonical hashable identity of a node. Score tables, the closed set
    /// and the heuristic cache are keyed by it.
    type Key: Clone + Eq + Hash;

    /// Edges leaving `node`.
    fn outgoing_edges(&self, node: &Self::Node) -> Vec<Edge<Self::Node>>;

    /// Structural comparison of two nodes.
    fn compare_nodes(&self, a: &Self::Node, b: &Self::Node) -> Ordering;

    /// Canonical key of `node`.
    fn node_key(&self, node: &Self::Node) -> Self::Key;

    /// Structural equality derived from [`Graph::compare_nodes`].
    fn nodes_equal(&self, a: &Self::Node, b: &Self::Node) -> bool {
        self.compare_nodes(a, b) == Ordering::Equal
    }
}
