//! Shared helpers for the lock test suite.
//!
//! Everything here panics on failure: these are test-only invariants.

use std::collections::{HashMap, VecDeque};
use std::path::{Path, PathBuf};

use gantry_harness::fixture::WorldFixture;
use gantry_kernel::carrier::objects::ObjectCatalog;
use gantry_kernel::carrier::world::WorldState;
use gantry_search::Graph;

/// The workspace root (two levels above this crate).
///
/// # Panics
///
/// Panics if the crate is not nested at `tests/lock/`.
#[must_use]
pub fn workspace_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .expect("tests/ exists")
        .parent()
        .expect("workspace root exists")
        .to_path_buf()
}

/// Path of a file under `tests/fixtures/`.
#[must_use]
pub fn fixture_path(name: &str) -> PathBuf {
    workspace_root().join("tests/fixtures").join(name)
}

/// Load `tests/fixtures/<name>` into a start state and catalog.
///
/// # Panics
///
/// Panics if the fixture is missing or invalid.
#[must_use]
pub fn load_fixture(name: &str) -> (WorldState, ObjectCatalog) {
    WorldFixture::from_path(fixture_path(name))
        .and_then(WorldFixture::into_parts)
        .unwrap_or_else(|e| panic!("fixture {name}: {e}"))
}

/// Exact cheapest costs from `start` to every reachable node.
///
/// Brute force: breadth-first discovery of the whole reachable graph, then
/// Bellman-Ford relaxation until nothing changes. Shares no code with the
/// A* frontier, so it can serve as an oracle for it.
pub fn exhaustive_costs<G: Graph>(graph: &G, start: &G::Node) -> HashMap<G::Key, f64> {
    let mut nodes: HashMap<G::Key, G::Node> = HashMap::new();
    let mut queue = VecDeque::from([start.clone()]);
    nodes.insert(graph.node_key(start), start.clone());
    let mut edges: Vec<(G::Key, G::Key, f64)> = Vec::new();
    while let Some(node) = queue.pop_front() {
        let from = graph.node_key(&node);
        for edge in graph.outgoing_edges(&node) {
            let to = graph.node_key(&edge.to);
            edges.push((from.clone(), to.clone(), edge.cost));
            if !nodes.contains_key(&to) {
                nodes.insert(to, edge.to.clone());
                queue.push_back(edge.to);
            }
        }
    }

    let mut costs: HashMap<G::Key, f64> = HashMap::new();
    costs.insert(graph.node_key(start), 0.0);
    for _ in 0..nodes.len() {
        let mut changed = false;
        for (from, to, cost) in &edges {
            let Some(&base) = costs.get(from) else {
                continue;
            };
            let candidate = base + cost;
            if costs.get(to).map_or(true, |&known| candidate < known - 1e-12) {
                costs.insert(to.clone(), candidate);
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }
    costs
}

/// Sum of edge costs along `path`, looking each hop up in the graph.
///
/// Returns `None` if two consecutive nodes are not joined by an edge.
#[must_use]
pub fn path_cost<G: Graph>(graph: &G, path: &[G::Node]) -> Option<f64> {
    path.windows(2).try_fold(0.0, |total, pair| {
        graph
            .outgoing_edges(&pair[0])
            .iter()
            .filter(|edge| graph.nodes_equal(&edge.to, &pair[1]))
            .map(|edge| edge.cost)
            .min_by(f64::total_cmp)
            .map(|cost| total + cost)
    })
}
