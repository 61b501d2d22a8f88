//! Search entry points and the A* expansion loop.

use std::time::Duration;

use rustc_hash::FxHashSet;

use crate::contract::Graph;
use crate::error::SearchError;
use crate::frontier::OpenSet;
use crate::heuristic::{HeuristicCache, MemoizedHeuristic};
use crate::policy::{ReopenPolicy, SearchPolicy};
use crate::scores::{NodeArena, PredecessorTable, ScoreTable};
use crate::timer::Timer;

/// A cheapest path from the start to a goal.
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    /// Start first, goal last. Consecutive nodes are joined by an edge.
    pub path: Vec<N>,
    /// Sum of edge costs along `path`.
    pub cost: f64,
    /// Non-stale pops, the goal pop included.
    pub iterations: u64,
    pub stats: SearchStats,
}

impl<N> SearchResult<N> {
    /// The goal node (last element of the path).
    #[must_use]
    pub fn goal(&self) -> Option<&N> {
        self.path.last()
    }
}

/// Counters collected during one run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes whose outgoing edges were generated.
    pub expansions: u64,
    pub edges_generated: u64,
    /// Superseded frontier entries dropped on pop.
    pub stale_discarded: u64,
    /// Edges ignored because they led to a closed node.
    pub closed_skipped: u64,
    /// Closed nodes re-queued after a cheaper path was found.
    pub reopened: u64,
    pub frontier_high_water: u64,
    /// Calls into the caller's heuristic (cache misses).
    pub heuristic_evaluations: u64,
    pub elapsed: Duration,
}

/// Find a cheapest path with the exact `a_star_search` contract: never
/// reopen closed nodes and give up after `timeout_secs` seconds.
///
/// # Errors
///
/// [`SearchError::InvalidPolicy`] for a negative or non-finite timeout,
/// [`SearchError::Timeout`] when the budget runs out, and
/// [`SearchError::NoPathFound`] when every reachable node was expanded.
pub fn a_star_search<G, P, H>(
    graph: &G,
    start: G::Node,
    is_goal: P,
    heuristic: H,
    timeout_secs: f64,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: Graph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> f64,
{
    let policy = SearchPolicy::with_timeout_secs(timeout_secs)?;
    search(graph, start, is_goal, heuristic, &policy)
}

/// Run A* under `policy` with a fresh heuristic cache.
///
/// # Errors
///
/// See [`search_with_cache`].
pub fn search<G, P, H>(
    graph: &G,
    start: G::Node,
    is_goal: P,
    heuristic: H,
    policy: &SearchPolicy,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: Graph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> f64,
{
    let mut cache = HeuristicCache::new();
    search_with_cache(graph, start, is_goal, heuristic, policy, &mut cache)
}

/// Run A* under `policy`, memoizing heuristic values in `cache`.
///
/// The cache is trusted: entries left by an earlier run are reused, so
/// call [`HeuristicCache::invalidate`] when the heuristic or goal changes.
///
/// The timeout and the expansion budget are checked once per loop
/// iteration, before the next pop, so a run can overrun its timeout by
/// at most one expansion. A zero timeout always fails with
/// [`SearchError::Timeout`], even when `start` is a goal.
///
/// # Errors
///
/// - [`SearchError::InvalidPolicy`] if `policy` fails validation.
/// - [`SearchError::Timeout`] if the wall-clock budget runs out.
/// - [`SearchError::ExpansionBudgetExceeded`] if `max_expansions` is hit.
/// - [`SearchError::NoPathFound`] if the frontier empties.
pub fn search_with_cache<G, P, H>(
    graph: &G,
    start: G::Node,
    is_goal: P,
    heuristic: H,
    policy: &SearchPolicy,
    cache: &mut HeuristicCache<G::Key>,
) -> Result<SearchResult<G::Node>, SearchError>
where
    G: Graph,
    P: Fn(&G::Node) -> bool,
    H: Fn(&G::Node) -> f64,
{
    policy.validate()?;
    let timer = Timer::start(policy.timeout);
    let mut heuristic = MemoizedHeuristic::new(heuristic, cache);

    let mut g_score = ScoreTable::new();
    let mut f_score = ScoreTable::new();
    let mut came_from = PredecessorTable::new();
    let mut arena = NodeArena::new();
    let mut closed: FxHashSet<G::Key> = FxHashSet::default();
    let mut open = OpenSet::new();
    let mut stats = SearchStats::default();
    let mut iterations: u64 = 0;

    let start_key = graph.node_key(&start);
    let start_f = heuristic.estimate(&start_key, &start);
    g_score.set(start_key.clone(), 0.0);
    f_score.set(start_key.clone(), start_f);
    arena.insert(start_key.clone(), start.clone());
    open.push(start_key, start, 0.0, start_f, 0);

    loop {
        if timer.is_expired() {
            return Err(SearchError::Timeout {
                elapsed: timer.elapsed(),
                iterations,
            });
        }
        if let Some(max_expansions) = policy.max_expansions {
            if iterations >= max_expansions {
                return Err(SearchError::ExpansionBudgetExceeded { max_expansions });
            }
        }

        let Some(current) = open.pop() else {
            return Err(SearchError::NoPathFound { iterations });
        };

        // Lazy deletion: a cheaper path re-queued this key after this
        // entry was pushed, or the key was already expanded.
        if current.f_cost.to_bits() != f_score.get(&current.key).to_bits()
            || current.g_cost.to_bits() != g_score.get(&current.key).to_bits()
            || closed.contains(&current.key)
        {
            stats.stale_discarded += 1;
            continue;
        }

        iterations += 1;

        if is_goal(&current.node) {
            stats.frontier_high_water = open.high_water();
            stats.heuristic_evaluations = heuristic.evaluations();
            stats.elapsed = timer.elapsed();
            return Ok(SearchResult {
                path: reconstruct_path(&came_from, &arena, &current.key),
                cost: current.g_cost,
                iterations,
                stats,
            });
        }

        closed.insert(current.key.clone());
        stats.expansions += 1;

        for edge in graph.outgoing_edges(&current.node) {
            stats.edges_generated += 1;
            let neighbor_key = graph.node_key(&edge.to);
            let was_closed = closed.contains(&neighbor_key);
            if was_closed && policy.reopen == ReopenPolicy::NeverReopen {
                stats.closed_skipped += 1;
                continue;
            }

            let tentative_g = current.g_cost + edge.cost;
            if tentative_g >= g_score.get(&neighbor_key) {
                continue;
            }
            if was_closed {
                closed.remove(&neighbor_key);
                stats.reopened += 1;
            }

            let f = tentative_g + heuristic.estimate(&neighbor_key, &edge.to);
            g_score.set(neighbor_key.clone(), tentative_g);
            f_score.set(neighbor_key.clone(), f);
            came_from.record(neighbor_key.clone(), current.key.clone());
            arena.insert(neighbor_key.clone(), edge.to.clone());
            open.push(neighbor_key, edge.to, tentative_g, f, current.depth + 1);
        }
    }
}

/// Rebuild the node path ending at `goal` from the predecessor chain.
///
/// Keys missing from `arena` are skipped, so the result is empty only when
/// `goal` itself was never stored.
#[must_use]
pub fn reconstruct_path<K, N>(
    came_from: &PredecessorTable<K>,
    arena: &NodeArena<K, N>,
    goal: &K,
) -> Vec<N>
where
    K: std::hash::Hash + Eq + Clone,
    N: Clone,
{
    came_from
        .walk_back(goal)
        .iter()
        .filter_map(|key| arena.get(key).cloned())
        .collect()
}
