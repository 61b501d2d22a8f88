//! Termination lock tests: every way a search can stop without a path.

use std::time::Duration;

use gantry_harness::worlds::grid::{euclidean_heuristic, zero_heuristic, GridGraph, GridNode};
use gantry_search::{a_star_search, search, SearchError, SearchPolicy};

/// A `size × size` grid whose goal corner is walled off by a diagonal band.
fn sealed_grid(size: i64) -> (GridGraph, GridNode) {
    let goal = GridNode::new(size - 1, size - 1);
    let wall = [
        goal.offset(-1, 0),
        goal.offset(-1, -1),
        goal.offset(0, -1),
    ];
    (GridGraph::new(size, size, wall), goal)
}

#[test]
fn zero_timeout_always_times_out() {
    let graph = GridGraph::new(3, 3, []);
    let start = GridNode::new(0, 0);
    // Even when the start is already a goal.
    let err = a_star_search(&graph, start, |_| true, zero_heuristic, 0.0).unwrap_err();
    match err {
        SearchError::Timeout { iterations, .. } => assert_eq!(iterations, 0),
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn large_search_honors_its_timeout() {
    let (graph, goal) = sealed_grid(1500);
    let err = a_star_search(
        &graph,
        GridNode::new(0, 0),
        |n| *n == goal,
        zero_heuristic,
        0.05,
    )
    .unwrap_err();
    match err {
        SearchError::Timeout { elapsed, iterations } => {
            assert!(elapsed >= Duration::from_millis(50), "elapsed {elapsed:?}");
            assert!(iterations > 0);
        }
        other => panic!("expected Timeout, got {other:?}"),
    }
}

#[test]
fn sealed_goal_reports_no_path() {
    let (graph, goal) = sealed_grid(6);
    let err = a_star_search(
        &graph,
        GridNode::new(0, 0),
        |n| *n == goal,
        euclidean_heuristic(goal),
        10.0,
    )
    .unwrap_err();
    // Every open cell (36 minus the wall and the goal) is popped once.
    assert_eq!(err, SearchError::NoPathFound { iterations: 32 });
}

#[test]
fn expansion_budget_is_enforced() {
    let graph = GridGraph::new(20, 20, []);
    let goal = GridNode::new(19, 19);
    let policy = SearchPolicy::default().with_max_expansions(5);
    let err = search(&graph, GridNode::new(0, 0), |n| *n == goal, zero_heuristic, &policy)
        .unwrap_err();
    assert_eq!(
        err,
        SearchError::ExpansionBudgetExceeded { max_expansions: 5 }
    );
}

#[test]
fn invalid_timeouts_are_rejected_up_front() {
    let graph = GridGraph::new(2, 2, []);
    for secs in [-0.5, f64::NAN, f64::INFINITY] {
        let err = a_star_search(&graph, GridNode::new(0, 0), |_| true, zero_heuristic, secs)
            .unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidPolicy { .. }),
            "{secs}: {err:?}"
        );
    }
}
