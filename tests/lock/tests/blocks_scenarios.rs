//! Blocks-world and grid scenario lock tests.
//!
//! Fixed worlds with known optimal answers, checked through the raw engine,
//! through the planner, and from fixture files on disk.

use std::collections::HashMap;
use std::f64::consts::SQRT_2;

use gantry_harness::config::PlannerConfig;
use gantry_harness::fixture::WorldFixture;
use gantry_harness::planner::{plan, plan_with_oracle, PlanError};
use gantry_harness::worlds::blocks::{BlocksWorldGraph, WorldNode};
use gantry_harness::worlds::grid::{euclidean_heuristic, zero_heuristic, GridGraph, GridNode};
use gantry_kernel::carrier::objects::{Form, ObjectCatalog, ObjectDescriptor, ObjectId, Size};
use gantry_kernel::carrier::world::WorldState;
use gantry_kernel::goal::formula::{DnfFormula, Literal, Relation, Target};
use gantry_kernel::goal::heuristic::formula_estimate;
use gantry_kernel::operators::apply::Action;
use gantry_kernel::operators::physics::Unconstrained;
use gantry_kernel::proof::hash::ContentHash;
use gantry_search::{a_star_search, search, Graph, SearchError, SearchPolicy};
use lock_tests::{exhaustive_costs, load_fixture};

const EPS: f64 = 1e-9;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_test_writer()
        .with_max_level(tracing_subscriber::filter::LevelFilter::DEBUG)
        .try_init();
}

fn world(stacks: &[&[&str]], arm: usize, holding: Option<&str>) -> WorldState {
    WorldState::from_labels(stacks, arm, holding).unwrap()
}

// ---------------------------------------------------------------------------
// Raw engine on the blocks-world graph
// ---------------------------------------------------------------------------

#[test]
fn holding_a_takes_one_pick_up() {
    let graph = BlocksWorldGraph::new(Unconstrained);
    let start = WorldNode::root(world(&[&["A"], &["B"], &[]], 0, None));
    let goal = Literal::holding("A");
    let result = a_star_search(
        &graph,
        start,
        |n: &WorldNode| goal.holds(&n.state, &ObjectCatalog::new()),
        |_: &WorldNode| 0.0,
        10.0,
    )
    .unwrap();
    assert!((result.cost - 1.0).abs() < EPS);
    assert_eq!(result.path.len(), 2);
    assert_eq!(result.path[1].action, Some(Action::PickUp));
    assert_eq!(result.path[1].state.holding(), Some(&ObjectId::from("A")));
}

#[test]
fn a_to_floor_of_column_two_takes_four_steps() {
    let graph = BlocksWorldGraph::new(Unconstrained);
    let start = WorldNode::root(world(&[&["A"], &[], &[]], 0, None));
    let goal = Literal::binary(Relation::OnTop, "A", Target::FloorAt(2));
    let result = a_star_search(
        &graph,
        start,
        |n: &WorldNode| goal.holds(&n.state, &ObjectCatalog::new()),
        |_: &WorldNode| 0.0,
        10.0,
    )
    .unwrap();
    assert!((result.cost - 4.0).abs() < EPS);
    let actions: Vec<Action> = result.path.iter().filter_map(|n| n.action).collect();
    assert_eq!(
        actions,
        vec![
            Action::PickUp,
            Action::MoveRight,
            Action::MoveRight,
            Action::PutDown
        ]
    );
}

#[test]
fn goal_heuristic_is_admissible_on_small_worlds() {
    let graph = BlocksWorldGraph::new(Unconstrained);
    let catalog = boxes(&["a", "b", "c", "d"]);
    let starts = [
        world(&[&["a", "b"], &["c"], &[]], 2, None),
        world(&[&["a"], &["b", "c"], &[]], 0, Some("d")),
    ];
    let goals = [
        "holding(a)",
        "ontop(a,c)",
        "inside(b,a)",
        "ontop(c,floor-2)",
        "above(c,a)",
        "under(b,a)",
        "leftof(c,a)",
        "rightof(a,b)",
        "beside(a,b)",
        "ontop(b,floor) & ontop(a,b)",
        "holding(c) | ontop(a,floor-1)",
        "-ontop(b,a)",
    ];
    for start in starts {
        let start = WorldNode::root(start);
        let truth = exhaustive_costs(&graph, &start);
        let (states, successors) = reachable(&graph, &start);
        for text in goals {
            let goal = DnfFormula::parse(text).unwrap();
            let to_goal = costs_to_goal(&states, &successors, &goal, &catalog);
            let result = search(
                &graph,
                start.clone(),
                |n: &WorldNode| goal.holds(&n.state, &catalog),
                |n: &WorldNode| formula_estimate(&goal, &n.state, &catalog),
                &SearchPolicy::default(),
            )
            .unwrap_or_else(|e| panic!("{text}: {e}"));

            let best = states
                .iter()
                .filter(|state| goal.holds(state, &catalog))
                .filter_map(|state| truth.get(&state.fingerprint()).copied())
                .fold(f64::INFINITY, f64::min);
            assert!((to_goal[0] - best).abs() < EPS, "{text}: optima disagree");
            assert!(
                (result.cost - best).abs() < EPS,
                "{text}: A* cost {} but optimum {best}",
                result.cost
            );
            for (state, optimum) in states.iter().zip(&to_goal) {
                let estimate = formula_estimate(&goal, state, &catalog);
                assert!(
                    estimate <= optimum + EPS,
                    "{text}: estimate {estimate} exceeds optimum {optimum} at {state}"
                );
            }
        }
    }
}

fn boxes(ids: &[&str]) -> ObjectCatalog {
    ids.iter()
        .map(|&id| (ObjectId::from(id), ObjectDescriptor::new(Form::Box, Size::Large, "red")))
        .collect()
}

/// Every state reachable from `start`, `start` first, with successor indices.
fn reachable(
    graph: &BlocksWorldGraph<Unconstrained>,
    start: &WorldNode,
) -> (Vec<WorldState>, Vec<Vec<(usize, f64)>>) {
    let mut states = vec![start.state.clone()];
    let mut index: HashMap<ContentHash, usize> = HashMap::from([(start.state.fingerprint(), 0)]);
    let mut successors = Vec::new();
    let mut next = 0;
    while next < states.len() {
        let node = WorldNode::root(states[next].clone());
        let mut out = Vec::new();
        for edge in graph.outgoing_edges(&node) {
            let key = edge.to.state.fingerprint();
            let to = *index.entry(key).or_insert_with(|| {
                states.push(edge.to.state.clone());
                states.len() - 1
            });
            out.push((to, edge.cost));
        }
        successors.push(out);
        next += 1;
    }
    (states, successors)
}

/// Optimal cost from each state to any state satisfying `goal`, by relaxing
/// until nothing improves.
fn costs_to_goal(
    states: &[WorldState],
    successors: &[Vec<(usize, f64)>],
    goal: &DnfFormula,
    catalog: &ObjectCatalog,
) -> Vec<f64> {
    let mut cost: Vec<f64> = states
        .iter()
        .map(|s| if goal.holds(s, catalog) { 0.0 } else { f64::INFINITY })
        .collect();
    let mut changed = true;
    while changed {
        changed = false;
        for (from, out) in successors.iter().enumerate() {
            for &(to, step) in out {
                if cost[to] + step < cost[from] {
                    cost[from] = cost[to] + step;
                    changed = true;
                }
            }
        }
    }
    cost
}

// ---------------------------------------------------------------------------
// Grid scenarios
// ---------------------------------------------------------------------------

#[test]
fn open_three_by_three_grid_goes_diagonal() {
    let graph = GridGraph::new(3, 3, []);
    let goal = GridNode::new(2, 2);
    let result = a_star_search(
        &graph,
        GridNode::new(0, 0),
        |n| *n == goal,
        euclidean_heuristic(goal),
        10.0,
    )
    .unwrap();
    assert!((result.cost - 2.0 * SQRT_2).abs() < EPS);
    assert_eq!(
        result.path,
        vec![GridNode::new(0, 0), GridNode::new(1, 1), GridNode::new(2, 2)]
    );
}

#[test]
fn centre_obstacle_forces_a_detour() {
    let graph = GridGraph::new(3, 3, [GridNode::new(1, 1)]);
    let goal = GridNode::new(2, 2);
    let result =
        a_star_search(&graph, GridNode::new(0, 0), |n| *n == goal, zero_heuristic, 10.0).unwrap();
    assert!((result.cost - (2.0 + SQRT_2)).abs() < EPS);
    assert_eq!(result.path.len(), 4);
    assert!(!result.path.contains(&GridNode::new(1, 1)));
}

// ---------------------------------------------------------------------------
// Planner with physics and fixtures
// ---------------------------------------------------------------------------

#[test]
fn fixture_world_plans_ball_into_box() {
    init_tracing();
    let (state, catalog) = load_fixture("small_world.json");
    let goal = DnfFormula::parse("inside(e,l)").unwrap();
    let plan = plan(&state, &catalog, &goal, &PlannerConfig::default()).unwrap();
    assert_eq!(plan.codes(), "p r d");
    assert!((plan.cost - 3.0).abs() < EPS);
    let last = plan.final_state().unwrap();
    assert_eq!(last.top_of(1), Some(&ObjectId::from("e")));
}

#[test]
fn physics_rules_out_impossible_goals() {
    init_tracing();
    let state = world(&[&["e"], &["m"], &["d"]], 0, None);
    let catalog: ObjectCatalog = [
        ("e", Form::Ball, Size::Large),
        ("m", Form::Box, Size::Medium),
        ("d", Form::Plank, Size::Small),
    ]
    .into_iter()
    .map(|(id, form, size)| (ObjectId::from(id), ObjectDescriptor::new(form, size, "green")))
    .collect();
    // A large ball cannot fit in the medium box, and nothing rests on a ball.
    for text in ["inside(e,m)", "ontop(d,e)"] {
        let goal = DnfFormula::parse(text).unwrap();
        let err = plan(&state, &catalog, &goal, &PlannerConfig::default()).unwrap_err();
        assert!(
            matches!(err, PlanError::Search(SearchError::NoPathFound { .. })),
            "{text}: {err}"
        );
    }
    // The plank fits in the box.
    let goal = DnfFormula::parse("inside(d,m)").unwrap();
    let plan = plan(&state, &catalog, &goal, &PlannerConfig::default()).unwrap();
    assert_eq!(plan.codes(), "r r p l d");
}

#[test]
fn fixture_written_to_disk_round_trips_through_the_planner() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("two_columns.json");
    std::fs::write(
        &path,
        r#"{
            "stacks": [["b", "a"], []],
            "arm": 1,
            "objects": {
                "a": { "form": "brick", "size": "small", "color": "red" },
                "b": { "form": "brick", "size": "large", "color": "blue" }
            }
        }"#,
    )
    .unwrap();
    let (state, catalog) = WorldFixture::from_path(&path)
        .unwrap()
        .into_parts()
        .unwrap();
    let goal = DnfFormula::parse("ontop(a,floor-1)").unwrap();
    let outbound = plan(&state, &catalog, &goal, &PlannerConfig::default()).unwrap();
    assert_eq!(outbound.codes(), "l p r d");

    // Saving the final state and planning the reverse gets back home.
    let saved = dir.path().join("after.json");
    let after = WorldFixture::from_parts(outbound.final_state().unwrap(), &catalog);
    std::fs::write(&saved, after.to_json_string().unwrap()).unwrap();
    let (reloaded, catalog) = WorldFixture::from_path(&saved)
        .unwrap()
        .into_parts()
        .unwrap();
    let back = DnfFormula::parse("ontop(a,b)").unwrap();
    let home = plan(&reloaded, &catalog, &back, &PlannerConfig::default()).unwrap();
    assert_eq!(home.codes(), "p l d");
}

#[test]
fn unconstrained_oracle_allows_what_physics_forbids() {
    init_tracing();
    let start = world(&[&["ball"], &["brick"]], 0, None);
    let goal = DnfFormula::parse("ontop(brick,ball)").unwrap();
    let catalog = ObjectCatalog::new();
    let plan =
        plan_with_oracle(&start, &catalog, Unconstrained, &goal, &PlannerConfig::default()).unwrap();
    assert_eq!(plan.codes(), "r p l d");
}
