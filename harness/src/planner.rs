//! Planner: goal formula + start world → shortest action sequence.

use std::fmt;

use tracing::{debug, info, warn};

use gantry_kernel::carrier::objects::ObjectCatalog;
use gantry_kernel::carrier::world::WorldState;
use gantry_kernel::goal::formula::DnfFormula;
use gantry_kernel::goal::heuristic::formula_estimate;
use gantry_kernel::operators::apply::Action;
use gantry_kernel::operators::physics::{PhysicalLaws, PlacementOracle};
use gantry_kernel::proof::canon::CanonError;
use gantry_kernel::proof::hash::{canonical_json_hash, ContentHash};
use gantry_kernel::proof::hash_domain::HashDomain;
use gantry_search::{search, SearchError, SearchStats};

use crate::config::PlannerConfig;
use crate::worlds::blocks::{BlocksWorldGraph, WorldNode};

/// A shortest action sequence and the states it passes through.
#[derive(Debug, Clone)]
pub struct Plan {
    pub actions: Vec<Action>,
    /// Start state first. Always one longer than `actions`.
    pub states: Vec<WorldState>,
    pub cost: f64,
    pub iterations: u64,
    pub stats: SearchStats,
}

impl Plan {
    /// Space-separated action codes, e.g. `"p r r d"`.
    #[must_use]
    pub fn codes(&self) -> String {
        self.actions
            .iter()
            .map(|a| a.code().to_string())
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// The state reached after the last action.
    #[must_use]
    pub fn final_state(&self) -> Option<&WorldState> {
        self.states.last()
    }

    /// Content digest binding the action codes to the visited states.
    ///
    /// Search statistics and timing are not part of the digest.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if canonicalization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let value = serde_json::json!({
            "actions": self.codes(),
            "states": self
                .states
                .iter()
                .map(|s| s.fingerprint().as_str().to_owned())
                .collect::<Vec<_>>(),
        });
        canonical_json_hash(HashDomain::Plan, &value)
    }
}

/// Why planning failed.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanError {
    /// The configuration did not resolve to a valid search policy.
    Policy(SearchError),
    /// The search ended without reaching the goal.
    Search(SearchError),
    /// An object in the start world has no catalog entry.
    UncataloguedObject { id: String },
}

impl fmt::Display for PlanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Policy(e) => write!(f, "bad planner configuration: {e}"),
            Self::Search(e) => write!(f, "planning failed: {e}"),
            Self::UncataloguedObject { id } => {
                write!(f, "object {id:?} is not in the catalog")
            }
        }
    }
}

impl std::error::Error for PlanError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Policy(e) | Self::Search(e) => Some(e),
            Self::UncataloguedObject { .. } => None,
        }
    }
}

/// Plan under the physical placement laws of `catalog`.
///
/// # Errors
///
/// - [`PlanError::UncataloguedObject`] if the start world holds an object
///   `catalog` does not describe.
/// - [`PlanError::Policy`] if `config` does not resolve.
/// - [`PlanError::Search`] on timeout, exhausted budget or an unreachable
///   goal.
pub fn plan(
    state: &WorldState,
    catalog: &ObjectCatalog,
    goal: &DnfFormula,
    config: &PlannerConfig,
) -> Result<Plan, PlanError> {
    if let Some(missing) = state.objects().find(|id| !catalog.contains(id)) {
        return Err(PlanError::UncataloguedObject {
            id: missing.as_str().to_owned(),
        });
    }
    plan_with_oracle(state, catalog, PhysicalLaws::new(catalog.clone()), goal, config)
}

/// Plan under an arbitrary placement oracle.
///
/// `catalog` is only consulted by the goal: `inside` needs to know which
/// objects are boxes. It may be empty.
///
/// # Errors
///
/// Same as [`plan`], minus the catalog check.
pub fn plan_with_oracle<P: PlacementOracle>(
    state: &WorldState,
    catalog: &ObjectCatalog,
    oracle: P,
    goal: &DnfFormula,
    config: &PlannerConfig,
) -> Result<Plan, PlanError> {
    let policy = config.search_policy().map_err(PlanError::Policy)?;
    info!(goal = %goal, start = %state, "planning");

    if goal.holds(state, catalog) {
        info!("goal already satisfied");
        return Ok(Plan {
            actions: Vec::new(),
            states: vec![state.clone()],
            cost: 0.0,
            iterations: 0,
            stats: SearchStats::default(),
        });
    }

    let graph = BlocksWorldGraph::new(oracle);
    let result = search(
        &graph,
        WorldNode::root(state.clone()),
        |node: &WorldNode| goal.holds(&node.state, catalog),
        |node: &WorldNode| formula_estimate(goal, &node.state, catalog),
        &policy,
    )
    .map_err(|e| {
        warn!(error = %e, "no plan");
        PlanError::Search(e)
    })?;

    let stats = result.stats;
    debug!(
        expansions = stats.expansions,
        edges = stats.edges_generated,
        stale = stats.stale_discarded,
        frontier_high_water = stats.frontier_high_water,
        heuristic_evaluations = stats.heuristic_evaluations,
        elapsed_ms = u64::try_from(stats.elapsed.as_millis()).unwrap_or(u64::MAX),
        "search stats"
    );

    let actions: Vec<Action> = result.path.iter().filter_map(|node| node.action).collect();
    let states: Vec<WorldState> = result.path.into_iter().map(|node| node.state).collect();
    let plan = Plan {
        actions,
        states,
        cost: result.cost,
        iterations: result.iterations,
        stats,
    };
    info!(
        cost = plan.cost,
        steps = plan.len(),
        iterations = plan.iterations,
        plan = %plan.codes(),
        "plan found"
    );
    Ok(plan)
}
