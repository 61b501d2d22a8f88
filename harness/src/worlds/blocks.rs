//! The blocks world as a search graph.
//!
//! Nodes are world states tagged with the action that produced them. Up to
//! four successors exist per state, always generated in [`Action::ALL`]
//! order: pick up, put down, move left, move right. Each step costs 1.

use std::cmp::Ordering;

use gantry_kernel::carrier::world::WorldState;
use gantry_kernel::operators::apply::{apply, Action};
use gantry_kernel::operators::physics::PlacementOracle;
use gantry_kernel::proof::hash::ContentHash;
use gantry_search::{Edge, Graph};

/// Cost of every gripper action.
pub const STEP_COST: f64 = 1.0;

/// A world state plus the action that led to it (`None` for the start).
///
/// The action is bookkeeping for plan extraction. Identity, ordering and
/// hashing all look at `state` only.
#[derive(Debug, Clone)]
pub struct WorldNode {
    pub state: WorldState,
    pub action: Option<Action>,
}

impl WorldNode {
    /// The start node of a search.
    #[must_use]
    pub fn root(state: WorldState) -> Self {
        Self {
            state,
            action: None,
        }
    }
}

impl PartialEq for WorldNode {
    fn eq(&self, other: &Self) -> bool {
        self.state == other.state
    }
}

impl Eq for WorldNode {}

/// Blocks-world successor graph under a placement oracle.
#[derive(Debug, Clone)]
pub struct BlocksWorldGraph<P> {
    oracle: P,
}

impl<P: PlacementOracle> BlocksWorldGraph<P> {
    #[must_use]
    pub fn new(oracle: P) -> Self {
        Self { oracle }
    }
}

impl<P: PlacementOracle> Graph for BlocksWorldGraph<P> {
    type Node = WorldNode;
    type Key = ContentHash;

    fn outgoing_edges(&self, node: &WorldNode) -> Vec<Edge<WorldNode>> {
        Action::ALL
            .iter()
            .filter_map(|&action| {
                apply(&node.state, action, &self.oracle)
                    .ok()
                    .map(|state| {
                        Edge::new(
                            node.clone(),
                            WorldNode {
                                state,
                                action: Some(action),
                            },
                            STEP_COST,
                        )
                    })
            })
            .collect()
    }

    fn compare_nodes(&self, a: &WorldNode, b: &WorldNode) -> Ordering {
        a.state.cmp(&b.state)
    }

    fn node_key(&self, node: &WorldNode) -> ContentHash {
        node.state.fingerprint()
    }
}
