//! Shared helpers for gantry benchmark suites.

use std::path::Path;

use gantry_harness::fixture::WorldFixture;
use gantry_harness::worlds::grid::{GridGraph, GridNode};
use gantry_kernel::carrier::objects::ObjectCatalog;
use gantry_kernel::carrier::world::WorldState;
use gantry_kernel::goal::formula::DnfFormula;

/// A grid search problem: graph, start corner and goal corner.
pub struct GridCase {
    pub graph: GridGraph,
    pub start: GridNode,
    pub goal: GridNode,
}

/// `size × size` grid with no obstacles, corner to corner.
#[must_use]
pub fn open_grid(size: i64) -> GridCase {
    GridCase {
        graph: GridGraph::new(size, size, []),
        start: GridNode::new(0, 0),
        goal: GridNode::new(size - 1, size - 1),
    }
}

/// `size × size` grid with vertical walls every fourth column, each with a
/// single gap that alternates between the bottom and top rows.
#[must_use]
pub fn walled_grid(size: i64) -> GridCase {
    let walls = (3..size - 1).step_by(4).enumerate().flat_map(|(i, x)| {
        let gap = if i % 2 == 0 { size - 1 } else { 0 };
        (0..size)
            .filter(move |&y| y != gap)
            .map(move |y| GridNode::new(x, y))
    });
    GridCase {
        graph: GridGraph::new(size, size, walls),
        start: GridNode::new(0, 0),
        goal: GridNode::new(size - 1, size - 1),
    }
}

/// A blocks-world planning problem.
pub struct BlocksCase {
    pub state: WorldState,
    pub catalog: ObjectCatalog,
    pub goal: DnfFormula,
}

/// Load `tests/fixtures/<fixture>` and pair it with `goal`.
///
/// # Panics
///
/// Panics if the fixture or goal is invalid. Benchmark setup failures are
/// fatal.
#[must_use]
pub fn blocks_case(fixture: &str, goal: &str) -> BlocksCase {
    let path = Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../tests/fixtures")
        .join(fixture);
    let (state, catalog) = WorldFixture::from_path(&path)
        .expect("fixture readable")
        .into_parts()
        .expect("fixture valid");
    BlocksCase {
        state,
        catalog,
        goal: DnfFormula::parse(goal).expect("goal parses"),
    }
}
