//! 2-D grid graph used to exercise the search engine.
//!
//! Cells outside `width × height` act as walls, as do the listed obstacles.
//! Every non-wall neighbour among the eight surrounding cells is reachable,
//! diagonals included, at cost `√(dx² + dy²)`.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;

use gantry_search::{Edge, Graph};

/// A grid cell. `(0, 0)` is the bottom-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GridNode {
    pub x: i64,
    pub y: i64,
}

impl GridNode {
    #[must_use]
    pub const fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub const fn offset(self, dx: i64, dy: i64) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

impl fmt::Display for GridNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

/// A bounded grid with obstacle cells.
#[derive(Debug, Clone)]
pub struct GridGraph {
    width: i64,
    height: i64,
    obstacles: BTreeSet<GridNode>,
}

impl GridGraph {
    #[must_use]
    pub fn new(width: i64, height: i64, obstacles: impl IntoIterator<Item = GridNode>) -> Self {
        Self {
            width,
            height,
            obstacles: obstacles.into_iter().collect(),
        }
    }

    #[must_use]
    pub fn width(&self) -> i64 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> i64 {
        self.height
    }

    /// Whether `node` is outside the grid or an obstacle.
    #[must_use]
    pub fn is_wall(&self, node: GridNode) -> bool {
        node.x < 0
            || node.y < 0
            || node.x >= self.width
            || node.y >= self.height
            || self.obstacles.contains(&node)
    }
}

impl Graph for GridGraph {
    type Node = GridNode;
    type Key = GridNode;

    fn outgoing_edges(&self, node: &GridNode) -> Vec<Edge<GridNode>> {
        let mut edges = Vec::with_capacity(8);
        for dx in -1..=1_i64 {
            for dy in -1..=1_i64 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let next = node.offset(dx, dy);
                if !self.is_wall(next) {
                    #[allow(clippy::cast_precision_loss)]
                    let cost = ((dx * dx + dy * dy) as f64).sqrt();
                    edges.push(Edge::new(*node, next, cost));
                }
            }
        }
        edges
    }

    fn compare_nodes(&self, a: &GridNode, b: &GridNode) -> Ordering {
        a.cmp(b)
    }

    fn node_key(&self, node: &GridNode) -> GridNode {
        *node
    }
}

/// Straight-line distance to `goal`. Admissible and consistent on this grid.
#[must_use]
pub fn euclidean_heuristic(goal: GridNode) -> impl Fn(&GridNode) -> f64 {
    move |node: &GridNode| {
        #[allow(clippy::cast_precision_loss)]
        let (dx, dy) = ((node.x - goal.x) as f64, (node.y - goal.y) as f64);
        dx.hypot(dy)
    }
}

/// The trivial heuristic. Turns A* into uniform-cost search.
#[must_use]
pub fn zero_heuristic(_: &GridNode) -> f64 {
    0.0
}
