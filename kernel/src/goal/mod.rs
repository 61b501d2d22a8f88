//! Goal module: DNF goal formulas and goal-distance estimates.
//!
//! Depends on `carrier`.

pub mod formula;
pub mod heuristic;
