//! Gantry Search: generic, deterministic A* over caller-supplied graphs.
//!
//! This crate knows nothing about blocks worlds. It searches any
//! [`Graph`] given a goal predicate and a heuristic, and reports failures as
//! typed [`SearchError`] values. It never logs.
//!
//! # Crate dependency graph
//!
//! ```text
//! gantry_kernel ─┐
//! (world model)  ├─  gantry_harness
//! gantry_search ─┘   (graphs, planner, fixtures)
//! (A*, frontier)
//! ```
//!
//! # Key types
//!
//! - [`Graph`] -- the contract a searchable graph implements
//! - [`OpenSet`] -- min-heap frontier ordered by [`FrontierKey`]
//! - [`SearchPolicy`] -- timeout, re-open behavior, expansion cap
//! - [`HeuristicCache`] -- per-key memo of heuristic estimates
//! - [`SearchResult`] -- path, cost, iteration count, stats

#![forbid(unsafe_code)]

pub mod contract;
pub mod error;
pub mod frontier;
pub mod heuristic;
pub mod node;
pub mod policy;
pub mod scores;
pub mod search;
pub mod timer;

pub use contract::Graph;
pub use error::SearchError;
pub use frontier::OpenSet;
pub use heuristic::{HeuristicCache, MemoizedHeuristic};
pub use node::{Edge, FrontierKey, ScoredNode};
pub use policy::{ReopenPolicy, SearchPolicy};
pub use scores::{NodeArena, PredecessorTable, ScoreTable};
pub use search::{a_star_search, reconstruct_path, search, search_with_cache, SearchResult, SearchStats};
pub use timer::Timer;
