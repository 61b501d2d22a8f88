//! Gantry Harness: blocks-world planning on top of the kernel and search.
//!
//! The kernel owns the world model (states, actions, physics, goals); the
//! search crate owns A*. The harness wires them together: it exposes
//! concrete [`gantry_search::Graph`] implementations, loads world fixtures,
//! resolves planner configuration, and runs the planner.
//!
//! All logging lives here, through `tracing`. Install a subscriber to see it.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod config;
pub mod fixture;
pub mod planner;
pub mod worlds;

pub use config::PlannerConfig;
pub use fixture::{FixtureError, WorldFixture};
pub use planner::{plan, plan_with_oracle, Plan, PlanError};
