//! Gantry Kernel: the blocks-world domain model.
//!
//! The kernel knows nothing about search. It provides:
//!
//! - [`carrier`] -- objects and immutable world states
//! - [`operators`] -- the four gripper actions, `apply()`, placement physics
//! - [`goal`] -- DNF goal formulas and admissible goal-distance estimates
//! - [`proof`] -- canonical JSON and SHA-256 content hashing
//!
//! # Module Dependency Direction
//!
//! `proof` ← `carrier` ← `operators`, `goal`
//!
//! One-way only. No cycles.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod carrier;
pub mod goal;
pub mod operators;
pub mod proof;
