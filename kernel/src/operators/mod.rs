//! Operators module: gripper actions, `apply()`, and placement physics.
//!
//! Depends on `carrier`.

pub mod apply;
pub mod physics;
