//! Carrier module: objects and world states.
//!
//! Uses `proof` for fingerprints; nothing in `proof` depends on the carrier.

pub mod objects;
pub mod world;
