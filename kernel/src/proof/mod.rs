//! Proof module: canonical encoding and content hashing.
//!
//! Depends on nothing else in the kernel. `carrier` uses it to fingerprint
//! world states.

pub mod canon;
pub mod hash;
pub mod hash_domain;
