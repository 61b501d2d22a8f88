//! Typed search errors.
//!
//! Every way a search can end without a path is a variant here. The engine
//! never retries and never logs; callers decide what a failure means.

use std::time::Duration;

/// Typed search failure.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// The frontier emptied without reaching a goal.
    NoPathFound { iterations: u64 },
    /// The wall-clock budget ran out before a goal was popped.
    Timeout { elapsed: Duration, iterations: u64 },
    /// The configured cap on expanded nodes was reached.
    ExpansionBudgetExceeded { max_expansions: u64 },
    /// The policy was rejected before search began.
    InvalidPolicy { detail: String },
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPathFound { iterations } => {
                write!(f, "no path found after {iterations} iterations")
            }
            Self::Timeout {
                elapsed,
                iterations,
            } => write!(
                f,
                "search timed out after {:.3}s ({iterations} iterations)",
                elapsed.as_secs_f64()
            ),
            Self::ExpansionBudgetExceeded { max_expansions } => {
                write!(f, "expansion budget of {max_expansions} nodes exhausted")
            }
            Self::InvalidPolicy { detail } => write!(f, "invalid search policy: {detail}"),
        }
    }
}

impl std::error::Error for SearchError {}
