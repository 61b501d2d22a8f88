//! Search policy types.

use std::time::Duration;

use crate::error::SearchError;

/// Budgets and re-opening behavior for one search run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Wall-clock budget. `None` means unlimited.
    pub timeout: Option<Duration>,
    /// What to do when a cheaper path reaches an already expanded node.
    pub reopen: ReopenPolicy,
    /// Hard cap on non-stale pops. `None` means unlimited.
    pub max_expansions: Option<u64>,
}

impl SearchPolicy {
    /// Policy with a timeout in seconds and defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `secs` is negative, NaN or
    /// infinite.
    pub fn with_timeout_secs(secs: f64) -> Result<Self, SearchError> {
        Ok(Self {
            timeout: Some(timeout_from_secs(secs)?),
            ..Self::default()
        })
    }

    #[must_use]
    pub fn with_reopen(mut self, reopen: ReopenPolicy) -> Self {
        self.reopen = reopen;
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Validate budgets before a run.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] if `max_expansions` is zero.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        Ok(())
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            timeout: None,
            reopen: ReopenPolicy::NeverReopen,
            max_expansions: None,
        }
    }
}

/// Re-opening behavior for closed nodes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReopenPolicy {
    /// Closed nodes are never revisited. Optimal only with a consistent
    /// heuristic.
    #[default]
    NeverReopen,
    /// A strictly cheaper path to a closed node re-queues it. Optimal with
    /// any admissible heuristic.
    ReopenOnImprovement,
}

/// Convert a seconds value into a [`Duration`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidPolicy`] for negative or non-finite input.
pub fn timeout_from_secs(secs: f64) -> Result<Duration, SearchError> {
    Duration::try_from_secs_f64(secs).map_err(|_| SearchError::InvalidPolicy {
        detail: format!("timeout must be a finite, non-negative number of seconds (got {secs})"),
    })
}
