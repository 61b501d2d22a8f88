//! Planner configuration.
//!
//! Every field is an optional override; `None` falls back to the default
//! constant below.

use gantry_search::policy::timeout_from_secs;
use gantry_search::{ReopenPolicy, SearchError, SearchPolicy};

/// Wall-clock budget for one planning call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: f64 = 10.0;

/// Planner settings that can override defaults.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlannerConfig {
    /// Search timeout in seconds. `None` uses `DEFAULT_TIMEOUT_SECS`.
    pub timeout_secs: Option<f64>,
    /// Re-open policy. `None` uses [`ReopenPolicy::NeverReopen`].
    pub reopen: Option<ReopenPolicy>,
    /// Cap on expanded states. `None` means unlimited.
    pub max_expansions: Option<u64>,
}

impl PlannerConfig {
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: f64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    #[must_use]
    pub fn with_reopen(mut self, reopen: ReopenPolicy) -> Self {
        self.reopen = Some(reopen);
        self
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    /// Resolve overrides into a validated [`SearchPolicy`].
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a negative or non-finite
    /// timeout, or a zero expansion cap.
    pub fn search_policy(&self) -> Result<SearchPolicy, SearchError> {
        let policy = SearchPolicy {
            timeout: Some(timeout_from_secs(
                self.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
            )?),
            reopen: self.reopen.unwrap_or_default(),
            max_expansions: self.max_expansions,
        };
        policy.validate()?;
        Ok(policy)
    }
}
