//! Search policy: budgets and trace capture.

use std::time::Duration;

use crate::error::SearchError;

/// Per-run limits and recording options.
///
/// The default policy is unbounded and records no trace. Budgets are checked
/// once per loop iteration, after the goal test and before the popped node is
/// expanded, so a goal that is already at the top of the frontier is never
/// lost to a budget.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Hard cap on node expansions (finalized states).
    pub max_expansions: Option<u64>,
    /// Wall-clock limit measured from the start of the run.
    pub time_limit: Option<Duration>,
    /// Capture an ordered expansion trace in the result.
    pub record_trace: bool,
}

impl SearchPolicy {
    #[must_use]
    pub fn with_max_expansions(mut self, max_expansions: u64) -> Self {
        self.max_expansions = Some(max_expansions);
        self
    }

    #[must_use]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[must_use]
    pub fn with_trace(mut self) -> Self {
        self.record_trace = true;
        self
    }

    /// Reject budgets that can never allow progress.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidPolicy`] for a zero expansion budget or a
    /// zero time limit.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(SearchError::InvalidPolicy {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.time_limit == Some(Duration::ZERO) {
            return Err(SearchError::InvalidPolicy {
                detail: "time_limit must be non-zero".into(),
            });
        }
        Ok(())
    }

    /// Policy echo for run reports. The time limit is reported in
    /// microseconds, rounded up so a valid limit never echoes as zero.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "max_expansions": self.max_expansions,
            "record_trace": self.record_trace,
            "time_limit_us": self.time_limit.map(micros_rounded_up),
        })
    }
}

fn micros_rounded_up(limit: Duration) -> u64 {
    u64::try_from(limit.as_nanos().div_ceil(1_000)).unwrap_or(u64::MAX)
}

/// Which budget stopped a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetKind {
    /// `max_expansions` was reached.
    Expansions { limit: u64 },
    /// `time_limit` elapsed.
    WallClock { limit: Duration },
}

impl std::fmt::Display for BudgetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Expansions { limit } => write!(f, "expansion budget of {limit} exhausted"),
            Self::WallClock { limit } => write!(f, "time limit of {limit:?} elapsed"),
        }
    }
}
