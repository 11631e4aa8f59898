//! Typed search errors.
//!
//! `SearchError` covers contract violations only. Exhausting the frontier or
//! a budget is an expected outcome and is expressed through
//! [`crate::search::SearchOutcome`] instead.

use thiserror::Error;

/// Failure that aborts a search run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// The successor function produced a negative or non-comparable step cost.
    #[error("invalid state space: {detail}")]
    InvalidStateSpace { detail: String },

    /// The heuristic produced a negative or non-comparable estimate.
    #[error("invalid heuristic: {detail}")]
    InvalidHeuristic { detail: String },

    /// The search policy was rejected before the run started.
    #[error("invalid search policy: {detail}")]
    InvalidPolicy { detail: String },
}
