//! Problem contracts: the state space and the heuristic.
//!
//! # Contract
//!
//! - `successors` is pure: equal states yield equal successor lists in the
//!   same order. Deduplication and determinism both depend on it.
//! - Step costs must be non-negative. A negative (or NaN) cost is reported as
//!   [`crate::error::SearchError::InvalidStateSpace`] when the offending state
//!   is expanded.
//! - Successor lists are produced lazily, one expansion at a time. The state
//!   space is never enumerated up front.

use std::hash::Hash;

use crate::cost::Cost;

/// A problem instance over an implicit state graph.
pub trait StateSpace {
    /// Immutable problem state. Used as the deduplication key.
    type State: Clone + Eq + Hash;
    /// Numeric type of step and path costs.
    type Cost: Cost;

    /// Enumerate `(neighbor, step_cost)` pairs reachable from `state`.
    ///
    /// An empty list marks a dead end.
    fn successors(&self, state: &Self::State) -> Vec<(Self::State, Self::Cost)>;

    /// Test whether `state` satisfies the goal.
    fn is_goal(&self, state: &Self::State) -> bool;
}

/// Estimated remaining cost from a state to the nearest goal.
///
/// Estimates must be non-negative and zero at goal states. A* returns
/// cost-optimal paths only when the estimate is admissible and consistent;
/// the engine relies on that but does not verify it. A heuristic that breaks
/// either property still terminates on a finite space, it may just return a
/// more expensive path.
pub trait Heuristic<S, C> {
    fn estimate(&self, state: &S) -> C;
}

impl<S, C, F> Heuristic<S, C> for F
where
    F: Fn(&S) -> C,
{
    fn estimate(&self, state: &S) -> C {
        self(state)
    }
}

/// Heuristic that always estimates zero. A* with it behaves like UCS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl<S, C: Cost> Heuristic<S, C> for ZeroHeuristic {
    fn estimate(&self, _state: &S) -> C {
        C::ZERO
    }
}
