//! World contract: what a problem definition supplies to the runner.
//!
//! A world is a [`StateSpace`] plus the data the engine does not own: a start
//! state, an optional heuristic, and a human-readable label for states.
//! Worlds never drive the search loop, hash artifacts or write reports; those
//! are runner concerns.

use thiserror::Error;
use waypoint_search::{Heuristic, StateSpace};

/// The contract a world must implement to be run by the harness runner.
pub trait World: StateSpace {
    /// Unique world identifier (e.g. `"grid_maze"`).
    fn world_id(&self) -> &str;

    /// The state every run starts from.
    fn start(&self) -> Self::State;

    /// Heuristic consulted by Greedy and A*. `None` means zero.
    fn heuristic(&self) -> Option<&dyn Heuristic<Self::State, Self::Cost>>;

    /// Short deterministic rendering of a state for reports.
    fn label(&self, state: &Self::State) -> String;
}

/// Typed failure constructing a world.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WorldError {
    /// Maze text or dimensions are malformed.
    #[error("invalid maze: {detail}")]
    InvalidMaze { detail: String },
    /// A puzzle board is not a permutation of the tiles.
    #[error("invalid board: {detail}")]
    InvalidBoard { detail: String },
    /// A route refers to a city that is not on the map.
    #[error("unknown city: {name}")]
    UnknownCity { name: String },
    /// A job-sequencing instance is malformed.
    #[error("invalid task list: {detail}")]
    InvalidTasks { detail: String },
}
