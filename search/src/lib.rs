//! Waypoint Search: one deterministic best-first engine for BFS, DFS, UCS,
//! greedy and A* over lazily generated state spaces.
//!
//! # Crate dependency graph
//!
//! ```text
//! waypoint_search  ←  waypoint_harness
//! (engine, frontier)   (worlds, runner, reports)
//! ```
//!
//! # Key types
//!
//! - [`StateSpace`] / [`Heuristic`]: the problem contract a caller implements
//! - [`Strategy`]: selects frontier discipline and priority key
//! - [`SearchEngine`]: runs one search per call, no state kept between runs
//! - [`SearchPolicy`]: optional expansion and wall-clock budgets
//! - [`SearchResult`]: `Solved`, `NoSolution` or `BudgetExceeded`, plus stats
//!
//! Ties between equal priority keys are always broken by insertion order, so
//! identical inputs produce identical paths.

#![forbid(unsafe_code)]

pub mod contract;
pub mod cost;
pub mod digest;
pub mod error;
pub mod frontier;
pub mod node;
pub mod policy;
pub mod search;
pub mod strategy;
pub mod trace;

pub use contract::{Heuristic, StateSpace, ZeroHeuristic};
pub use cost::Cost;
pub use error::SearchError;
pub use policy::{BudgetKind, SearchPolicy};
pub use search::{search, SearchEngine, SearchOutcome, SearchResult, Solution};
pub use strategy::Strategy;
