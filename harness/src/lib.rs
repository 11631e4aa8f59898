//! Waypoint Harness: concrete worlds and the run/report layer over the
//! search engine.
//!
//! Worlds provide domain data only (successors, goal test, heuristic, state
//! labels); the engine owns the search loop. The runner turns one run into a
//! [`runner::RunReport`] with canonical bytes and a content digest, and
//! [`report_dir`] persists reports to disk, failing closed on read.

#![forbid(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]

pub mod contract;
pub mod logging;
pub mod report_dir;
pub mod runner;
pub mod worlds;

pub use contract::{World, WorldError};
pub use runner::{compare_strategies, run_world, RunError, RunReport};
