//! World implementations for the harness runner.

pub mod jobs;
pub mod maze;
pub mod puzzle;
pub mod route;
