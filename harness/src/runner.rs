//! Harness runner: drives a [`World`] through the search engine and packages
//! the result as a [`RunReport`].
//!
//! The runner owns no search logic. It wires the world's start state and
//! heuristic into a [`SearchEngine`], then renders the outcome with the
//! world's state labels so reports are independent of the state type.
//!
//! # Pipeline
//!
//! ```text
//! policy.validate() → SearchEngine::run(start, strategy)
//!   → label path → stats / trace JSON → RunReport
//!   → canonical_bytes() → digest()
//! ```

use thiserror::Error;

use waypoint_search::digest::{
    canonical_hash, canonical_json_bytes, ContentHash, DOMAIN_RUN_REPORT, DOMAIN_SOLUTION_PATH,
};
use waypoint_search::trace::SearchStats;
use waypoint_search::{Cost, SearchEngine, SearchError, SearchOutcome, SearchPolicy, Strategy};

use crate::contract::{World, WorldError};

/// Report schema tag, bumped on any change to the JSON layout.
pub const REPORT_SCHEMA_VERSION: &str = "run_report.v1";

/// Error during a harness run.
#[derive(Debug, Error)]
pub enum RunError {
    /// The engine rejected the policy, a step cost or an estimate.
    #[error(transparent)]
    Search(#[from] SearchError),
    /// The world could not be constructed.
    #[error(transparent)]
    World(#[from] WorldError),
    /// Canonical JSON serialization failed.
    #[error("canonical JSON error: {0}")]
    Canon(#[from] serde_json::Error),
}

/// Everything observable about one run, with states rendered as labels.
#[derive(Debug, Clone, PartialEq)]
pub struct RunReport {
    pub world_id: String,
    pub strategy: Strategy,
    /// `SearchPolicy::to_json_value()` of the policy that was run.
    pub policy: serde_json::Value,
    /// `"solved"`, `"no_solution"` or `"budget_exceeded"`.
    pub outcome: &'static str,
    /// Which budget stopped the run, if one did.
    pub budget: Option<String>,
    /// Labels of the solution path, empty unless solved.
    pub path: Vec<String>,
    /// Path cost as JSON, `None` unless solved.
    pub total_cost: Option<serde_json::Value>,
    pub stats: SearchStats,
    /// Expansion trace, when the policy recorded one.
    pub trace: Option<serde_json::Value>,
}

impl RunReport {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        self.outcome == "solved"
    }

    /// Number of moves in the solution path.
    #[must_use]
    pub fn steps(&self) -> Option<usize> {
        self.is_solved().then(|| self.path.len().saturating_sub(1))
    }

    /// Digest of the labelled solution path, `None` unless solved.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Canon`] if serialization fails.
    pub fn path_digest(&self) -> Result<Option<ContentHash>, RunError> {
        if !self.is_solved() {
            return Ok(None);
        }
        let bytes = canonical_json_bytes(&serde_json::json!(self.path))?;
        Ok(Some(canonical_hash(DOMAIN_SOLUTION_PATH, &bytes)))
    }

    /// JSON form written to `report.json`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Canon`] if the path digest cannot be computed.
    pub fn to_json_value(&self) -> Result<serde_json::Value, RunError> {
        let path_digest = self.path_digest()?.map(|h| h.as_str().to_string());
        Ok(serde_json::json!({
            "budget": self.budget,
            "outcome": self.outcome,
            "path": self.path,
            "path_digest": path_digest,
            "policy": self.policy,
            "schema_version": REPORT_SCHEMA_VERSION,
            "stats": self.stats.to_json_value(),
            "strategy": self.strategy.as_str(),
            "total_cost": self.total_cost,
            "trace": self.trace,
            "world_id": self.world_id,
        }))
    }

    /// Canonical JSON bytes of [`RunReport::to_json_value`].
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Canon`] if serialization fails.
    pub fn canonical_bytes(&self) -> Result<Vec<u8>, RunError> {
        Ok(canonical_json_bytes(&self.to_json_value()?)?)
    }

    /// `canonical_hash(DOMAIN_RUN_REPORT, canonical_bytes)`.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::Canon`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, RunError> {
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &self.canonical_bytes()?))
    }
}

/// Run `world` once with `strategy` under `policy`.
///
/// The world's heuristic is always handed to the engine; BFS, DFS and UCS
/// never consult it.
///
/// # Errors
///
/// Returns [`RunError::Search`] for an invalid policy or a contract
/// violation by the world.
#[tracing::instrument(level = "info", skip(world, policy), fields(world_id = world.world_id(), strategy = %strategy))]
pub fn run_world<W: World>(
    world: &W,
    strategy: Strategy,
    policy: &SearchPolicy,
) -> Result<RunReport, RunError> {
    let mut engine = SearchEngine::new(world).with_policy(policy.clone());
    if let Some(heuristic) = world.heuristic() {
        engine = engine.with_heuristic(heuristic);
    }
    let result = engine.run(world.start(), strategy)?;

    let (path, total_cost, budget) = match &result.outcome {
        SearchOutcome::Solved(solution) => (
            solution.path.iter().map(|s| world.label(s)).collect(),
            Some(solution.total_cost.to_json()),
            None,
        ),
        SearchOutcome::NoSolution => (Vec::new(), None, None),
        SearchOutcome::BudgetExceeded { budget } => (Vec::new(), None, Some(budget.to_string())),
    };

    let report = RunReport {
        world_id: world.world_id().to_string(),
        strategy,
        policy: policy.to_json_value(),
        outcome: result.outcome.kind(),
        budget,
        path,
        total_cost,
        stats: result.stats,
        trace: result.trace.as_ref().map(|t| t.to_json_value()),
    };

    tracing::info!(
        outcome = report.outcome,
        steps = report.steps(),
        expansions = report.stats.expansions,
        "run complete"
    );
    Ok(report)
}

/// Run `world` once per strategy, in the order given.
///
/// # Errors
///
/// Stops at the first failing run and returns its error.
pub fn compare_strategies<W: World>(
    world: &W,
    strategies: &[Strategy],
    policy: &SearchPolicy,
) -> Result<Vec<RunReport>, RunError> {
    strategies
        .iter()
        .map(|&strategy| run_world(world, strategy, policy))
        .collect()
}

/// Fixed-width text table of a comparison, one row per report.
#[must_use]
pub fn render_comparison(reports: &[RunReport]) -> String {
    let mut out = format!(
        "{:<8} {:<16} {:>6} {:>6} {:>10} {:>10}\n",
        "strategy", "outcome", "steps", "cost", "expanded", "generated"
    );
    for report in reports {
        let steps = report.steps().map_or_else(|| "-".to_string(), |s| s.to_string());
        let cost = report
            .total_cost
            .as_ref()
            .map_or_else(|| "-".to_string(), ToString::to_string);
        out.push_str(&format!(
            "{:<8} {:<16} {:>6} {:>6} {:>10} {:>10}\n",
            report.strategy.as_str(),
            report.outcome,
            steps,
            cost,
            report.stats.expansions,
            report.stats.nodes_generated
        ));
    }
    out
}
