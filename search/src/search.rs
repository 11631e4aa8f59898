//! Search entry point and the best-first expansion loop.
//!
//! One loop serves every [`Strategy`]; only the frontier discipline and the
//! priority key differ between them.
//!
//! ```text
//! push root
//! loop:
//!   pop next            -- empty frontier: NoSolution
//!   already finalized?  -- discard stale entry
//!   goal?               -- Solved(path, g)
//!   budget left?        -- otherwise BudgetExceeded
//!   finalize, push every successor that is not finalized
//! ```
//!
//! A node is finalized when it is popped, not when it is pushed, so several
//! pending entries may exist for one state; all but the first one popped are
//! dropped lazily.

use std::collections::HashMap;
use std::time::Instant;

use crate::contract::{Heuristic, StateSpace};
use crate::cost::Cost;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::node::{FrontierKey, NodeArena, SearchNode};
use crate::policy::{BudgetKind, SearchPolicy};
use crate::strategy::Strategy;
use crate::trace::{ExpandEvent, SearchStats, SearchTrace};

/// A path from the start state to a goal state.
#[derive(Debug, Clone, PartialEq)]
pub struct Solution<S, C> {
    /// States from start to goal, inclusive.
    pub path: Vec<S>,
    /// Sum of the step costs along `path`.
    pub total_cost: C,
}

impl<S, C> Solution<S, C> {
    /// Number of moves (edges) in the path.
    #[must_use]
    pub fn steps(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// How a run ended.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome<S, C> {
    /// A goal state was popped from the frontier.
    Solved(Solution<S, C>),
    /// The frontier emptied without reaching a goal.
    NoSolution,
    /// A policy budget stopped the run first.
    BudgetExceeded { budget: BudgetKind },
}

impl<S, C> SearchOutcome<S, C> {
    /// Stable label used in reports.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Solved(_) => "solved",
            Self::NoSolution => "no_solution",
            Self::BudgetExceeded { .. } => "budget_exceeded",
        }
    }
}

/// Result of a search run.
#[derive(Debug, Clone)]
pub struct SearchResult<S, C> {
    pub outcome: SearchOutcome<S, C>,
    pub stats: SearchStats,
    /// Present when the policy asked for it.
    pub trace: Option<SearchTrace<C>>,
}

impl<S, C> SearchResult<S, C> {
    #[must_use]
    pub fn is_solved(&self) -> bool {
        matches!(self.outcome, SearchOutcome::Solved(_))
    }

    #[must_use]
    pub fn solution(&self) -> Option<&Solution<S, C>> {
        match &self.outcome {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    #[must_use]
    pub fn into_solution(self) -> Option<Solution<S, C>> {
        match self.outcome {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }
}

/// Reusable search driver over one state space.
///
/// The engine keeps no state between runs: the visited set, frontier, node
/// arena and sequence counter are created by each [`SearchEngine::run`] call
/// and dropped when it returns. One engine can therefore serve several
/// independent searches (BFS, then A*, ...) over the same space.
pub struct SearchEngine<'a, P: StateSpace> {
    space: &'a P,
    heuristic: Option<&'a dyn Heuristic<P::State, P::Cost>>,
    policy: SearchPolicy,
}

impl<'a, P: StateSpace> SearchEngine<'a, P> {
    /// Engine with no heuristic and an unbounded policy.
    #[must_use]
    pub fn new(space: &'a P) -> Self {
        Self {
            space,
            heuristic: None,
            policy: SearchPolicy::default(),
        }
    }

    /// Heuristic consulted by Greedy and A*.
    #[must_use]
    pub fn with_heuristic(mut self, heuristic: &'a dyn Heuristic<P::State, P::Cost>) -> Self {
        self.heuristic = Some(heuristic);
        self
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    fn estimate(&self, strategy: Strategy, state: &P::State) -> Result<P::Cost, SearchError> {
        let Some(heuristic) = self.heuristic.filter(|_| strategy.uses_heuristic()) else {
            return Ok(P::Cost::ZERO);
        };
        let h = heuristic.estimate(state);
        if !h.is_valid() {
            return Err(SearchError::InvalidHeuristic {
                detail: format!("estimate {h:?} is negative or not comparable"),
            });
        }
        Ok(h)
    }

    /// Search from `start` with `strategy`.
    ///
    /// Returns `Ok` for every ordinary termination (goal reached, frontier
    /// exhausted, budget exhausted); inspect [`SearchResult::outcome`].
    ///
    /// # Errors
    ///
    /// - [`SearchError::InvalidPolicy`] if the policy fails validation.
    /// - [`SearchError::InvalidStateSpace`] when a successor carries a
    ///   negative or NaN step cost, or a path cost overflows the cost type.
    /// - [`SearchError::InvalidHeuristic`] when Greedy or A* receives a
    ///   negative or NaN estimate.
    #[tracing::instrument(level = "debug", skip(self, start), fields(strategy = %strategy))]
    pub fn run(
        &self,
        start: P::State,
        strategy: Strategy,
    ) -> Result<SearchResult<P::State, P::Cost>, SearchError> {
        self.policy.validate()?;

        let started = Instant::now();
        let mut arena: NodeArena<P::State, P::Cost> = NodeArena::new();
        let mut frontier: Frontier<P::Cost> = Frontier::new(strategy);
        // Finalized states and the cost they were finalized at.
        let mut finalized: HashMap<P::State, P::Cost> = HashMap::new();
        let mut stats = SearchStats::default();
        let mut trace = self.policy.record_trace.then(SearchTrace::new);
        let mut next_creation_order: u64 = 0;

        let root_h = self.estimate(strategy, &start)?;
        let root = arena.alloc(|node_id| SearchNode {
            node_id,
            parent: None,
            state: start,
            depth: 0,
            g_cost: P::Cost::ZERO,
            h_cost: root_h,
            creation_order: next_creation_order,
        });
        frontier.push(
            root,
            frontier_key(strategy, P::Cost::ZERO, root_h, next_creation_order)?,
        );
        next_creation_order += 1;
        stats.nodes_generated = 1;

        let outcome = loop {
            let Some(current_id) = frontier.pop_min() else {
                break SearchOutcome::NoSolution;
            };

            let current = &arena[current_id];
            if finalized.contains_key(&current.state) {
                stats.stale_pops += 1;
                continue;
            }

            if self.space.is_goal(&current.state) {
                stats.solution_depth = Some(current.depth);
                break SearchOutcome::Solved(Solution {
                    path: arena.reconstruct_path(current_id),
                    total_cost: current.g_cost,
                });
            }

            if let Some(limit) = self.policy.max_expansions {
                if stats.expansions >= limit {
                    break SearchOutcome::BudgetExceeded {
                        budget: BudgetKind::Expansions { limit },
                    };
                }
            }
            if let Some(limit) = self.policy.time_limit {
                if started.elapsed() >= limit {
                    break SearchOutcome::BudgetExceeded {
                        budget: BudgetKind::WallClock { limit },
                    };
                }
            }

            let state = current.state.clone();
            let (g, h, depth, parent) = (current.g_cost, current.h_cost, current.depth, current.parent);
            finalized.insert(state.clone(), g);

            let mut children_pushed = 0u64;
            let mut successors_skipped = 0u64;
            for (next, step_cost) in self.space.successors(&state) {
                if !step_cost.is_valid() {
                    return Err(SearchError::InvalidStateSpace {
                        detail: format!(
                            "step cost {step_cost:?} from node {current_id} at depth {depth}"
                        ),
                    });
                }
                if finalized.contains_key(&next) {
                    successors_skipped += 1;
                    continue;
                }

                let Some(child_g) = g.checked_add(step_cost) else {
                    return Err(SearchError::InvalidStateSpace {
                        detail: format!(
                            "path cost {g:?} plus step cost {step_cost:?} overflows at depth {depth}"
                        ),
                    });
                };
                let child_h = self.estimate(strategy, &next)?;
                let creation_order = next_creation_order;
                next_creation_order += 1;

                let child = arena.alloc(|node_id| SearchNode {
                    node_id,
                    parent: Some(current_id),
                    state: next,
                    depth: depth.saturating_add(1),
                    g_cost: child_g,
                    h_cost: child_h,
                    creation_order,
                });
                frontier.push(child, frontier_key(strategy, child_g, child_h, creation_order)?);
                children_pushed += 1;
            }

            tracing::trace!(
                node_id = current_id,
                depth,
                g_cost = ?g,
                children_pushed,
                frontier_len = frontier.len(),
                "expanded"
            );

            if let Some(trace) = trace.as_mut() {
                trace.events.push(ExpandEvent {
                    expansion_order: stats.expansions,
                    node_id: current_id,
                    parent_id: parent,
                    depth,
                    g_cost: g,
                    h_cost: h,
                    children_pushed,
                    successors_skipped,
                });
            }

            stats.expansions += 1;
            stats.nodes_generated += children_pushed;
            stats.successors_skipped += successors_skipped;
        };

        stats.frontier_high_water = frontier.high_water() as u64;

        match &outcome {
            SearchOutcome::BudgetExceeded { budget } => {
                tracing::warn!(%budget, expansions = stats.expansions, "search stopped by budget");
            }
            _ => {
                tracing::debug!(
                    outcome = outcome.kind(),
                    expansions = stats.expansions,
                    nodes_generated = stats.nodes_generated,
                    stale_pops = stats.stale_pops,
                    frontier_high_water = stats.frontier_high_water,
                    elapsed = ?started.elapsed(),
                    "search finished"
                );
            }
        }

        Ok(SearchResult {
            outcome,
            stats,
            trace,
        })
    }
}

fn frontier_key<C: Cost>(
    strategy: Strategy,
    g: C,
    h: C,
    creation_order: u64,
) -> Result<FrontierKey<C>, SearchError> {
    strategy
        .key(g, h, creation_order)
        .ok_or_else(|| SearchError::InvalidStateSpace {
            detail: format!("priority {g:?} + {h:?} overflows the cost type"),
        })
}

/// One-shot search without building an engine.
///
/// # Errors
///
/// See [`SearchEngine::run`].
pub fn search<P: StateSpace>(
    space: &P,
    heuristic: Option<&dyn Heuristic<P::State, P::Cost>>,
    start: P::State,
    strategy: Strategy,
    policy: &SearchPolicy,
) -> Result<SearchResult<P::State, P::Cost>, SearchError> {
    let mut engine = SearchEngine::new(space).with_policy(policy.clone());
    engine.heuristic = heuristic;
    engine.run(start, strategy)
}
