//! Strategy selector: maps each search strategy to a frontier discipline and
//! a priority-key formula.
//!
//! | Strategy | Discipline | Key |
//! |---|---|---|
//! | BFS | FIFO queue | arrival order |
//! | DFS | LIFO stack | arrival order |
//! | UCS | min-heap | `(g, 0, seq)` |
//! | Greedy | min-heap | `(h, 0, seq)` |
//! | A* | min-heap | `(g + h, g, seq)` |

use std::str::FromStr;

use crate::cost::Cost;
use crate::node::FrontierKey;

/// How the frontier orders pending nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Discipline {
    Fifo,
    Lifo,
    MinHeap,
}

/// Search strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Strategy {
    /// Breadth-first search.
    Bfs,
    /// Depth-first search.
    Dfs,
    /// Uniform-cost search (Dijkstra on the implicit graph).
    Ucs,
    /// Greedy best-first search on the heuristic alone.
    Greedy,
    /// A*.
    AStar,
}

impl Strategy {
    /// Every strategy, in a fixed order.
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    #[must_use]
    pub fn discipline(self) -> Discipline {
        match self {
            Self::Bfs => Discipline::Fifo,
            Self::Dfs => Discipline::Lifo,
            Self::Ucs | Self::Greedy | Self::AStar => Discipline::MinHeap,
        }
    }

    /// Whether the heuristic is consulted. BFS, DFS and UCS treat it as zero.
    #[must_use]
    pub fn uses_heuristic(self) -> bool {
        matches!(self, Self::Greedy | Self::AStar)
    }

    /// Whether the first goal popped is guaranteed cost-optimal, given
    /// non-negative step costs (and, for A*, a consistent heuristic).
    #[must_use]
    pub fn is_cost_optimal(self) -> bool {
        matches!(self, Self::Ucs | Self::AStar)
    }

    /// Priority key for a node with cost-so-far `g` and estimate `h`.
    ///
    /// FIFO/LIFO disciplines ignore the cost components. `None` when the A*
    /// sum `g + h` overflows the cost type.
    #[must_use]
    pub fn key<C: Cost>(self, g: C, h: C, creation_order: u64) -> Option<FrontierKey<C>> {
        let (primary, secondary) = match self {
            Self::Bfs | Self::Dfs => (C::ZERO, C::ZERO),
            Self::Ucs => (g, C::ZERO),
            Self::Greedy => (h, C::ZERO),
            Self::AStar => (g.checked_add(h)?, g),
        };
        Some(FrontierKey {
            primary,
            secondary,
            creation_order,
        })
    }

    /// Stable lowercase label used in reports.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bfs => "bfs",
            Self::Dfs => "dfs",
            Self::Ucs => "ucs",
            Self::Greedy => "greedy",
            Self::AStar => "astar",
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unrecognised strategy label.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown search strategy: {label:?}")]
pub struct ParseStrategyError {
    pub label: String,
}

impl FromStr for Strategy {
    type Err = ParseStrategyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bfs" => Ok(Self::Bfs),
            "dfs" => Ok(Self::Dfs),
            "ucs" => Ok(Self::Ucs),
            "greedy" => Ok(Self::Greedy),
            "astar" | "a*" => Ok(Self::AStar),
            _ => Err(ParseStrategyError {
                label: s.to_string(),
            }),
        }
    }
}
