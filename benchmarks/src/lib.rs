//! Shared workloads for the waypoint benchmark suites.
//!
//! Each regime stresses a different part of the engine: open grids fill a
//! wide frontier, serpentine grids force long paths with little branching,
//! the puzzles exercise stale-entry pruning, and the ladder road
//! map has many equal-cost ties.

use waypoint_harness::worlds::maze::{Cell, GridMaze};
use waypoint_harness::worlds::puzzle::{Board, EightPuzzle};
use waypoint_harness::worlds::route::{RoadMap, RouteProblem};
use waypoint_harness::World;
use waypoint_search::{SearchEngine, SearchPolicy, SearchResult, Strategy};

/// An empty `side × side` grid from the top-left to the bottom-right corner.
///
/// # Panics
///
/// Panics if `side` is zero.
#[must_use]
pub fn open_grid(side: usize) -> GridMaze {
    GridMaze::new(
        side,
        side,
        vec![false; side * side],
        Cell::new(0, 0),
        Cell::new(side - 1, side - 1),
    )
    .expect("open grid is valid")
}

/// A `side × side` grid where every odd row is a wall with one gap,
/// alternating between the right and left ends, so the only path snakes
/// through every even row.
///
/// # Panics
///
/// Panics if `side` is zero.
#[must_use]
pub fn serpentine_grid(side: usize) -> GridMaze {
    let mut walls = vec![false; side * side];
    for row in (1..side).step_by(2) {
        let gap = if (row / 2) % 2 == 0 { side - 1 } else { 0 };
        for col in 0..side {
            walls[row * side + col] = col != gap;
        }
    }
    let last = side - 1;
    let goal_col = if (last / 2) % 2 == 0 { last } else { 0 };
    let goal_row = if last % 2 == 0 { last } else { last - 1 };
    GridMaze::new(side, side, walls, Cell::new(0, 0), Cell::new(goal_row, goal_col))
        .expect("serpentine grid is valid")
}

/// A solvable 8-puzzle six moves from solved.
///
/// # Panics
///
/// Never in practice; the board is a fixed valid permutation.
#[must_use]
pub fn scrambled_puzzle() -> EightPuzzle {
    let start = Board::new([4, 1, 3, 7, 2, 6, 0, 5, 8]).expect("valid board");
    EightPuzzle::new(start, Board::solved())
}

/// A solvable 8-puzzle far from solved. Only informed strategies finish it
/// quickly; uninformed ones sweep most of the 181 440 reachable boards.
///
/// # Panics
///
/// Never in practice; the board is a fixed valid permutation.
#[must_use]
pub fn deep_puzzle() -> EightPuzzle {
    let start = Board::new([8, 6, 7, 2, 5, 4, 3, 0, 1]).expect("valid board");
    EightPuzzle::new(start, Board::solved())
}

/// Two parallel chains of `rungs` cities joined at every step, all roads of
/// length 1, from one corner to the opposite one.
///
/// # Panics
///
/// Panics if `rungs` is zero.
#[must_use]
pub fn ladder_route(rungs: usize) -> RouteProblem {
    let mut map = RoadMap::new();
    for i in 0..rungs {
        let (a, b) = (format!("a{i}"), format!("b{i}"));
        map.add_road(&a, &b, 1);
        if i + 1 < rungs {
            map.add_road(&a, &format!("a{}", i + 1), 1)
                .add_road(&b, &format!("b{}", i + 1), 1);
        }
    }
    RouteProblem::new(map, "a0", &format!("b{}", rungs - 1)).expect("ladder endpoints exist")
}

/// Run one search with the world's heuristic and an unbounded policy.
///
/// # Panics
///
/// Panics if the engine reports an error. Benchmark setup failures are fatal.
pub fn run_to_completion<W: World>(world: &W, strategy: Strategy) -> SearchResult<W::State, W::Cost> {
    let mut engine = SearchEngine::new(world).with_policy(SearchPolicy::default());
    if let Some(heuristic) = world.heuristic() {
        engine = engine.with_heuristic(heuristic);
    }
    engine.run(world.start(), strategy).expect("search")
}
