//! Engine-wide properties checked over every reference world: determinism,
//! path validity, optimality of UCS and A*, engine reuse, budgets, and
//! floating-point costs.

use std::fmt::Debug;
use std::time::Duration;

use lock_tests::path_checks::{assert_valid_path, same_cost};
use waypoint_harness::runner::run_world;
use waypoint_harness::worlds::jobs::{JobBound, JobSequencing};
use waypoint_harness::worlds::maze::GridMaze;
use waypoint_harness::worlds::puzzle::{Board, EightPuzzle};
use waypoint_harness::worlds::route::RouteProblem;
use waypoint_harness::World;
use waypoint_search::policy::BudgetKind;
use waypoint_search::{
    SearchEngine, SearchError, SearchOutcome, SearchPolicy, StateSpace, Strategy,
};

fn engine_for<W: World>(world: &W) -> SearchEngine<'_, W> {
    let engine = SearchEngine::new(world);
    match world.heuristic() {
        Some(h) => engine.with_heuristic(h),
        None => engine,
    }
}

/// An 8-puzzle several moves from solved.
fn scrambled_puzzle() -> EightPuzzle {
    let start = Board::new([4, 1, 3, 7, 2, 6, 0, 5, 8]).unwrap();
    EightPuzzle::new(start, Board::solved())
}

fn check_all_strategies_valid<W>(world: &W)
where
    W: World,
    W::State: Debug,
{
    let engine = engine_for(world);
    for strategy in Strategy::ALL {
        let result = engine.run(world.start(), strategy).unwrap();
        let solution = result
            .solution()
            .unwrap_or_else(|| panic!("{} {strategy}: {:?}", world.world_id(), result.outcome));
        assert_valid_path(world, &world.start(), solution);
    }
}

fn check_ucs_equals_astar<W: World>(world: &W) {
    let engine = engine_for(world);
    let ucs = engine.run(world.start(), Strategy::Ucs).unwrap();
    let astar = engine.run(world.start(), Strategy::AStar).unwrap();
    let (ucs, astar) = (ucs.solution().unwrap(), astar.solution().unwrap());
    assert!(
        same_cost(ucs.total_cost, astar.total_cost),
        "{}: UCS {:?} vs A* {:?}",
        world.world_id(),
        ucs.total_cost,
        astar.total_cost
    );
}

// ---------------------------------------------------------------------------
// Path validity and completeness
// ---------------------------------------------------------------------------

#[test]
fn every_strategy_returns_a_valid_path_on_every_world() {
    check_all_strategies_valid(&GridMaze::reference());
    check_all_strategies_valid(&EightPuzzle::reference());
    check_all_strategies_valid(&RouteProblem::panadura_to_ratnapura().unwrap());
    check_all_strategies_valid(&RouteProblem::panadura_to_colombo().unwrap());
    check_all_strategies_valid(&JobSequencing::reference());
}

// ---------------------------------------------------------------------------
// Optimality with admissible, consistent heuristics
// ---------------------------------------------------------------------------

#[test]
fn astar_matches_ucs_with_consistent_heuristics() {
    check_ucs_equals_astar(&GridMaze::reference());
    check_ucs_equals_astar(&scrambled_puzzle());
    check_ucs_equals_astar(&RouteProblem::panadura_to_ratnapura().unwrap());
    check_ucs_equals_astar(&RouteProblem::panadura_to_colombo().unwrap());
    check_ucs_equals_astar(&JobSequencing::reference().with_bound(JobBound::Relaxed));
}

#[test]
fn astar_expands_no_more_than_ucs_on_scrambled_puzzle() {
    let puzzle = scrambled_puzzle();
    let engine = engine_for(&puzzle);
    let ucs = engine.run(puzzle.start(), Strategy::Ucs).unwrap();
    let astar = engine.run(puzzle.start(), Strategy::AStar).unwrap();
    assert!(
        astar.stats.expansions <= ucs.stats.expansions,
        "A* {} > UCS {}",
        astar.stats.expansions,
        ucs.stats.expansions
    );
}

#[test]
fn bfs_is_step_optimal_on_unit_cost_worlds() {
    let puzzle = scrambled_puzzle();
    let engine = engine_for(&puzzle);
    let bfs = engine.run(puzzle.start(), Strategy::Bfs).unwrap();
    let ucs = engine.run(puzzle.start(), Strategy::Ucs).unwrap();
    assert_eq!(
        bfs.solution().unwrap().steps(),
        ucs.solution().unwrap().steps()
    );
}

// ---------------------------------------------------------------------------
// Determinism
// ---------------------------------------------------------------------------

#[test]
fn repeated_runs_are_byte_identical_n10() {
    let maze = GridMaze::reference();
    let policy = SearchPolicy::default().with_trace();
    for strategy in Strategy::ALL {
        let first = run_world(&maze, strategy, &policy)
            .unwrap()
            .canonical_bytes()
            .unwrap();
        for _ in 1..10 {
            let again = run_world(&maze, strategy, &policy)
                .unwrap()
                .canonical_bytes()
                .unwrap();
            assert_eq!(first, again, "{strategy} run diverged");
        }
    }
}

#[test]
fn fresh_world_instances_give_identical_reports() {
    let policy = SearchPolicy::default().with_trace();
    let a = run_world(&scrambled_puzzle(), Strategy::AStar, &policy).unwrap();
    let b = run_world(&scrambled_puzzle(), Strategy::AStar, &policy).unwrap();
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
}

// ---------------------------------------------------------------------------
// Engine reuse
// ---------------------------------------------------------------------------

#[test]
fn one_engine_serves_independent_runs() {
    let maze = GridMaze::reference();
    let shared = engine_for(&maze);

    let bfs_then = shared.run(maze.start(), Strategy::Bfs).unwrap();
    let astar_then = shared.run(maze.start(), Strategy::AStar).unwrap();
    let bfs_again = shared.run(maze.start(), Strategy::Bfs).unwrap();

    let fresh_astar = engine_for(&maze).run(maze.start(), Strategy::AStar).unwrap();

    assert_eq!(bfs_then.outcome, bfs_again.outcome);
    assert_eq!(bfs_then.stats, bfs_again.stats);
    assert_eq!(astar_then.outcome, fresh_astar.outcome);
    assert_eq!(astar_then.stats, fresh_astar.stats);
}

// ---------------------------------------------------------------------------
// Budgets
// ---------------------------------------------------------------------------

#[test]
fn expansion_budget_is_distinct_from_no_solution() {
    let puzzle = scrambled_puzzle();
    let tight = SearchPolicy::default().with_max_expansions(5);
    let result = engine_for(&puzzle)
        .with_policy(tight)
        .run(puzzle.start(), Strategy::Bfs)
        .unwrap();
    assert_eq!(
        result.outcome,
        SearchOutcome::BudgetExceeded {
            budget: BudgetKind::Expansions { limit: 5 }
        }
    );
    assert_eq!(result.stats.expansions, 5);

    let generous = SearchPolicy::default().with_max_expansions(1_000_000);
    let retry = engine_for(&puzzle)
        .with_policy(generous)
        .run(puzzle.start(), Strategy::Bfs)
        .unwrap();
    assert!(retry.is_solved(), "raising the budget recovers");
}

#[test]
fn budget_never_preempts_a_reachable_goal_at_the_root() {
    let puzzle = EightPuzzle::new(Board::solved(), Board::solved());
    let result = engine_for(&puzzle)
        .with_policy(SearchPolicy::default().with_max_expansions(1))
        .run(puzzle.start(), Strategy::AStar)
        .unwrap();
    assert!(result.is_solved());
    assert_eq!(result.stats.expansions, 0);
}

#[test]
fn wall_clock_budget_stops_unsolvable_puzzle() {
    // Inversion parity differs, so the goal is unreachable; without a budget
    // BFS would sweep all 181 440 reachable boards.
    let start = Board::new([2, 1, 3, 4, 5, 6, 7, 8, 0]).unwrap();
    let puzzle = EightPuzzle::new(start, Board::solved());
    assert!(!puzzle.is_solvable());

    let policy = SearchPolicy::default().with_time_limit(Duration::from_millis(1));
    let result = engine_for(&puzzle)
        .with_policy(policy)
        .run(puzzle.start(), Strategy::Bfs)
        .unwrap();
    match result.outcome {
        SearchOutcome::BudgetExceeded {
            budget: BudgetKind::WallClock { limit },
        } => assert_eq!(limit, Duration::from_millis(1)),
        // A very fast machine may exhaust the space first; that is still a
        // correct, budget-free answer.
        SearchOutcome::NoSolution => {}
        other @ SearchOutcome::Solved(_) => panic!("unsolvable puzzle solved: {other:?}"),
        SearchOutcome::BudgetExceeded { budget } => panic!("wrong budget: {budget}"),
    }
}

// ---------------------------------------------------------------------------
// Floating-point costs
// ---------------------------------------------------------------------------

/// Directed graph with `f64` edge weights.
struct WeightedGraph {
    edges: Vec<(u8, u8, f64)>,
    goal: u8,
}

impl StateSpace for WeightedGraph {
    type State = u8;
    type Cost = f64;

    fn successors(&self, state: &u8) -> Vec<(u8, f64)> {
        self.edges
            .iter()
            .filter(|(from, _, _)| from == state)
            .map(|&(_, to, w)| (to, w))
            .collect()
    }

    fn is_goal(&self, state: &u8) -> bool {
        *state == self.goal
    }
}

/// 0 -> 2 -> 1 -> 3 costs 0.25 + 0.5 + 2.0 and undercuts both direct routes.
fn fractional_graph() -> WeightedGraph {
    WeightedGraph {
        edges: vec![
            (0, 1, 1.5),
            (0, 2, 0.25),
            (2, 1, 0.5),
            (1, 3, 2.0),
            (2, 3, 3.5),
        ],
        goal: 3,
    }
}

fn fractional_estimate(state: &u8) -> f64 {
    match state {
        0 | 1 => 2.0,
        2 => 2.5,
        _ => 0.0,
    }
}

#[test]
fn float_costs_find_the_cheapest_path() {
    let graph = fractional_graph();
    let engine = SearchEngine::new(&graph).with_heuristic(&fractional_estimate);
    for strategy in [Strategy::Ucs, Strategy::AStar] {
        let result = engine.run(0, strategy).unwrap();
        let solution = result.solution().unwrap();
        assert_eq!(solution.path, vec![0, 2, 1, 3], "{strategy}");
        assert!(
            same_cost(solution.total_cost, 2.75),
            "{strategy}: cost {}",
            solution.total_cost
        );
        assert_valid_path(&graph, &0, solution);
    }
}

#[test]
fn nan_step_cost_is_an_invalid_state_space() {
    let graph = WeightedGraph {
        edges: vec![(0, 1, 1.0), (1, 2, f64::NAN)],
        goal: 2,
    };
    for strategy in Strategy::ALL {
        let err = SearchEngine::new(&graph).run(0, strategy).unwrap_err();
        assert!(
            matches!(err, SearchError::InvalidStateSpace { .. }),
            "{strategy}: expected InvalidStateSpace, got {err:?}"
        );
    }
}

#[test]
fn nan_estimate_is_rejected_by_astar_only() {
    let graph = fractional_graph();
    let nan = |_: &u8| f64::NAN;
    let engine = SearchEngine::new(&graph).with_heuristic(&nan);
    let err = engine.run(0, Strategy::AStar).unwrap_err();
    assert!(
        matches!(err, SearchError::InvalidHeuristic { .. }),
        "expected InvalidHeuristic, got {err:?}"
    );
    assert!(engine.run(0, Strategy::Ucs).unwrap().is_solved());
}
