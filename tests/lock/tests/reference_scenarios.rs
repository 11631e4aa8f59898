//! Reference scenarios: one lock test per concrete instance the engine must
//! get right (maze, 8-puzzle, weighted route, disconnected maze, job
//! sequencing).

use lock_tests::brute_force::min_penalty;
use lock_tests::path_checks::assert_valid_path;
use waypoint_harness::worlds::jobs::{JobBound, JobSequencing};
use waypoint_harness::worlds::maze::{Cell, GridMaze};
use waypoint_harness::worlds::puzzle::{Board, EightPuzzle};
use waypoint_harness::worlds::route::{RoadMap, RouteProblem};
use waypoint_harness::World;
use waypoint_search::{SearchEngine, SearchOutcome, Strategy};

fn engine_for<W: World>(world: &W) -> SearchEngine<'_, W> {
    let engine = SearchEngine::new(world);
    match world.heuristic() {
        Some(h) => engine.with_heuristic(h),
        None => engine,
    }
}

// ---------------------------------------------------------------------------
// Maze: BFS and A* agree on length, DFS is merely valid
// ---------------------------------------------------------------------------

#[test]
fn maze_bfs_and_astar_both_take_eight_steps() {
    let maze = GridMaze::reference();
    let engine = engine_for(&maze);

    let bfs = engine.run(maze.start(), Strategy::Bfs).unwrap();
    let astar = engine.run(maze.start(), Strategy::AStar).unwrap();

    let bfs = bfs.solution().expect("BFS solves the reference maze");
    let astar = astar.solution().expect("A* solves the reference maze");
    assert_eq!(bfs.steps(), 8);
    assert_eq!(astar.steps(), 8);
    assert_eq!(bfs.total_cost, 8);
    assert_eq!(astar.total_cost, 8);
    assert_valid_path(&maze, &maze.start(), bfs);
    assert_valid_path(&maze, &maze.start(), astar);
}

#[test]
fn maze_dfs_returns_a_valid_path_at_least_as_long() {
    let maze = GridMaze::reference();
    let result = engine_for(&maze).run(maze.start(), Strategy::Dfs).unwrap();
    let dfs = result.solution().expect("DFS is complete on a finite maze");
    assert!(dfs.steps() >= 8, "DFS path shorter than optimal: {}", dfs.steps());
    assert_valid_path(&maze, &maze.start(), dfs);
    assert_eq!(dfs.path.last(), Some(&Cell::new(4, 4)));
}

// ---------------------------------------------------------------------------
// 8-puzzle: one move from solved
// ---------------------------------------------------------------------------

#[test]
fn puzzle_astar_slides_eight_once() {
    let puzzle = EightPuzzle::reference();
    let result = engine_for(&puzzle)
        .run(puzzle.start(), Strategy::AStar)
        .unwrap();
    let solution = result.solution().unwrap();
    assert_eq!(solution.total_cost, 1);
    assert_eq!(
        solution.path,
        vec![Board::reference_start(), Board::solved()]
    );
    assert_eq!(result.stats.expansions, 1);
}

// ---------------------------------------------------------------------------
// Weighted route: cheapest, not shortest-looking
// ---------------------------------------------------------------------------

#[test]
fn route_ucs_prefers_moratuwa() {
    let problem = RouteProblem::new(RoadMap::western_province(), "Panadura", "Colombo").unwrap();
    let result = SearchEngine::new(&problem)
        .run(problem.start(), Strategy::Ucs)
        .unwrap();
    let solution = result.solution().unwrap();
    assert_eq!(solution.total_cost, 30, "expected 12 + 18, not 20 + 30 + 15");
    assert_eq!(
        problem.map().format_route(&solution.path),
        "Panadura -> Moratuwa -> Colombo"
    );
    assert_valid_path(&problem, &problem.start(), solution);
}

#[test]
fn route_astar_to_ratnapura() {
    let problem = RouteProblem::panadura_to_ratnapura().unwrap();
    let result = engine_for(&problem)
        .run(problem.start(), Strategy::AStar)
        .unwrap();
    let solution = result.solution().unwrap();
    assert_eq!(solution.total_cost, 65);
    assert_eq!(
        problem.map().format_route(&solution.path),
        "Panadura -> Horana -> Ratnapura"
    );
}

#[test]
fn route_astar_tie_prefers_deeper_progress() {
    // Both Panadura -> Kalutara -> Colombo and Panadura -> Horana -> Colombo
    // cost 70. On equal f the smaller g is expanded first, so Kalutara
    // (g = 20) is expanded before Horana (g = 30) and reaches Colombo first.
    let problem = RouteProblem::panadura_to_colombo().unwrap();
    let result = engine_for(&problem)
        .run(problem.start(), Strategy::AStar)
        .unwrap();
    let solution = result.solution().unwrap();
    assert_eq!(solution.total_cost, 70);
    assert_eq!(
        problem.map().format_route(&solution.path),
        "Panadura -> Kalutara -> Colombo"
    );
}

// ---------------------------------------------------------------------------
// Disconnected maze
// ---------------------------------------------------------------------------

#[test]
fn walled_in_goal_is_no_solution_for_every_strategy() {
    let text = "
        00000
        00#00
        0#0#0
        00#00
        00000
    ";
    let maze = GridMaze::parse(text, Cell::new(0, 0), Cell::new(2, 2)).unwrap();
    let engine = engine_for(&maze);
    for strategy in Strategy::ALL {
        let result = engine.run(maze.start(), strategy).unwrap();
        assert_eq!(result.outcome, SearchOutcome::NoSolution, "{strategy}");
        // Every open cell except the goal was expanded exactly once.
        assert_eq!(result.stats.expansions, 20, "{strategy}");
    }
}

// ---------------------------------------------------------------------------
// Job sequencing against exhaustive enumeration
// ---------------------------------------------------------------------------

#[test]
fn jobs_ucs_matches_brute_force() {
    let jobs = JobSequencing::reference();
    let (best_order, best_penalty) = min_penalty(&jobs);

    let result = SearchEngine::new(&jobs)
        .run(jobs.start(), Strategy::Ucs)
        .unwrap();
    let solution = result.solution().unwrap();
    assert_eq!(solution.total_cost, best_penalty);

    let order = solution.path.last().unwrap().tasks().to_vec();
    assert_eq!(jobs.total_penalty(&order), best_penalty);
    assert_eq!(
        jobs.total_penalty(&best_order),
        best_penalty,
        "brute force is self-consistent"
    );
    assert_valid_path(&jobs, &jobs.start(), solution);
}

#[test]
fn jobs_astar_with_relaxed_bound_is_optimal() {
    let jobs = JobSequencing::reference().with_bound(JobBound::Relaxed);
    let (_, best_penalty) = min_penalty(&jobs);
    let result = engine_for(&jobs).run(jobs.start(), Strategy::AStar).unwrap();
    assert_eq!(result.solution().unwrap().total_cost, best_penalty);
}

#[test]
fn jobs_per_task_bound_still_yields_a_complete_schedule() {
    let jobs = JobSequencing::reference();
    let (_, best_penalty) = min_penalty(&jobs);
    let result = engine_for(&jobs).run(jobs.start(), Strategy::AStar).unwrap();
    let solution = result.solution().unwrap();
    assert!(solution.total_cost >= best_penalty);
    assert_valid_path(&jobs, &jobs.start(), solution);
}

#[test]
fn jobs_search_beats_or_ties_earliest_deadline_first() {
    let jobs = JobSequencing::reference();
    let edf = jobs.total_penalty(&jobs.earliest_deadline_first());
    let result = SearchEngine::new(&jobs)
        .run(jobs.start(), Strategy::Ucs)
        .unwrap();
    assert!(result.solution().unwrap().total_cost <= edf);
}
