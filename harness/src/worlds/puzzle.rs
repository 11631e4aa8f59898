//! `EightPuzzle`: the 3×3 sliding-tile puzzle.
//!
//! A move slides the blank (tile `0`) up, down, left or right, in that order,
//! at unit cost. The heuristic sums the Manhattan distances of every numbered
//! tile to its goal position.

use waypoint_search::{Heuristic, StateSpace};

use crate::contract::{World, WorldError};

const SIDE: usize = 3;
const CELLS: usize = SIDE * SIDE;

/// A board configuration, row-major, `0` is the blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Board([u8; CELLS]);

impl Board {
    /// Validate that `tiles` is a permutation of `0..=8`.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidBoard`] on a missing or repeated tile.
    pub fn new(tiles: [u8; CELLS]) -> Result<Self, WorldError> {
        let mut seen = [false; CELLS];
        for &t in &tiles {
            let slot = seen.get_mut(usize::from(t)).ok_or_else(|| WorldError::InvalidBoard {
                detail: format!("tile {t} is out of range 0..=8"),
            })?;
            if *slot {
                return Err(WorldError::InvalidBoard {
                    detail: format!("tile {t} appears more than once"),
                });
            }
            *slot = true;
        }
        Ok(Self(tiles))
    }

    /// The solved configuration `1 2 3 / 4 5 6 / 7 8 _`.
    #[must_use]
    pub const fn solved() -> Self {
        Self([1, 2, 3, 4, 5, 6, 7, 8, 0])
    }

    /// One move from solved: the blank sits left of tile 8.
    #[must_use]
    pub const fn reference_start() -> Self {
        Self([1, 2, 3, 4, 5, 6, 7, 0, 8])
    }

    #[must_use]
    pub fn tiles(&self) -> &[u8; CELLS] {
        &self.0
    }

    /// Index of the blank.
    #[must_use]
    pub fn blank(&self) -> usize {
        self.0.iter().position(|&t| t == 0).unwrap_or(0)
    }

    /// Boards reachable by one blank move, in up/down/left/right order.
    #[must_use]
    pub fn moves(&self) -> Vec<Board> {
        let blank = self.blank();
        let (row, col) = (blank / SIDE, blank % SIDE);
        let targets = [
            (row > 0).then(|| blank - SIDE),
            (row + 1 < SIDE).then(|| blank + SIDE),
            (col > 0).then(|| blank - 1),
            (col + 1 < SIDE).then(|| blank + 1),
        ];
        targets
            .into_iter()
            .flatten()
            .map(|target| {
                let mut tiles = self.0;
                tiles.swap(blank, target);
                Board(tiles)
            })
            .collect()
    }

    /// Number of tile pairs out of order, ignoring the blank.
    #[must_use]
    pub fn inversions(&self) -> usize {
        let tiles: Vec<u8> = self.0.iter().copied().filter(|&t| t != 0).collect();
        tiles
            .iter()
            .enumerate()
            .map(|(i, a)| tiles[i + 1..].iter().filter(|b| a > b).count())
            .sum()
    }

    /// Single-line form, e.g. `123/456/780`.
    #[must_use]
    pub fn compact(&self) -> String {
        let mut out = String::with_capacity(CELLS + SIDE - 1);
        for (i, t) in self.0.iter().enumerate() {
            if i > 0 && i % SIDE == 0 {
                out.push('/');
            }
            out.push(char::from(b'0' + t));
        }
        out
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.0.chunks(SIDE) {
            let cells: Vec<String> = row
                .iter()
                .map(|&t| if t == 0 { "_".to_string() } else { t.to_string() })
                .collect();
            writeln!(f, "{}", cells.join(" "))?;
        }
        Ok(())
    }
}

/// Whether `goal` is reachable from `from`.
///
/// On a board of odd width every move preserves inversion parity, so two
/// boards are connected exactly when their parities match.
#[must_use]
pub fn is_solvable(from: &Board, goal: &Board) -> bool {
    from.inversions() % 2 == goal.inversions() % 2
}

/// An 8-puzzle instance.
#[derive(Debug, Clone)]
pub struct EightPuzzle {
    start: Board,
    goal: Board,
    /// Goal index of each tile value.
    goal_index: [usize; CELLS],
}

impl EightPuzzle {
    #[must_use]
    pub fn new(start: Board, goal: Board) -> Self {
        let mut goal_index = [0; CELLS];
        for (i, &t) in goal.0.iter().enumerate() {
            goal_index[usize::from(t)] = i;
        }
        Self {
            start,
            goal,
            goal_index,
        }
    }

    /// The one-move reference instance.
    #[must_use]
    pub fn reference() -> Self {
        Self::new(Board::reference_start(), Board::solved())
    }

    #[must_use]
    pub fn goal(&self) -> &Board {
        &self.goal
    }

    #[must_use]
    pub fn is_solvable(&self) -> bool {
        is_solvable(&self.start, &self.goal)
    }

    /// Sum of Manhattan distances of numbered tiles to their goal cells.
    #[must_use]
    pub fn manhattan(&self, board: &Board) -> u32 {
        let total: usize = board
            .0
            .iter()
            .enumerate()
            .filter(|&(_, &t)| t != 0)
            .map(|(i, &t)| {
                let g = self.goal_index[usize::from(t)];
                (i / SIDE).abs_diff(g / SIDE) + (i % SIDE).abs_diff(g % SIDE)
            })
            .sum();
        u32::try_from(total).unwrap_or(u32::MAX)
    }
}

impl StateSpace for EightPuzzle {
    type State = Board;
    type Cost = u32;

    fn successors(&self, state: &Board) -> Vec<(Board, u32)> {
        state.moves().into_iter().map(|b| (b, 1)).collect()
    }

    fn is_goal(&self, state: &Board) -> bool {
        *state == self.goal
    }
}

impl Heuristic<Board, u32> for EightPuzzle {
    fn estimate(&self, state: &Board) -> u32 {
        self.manhattan(state)
    }
}

impl World for EightPuzzle {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "eight_puzzle"
    }

    fn start(&self) -> Board {
        self.start
    }

    fn heuristic(&self) -> Option<&dyn Heuristic<Board, u32>> {
        Some(self)
    }

    fn label(&self, state: &Board) -> String {
        state.compact()
    }
}
