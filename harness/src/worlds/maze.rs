//! `GridMaze`: 4-connected binary grid with unit move cost.
//!
//! Moves are generated in the fixed order up, down, left, right. The
//! heuristic is the Manhattan distance to the goal, which is admissible and
//! consistent for unit 4-directional moves.

use waypoint_search::{Heuristic, StateSpace};

use crate::contract::{World, WorldError};

/// A grid coordinate (`row` grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    #[must_use]
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl std::fmt::Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({},{})", self.row, self.col)
    }
}

/// Manhattan (L1) distance between two cells.
#[must_use]
pub fn manhattan(a: Cell, b: Cell) -> u32 {
    let d = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
    u32::try_from(d).unwrap_or(u32::MAX)
}

/// The 5×6 reference maze (`1` = wall).
const REFERENCE_LAYOUT: [[u8; 6]; 5] = [
    [0, 1, 0, 0, 0, 0],
    [0, 1, 0, 1, 1, 0],
    [0, 0, 0, 1, 0, 0],
    [1, 1, 0, 0, 0, 1],
    [0, 0, 0, 1, 0, 0],
];

/// Row/column offsets for up, down, left, right.
const MOVES: [(isize, isize); 4] = [(-1, 0), (1, 0), (0, -1), (0, 1)];

/// A rectangular maze with a start and a goal cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridMaze {
    rows: usize,
    cols: usize,
    /// Row-major, `true` = wall.
    walls: Vec<bool>,
    start: Cell,
    goal: Cell,
}

impl GridMaze {
    /// Build a maze from a row-major wall mask.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidMaze`] if the mask does not match the
    /// dimensions, the grid is empty, or the start or goal is outside the grid
    /// or on a wall.
    pub fn new(
        rows: usize,
        cols: usize,
        walls: Vec<bool>,
        start: Cell,
        goal: Cell,
    ) -> Result<Self, WorldError> {
        if rows == 0 || cols == 0 {
            return Err(WorldError::InvalidMaze {
                detail: "maze must have at least one row and one column".into(),
            });
        }
        if walls.len() != rows * cols {
            return Err(WorldError::InvalidMaze {
                detail: format!(
                    "wall mask has {} cells, expected {rows}x{cols}",
                    walls.len()
                ),
            });
        }
        let maze = Self {
            rows,
            cols,
            walls,
            start,
            goal,
        };
        for (what, cell) in [("start", start), ("goal", goal)] {
            if !maze.contains(cell) {
                return Err(WorldError::InvalidMaze {
                    detail: format!("{what} {cell} is outside the {rows}x{cols} grid"),
                });
            }
            if !maze.is_open(cell) {
                return Err(WorldError::InvalidMaze {
                    detail: format!("{what} {cell} is a wall"),
                });
            }
        }
        Ok(maze)
    }

    /// Parse a maze from text: one row per line, `0` or `.` for free cells,
    /// `1` or `#` for walls. Blank lines and surrounding whitespace are
    /// ignored.
    ///
    /// # Errors
    ///
    /// Returns [`WorldError::InvalidMaze`] for unknown characters, ragged rows,
    /// or an invalid start/goal.
    pub fn parse(text: &str, start: Cell, goal: Cell) -> Result<Self, WorldError> {
        let mut walls = Vec::new();
        let mut rows = 0;
        let mut cols = None;
        for (line_no, line) in text.lines().map(str::trim).filter(|l| !l.is_empty()).enumerate() {
            let row: Vec<bool> = line
                .chars()
                .filter(|c| !c.is_whitespace())
                .map(|c| match c {
                    '0' | '.' => Ok(false),
                    '1' | '#' => Ok(true),
                    other => Err(WorldError::InvalidMaze {
                        detail: format!("unexpected character {other:?} on row {line_no}"),
                    }),
                })
                .collect::<Result<_, _>>()?;
            match cols {
                None => cols = Some(row.len()),
                Some(width) if width != row.len() => {
                    return Err(WorldError::InvalidMaze {
                        detail: format!(
                            "row {line_no} has {} cells, expected {width}",
                            row.len()
                        ),
                    });
                }
                Some(_) => {}
            }
            walls.extend(row);
            rows += 1;
        }
        Self::new(rows, cols.unwrap_or(0), walls, start, goal)
    }

    /// The 5×6 reference maze, start (0,0), goal (4,4).
    #[must_use]
    pub fn reference() -> Self {
        let walls = REFERENCE_LAYOUT
            .iter()
            .flat_map(|row| row.iter().map(|&c| c == 1))
            .collect();
        Self {
            rows: REFERENCE_LAYOUT.len(),
            cols: REFERENCE_LAYOUT[0].len(),
            walls,
            start: Cell::new(0, 0),
            goal: Cell::new(4, 4),
        }
    }

    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[must_use]
    pub fn goal(&self) -> Cell {
        self.goal
    }

    #[must_use]
    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.rows && cell.col < self.cols
    }

    /// Whether `cell` is inside the grid and not a wall.
    #[must_use]
    pub fn is_open(&self, cell: Cell) -> bool {
        self.contains(cell) && !self.walls[cell.row * self.cols + cell.col]
    }

    /// Open 4-neighbours of `cell`, in up/down/left/right order.
    #[must_use]
    pub fn neighbors(&self, cell: Cell) -> Vec<Cell> {
        MOVES
            .iter()
            .filter_map(|&(dr, dc)| {
                let row = cell.row.checked_add_signed(dr)?;
                let col = cell.col.checked_add_signed(dc)?;
                Some(Cell::new(row, col))
            })
            .filter(|&c| self.is_open(c))
            .collect()
    }

    /// ASCII rendering: `#` wall, `.` free, `*` path, `S` start, `G` goal.
    #[must_use]
    pub fn render(&self, path: Option<&[Cell]>) -> String {
        let on_path = |cell: Cell| path.is_some_and(|p| p.contains(&cell));
        let mut out = String::with_capacity(self.rows * (self.cols + 1));
        for row in 0..self.rows {
            for col in 0..self.cols {
                let cell = Cell::new(row, col);
                let ch = if cell == self.start {
                    'S'
                } else if cell == self.goal {
                    'G'
                } else if !self.is_open(cell) {
                    '#'
                } else if on_path(cell) {
                    '*'
                } else {
                    '.'
                };
                out.push(ch);
            }
            out.push('\n');
        }
        out
    }
}

impl StateSpace for GridMaze {
    type State = Cell;
    type Cost = u32;

    fn successors(&self, state: &Cell) -> Vec<(Cell, u32)> {
        self.neighbors(*state).into_iter().map(|c| (c, 1)).collect()
    }

    fn is_goal(&self, state: &Cell) -> bool {
        *state == self.goal
    }
}

impl Heuristic<Cell, u32> for GridMaze {
    fn estimate(&self, state: &Cell) -> u32 {
        manhattan(*state, self.goal)
    }
}

impl World for GridMaze {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "grid_maze"
    }

    fn start(&self) -> Cell {
        self.start
    }

    fn heuristic(&self) -> Option<&dyn Heuristic<Cell, u32>> {
        Some(self)
    }

    fn label(&self, state: &Cell) -> String {
        state.to_string()
    }
}
