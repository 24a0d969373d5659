//! Core game engine for Last Block Standing.
//!
//! This module defines the game's fundamental components:
//! - `Cell`: Represents the ownership state of a single board cell.
//! - `Board`: Represents the game board and includes methods for cell
//!   removal, row/column fullness queries, the gravity-clearing rule, and
//!   per-player move availability.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// Represents the ownership state of a cell on the game board.
///
/// A cell is either empty or owned by the left player, the right player, or
/// both (`Shared`). Shared cells may be removed by either player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// An empty space on the board.
    Empty,
    /// A block owned by the left player.
    LeftOwned,
    /// A block owned by the right player.
    RightOwned,
    /// A block owned by both players; removable by either.
    Shared,
}

// Private helper used by `Board::random_with_seed` so that generated boards
// start fully occupied (no `Cell::Empty`).
fn random_owned_cell(rng: &mut impl Rng) -> Cell {
    match rng.gen_range(0..3u8) {
        0 => Cell::LeftOwned,
        1 => Cell::RightOwned,
        2 => Cell::Shared,
        _ => unreachable!("Generated value out of range"),
    }
}

impl Cell {
    /// Converts the cell to its character representation.
    ///
    /// This is the same alphabet used by the board text format:
    /// `B` (left), `R` (right), `G` (shared), `-` (empty).
    ///
    /// # Examples
    ///
    /// ```
    /// use lbs_solver::engine::Cell;
    /// assert_eq!(Cell::LeftOwned.to_char(), 'B');
    /// assert_eq!(Cell::Empty.to_char(), '-');
    /// ```
    pub fn to_char(&self) -> char {
        match self {
            Cell::Empty => '-',
            Cell::LeftOwned => 'B',
            Cell::RightOwned => 'R',
            Cell::Shared => 'G',
        }
    }

    /// Parses a character of the board alphabet into a cell state.
    ///
    /// Returns `None` for any character outside the `B`/`R`/`G`/`-`
    /// alphabet; the text format treats such characters as noise to skip,
    /// not as an error.
    pub fn from_char(ch: char) -> Option<Cell> {
        match ch {
            'B' => Some(Cell::LeftOwned),
            'R' => Some(Cell::RightOwned),
            'G' => Some(Cell::Shared),
            '-' => Some(Cell::Empty),
            _ => None,
        }
    }

    /// Returns whether the left player may remove this cell.
    pub fn is_left_removable(&self) -> bool {
        matches!(self, Cell::LeftOwned | Cell::Shared)
    }

    /// Returns whether the right player may remove this cell.
    pub fn is_right_removable(&self) -> bool {
        matches!(self, Cell::RightOwned | Cell::Shared)
    }

    /// Returns the ANSI color code string for terminal output.
    fn to_ansi_color_code(&self) -> &'static str {
        match self {
            Cell::Empty => "90",
            Cell::LeftOwned => "34",
            Cell::RightOwned => "31",
            Cell::Shared => "32",
        }
    }
}

/// Represents the game board as a width x height grid of `Cell`s.
///
/// Dimensions are fixed at construction and never change; only the cell
/// states mutate, via `remove_cell` and `apply_gravity`. The grid is stored
/// row-major.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    width: usize,
    height: usize,
    grid: Vec<Cell>,
}

impl Board {
    /// Creates a board from a row-major list of cells.
    ///
    /// # Panics
    /// Panics if `cells.len() != width * height`. Shape violations are a
    /// caller contract violation, not a recoverable error.
    ///
    /// # Examples
    /// ```
    /// use lbs_solver::engine::{Board, Cell};
    /// let board = Board::new(2, 1, vec![Cell::LeftOwned, Cell::RightOwned]);
    /// assert_eq!(board.cell(0, 0), Cell::LeftOwned);
    /// assert_eq!(board.cell(0, 1), Cell::RightOwned);
    /// ```
    pub fn new(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        assert_eq!(
            cells.len(),
            width * height,
            "cell count must match board dimensions"
        );
        Board {
            width,
            height,
            grid: cells,
        }
    }

    /// Creates a board with every cell set to `Cell::Empty`.
    pub fn new_empty(width: usize, height: usize) -> Self {
        Board {
            width,
            height,
            grid: vec![Cell::Empty; width * height],
        }
    }

    /// Creates a fully occupied board with randomly assigned owners.
    ///
    /// The same seed always produces the same board, which keeps analysis
    /// runs reproducible. No `Cell::Empty` is generated.
    pub fn random_with_seed(width: usize, height: usize, seed: u64) -> Self {
        let mut rng = SmallRng::seed_from_u64(seed);
        let grid = (0..width * height)
            .map(|_| random_owned_cell(&mut rng))
            .collect();
        Board {
            width,
            height,
            grid,
        }
    }

    /// Returns the board width (number of columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the board height (number of rows).
    pub fn height(&self) -> usize {
        self.height
    }

    fn idx(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Returns the cell at the specified `row` and `col`.
    ///
    /// # Panics
    /// Panics if `row >= height` or `col >= width`.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.grid[self.idx(row, col)]
    }

    /// Returns whether the left player may remove the cell at (`row`, `col`).
    pub fn is_left_removable(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_left_removable()
    }

    /// Returns whether the right player may remove the cell at (`row`, `col`).
    pub fn is_right_removable(&self, row: usize, col: usize) -> bool {
        self.cell(row, col).is_right_removable()
    }

    /// Sets the cell at (`row`, `col`) to `Cell::Empty`.
    ///
    /// No legality check is performed here; the caller must have already
    /// verified the cell is removable by the acting player.
    ///
    /// # Panics
    /// Panics if `row` or `col` are outside the board dimensions.
    pub fn remove_cell(&mut self, row: usize, col: usize) {
        let i = self.idx(row, col);
        self.grid[i] = Cell::Empty;
    }

    /// Returns whether every cell in `row` is occupied.
    pub fn is_row_full(&self, row: usize) -> bool {
        (0..self.width).all(|col| self.cell(row, col) != Cell::Empty)
    }

    /// Returns whether every cell in `col` is occupied.
    pub fn is_column_full(&self, col: usize) -> bool {
        (0..self.height).all(|row| self.cell(row, col) != Cell::Empty)
    }

    /// Clears every block that is not part of a complete row or complete
    /// column, repeating until no further block falls.
    ///
    /// A single pass is not enough: clearing one block can break a row or
    /// column that was previously complete, so the scan repeats to fixpoint.
    /// Each pass only removes blocks, so the loop terminates after at most
    /// width x height passes.
    pub fn apply_gravity(&mut self) {
        let mut updated = true;
        while updated {
            updated = false;
            for row in 0..self.height {
                for col in 0..self.width {
                    if self.cell(row, col) != Cell::Empty
                        && !self.is_row_full(row)
                        && !self.is_column_full(col)
                    {
                        let i = self.idx(row, col);
                        self.grid[i] = Cell::Empty;
                        updated = true;
                    }
                }
            }
        }
    }

    /// Returns whether the left player has any legal move, i.e. whether any
    /// cell is `LeftOwned` or `Shared`.
    pub fn has_left_moves(&self) -> bool {
        self.grid.iter().any(Cell::is_left_removable)
    }

    /// Returns whether the right player has any legal move, i.e. whether
    /// any cell is `RightOwned` or `Shared`.
    pub fn has_right_moves(&self) -> bool {
        self.grid.iter().any(Cell::is_right_removable)
    }

    /// Returns the number of occupied cells on the board.
    pub fn occupied_count(&self) -> usize {
        self.grid.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Generates a string representation of the board with row and column
    /// indices, using ANSI escape codes to color the cells for terminal
    /// output.
    pub fn to_display_string(&self) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for col in 0..self.width {
            output.push_str(&format!("{:<2}", col));
        }
        output.push('\n');

        for row in 0..self.height {
            output.push_str(&format!("{:<3}", row));
            for col in 0..self.width {
                let cell = self.cell(row, col);
                output.push_str(&format!(
                    "\x1b[1;{}m{} \x1b[m",
                    cell.to_ansi_color_code(),
                    cell.to_char()
                ));
            }
            if row < self.height - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_display_string())
    }
}
