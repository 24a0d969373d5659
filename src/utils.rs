//! Utility functions for building boards from text.
use crate::engine::{Board, Cell};
use thiserror::Error;

/// Errors that can occur when parsing a board from text.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseBoardError {
    #[error("board text contains no cells")]
    Empty,

    #[error("row {row} has {found} cells (expected {expected})")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// Parses a slice of text lines into a `Board`.
///
/// Each line is one board row, top to bottom. Recognized characters are
/// `B` (left-owned), `R` (right-owned), `G` (shared) and `-` (empty); any
/// other character is skipped, so trailing whitespace or separators inside
/// a line are harmless. Lines containing no recognized character at all
/// (blank lines, comments) are dropped entirely.
///
/// The rows that remain must all have the same number of recognized cells;
/// a ragged board or one with no cells at all is rejected.
///
/// # Examples
/// ```
/// use lbs_solver::engine::Cell;
/// use lbs_solver::utils::board_from_lines;
///
/// let board = board_from_lines(&["BR", "G-"]).unwrap();
/// assert_eq!(board.width(), 2);
/// assert_eq!(board.height(), 2);
/// assert_eq!(board.cell(1, 0), Cell::Shared);
///
/// assert!(board_from_lines(&["BR", "G"]).is_err());
/// ```
pub fn board_from_lines(lines: &[&str]) -> Result<Board, ParseBoardError> {
    let rows: Vec<Vec<Cell>> = lines
        .iter()
        .map(|line| line.chars().filter_map(Cell::from_char).collect())
        .filter(|row: &Vec<Cell>| !row.is_empty())
        .collect();

    let width = match rows.first() {
        Some(first) => first.len(),
        None => return Err(ParseBoardError::Empty),
    };
    for (row_idx, row) in rows.iter().enumerate() {
        if row.len() != width {
            return Err(ParseBoardError::RaggedRow {
                row: row_idx,
                expected: width,
                found: row.len(),
            });
        }
    }

    let height = rows.len();
    let cells = rows.into_iter().flatten().collect();
    Ok(Board::new(width, height, cells))
}

/// Parses a whole text blob (e.g. a board file's contents) into a `Board`
/// by splitting it into lines and delegating to `board_from_lines`.
pub fn board_from_str(text: &str) -> Result<Board, ParseBoardError> {
    let lines: Vec<&str> = text.lines().collect();
    board_from_lines(&lines)
}
