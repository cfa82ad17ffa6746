use crate::engine::{Cell, Move};
use rand::Rng;
use std::collections::HashSet;

/// Errors produced when reading a cell from text.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseCellError {
    #[error("expected ROW,COL but found '{0}'")]
    Format(String),
    #[error("'{0}' is not a valid coordinate")]
    Coordinate(String),
}

/// Parses a cell written as `ROW,COL`.
///
/// Whitespace around either coordinate is ignored, and the pair may optionally be wrapped
/// in parentheses, so the `Display` output of a `Cell` parses back. Bounds are not checked
/// here; the board size is not known at this point.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::Cell;
/// use jump_tour_solver::utils::parse_cell;
///
/// assert_eq!(parse_cell("3,4"), Ok(Cell::new(3, 4)));
/// assert_eq!(parse_cell(" (0, 9) "), Ok(Cell::new(0, 9)));
/// assert!(parse_cell("3").is_err());
/// assert!(parse_cell("a,1").is_err());
/// ```
pub fn parse_cell(s: &str) -> Result<Cell, ParseCellError> {
    let trimmed = s.trim();
    let inner = trimmed
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
        .unwrap_or(trimmed);

    let (row, col) = inner
        .split_once(',')
        .ok_or_else(|| ParseCellError::Format(s.to_string()))?;

    let parse = |part: &str| {
        part.trim()
            .parse::<usize>()
            .map_err(|_| ParseCellError::Coordinate(part.trim().to_string()))
    };

    Ok(Cell::new(parse(row)?, parse(col)?))
}

/// Picks a start cell uniformly over a `size`×`size` board.
///
/// Returns `None` for an empty board.
pub fn random_start(size: usize, rng: &mut impl Rng) -> Option<Cell> {
    if size == 0 {
        return None;
    }
    Some(Cell::new(rng.gen_range(0..size), rng.gen_range(0..size)))
}

/// Summary of a path that passed `verify_path`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PathReport {
    /// Number of distinct cells on the path.
    pub visited: usize,
    /// Whether the path covers every cell of the board.
    pub complete: bool,
}

/// The first rule a path breaks.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("step {step}: cell {cell} is outside the {size}x{size} board")]
    OutOfBounds { step: usize, cell: Cell, size: usize },
    #[error("step {step}: cell {cell} was already visited")]
    Repeated { step: usize, cell: Cell },
    #[error("step {step}: {from} -> {to} is not a legal jump")]
    IllegalJump { step: usize, from: Cell, to: Cell },
}

/// Checks that `path` is a valid (possibly partial) tour of a `size`×`size` board.
///
/// Every cell must be on the board, no cell may appear twice, and each consecutive pair
/// must be one jump apart. Steps in errors are 0-based positions in `path`.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::Cell;
/// use jump_tour_solver::utils::verify_path;
///
/// let path = [Cell::new(0, 0), Cell::new(3, 0), Cell::new(1, 2)];
/// let report = verify_path(&path, 4).unwrap();
/// assert_eq!(report.visited, 3);
/// assert!(!report.complete);
///
/// let bad = [Cell::new(0, 0), Cell::new(1, 0)];
/// assert!(verify_path(&bad, 4).is_err());
/// ```
pub fn verify_path(path: &[Cell], size: usize) -> Result<PathReport, PathError> {
    let mut seen = HashSet::with_capacity(path.len());

    for (step, &cell) in path.iter().enumerate() {
        if !cell.in_bounds(size) {
            return Err(PathError::OutOfBounds { step, cell, size });
        }
        if !seen.insert(cell) {
            return Err(PathError::Repeated { step, cell });
        }
        if step > 0 {
            let from = path[step - 1];
            if Move::between(from, cell).is_none() {
                return Err(PathError::IllegalJump {
                    step,
                    from,
                    to: cell,
                });
            }
        }
    }

    Ok(PathReport {
        visited: seen.len(),
        complete: seen.len() == size * size,
    })
}
