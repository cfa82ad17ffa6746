//! Board geometry for the jump tour puzzle.
//!
//! This module defines the game's fundamental components:
//! - `Cell`: a `(row, col)` coordinate on an N×N board.
//! - `Move`: one of the eight fixed jumps, listed in `MOVES`.
//! - `MoveGraph`: the adjacency relation the moves induce on a board of a given size,
//!   built once by `build_graph` and read-only afterwards.
use std::fmt;

/// A coordinate on the board, 0-indexed.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::Cell;
/// let cell = Cell::new(2, 7);
/// assert_eq!(cell.row, 2);
/// assert_eq!(cell.col, 7);
/// assert_eq!(cell.to_string(), "(2, 7)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// Returns `true` if the cell lies on a `size`×`size` board.
    pub fn in_bounds(&self, size: usize) -> bool {
        self.row < size && self.col < size
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// A single jump, expressed as a row and column delta.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub dr: isize,
    pub dc: isize,
}

/// The eight legal jumps, in definition order.
///
/// Orthogonal jumps skip two cells, diagonal jumps skip one. The order matters: it is the
/// neighbour order of every `MoveGraph` entry and therefore the tie-break order of the
/// search.
pub const MOVES: [Move; 8] = [
    Move { dr: 3, dc: 0 },
    Move { dr: -3, dc: 0 },
    Move { dr: 0, dc: 3 },
    Move { dr: 0, dc: -3 },
    Move { dr: 2, dc: 2 },
    Move { dr: 2, dc: -2 },
    Move { dr: -2, dc: 2 },
    Move { dr: -2, dc: -2 },
];

impl Move {
    /// The jump that undoes this one.
    pub const fn inverse(self) -> Move {
        Move {
            dr: -self.dr,
            dc: -self.dc,
        }
    }

    /// Applies the jump to `from`, returning the landing cell if it stays on a
    /// `size`×`size` board.
    ///
    /// # Examples
    /// ```
    /// use jump_tour_solver::engine::{Cell, Move};
    /// let down = Move { dr: 3, dc: 0 };
    /// assert_eq!(down.apply(Cell::new(0, 0), 4), Some(Cell::new(3, 0)));
    /// assert_eq!(down.apply(Cell::new(1, 0), 4), None);
    /// ```
    pub fn apply(self, from: Cell, size: usize) -> Option<Cell> {
        let row = from.row.checked_add_signed(self.dr)?;
        let col = from.col.checked_add_signed(self.dc)?;
        let to = Cell { row, col };
        to.in_bounds(size).then_some(to)
    }

    /// Returns the move that takes `from` to `to`, if any.
    pub fn between(from: Cell, to: Cell) -> Option<Move> {
        let dr = to.row as isize - from.row as isize;
        let dc = to.col as isize - from.col as isize;
        MOVES.iter().copied().find(|m| m.dr == dr && m.dc == dc)
    }
}

/// Adjacency of every cell on a square board under the fixed move set.
///
/// Entries are stored row-major; entry `row * size + col` lists the neighbours of
/// `(row, col)` in `MOVES` order. Every cell has an entry, including cells with no
/// neighbours.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MoveGraph {
    size: usize,
    adjacency: Vec<Vec<Cell>>,
}

impl MoveGraph {
    /// Board dimension the graph was built for.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Number of cells (entries) in the graph, `size * size`.
    pub fn len(&self) -> usize {
        self.adjacency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adjacency.is_empty()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.in_bounds(self.size)
    }

    /// Row-major position of `cell`, or `None` if it is off the board.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.contains(cell).then(|| cell.row * self.size + cell.col)
    }

    /// Neighbours of `cell` in move-definition order. Off-board cells have none.
    pub fn neighbors(&self, cell: Cell) -> &[Cell] {
        match self.index_of(cell) {
            Some(idx) => &self.adjacency[idx],
            None => &[],
        }
    }

    pub fn degree(&self, cell: Cell) -> usize {
        self.neighbors(cell).len()
    }

    /// All cells of the board in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let size = self.size;
        (0..self.len()).map(move |idx| Cell::new(idx / size, idx % size))
    }
}

/// Builds the move graph for a `size`×`size` board.
///
/// For every cell the eight moves are applied in `MOVES` order and the results that stay
/// on the board are kept. A size of zero gives an empty graph.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::{build_graph, Cell};
/// let graph = build_graph(4);
/// assert_eq!(graph.len(), 16);
/// assert_eq!(
///     graph.neighbors(Cell::new(0, 0)),
///     &[Cell::new(3, 0), Cell::new(0, 3), Cell::new(2, 2)]
/// );
/// ```
pub fn build_graph(size: usize) -> MoveGraph {
    let mut adjacency = Vec::with_capacity(size * size);
    for r in 0..size {
        for c in 0..size {
            let node = Cell::new(r, c);
            let neighbors = MOVES
                .iter()
                .filter_map(|m| m.apply(node, size))
                .collect();
            adjacency.push(neighbors);
        }
    }
    MoveGraph { size, adjacency }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_build_graph_has_one_entry_per_cell() {
        for size in 0..12 {
            let graph = build_graph(size);
            assert_eq!(graph.len(), size * size, "size {}", size);
            assert_eq!(graph.cells().count(), size * size);
            let unique: HashSet<Cell> = graph.cells().collect();
            assert_eq!(unique.len(), size * size);
        }
    }

    #[test]
    fn test_build_graph_zero_is_empty() {
        let graph = build_graph(0);
        assert!(graph.is_empty());
        assert_eq!(graph.size(), 0);
        assert!(graph.neighbors(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn test_single_cell_has_no_neighbors() {
        let graph = build_graph(1);
        assert_eq!(graph.len(), 1);
        assert!(graph.neighbors(Cell::new(0, 0)).is_empty());
    }

    #[test]
    fn test_neighbors_in_bounds_and_one_move_away() {
        let size = 9;
        let graph = build_graph(size);
        for cell in graph.cells() {
            for &nbr in graph.neighbors(cell) {
                assert!(nbr.in_bounds(size), "{} -> {} leaves the board", cell, nbr);
                let matching = MOVES
                    .iter()
                    .filter(|m| m.apply(cell, size) == Some(nbr))
                    .count();
                assert_eq!(matching, 1, "{} -> {} should match exactly one move", cell, nbr);
            }
        }
    }

    #[test]
    fn test_neighbor_relation_is_symmetric() {
        let graph = build_graph(10);
        for cell in graph.cells() {
            for &nbr in graph.neighbors(cell) {
                let m = Move::between(cell, nbr).unwrap();
                assert_eq!(Move::between(nbr, cell), Some(m.inverse()));
                assert!(graph.neighbors(nbr).contains(&cell));
            }
        }
    }

    #[test]
    fn test_neighbor_order_follows_moves() {
        let graph = build_graph(10);
        let center = Cell::new(5, 5);
        let expected: Vec<Cell> = vec![
            Cell::new(8, 5),
            Cell::new(2, 5),
            Cell::new(5, 8),
            Cell::new(5, 2),
            Cell::new(7, 7),
            Cell::new(7, 3),
            Cell::new(3, 7),
            Cell::new(3, 3),
        ];
        assert_eq!(graph.neighbors(center), expected.as_slice());
        assert_eq!(graph.degree(center), 8);
    }

    #[test]
    fn test_small_board_corner_degrees() {
        let graph = build_graph(4);
        assert_eq!(graph.neighbors(Cell::new(1, 1)), &[Cell::new(3, 3)]);
        assert_eq!(
            graph.neighbors(Cell::new(3, 3)),
            &[Cell::new(0, 3), Cell::new(3, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn test_index_of_and_off_board() {
        let graph = build_graph(3);
        assert_eq!(graph.index_of(Cell::new(2, 1)), Some(7));
        assert_eq!(graph.index_of(Cell::new(3, 0)), None);
        assert!(!graph.contains(Cell::new(0, 3)));
        assert_eq!(graph.degree(Cell::new(7, 7)), 0);
    }

    #[test]
    fn test_move_apply_rejects_negative_coordinates() {
        let up = Move { dr: -2, dc: -2 };
        assert_eq!(up.apply(Cell::new(1, 5), 10), None);
        assert_eq!(up.apply(Cell::new(2, 2), 10), Some(Cell::new(0, 0)));
    }

    #[test]
    fn test_every_move_has_inverse_in_set() {
        for m in MOVES {
            assert!(MOVES.contains(&m.inverse()));
        }
    }
}
