//! Text presentation of a finished tour.
//!
//! Nothing here searches; everything is computed from a path that already exists.
//! - `TourGrid`: the board with each cell numbered by its position in the path.
//! - `Frames`: step-by-step playback of a path, yielding a `Frame` per placed cell with the
//!   cells that are open for the next jump and the ones that are not.
use crate::engine::{Cell, MoveGraph};
use crate::heuristics::open_moves;
use std::fmt;

/// Width of one rendered cell, including the trailing space.
pub const CELL_WIDTH: usize = 4;

/// Text for a cell that is not on the path and cannot be reached next.
pub const UNREACHABLE_CELL: &str = "... ";

/// Text for a cell that the next jump could land on.
pub const OPEN_CELL: &str = " *  ";

/// Formats a move-order index the way it appears in the grid.
pub fn placed_cell(order: usize) -> String {
    format!("{:>3} ", order)
}

/// A board annotated with move order.
///
/// `path[i]` is stored as `i + 1`; cells not on the path hold 0.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::Cell;
/// use jump_tour_solver::render::TourGrid;
///
/// let grid = TourGrid::from_path(&[Cell::new(0, 0), Cell::new(0, 3)], 4);
/// assert_eq!(grid.order_of(Cell::new(0, 3)), 2);
/// assert_eq!(grid.order_of(Cell::new(1, 1)), 0);
/// assert_eq!(grid.to_string().lines().next(), Some("  1   0   0   2 "));
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TourGrid {
    size: usize,
    orders: Vec<usize>,
}

impl TourGrid {
    pub fn new(size: usize) -> Self {
        TourGrid {
            size,
            orders: vec![0; size * size],
        }
    }

    /// Numbers every cell of `path` by its 1-based position. Cells off the board are
    /// skipped.
    pub fn from_path(path: &[Cell], size: usize) -> Self {
        let mut grid = TourGrid::new(size);
        for (i, &cell) in path.iter().enumerate() {
            grid.place(cell, i + 1);
        }
        grid
    }

    pub fn size(&self) -> usize {
        self.size
    }

    /// Records `order` at `cell`. Returns `false` if the cell is off the board.
    pub fn place(&mut self, cell: Cell, order: usize) -> bool {
        if !cell.in_bounds(self.size) {
            return false;
        }
        self.orders[cell.row * self.size + cell.col] = order;
        true
    }

    /// Move order of `cell`, or 0 if it is not on the path (or not on the board).
    pub fn order_of(&self, cell: Cell) -> usize {
        if cell.in_bounds(self.size) {
            self.orders[cell.row * self.size + cell.col]
        } else {
            0
        }
    }

    pub fn is_placed(&self, cell: Cell) -> bool {
        self.order_of(cell) != 0
    }
}

impl fmt::Display for TourGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.size {
            for c in 0..self.size {
                write!(f, "{}", placed_cell(self.orders[r * self.size + c]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// The board right after one cell of the path has been placed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    /// 0-based position of `current` in the path.
    pub step: usize,
    pub current: Cell,
    /// Unplaced cells one jump away from `current`, in move order.
    pub open: Vec<Cell>,
    /// Every other unplaced cell, row-major.
    pub unreachable: Vec<Cell>,
}

impl Frame {
    /// Move-order index shown for `current`.
    pub fn order(&self) -> usize {
        self.step + 1
    }

    /// True when nothing is left to jump to although unplaced cells remain.
    pub fn is_stuck(&self) -> bool {
        self.open.is_empty() && !self.unreachable.is_empty()
    }
}

/// Playback of a path, one `Frame` per cell.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::{build_graph, Cell};
/// use jump_tour_solver::render::Frames;
///
/// let graph = build_graph(4);
/// let path = [Cell::new(0, 0), Cell::new(2, 2)];
/// let frames: Vec<_> = Frames::new(&graph, &path).collect();
/// assert_eq!(frames.len(), 2);
/// assert_eq!(frames[0].open, vec![Cell::new(3, 0), Cell::new(0, 3), Cell::new(2, 2)]);
/// assert!(frames[1].is_stuck());
/// ```
pub struct Frames<'a> {
    graph: &'a MoveGraph,
    path: &'a [Cell],
    grid: TourGrid,
    step: usize,
}

impl<'a> Frames<'a> {
    pub fn new(graph: &'a MoveGraph, path: &'a [Cell]) -> Self {
        Frames {
            graph,
            path,
            grid: TourGrid::new(graph.size()),
            step: 0,
        }
    }

    /// The grid as of the last yielded frame.
    pub fn grid(&self) -> &TourGrid {
        &self.grid
    }
}

impl Iterator for Frames<'_> {
    type Item = Frame;

    fn next(&mut self) -> Option<Frame> {
        let &current = self.path.get(self.step)?;
        let step = self.step;
        self.step += 1;
        self.grid.place(current, step + 1);

        let open = open_moves(self.graph, current, |c| self.grid.is_placed(c));
        let unreachable = self
            .graph
            .cells()
            .filter(|&c| !self.grid.is_placed(c) && !open.contains(&c))
            .collect();

        Some(Frame {
            step,
            current,
            open,
            unreachable,
        })
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.path.len() - self.step;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Frames<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_graph;
    use crate::solver::find_path;

    #[test]
    fn test_tour_grid_display_formatting() {
        let path = [Cell::new(0, 0), Cell::new(2, 2)];
        let grid = TourGrid::from_path(&path, 3);
        let display = grid.to_string();
        assert_eq!(display, "  1   0   0 \n  0   0   0 \n  0   0   2 \n");
    }

    #[test]
    fn test_tour_grid_full_ten_by_ten() {
        let graph = build_graph(10);
        let path = find_path(&graph, Cell::new(0, 0), 10).unwrap();
        let grid = TourGrid::from_path(&path, 10);
        let display = grid.to_string();
        assert_eq!(display.lines().count(), 10);
        for line in display.lines() {
            assert_eq!(line.len(), 10 * CELL_WIDTH);
        }
        assert_eq!(grid.order_of(Cell::new(0, 0)), 1);
        assert_eq!(grid.order_of(Cell::new(3, 0)), 2);
        assert_eq!(grid.order_of(Cell::new(7, 2)), 100);
        assert!(graph.cells().all(|c| grid.is_placed(c)));
    }

    #[test]
    fn test_tour_grid_ignores_off_board_cells() {
        let mut grid = TourGrid::new(2);
        assert!(!grid.place(Cell::new(2, 0), 5));
        assert_eq!(grid.order_of(Cell::new(2, 0)), 0);
        assert!(grid.place(Cell::new(1, 1), 5));
        assert_eq!(grid.order_of(Cell::new(1, 1)), 5);
    }

    #[test]
    fn test_cell_texts_have_fixed_width() {
        assert_eq!(placed_cell(7), "  7 ");
        assert_eq!(placed_cell(100), "100 ");
        assert_eq!(OPEN_CELL.len(), CELL_WIDTH);
        assert_eq!(UNREACHABLE_CELL.len(), CELL_WIDTH);
    }

    #[test]
    fn test_frames_partition_unplaced_cells() {
        let size = 5;
        let graph = build_graph(size);
        let path = find_path(&graph, Cell::new(0, 0), size).unwrap();
        let mut frames = Frames::new(&graph, &path);
        assert_eq!(frames.len(), 25);

        let mut count = 0;
        while let Some(frame) = frames.next() {
            let placed = frame.step + 1;
            assert_eq!(frame.current, path[frame.step]);
            assert_eq!(frame.order(), placed);
            assert_eq!(placed + frame.open.len() + frame.unreachable.len(), size * size);
            for cell in &frame.open {
                assert!(!frames.grid().is_placed(*cell));
                assert!(graph.neighbors(frame.current).contains(cell));
            }
            if frame.step + 1 < path.len() {
                assert!(frame.open.contains(&path[frame.step + 1]));
                assert!(!frame.is_stuck());
            }
            count += 1;
        }
        assert_eq!(count, 25);
    }

    #[test]
    fn test_last_frame_of_complete_tour() {
        let graph = build_graph(5);
        let path = find_path(&graph, Cell::new(2, 2), 5).unwrap();
        let last = Frames::new(&graph, &path).last().unwrap();
        assert_eq!(last.order(), 25);
        assert!(last.open.is_empty());
        assert!(last.unreachable.is_empty());
        assert!(!last.is_stuck());
    }

    #[test]
    fn test_frames_of_empty_path() {
        let graph = build_graph(4);
        assert_eq!(Frames::new(&graph, &[]).count(), 0);
    }
}
