use crate::engine::{Cell, MoveGraph};
use crate::heuristics::warnsdorff_order;
use std::fmt;

/// Reasons a search cannot be started.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("start cell {cell} is outside the {size}x{size} board")]
    InvalidStart { cell: Cell, size: usize },
    #[error("board size {found} does not match graph built for size {expected}")]
    SizeMismatch { expected: usize, found: usize },
}

/// How a search ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Termination {
    /// The path covers every cell of the board.
    Complete,
    /// Every branch from the start cell was tried and backtracked.
    Exhausted,
    /// The visit budget ran out before the search finished.
    BudgetExceeded,
}

impl fmt::Display for Termination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Termination::Complete => "complete",
            Termination::Exhausted => "exhausted",
            Termination::BudgetExceeded => "budget exceeded",
        };
        f.pad(label)
    }
}

/// Represents the result of a search run.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Cells in visiting order. Covers the board only when `termination` is `Complete`.
    pub path: Vec<Cell>,
    pub termination: Termination,
    /// Number of times a cell was pushed onto the path, the start cell included.
    pub nodes_visited: u64,
    /// Number of times a cell was popped off the path.
    pub backtracks: u64,
}

impl Solution {
    pub fn is_complete(&self) -> bool {
        self.termination == Termination::Complete
    }
}

/// One level of the depth-first search: a cell on the path and the candidates still to try
/// from it.
struct Frame {
    candidates: Vec<Cell>,
    next: usize,
}

/// Mutable state owned by a single search call.
///
/// `visited[i]` is true exactly when the cell with row-major index `i` is on `path`.
struct SearchState<'a> {
    graph: &'a MoveGraph,
    visited: Vec<bool>,
    path: Vec<Cell>,
    stack: Vec<Frame>,
    nodes_visited: u64,
    backtracks: u64,
}

impl<'a> SearchState<'a> {
    fn new(graph: &'a MoveGraph) -> Self {
        SearchState {
            graph,
            visited: vec![false; graph.len()],
            path: Vec::with_capacity(graph.len()),
            stack: Vec::with_capacity(graph.len()),
            nodes_visited: 0,
            backtracks: 0,
        }
    }

    fn is_visited(&self, cell: Cell) -> bool {
        self.graph
            .index_of(cell)
            .map_or(true, |idx| self.visited[idx])
    }

    fn set_visited(&mut self, cell: Cell, value: bool) {
        if let Some(idx) = self.graph.index_of(cell) {
            self.visited[idx] = value;
        }
    }

    /// Puts `node` on the path. Returns `true` once the path covers the board; otherwise
    /// opens a frame with the Warnsdorff-ordered candidates of `node`.
    fn enter(&mut self, node: Cell) -> bool {
        self.set_visited(node, true);
        self.path.push(node);
        self.nodes_visited += 1;

        if self.path.len() == self.graph.len() {
            return true;
        }

        let candidates = warnsdorff_order(self.graph, node, |c| self.is_visited(c));
        self.stack.push(Frame {
            candidates,
            next: 0,
        });
        false
    }

    /// Undoes the most recent `enter`.
    fn leave(&mut self) {
        self.stack.pop();
        if let Some(node) = self.path.pop() {
            self.set_visited(node, false);
            self.backtracks += 1;
        }
    }

    fn run(mut self, start: Cell, budget: Option<u64>) -> Solution {
        let termination = self.explore(start, budget);
        Solution {
            path: self.path,
            termination,
            nodes_visited: self.nodes_visited,
            backtracks: self.backtracks,
        }
    }

    fn explore(&mut self, start: Cell, budget: Option<u64>) -> Termination {
        if self.enter(start) {
            return Termination::Complete;
        }

        loop {
            let Some(frame) = self.stack.last_mut() else {
                return Termination::Exhausted;
            };

            if frame.next >= frame.candidates.len() {
                self.leave();
                continue;
            }

            let candidate = frame.candidates[frame.next];
            frame.next += 1;

            // Backtracking restores the visited set, so this only trips on a broken frame.
            if self.is_visited(candidate) {
                continue;
            }

            if budget.is_some_and(|limit| self.nodes_visited >= limit) {
                return Termination::BudgetExceeded;
            }

            if self.enter(candidate) {
                return Termination::Complete;
            }
        }
    }
}

fn check_inputs(graph: &MoveGraph, start: Cell, size: usize) -> Result<(), SolveError> {
    if size != graph.size() {
        return Err(SolveError::SizeMismatch {
            expected: graph.size(),
            found: size,
        });
    }
    if !start.in_bounds(size) {
        return Err(SolveError::InvalidStart { cell: start, size });
    }
    Ok(())
}

/// Searches for a path that visits every cell of the board exactly once.
///
/// Runs a backtracking depth-first search from `start`, trying the unvisited neighbours of
/// each cell in Warnsdorff order. The search stops at the first full-coverage path.
///
/// Success is signalled by length only: the returned path has `size * size` cells when a
/// tour was found. When every branch is exhausted all cells, the start included, have
/// been backtracked and the path comes back empty.
///
/// # Errors
/// * `SolveError::SizeMismatch` if `size` is not the size `graph` was built for.
/// * `SolveError::InvalidStart` if `start` lies outside the board.
///
/// A `size` of zero returns an empty path without checking anything else.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::{build_graph, Cell};
/// use jump_tour_solver::solver::find_path;
///
/// let graph = build_graph(5);
/// let path = find_path(&graph, Cell::new(0, 0), 5).unwrap();
/// assert_eq!(path.len(), 25);
///
/// let graph = build_graph(4);
/// let path = find_path(&graph, Cell::new(0, 0), 4).unwrap();
/// assert!(path.len() < 16); // no tour exists on 4x4
/// ```
pub fn find_path(graph: &MoveGraph, start: Cell, size: usize) -> Result<Vec<Cell>, SolveError> {
    if size == 0 {
        return Ok(Vec::new());
    }
    check_inputs(graph, start, size)?;
    Ok(SearchState::new(graph).run(start, None).path)
}

/// Like [`find_path`], but reports how the search ended and how much work it did.
pub fn search(graph: &MoveGraph, start: Cell) -> Result<Solution, SolveError> {
    search_with_budget(graph, start, None)
}

/// Runs the search with an optional cap on the number of visited nodes.
///
/// When the cap is reached the search stops where it is and the partial path is returned
/// with `Termination::BudgetExceeded`. The start cell is visited regardless of the cap.
/// Without a cap the result is the same path
/// [`find_path`] produces.
pub fn search_with_budget(
    graph: &MoveGraph,
    start: Cell,
    budget: Option<u64>,
) -> Result<Solution, SolveError> {
    let size = graph.size();
    if size == 0 {
        return Ok(Solution {
            path: Vec::new(),
            termination: Termination::Exhausted,
            nodes_visited: 0,
            backtracks: 0,
        });
    }
    check_inputs(graph, start, size)?;
    Ok(SearchState::new(graph).run(start, budget))
}
