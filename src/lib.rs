//! # Jump Tour Solver Library
//!
//! This library finds tours of an N×N board in which every cell is visited exactly once
//! and each step is one of eight fixed jumps: three cells along a row or column, or two
//! cells along a diagonal. The search is a backtracking depth-first search that tries
//! candidates in Warnsdorff order (fewest onward options first).
//!
//! It is used by two binaries:
//! - `tour_solver`: Solves one board from a given or random start cell, prints the
//!   numbered grid and can replay the tour as a terminal animation.
//! - `tour_evaluator`: Runs the search from many start cells and reports how often, and
//!   how cheaply, a tour was found.
//!
//! ## Modules
//! - `engine`: Cells, the move set, and the move graph built by `build_graph`.
//! - `solver`: Provides `find_path` and the instrumented `search` variants.
//! - `heuristics`: Candidate ordering (forward degree, Warnsdorff order, open moves).
//! - `render`: Numbered grid and frame-by-frame playback of a finished path.
//! - `utils`: Parsing cells, picking random starts and verifying paths.

pub mod engine;
pub mod heuristics;
pub mod render;
pub mod solver;
pub mod utils;
