use crate::engine::{Cell, MoveGraph};

/// Counts the neighbours of `cell` that have not been visited yet.
///
/// This is the "forward degree" used by Warnsdorff's rule: the number of onward options a
/// cell would still have if the tour moved onto it now.
///
/// # Arguments
/// * `graph`: The move graph of the board.
/// * `cell`: The cell whose onward options are counted.
/// * `is_visited`: Predicate reporting whether a cell is already on the path.
///
/// # Examples
/// ```
/// use jump_tour_solver::engine::{build_graph, Cell};
/// use jump_tour_solver::heuristics::forward_degree;
///
/// let graph = build_graph(4);
/// let corner = Cell::new(0, 0);
/// assert_eq!(forward_degree(&graph, corner, |_| false), 3);
/// assert_eq!(forward_degree(&graph, corner, |c| c == Cell::new(2, 2)), 2);
/// ```
pub fn forward_degree<F>(graph: &MoveGraph, cell: Cell, is_visited: F) -> usize
where
    F: Fn(Cell) -> bool,
{
    graph
        .neighbors(cell)
        .iter()
        .filter(|&&nbr| !is_visited(nbr))
        .count()
}

/// Orders the unvisited neighbours of `node` by Warnsdorff's rule.
///
/// Candidates with the fewest onward options come first, since those are the cells most
/// likely to be stranded later. The sort is stable, so candidates with equal forward degree
/// keep the move-definition order they have in the graph.
///
/// `node` itself is expected to be visited already; its own entry is then excluded from
/// every candidate's count.
///
/// # Returns
/// A `Vec<Cell>` of unvisited neighbours in the order the search should try them.
pub fn warnsdorff_order<F>(graph: &MoveGraph, node: Cell, is_visited: F) -> Vec<Cell>
where
    F: Fn(Cell) -> bool,
{
    let mut candidates: Vec<(usize, Cell)> = graph
        .neighbors(node)
        .iter()
        .copied()
        .filter(|&nbr| !is_visited(nbr))
        .map(|nbr| (forward_degree(graph, nbr, &is_visited), nbr))
        .collect();
    candidates.sort_by_key(|&(degree, _)| degree);
    candidates.into_iter().map(|(_, cell)| cell).collect()
}

/// Returns the cells the tour could jump to next from `from`.
///
/// Used for highlighting during playback; identical to the unvisited neighbours of `from`
/// in move-definition order.
pub fn open_moves<F>(graph: &MoveGraph, from: Cell, is_visited: F) -> Vec<Cell>
where
    F: Fn(Cell) -> bool,
{
    graph
        .neighbors(from)
        .iter()
        .copied()
        .filter(|&nbr| !is_visited(nbr))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::build_graph;
    use std::collections::HashSet;

    #[test]
    fn test_forward_degree_ignores_visited() {
        let graph = build_graph(10);
        let center = Cell::new(5, 5);
        assert_eq!(forward_degree(&graph, center, |_| false), 8);
        assert_eq!(forward_degree(&graph, center, |_| true), 0);

        let visited: HashSet<Cell> = [Cell::new(8, 5), Cell::new(3, 3)].into_iter().collect();
        assert_eq!(forward_degree(&graph, center, |c| visited.contains(&c)), 6);
    }

    #[test]
    fn test_warnsdorff_order_from_corner() {
        // From (0,0) on 4x4: (3,0) and (0,3) each keep 2 onward options once (0,0) is
        // taken, (2,2) is a dead end.
        let graph = build_graph(4);
        let start = Cell::new(0, 0);
        let order = warnsdorff_order(&graph, start, |c| c == start);
        assert_eq!(order, vec![Cell::new(2, 2), Cell::new(3, 0), Cell::new(0, 3)]);
    }

    #[test]
    fn test_warnsdorff_order_is_stable_on_ties() {
        let graph = build_graph(10);
        let start = Cell::new(0, 0);
        let order = warnsdorff_order(&graph, start, |c| c == start);
        let degrees: Vec<usize> = order
            .iter()
            .map(|&cell| forward_degree(&graph, cell, |c| c == start))
            .collect();
        // (3,0) and (0,3) tie at 4, so move order decides between them.
        assert_eq!(degrees, vec![4, 4, 5]);
        assert_eq!(order, vec![Cell::new(3, 0), Cell::new(0, 3), Cell::new(2, 2)]);
    }

    #[test]
    fn test_warnsdorff_order_skips_visited_candidates() {
        let graph = build_graph(4);
        let visited: HashSet<Cell> = [Cell::new(0, 0), Cell::new(2, 2)].into_iter().collect();
        let order = warnsdorff_order(&graph, Cell::new(0, 0), |c| visited.contains(&c));
        assert!(!order.contains(&Cell::new(2, 2)));
        assert_eq!(order.len(), 2);
    }

    #[test]
    fn test_open_moves_keeps_move_order() {
        let graph = build_graph(10);
        let center = Cell::new(5, 5);
        let visited = Cell::new(2, 5);
        let moves = open_moves(&graph, center, |c| c == visited);
        assert_eq!(moves.len(), 7);
        assert_eq!(moves[0], Cell::new(8, 5));
        assert_eq!(moves[1], Cell::new(5, 8));
    }
}
