//! No-overlap invariant: vehicles never share a cell.

use super::Invariant;
use crate::board::Board;
use std::collections::HashSet;

/// Invariant: the in-bounds cells of distinct active vehicles are disjoint.
///
/// Checked from vehicle geometry, independently of the grid's contents.
/// Cells past the edge are never stored, so they cannot collide.
pub struct NoOverlapInvariant;

impl Invariant<Board> for NoOverlapInvariant {
    fn holds(board: &Board) -> bool {
        let grid = board.grid();
        let mut seen = HashSet::new();
        board
            .vehicles()
            .iter()
            .flat_map(|v| v.cells())
            .filter(|cell| grid.contains(*cell))
            .all(|cell| seen.insert(cell))
    }

    fn description() -> &'static str {
        "No two vehicles share a cell"
    }
}
