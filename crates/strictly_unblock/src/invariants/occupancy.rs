//! Occupancy invariant: the grid mirrors vehicle positions exactly.

use super::Invariant;
use crate::board::Board;
use crate::types::{Cell, VehicleId};
use std::collections::BTreeSet;
use tracing::warn;

/// Invariant: grid occupancy equals the in-bounds cells of active vehicles.
///
/// Recomputes occupancy from vehicle anchors and compares it with the
/// stored grid, so stale cells and missing cells are both caught.
pub struct OccupancyInvariant;

impl Invariant<Board> for OccupancyInvariant {
    fn holds(board: &Board) -> bool {
        let grid = board.grid();
        let expected: BTreeSet<(Cell, VehicleId)> = board
            .vehicles()
            .iter()
            .flat_map(|v| v.cells().map(move |cell| (cell, v.id())))
            .filter(|(cell, _)| grid.contains(*cell))
            .collect();
        let stored: BTreeSet<(Cell, VehicleId)> = grid.occupied().collect();

        let valid = expected == stored;
        if !valid {
            warn!(
                expected = expected.len(),
                stored = stored.len(),
                "Grid occupancy diverged from vehicle positions"
            );
        }
        valid
    }

    fn description() -> &'static str {
        "Grid occupancy matches vehicle positions"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelDescriptor, VehicleConfig};
    use crate::types::Orientation;

    #[test]
    fn test_detects_stale_cell() {
        let mut board = Board::initialize(&LevelDescriptor::new(
            1,
            4,
            4,
            vec![VehicleConfig::new("car".to_string(), 0, 0, Orientation::Up, 2)],
            vec![],
        ))
        .unwrap();
        assert!(OccupancyInvariant::holds(&board));

        board
            .grid_mut()
            .set_cell(Cell::new(3, 3), Some(VehicleId::from(0)))
            .unwrap();
        assert!(!OccupancyInvariant::holds(&board));
    }

    #[test]
    fn test_detects_missing_cell() {
        let mut board = Board::initialize(&LevelDescriptor::new(
            1,
            4,
            4,
            vec![VehicleConfig::new("car".to_string(), 1, 1, Orientation::Right, 2)],
            vec![],
        ))
        .unwrap();

        board.grid_mut().set_cell(Cell::new(2, 1), None).unwrap();
        assert!(!OccupancyInvariant::holds(&board));
    }
}
