//! Containment invariant: exited vehicles leave the active set.

use super::Invariant;
use crate::board::Board;

/// Invariant: no active vehicle lies entirely beyond its exit boundary.
///
/// A span may straddle the grid edge, either as authored or while sliding
/// out, but once every cell has passed the exit boundary the vehicle must
/// have been retired.
pub struct ContainmentInvariant;

impl Invariant<Board> for ContainmentInvariant {
    fn holds(board: &Board) -> bool {
        board
            .vehicles()
            .iter()
            .all(|v| !v.is_exited_at(v.anchor(), board.width(), board.height()))
    }

    fn description() -> &'static str {
        "Active vehicles have not fully exited"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelDescriptor, VehicleConfig};
    use crate::types::{Cell, Orientation, VehicleId};

    fn board() -> Board {
        Board::initialize(&LevelDescriptor::new(
            1,
            4,
            4,
            vec![VehicleConfig::new("car".to_string(), 0, 0, Orientation::Right, 2)],
            vec![],
        ))
        .unwrap()
    }

    #[test]
    fn test_straddling_vehicle_is_contained() {
        let mut board = board();
        board.move_vehicle_on_grid(VehicleId::from(0), Cell::new(0, 0), Cell::new(3, 0));
        assert!(ContainmentInvariant::holds(&board));
    }

    #[test]
    fn test_detects_unretired_exited_vehicle() {
        let mut board = board();
        assert!(ContainmentInvariant::holds(&board));

        board.move_vehicle_on_grid(VehicleId::from(0), Cell::new(0, 0), Cell::new(4, 0));
        assert!(!ContainmentInvariant::holds(&board));
    }
}
