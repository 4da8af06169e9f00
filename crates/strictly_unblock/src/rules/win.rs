//! Exit detection and the all-vehicles-out win rule.

use crate::board::Board;
use crate::types::VehicleId;
use crate::vehicle::Vehicle;
use tracing::{debug, info, instrument};

/// Result of evaluating the board after a move.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WinEvaluation {
    /// Vehicles removed from the active set by this evaluation.
    pub retired: Vec<VehicleId>,
    /// No active vehicles remain.
    pub solved: bool,
}

/// Returns true if the vehicle lies entirely beyond its exit boundary.
pub fn is_exited(vehicle: &Vehicle, board: &Board) -> bool {
    vehicle.is_exited_at(vehicle.anchor(), board.width(), board.height())
}

/// Ids of active vehicles that have exited but are not yet retired.
pub fn exited_vehicles(board: &Board) -> Vec<VehicleId> {
    board
        .vehicles()
        .iter()
        .filter(|v| is_exited(v, board))
        .map(Vehicle::id)
        .collect()
}

/// Returns true if every active vehicle has exited.
///
/// A board with no active vehicles is solved.
pub fn is_solved(board: &Board) -> bool {
    board.vehicles().iter().all(|v| is_exited(v, board))
}

/// Retires exited vehicles and reports whether the puzzle is solved.
#[instrument(skip(board))]
pub fn evaluate(board: &mut Board) -> WinEvaluation {
    let (width, height) = (board.width(), board.height());
    let retired = board.retire_exited(|v| v.is_exited_at(v.anchor(), width, height));
    if !retired.is_empty() {
        debug!(?retired, "Vehicles left the grid");
    }

    let solved = board.vehicles().is_empty();
    if solved && !retired.is_empty() {
        info!("All vehicles have left the grid");
    }
    WinEvaluation { retired, solved }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelDescriptor, VehicleConfig};
    use crate::types::{Cell, Orientation};

    fn board(vehicles: Vec<(i32, i32, Orientation, i32)>) -> Board {
        let configs = vehicles
            .into_iter()
            .map(|(x, y, d, len)| VehicleConfig::new("truck".to_string(), x, y, d, len))
            .collect();
        Board::initialize(&LevelDescriptor::new(1, 6, 6, configs, vec![])).unwrap()
    }

    #[test]
    fn test_empty_board_is_solved() {
        let mut board = board(vec![]);
        assert!(is_solved(&board));
        assert_eq!(
            evaluate(&mut board),
            WinEvaluation {
                retired: vec![],
                solved: true
            }
        );
    }

    #[test]
    fn test_vehicle_inside_grid_is_not_exited() {
        let mut board = board(vec![(4, 0, Orientation::Right, 2)]);
        assert!(exited_vehicles(&board).is_empty());
        assert!(!is_solved(&board));
        assert!(!evaluate(&mut board).solved);
    }

    #[test]
    fn test_partial_exit_retires_only_exited() {
        let mut board = board(vec![(0, 0, Orientation::Right, 2), (0, 3, Orientation::Left, 3)]);
        let id = VehicleId::from(1);
        board.move_vehicle_on_grid(id, Cell::new(0, 3), Cell::new(-3, 3));
        assert_eq!(exited_vehicles(&board), vec![id]);

        let evaluation = evaluate(&mut board);
        assert_eq!(evaluation.retired, vec![id]);
        assert!(!evaluation.solved);
        assert_eq!(board.exited().len(), 1);
        assert_eq!(board.vehicles().len(), 1);
    }

    #[test]
    fn test_last_exit_solves() {
        let mut board = board(vec![(2, 0, Orientation::Down, 2)]);
        let id = VehicleId::from(0);
        board.move_vehicle_on_grid(id, Cell::new(2, 0), Cell::new(2, -2));

        let evaluation = evaluate(&mut board);
        assert!(evaluation.solved);
        assert!(board.grid().is_empty());
    }
}
