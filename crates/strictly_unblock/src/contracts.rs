//! Contract-based validation for move requests.
//!
//! Preconditions are always checked before a move is resolved;
//! postconditions run in debug builds after the move is committed.

use crate::action::MoveError;
use crate::invariants::{BoardInvariants, InvariantSet};
use crate::puzzle::Puzzle;
use crate::types::VehicleId;
use tracing::{instrument, warn};

/// A contract defines preconditions and postconditions for state transitions.
pub trait Contract<S, A> {
    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<(), MoveError>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), MoveError>;
}

/// Precondition: the previous move has been settled.
pub struct NothingInFlight;

impl NothingInFlight {
    /// Fails if a move is still awaiting `settle`.
    #[instrument(skip(puzzle))]
    pub fn check(puzzle: &Puzzle) -> Result<(), MoveError> {
        match puzzle.in_flight() {
            Some(id) => Err(MoveError::MoveInProgress { id }),
            None => Ok(()),
        }
    }
}

/// Precondition: the vehicle is in the active set.
pub struct VehicleIsActive;

impl VehicleIsActive {
    /// Fails if the vehicle is unknown or has already exited.
    #[instrument(skip(puzzle))]
    pub fn check(id: &VehicleId, puzzle: &Puzzle) -> Result<(), MoveError> {
        if puzzle.board().vehicle(*id).is_none() {
            Err(MoveError::UnknownVehicle { id: *id })
        } else {
            Ok(())
        }
    }
}

/// Contract for move requests.
///
/// Preconditions:
/// - No move in flight
/// - Vehicle is active
///
/// Postconditions:
/// - Board invariants hold
/// - A solved puzzle stays solved
pub struct MoveContract;

impl Contract<Puzzle, VehicleId> for MoveContract {
    fn pre(puzzle: &Puzzle, id: &VehicleId) -> Result<(), MoveError> {
        NothingInFlight::check(puzzle)?;
        VehicleIsActive::check(id, puzzle)?;
        Ok(())
    }

    fn post(before: &Puzzle, after: &Puzzle) -> Result<(), MoveError> {
        if before.is_solved() && !after.is_solved() {
            warn!("Solved puzzle became unsolved");
            return Err(MoveError::InvariantViolation(
                "Postcondition failed: solved puzzle became unsolved".to_string(),
            ));
        }

        BoardInvariants::check_all(after.board()).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            warn!(%descriptions, "Board invariants violated");
            MoveError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::{LevelDescriptor, VehicleConfig};
    use crate::types::Orientation;

    fn puzzle() -> Puzzle {
        Puzzle::new(LevelDescriptor::new(
            1,
            6,
            6,
            vec![
                VehicleConfig::new("car".to_string(), 0, 2, Orientation::Right, 2),
                VehicleConfig::new("truck".to_string(), 3, 1, Orientation::Down, 3),
            ],
            vec![],
        ))
        .unwrap()
    }

    #[test]
    fn test_precondition_accepts_active_vehicle() {
        assert!(MoveContract::pre(&puzzle(), &VehicleId::from(0)).is_ok());
    }

    #[test]
    fn test_precondition_rejects_unknown_vehicle() {
        assert_eq!(
            MoveContract::pre(&puzzle(), &VehicleId::from(9)),
            Err(MoveError::UnknownVehicle {
                id: VehicleId::from(9)
            })
        );
    }

    #[test]
    fn test_precondition_rejects_unsettled_move() {
        let mut puzzle = puzzle();
        puzzle.request_move(VehicleId::from(0)).unwrap();
        assert_eq!(
            MoveContract::pre(&puzzle, &VehicleId::from(1)),
            Err(MoveError::MoveInProgress {
                id: VehicleId::from(0)
            })
        );
    }

    #[test]
    fn test_postcondition_holds_after_move() {
        let before = puzzle();
        let mut after = before.clone();
        after.play(VehicleId::from(1)).unwrap();
        assert!(MoveContract::post(&before, &after).is_ok());
    }
}
