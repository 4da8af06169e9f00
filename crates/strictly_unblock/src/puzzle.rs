//! One puzzle attempt: board state, move history and status.

use crate::action::{MoveError, MoveResult};
use crate::board::Board;
use crate::contracts::{Contract, MoveContract};
use crate::error::PuzzleError;
use crate::level::LevelDescriptor;
use crate::rules::{evaluate, resolve_slide};
use crate::types::{Cell, ExitRule, VehicleId};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

/// Current status of a puzzle attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_more::Display)]
pub enum PuzzleStatus {
    /// Vehicles remain on the grid.
    #[display("in progress")]
    InProgress,
    /// Every vehicle has left the grid.
    #[display("solved")]
    Solved,
}

/// A single puzzle attempt.
///
/// Owned by whoever orchestrates the attempt and mutated only through
/// `&mut self`. Each move is committed to the board before
/// [`request_move`](Puzzle::request_move) returns; the puzzle then stays
/// in flight until the host calls [`settle`](Puzzle::settle), so a host
/// animating the move cannot start another one meanwhile.
#[derive(Debug, Clone)]
pub struct Puzzle {
    level: LevelDescriptor,
    exit_rule: ExitRule,
    board: Board,
    status: PuzzleStatus,
    history: Vec<MoveResult>,
    in_flight: Option<VehicleId>,
}

impl Puzzle {
    /// Starts an attempt with the default exit rule, [`ExitRule::Immediate`].
    ///
    /// Under `Immediate` a car with a clear path leaves the grid in one move:
    /// a length-2 LEFT car at (1, 3) lands on (-2, 3) and retires. Hosts
    /// that want the car to stop at the edge first, so that a RIGHT car at
    /// (0, 2) on a 6x6 grid parks on (4, 2) and exits on the next move,
    /// should use [`with_exit_rule`](Puzzle::with_exit_rule) with
    /// [`ExitRule::StopAtEdge`].
    pub fn new(level: LevelDescriptor) -> Result<Self, PuzzleError> {
        Self::with_exit_rule(level, ExitRule::default())
    }

    /// Starts an attempt with an explicit exit rule.
    ///
    /// # Errors
    ///
    /// Returns [`PuzzleError::InvalidLevel`] if the descriptor is malformed;
    /// no board state is built in that case.
    #[instrument(skip(level), fields(level_id = *level.level_id()))]
    pub fn with_exit_rule(
        level: LevelDescriptor,
        exit_rule: ExitRule,
    ) -> Result<Self, PuzzleError> {
        let board = Board::initialize(&level).inspect_err(|e| {
            warn!(error = %e, "Level rejected");
        })?;
        let status = initial_status(&board);
        info!(vehicles = board.vehicles().len(), %status, "Puzzle started");

        Ok(Self {
            level,
            exit_rule,
            board,
            status,
            history: Vec::new(),
            in_flight: None,
        })
    }

    /// Rebuilds an attempt by playing a sequence of moves.
    #[instrument(skip(level, moves), fields(moves = moves.len()))]
    pub fn replay(
        level: LevelDescriptor,
        exit_rule: ExitRule,
        moves: &[VehicleId],
    ) -> Result<Self, PuzzleError> {
        let mut puzzle = Self::with_exit_rule(level, exit_rule)?;
        for id in moves {
            puzzle.play(*id)?;
        }
        Ok(puzzle)
    }

    /// Slides a vehicle as far as it can go and commits the result.
    ///
    /// A blocked vehicle reports zero displacement and leaves the board
    /// untouched. The puzzle is in flight afterwards until
    /// [`settle`](Puzzle::settle) is called.
    ///
    /// # Errors
    ///
    /// - [`MoveError::MoveInProgress`] if the previous move is unsettled
    /// - [`MoveError::UnknownVehicle`] if the vehicle is not active
    /// - [`MoveError::InvariantViolation`] in debug builds, if the committed
    ///   board breaks an invariant; the move is rolled back first
    #[instrument(skip(self), fields(vehicle = %id))]
    pub fn request_move(&mut self, id: VehicleId) -> Result<MoveResult, PuzzleError> {
        MoveContract::pre(self, &id).inspect_err(|e| {
            warn!(error = %e, "Move rejected");
        })?;

        #[cfg(debug_assertions)]
        let before = self.clone();

        let vehicle = self
            .board
            .vehicle(id)
            .ok_or(MoveError::UnknownVehicle { id })?;
        let slide = resolve_slide(&self.board, vehicle, self.exit_rule);

        if slide.cells_moved > 0 {
            self.board.move_vehicle_on_grid(id, slide.from, slide.to);
        }

        let evaluation = evaluate(&mut self.board);
        let solved_now = evaluation.solved && self.status == PuzzleStatus::InProgress;
        if solved_now {
            self.status = PuzzleStatus::Solved;
            info!(moves = self.history.len() + 1, "Puzzle solved");
        }

        let result = MoveResult::from_slide(id, slide, solved_now);
        self.history.push(result);
        self.in_flight = Some(id);
        debug!(%result, "Move committed");

        #[cfg(debug_assertions)]
        if let Err(e) = MoveContract::post(&before, self) {
            warn!(error = %e, "Move rolled back");
            *self = before;
            return Err(e.into());
        }

        Ok(result)
    }

    /// Marks the in-flight move as finished. Returns its vehicle, if any.
    pub fn settle(&mut self) -> Option<VehicleId> {
        self.in_flight.take()
    }

    /// Requests a move and settles it immediately.
    pub fn play(&mut self, id: VehicleId) -> Result<MoveResult, PuzzleError> {
        let result = self.request_move(id)?;
        self.settle();
        Ok(result)
    }

    /// Restarts the attempt from the level descriptor.
    #[instrument(skip(self), fields(level_id = *self.level.level_id()))]
    pub fn reset(&mut self) -> Result<(), PuzzleError> {
        self.board = Board::initialize(&self.level)?;
        self.status = initial_status(&self.board);
        self.history.clear();
        self.in_flight = None;
        info!("Puzzle reset");
        Ok(())
    }

    /// Returns true once every vehicle has left the grid.
    pub fn is_solved(&self) -> bool {
        self.status == PuzzleStatus::Solved
    }

    /// Returns the current status.
    pub fn status(&self) -> PuzzleStatus {
        self.status
    }

    /// Returns the vehicle of the unsettled move, if any.
    pub fn in_flight(&self) -> Option<VehicleId> {
        self.in_flight
    }

    /// Returns the vehicle occupying a cell.
    pub fn cell_at(&self, cell: Cell) -> Result<Option<VehicleId>, PuzzleError> {
        Ok(self.board.cell_at(cell)?)
    }

    /// Returns the board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Returns the level this attempt was built from.
    pub fn level(&self) -> &LevelDescriptor {
        &self.level
    }

    /// Returns the exit rule in force.
    pub fn exit_rule(&self) -> ExitRule {
        self.exit_rule
    }

    /// Returns every committed move, including bumps.
    pub fn history(&self) -> &[MoveResult] {
        &self.history
    }
}

fn initial_status(board: &Board) -> PuzzleStatus {
    if board.vehicles().is_empty() {
        PuzzleStatus::Solved
    } else {
        PuzzleStatus::InProgress
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::level::VehicleConfig;
    use crate::types::Orientation;

    fn level() -> LevelDescriptor {
        LevelDescriptor::new(
            3,
            6,
            6,
            vec![
                VehicleConfig::new("car".to_string(), 0, 2, Orientation::Right, 2),
                VehicleConfig::new("truck".to_string(), 3, 1, Orientation::Down, 3),
            ],
            vec![],
        )
    }

    #[test]
    fn test_blocked_move_leaves_board_unchanged() {
        let mut puzzle = Puzzle::new(level()).unwrap();
        puzzle.play(VehicleId::from(0)).unwrap();
        let board = puzzle.board().clone();

        let result = puzzle.play(VehicleId::from(0)).unwrap();
        assert!(result.blocked);
        assert!(result.is_bump());
        assert_eq!(puzzle.board(), &board);
    }

    #[test]
    fn test_second_request_while_in_flight_is_rejected() {
        let mut puzzle = Puzzle::new(level()).unwrap();
        puzzle.request_move(VehicleId::from(1)).unwrap();
        let board = puzzle.board().clone();

        let err = puzzle.request_move(VehicleId::from(0)).unwrap_err();
        assert_eq!(
            err,
            PuzzleError::Move(MoveError::MoveInProgress {
                id: VehicleId::from(1)
            })
        );
        assert_eq!(puzzle.board(), &board);

        assert_eq!(puzzle.settle(), Some(VehicleId::from(1)));
        assert!(puzzle.request_move(VehicleId::from(0)).is_ok());
    }

    #[test]
    fn test_solved_is_signalled_once() {
        let mut puzzle = Puzzle::new(level()).unwrap();
        let first = puzzle.play(VehicleId::from(1)).unwrap();
        assert!(first.exited);
        assert!(!first.solved);

        let second = puzzle.play(VehicleId::from(0)).unwrap();
        assert!(second.exited);
        assert!(second.solved);
        assert!(puzzle.is_solved());

        let after = puzzle.play(VehicleId::from(0));
        assert!(matches!(
            after,
            Err(PuzzleError::Move(MoveError::UnknownVehicle { .. }))
        ));
        assert!(puzzle.is_solved());
        assert_eq!(puzzle.history().iter().filter(|m| m.solved).count(), 1);
    }

    #[test]
    fn test_reset_restores_initial_board() {
        let mut puzzle = Puzzle::new(level()).unwrap();
        let initial = puzzle.board().clone();
        puzzle.play(VehicleId::from(1)).unwrap();
        puzzle.request_move(VehicleId::from(0)).unwrap();

        puzzle.reset().unwrap();
        assert_eq!(puzzle.board(), &initial);
        assert!(puzzle.history().is_empty());
        assert_eq!(puzzle.in_flight(), None);
        assert_eq!(puzzle.status(), PuzzleStatus::InProgress);
    }

    #[test]
    fn test_replay_matches_incremental_play() {
        let moves = [VehicleId::from(0), VehicleId::from(1), VehicleId::from(0)];
        let replayed = Puzzle::replay(level(), ExitRule::Immediate, &moves).unwrap();

        let mut played = Puzzle::new(level()).unwrap();
        for id in moves {
            played.play(id).unwrap();
        }
        assert_eq!(replayed.board(), played.board());
        assert_eq!(replayed.history(), played.history());
        assert!(replayed.is_solved());
    }

    #[cfg(debug_assertions)]
    #[test]
    fn test_failed_postcondition_rolls_back() {
        let mut puzzle = Puzzle::new(level()).unwrap();
        // A stray cell for the truck breaks occupancy once any move commits.
        puzzle
            .board
            .grid_mut()
            .set_cell(Cell::new(0, 5), Some(VehicleId::from(1)))
            .unwrap();
        let board = puzzle.board().clone();

        let err = puzzle.request_move(VehicleId::from(0)).unwrap_err();
        assert!(matches!(
            err,
            PuzzleError::Move(MoveError::InvariantViolation(_))
        ));
        assert_eq!(puzzle.board(), &board);
        assert!(puzzle.history().is_empty());
        assert_eq!(puzzle.in_flight(), None);
        assert_eq!(puzzle.status(), PuzzleStatus::InProgress);
    }

    #[test]
    fn test_cell_query_out_of_range() {
        let puzzle = Puzzle::new(level()).unwrap();
        assert!(matches!(
            puzzle.cell_at(Cell::new(6, 0)),
            Err(PuzzleError::OutOfRange(_))
        ));
    }
}
