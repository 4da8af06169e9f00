//! Move results and move errors.
//!
//! A move names a vehicle; its direction is implied by the vehicle's fixed
//! orientation. Results are domain events that can be logged, serialized
//! and replayed.

use crate::rules::Slide;
use crate::types::{Cell, VehicleId};
use serde::{Deserialize, Serialize};

/// The committed outcome of one move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveResult {
    /// The vehicle that was moved.
    pub vehicle: VehicleId,
    /// Anchor before the move.
    pub from: Cell,
    /// Anchor after the move.
    pub to: Cell,
    /// Number of cells travelled.
    pub cells_moved: u32,
    /// The vehicle stopped against another vehicle.
    pub blocked: bool,
    /// The vehicle left the grid.
    pub exited: bool,
    /// This move solved the puzzle.
    pub solved: bool,
}

impl MoveResult {
    pub(crate) fn from_slide(vehicle: VehicleId, slide: Slide, solved: bool) -> Self {
        Self {
            vehicle,
            from: slide.from,
            to: slide.to,
            cells_moved: slide.cells_moved,
            blocked: slide.blocked,
            exited: slide.exited,
            solved,
        }
    }

    /// Returns true if the vehicle did not move.
    pub fn is_bump(&self) -> bool {
        self.cells_moved == 0
    }
}

impl std::fmt::Display for MoveResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} -> {} ({} cells)",
            self.vehicle, self.from, self.to, self.cells_moved
        )?;
        if self.blocked {
            write!(f, " blocked")?;
        }
        if self.exited {
            write!(f, " exited")?;
        }
        if self.solved {
            write!(f, " solved")?;
        }
        Ok(())
    }
}

/// Error that can occur when requesting a move.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum MoveError {
    /// No active vehicle has this id.
    #[display("Vehicle {id} is not on the board")]
    UnknownVehicle {
        /// Requested vehicle.
        id: VehicleId,
    },

    /// The previous move has not been settled yet.
    #[display("Vehicle {id} is still moving")]
    MoveInProgress {
        /// Vehicle of the unsettled move.
        id: VehicleId,
    },

    /// An invariant was violated (postcondition failure).
    #[display("Invariant violation: {_0}")]
    InvariantViolation(String),
}

impl std::error::Error for MoveError {}
