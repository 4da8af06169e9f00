//! Slide-until-blocked resolution.

use crate::board::Board;
use crate::types::{Cell, ExitRule};
use crate::vehicle::Vehicle;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Outcome of resolving one slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Slide {
    /// Anchor before the move.
    pub from: Cell,
    /// Farthest legal anchor.
    pub to: Cell,
    /// Number of cells travelled.
    pub cells_moved: u32,
    /// The search stopped on another vehicle.
    pub blocked: bool,
    /// The vehicle ends fully beyond its exit boundary.
    pub exited: bool,
}

/// Returns true if `vehicle` may sit at `anchor`.
///
/// Out-of-bounds cells are free. In-bounds cells must be empty or already
/// held by the vehicle itself.
pub fn can_occupy(board: &Board, vehicle: &Vehicle, anchor: Cell) -> bool {
    vehicle
        .cells_at(anchor)
        .all(|cell| match board.cell_at(cell) {
            Err(_) => true,
            Ok(None) => true,
            Ok(Some(occupant)) => occupant == vehicle.id(),
        })
}

/// Finds the farthest anchor the vehicle can slide to along its orientation.
///
/// The search runs at most `max(width, height) + length` steps and stops at
/// the first anchor where the vehicle has fully exited. Under
/// [`ExitRule::StopAtEdge`] a vehicle that is not yet touching its exit edge
/// stops at the last anchor where it still fits inside the grid, including
/// one that enters the grid from past the opposite edge.
#[instrument(
    skip(board, vehicle),
    fields(vehicle = %vehicle.id(), orientation = %vehicle.orientation())
)]
pub fn resolve_slide(board: &Board, vehicle: &Vehicle, rule: ExitRule) -> Slide {
    let (width, height) = (board.width(), board.height());
    let step = vehicle.orientation().step();
    let start = vehicle.anchor();
    let bound = width.max(height) + vehicle.length();

    let parks_at_edge =
        rule == ExitRule::StopAtEdge && !vehicle.reaches_exit_edge(start, width, height);

    let mut best = start;
    let mut moved = 0u32;
    let mut blocked = false;
    let mut exited = false;

    for distance in 1..=bound {
        let candidate = start.offset(step, distance);
        if !can_occupy(board, vehicle, candidate) {
            blocked = true;
            break;
        }
        if parks_at_edge
            && !vehicle.fits_at(candidate, width, height)
            && vehicle.fits_at(best, width, height)
        {
            break;
        }
        best = candidate;
        moved = distance as u32;
        if vehicle.is_exited_at(best, width, height) {
            exited = true;
            break;
        }
    }

    debug!(from = %start, to = %best, moved, blocked, exited, "Slide resolved");
    Slide {
        from: start,
        to: best,
        cells_moved: moved,
        blocked,
        exited,
    }
}
