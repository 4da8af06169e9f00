//! Strictly Unblock - sliding-block puzzle logic
//!
//! Pure game rules for the "Unblock Me" / "Rush Hour" family: a fixed grid
//! holds vehicles that each travel in one fixed direction. Selecting a
//! vehicle slides it as far as it can go; the puzzle is solved when every
//! vehicle has left the grid.
//!
//! # Architecture
//!
//! - **Grid**: cell occupancy table
//! - **Board**: grid plus active and exited vehicles
//! - **Rules**: slide resolution and win evaluation
//! - **Invariants / Contracts**: move pre- and postconditions
//! - **Puzzle**: one attempt, with history and reset
//!
//! # Example
//!
//! ```
//! use strictly_unblock::{LevelDescriptor, Orientation, Puzzle, VehicleConfig, VehicleId};
//!
//! # fn example() -> Result<(), strictly_unblock::PuzzleError> {
//! let level = LevelDescriptor::new(
//!     1,
//!     6,
//!     6,
//!     vec![VehicleConfig::new("car".to_string(), 0, 2, Orientation::Right, 2)],
//!     vec![],
//! );
//! let mut puzzle = Puzzle::new(level)?;
//! let result = puzzle.play(VehicleId::from(0))?;
//! assert!(result.exited);
//! assert!(puzzle.is_solved());
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod action;
mod board;
mod contracts;
mod error;
mod grid;
mod level;
mod puzzle;
mod types;
mod vehicle;

pub mod invariants;
pub mod rules;

// Crate-level exports - Domain types
pub use types::{Cell, ExitRule, Orientation, Step, VehicleId, VehicleKind};

// Crate-level exports - Grid and board
pub use board::Board;
pub use grid::{Grid, GridError};
pub use vehicle::{Span, Vehicle};

// Crate-level exports - Level data
pub use level::{ExitPoint, LevelDescriptor, LevelError, VehicleConfig};

// Crate-level exports - Moves and sessions
pub use action::{MoveError, MoveResult};
pub use contracts::{Contract, MoveContract, NothingInFlight, VehicleIsActive};
pub use error::PuzzleError;
pub use puzzle::{Puzzle, PuzzleStatus};
