//! Crate-level error type.

use crate::action::MoveError;
use crate::grid::GridError;
use crate::level::LevelError;
use derive_more::{Display, From};

/// Any error reported by a puzzle operation.
#[derive(Debug, Clone, PartialEq, Eq, Display, From)]
pub enum PuzzleError {
    /// The level descriptor was rejected.
    #[display("Invalid level: {_0}")]
    InvalidLevel(LevelError),

    /// A coordinate query fell outside the grid.
    #[display("{_0}")]
    OutOfRange(GridError),

    /// A move request was rejected.
    #[display("{_0}")]
    Move(MoveError),
}

impl std::error::Error for PuzzleError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PuzzleError::InvalidLevel(e) => Some(e),
            PuzzleError::OutOfRange(e) => Some(e),
            PuzzleError::Move(e) => Some(e),
        }
    }
}
