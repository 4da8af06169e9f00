//! Movement and win rules.
//!
//! Pure functions over a [`Board`](crate::Board): the slide resolver decides
//! where a vehicle ends up, the win evaluator decides which vehicles have
//! left and whether the puzzle is done.

pub mod slide;
pub mod win;

pub use slide::{Slide, can_occupy, resolve_slide};
pub use win::{WinEvaluation, evaluate, exited_vehicles, is_exited, is_solved};
