//! Core domain types for sliding-block puzzles.

use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use std::ops::Add;

/// Identifier of a vehicle within one board.
///
/// Ids are assigned in level-descriptor order, starting at 0.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Display, From, Serialize, Deserialize,
)]
#[display("#{_0}")]
#[serde(transparent)]
pub struct VehicleId(usize);

impl VehicleId {
    /// Returns the descriptor index this id was assigned from.
    pub fn index(self) -> usize {
        self.0
    }
}

/// A cell coordinate on the grid.
///
/// Coordinates are signed: a vehicle leaving the grid has an anchor
/// beyond the boundary, and the resolver probes such cells.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Display,
    Serialize,
    Deserialize,
    derive_new::new,
)]
#[display("({x}, {y})")]
pub struct Cell {
    /// Column, growing to the right.
    pub x: i32,
    /// Row, growing upwards.
    pub y: i32,
}

impl Cell {
    /// Returns the cell `distance` unit steps away along `step`.
    pub fn offset(self, step: Step, distance: i32) -> Self {
        Self {
            x: self.x.saturating_add(step.dx.saturating_mul(distance)),
            y: self.y.saturating_add(step.dy.saturating_mul(distance)),
        }
    }
}

impl Add<Step> for Cell {
    type Output = Cell;

    fn add(self, step: Step) -> Cell {
        self.offset(step, 1)
    }
}

/// A unit displacement along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Step {
    /// Horizontal component (-1, 0 or 1).
    pub dx: i32,
    /// Vertical component (-1, 0 or 1).
    pub dy: i32,
}

/// Fixed direction of travel for a vehicle.
///
/// A vehicle never turns; it may only ever move along this direction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
#[serde(try_from = "OrientationRepr", into = "String")]
pub enum Orientation {
    /// Travels towards increasing y.
    Up,
    /// Travels towards decreasing y.
    Down,
    /// Travels towards decreasing x.
    Left,
    /// Travels towards increasing x.
    Right,
}

impl Orientation {
    /// Unit displacement of one move step.
    pub fn step(self) -> Step {
        match self {
            Orientation::Up => Step { dx: 0, dy: 1 },
            Orientation::Down => Step { dx: 0, dy: -1 },
            Orientation::Left => Step { dx: -1, dy: 0 },
            Orientation::Right => Step { dx: 1, dy: 0 },
        }
    }

    /// Direction in which a vehicle's span extends from its anchor.
    ///
    /// Always towards increasing coordinates on the travel axis, so the
    /// anchor is the lowest cell of the span.
    pub fn span_step(self) -> Step {
        if self.is_horizontal() {
            Step { dx: 1, dy: 0 }
        } else {
            Step { dx: 0, dy: 1 }
        }
    }

    /// Returns true for LEFT and RIGHT.
    pub fn is_horizontal(self) -> bool {
        matches!(self, Orientation::Left | Orientation::Right)
    }

    /// Index used by the level authoring tool (UP=0, DOWN=1, LEFT=2, RIGHT=3).
    pub fn from_index(index: u8) -> Option<Self> {
        match index {
            0 => Some(Orientation::Up),
            1 => Some(Orientation::Down),
            2 => Some(Orientation::Left),
            3 => Some(Orientation::Right),
            _ => None,
        }
    }
}

/// Wire form of an orientation: either a name or the authoring tool index.
#[derive(Deserialize)]
#[serde(untagged)]
enum OrientationRepr {
    Index(u8),
    Name(String),
}

impl TryFrom<OrientationRepr> for Orientation {
    type Error = String;

    fn try_from(repr: OrientationRepr) -> Result<Self, Self::Error> {
        match repr {
            OrientationRepr::Index(index) => Orientation::from_index(index)
                .ok_or_else(|| format!("direction index {} out of range 0..=3", index)),
            OrientationRepr::Name(name) => name
                .parse()
                .map_err(|_| format!("unknown direction '{}'", name)),
        }
    }
}

impl From<Orientation> for String {
    fn from(orientation: Orientation) -> Self {
        orientation.to_string()
    }
}

/// Kind of vehicle, as authored in level data.
///
/// The kind carries no movement semantics; length is authored separately.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum VehicleKind {
    /// Two-cell passenger car.
    Car,
    /// Three-cell truck.
    Truck,
    /// Three-cell bus.
    Bus,
}

/// How a vehicle behaves when its path to the boundary is clear.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
#[serde(rename_all = "snake_case")]
pub enum ExitRule {
    /// A clear path carries the vehicle off the grid in one move.
    #[default]
    Immediate,
    /// The vehicle first parks against its exit edge; the next move exits.
    StopAtEdge,
}
