//! Level descriptors: declarative grid size and initial vehicle placement.
//!
//! Descriptors arrive from an external loader as JSON or TOML using the
//! authoring tool's camelCase field names. They are validated before any
//! board state is built.

use crate::grid::Grid;
use crate::types::{Cell, Orientation, VehicleId, VehicleKind};
use crate::vehicle::Vehicle;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument, warn};

/// Reasons a level descriptor is rejected.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum LevelError {
    /// Grid dimensions are not both positive, or the grid is too large.
    #[display(
        "Grid size must be positive and at most {} cells, got {width}x{height}",
        Grid::MAX_CELLS
    )]
    InvalidGrid {
        /// Authored width.
        width: i32,
        /// Authored height.
        height: i32,
    },

    /// A vehicle length is not in `1..=VehicleConfig::MAX_LENGTH`.
    #[display(
        "Vehicle {index} has length {length}, expected 1..={}",
        VehicleConfig::MAX_LENGTH
    )]
    InvalidLength {
        /// Position of the vehicle in the descriptor.
        index: usize,
        /// Authored length.
        length: i32,
    },

    /// A vehicle uses a type name the engine does not know.
    #[display("Vehicle {index} has unknown type '{kind}'")]
    UnknownKind {
        /// Position of the vehicle in the descriptor.
        index: usize,
        /// Authored type name.
        kind: String,
    },

    /// Two vehicles claim the same cell at start.
    #[display("Vehicle {index} overlaps vehicle {other} at {cell}")]
    Overlap {
        /// Position of the later vehicle in the descriptor.
        index: usize,
        /// Position of the vehicle already holding the cell.
        other: usize,
        /// Contested cell.
        cell: Cell,
    },

    /// The level text could not be parsed.
    #[display("Failed to parse level: {_0}")]
    Parse(String),
}

impl std::error::Error for LevelError {}

/// Initial placement of one vehicle.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct VehicleConfig {
    /// Vehicle type name ("car", "truck", "bus").
    #[serde(rename = "type")]
    kind: String,
    /// Anchor column.
    start_x: i32,
    /// Anchor row.
    start_y: i32,
    /// Direction of travel.
    direction: Orientation,
    /// Number of cells spanned.
    length: i32,
}

impl VehicleConfig {
    /// Longest vehicle a level may declare.
    pub const MAX_LENGTH: i32 = 256;

    /// Anchor cell of the vehicle at level start.
    pub fn start(&self) -> Cell {
        Cell::new(self.start_x, self.start_y)
    }
}

/// An authored exit marker. Informational only; winning is boundary based.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
pub struct ExitPoint {
    /// Column of the marker.
    x: i32,
    /// Row of the marker.
    y: i32,
    /// Direction a vehicle passes the marker in.
    direction: Orientation,
}

/// A complete level as authored.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, derive_new::new)]
#[serde(rename_all = "camelCase")]
pub struct LevelDescriptor {
    /// Level number within its pack.
    level_id: u32,
    /// Grid width.
    grid_size_x: i32,
    /// Grid height.
    grid_size_y: i32,
    /// Vehicles in authored order; the first is the primary vehicle.
    vehicles: Vec<VehicleConfig>,
    /// Exit markers, not consulted by the win rule.
    #[serde(default)]
    exit_points: Vec<ExitPoint>,
}

impl LevelDescriptor {
    /// Parses a descriptor from JSON.
    #[instrument(skip(text))]
    pub fn from_json(text: &str) -> Result<Self, LevelError> {
        serde_json::from_str(text).map_err(|e| LevelError::Parse(e.to_string()))
    }

    /// Parses a descriptor from TOML.
    #[instrument(skip(text))]
    pub fn from_toml(text: &str) -> Result<Self, LevelError> {
        toml::from_str(text).map_err(|e| LevelError::Parse(e.to_string()))
    }

    /// Checks the descriptor without building any board state.
    pub fn validate(&self) -> Result<(), LevelError> {
        self.build_vehicles().map(|_| ())
    }

    /// Validates the descriptor and builds its vehicles in authored order.
    #[instrument(skip(self), fields(level_id = self.level_id))]
    pub(crate) fn build_vehicles(&self) -> Result<Vec<Vehicle>, LevelError> {
        let (width, height) = (self.grid_size_x, self.grid_size_y);
        if Grid::cell_count(width, height).is_err() {
            warn!(width, height, "Rejecting level with unusable grid size");
            return Err(LevelError::InvalidGrid { width, height });
        }

        let mut claimed: HashMap<Cell, usize> = HashMap::new();
        let mut vehicles = Vec::with_capacity(self.vehicles.len());

        for (index, config) in self.vehicles.iter().enumerate() {
            if !(1..=VehicleConfig::MAX_LENGTH).contains(&config.length) {
                return Err(LevelError::InvalidLength {
                    index,
                    length: config.length,
                });
            }

            let kind: VehicleKind = config.kind.parse().map_err(|_| LevelError::UnknownKind {
                index,
                kind: config.kind.clone(),
            })?;

            let vehicle = Vehicle::new(
                VehicleId::from(index),
                kind,
                config.direction,
                config.length,
                config.start(),
            );

            // Spans may run past the edge; only in-bounds cells can collide.
            let in_bounds =
                |cell: &Cell| (0..width).contains(&cell.x) && (0..height).contains(&cell.y);
            for cell in vehicle.cells().filter(in_bounds) {
                if let Some(&other) = claimed.get(&cell) {
                    return Err(LevelError::Overlap { index, other, cell });
                }
                claimed.insert(cell, index);
            }

            vehicles.push(vehicle);
        }

        debug!(vehicle_count = vehicles.len(), "Level validated");
        Ok(vehicles)
    }
}
