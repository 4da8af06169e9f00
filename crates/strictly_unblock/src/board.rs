//! Board state: the grid plus the vehicles of one puzzle attempt.

use crate::grid::{Grid, GridError};
use crate::level::{LevelDescriptor, LevelError};
use crate::types::{Cell, VehicleId};
use crate::vehicle::Vehicle;
use serde::Serialize;
use tracing::{debug, instrument};

/// Grid occupancy and vehicle set for one puzzle instance.
///
/// Every active vehicle's in-bounds cells are mirrored in the grid, and the
/// grid references no other vehicle. Exited vehicles are kept for
/// reporting but no longer occupy cells.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Board {
    grid: Grid,
    /// Active vehicles in authored order.
    vehicles: Vec<Vehicle>,
    /// Vehicles that left the grid, in exit order.
    exited: Vec<Vehicle>,
}

impl Board {
    /// Builds a board from a level descriptor.
    ///
    /// The descriptor is validated first; on error no board state exists.
    /// Spans may start partly outside the grid. A vehicle that starts fully
    /// beyond its exit boundary is retired straight away.
    #[instrument(skip(level), fields(level_id = *level.level_id()))]
    pub fn initialize(level: &LevelDescriptor) -> Result<Self, LevelError> {
        let vehicles = level.build_vehicles()?;
        let grid = Grid::new(*level.grid_size_x(), *level.grid_size_y()).map_err(|_| {
            LevelError::InvalidGrid {
                width: *level.grid_size_x(),
                height: *level.grid_size_y(),
            }
        })?;

        let mut board = Self {
            grid,
            vehicles,
            exited: Vec::new(),
        };
        let ids: Vec<VehicleId> = board.vehicles.iter().map(Vehicle::id).collect();
        for id in ids {
            board.place_vehicle_on_grid(id);
        }

        let (width, height) = (board.width(), board.height());
        let retired = board.retire_exited(|v| v.is_exited_at(v.anchor(), width, height));
        if !retired.is_empty() {
            debug!(?retired, "Vehicles start outside the grid");
        }

        debug!(
            width = board.width(),
            height = board.height(),
            vehicles = board.vehicles.len(),
            "Board initialized"
        );
        Ok(board)
    }

    /// Writes an active vehicle's cells at its current anchor.
    ///
    /// Any cells still referencing the vehicle are cleared first, so
    /// re-placing a vehicle never leaves stale occupancy behind. No overlap
    /// check is made.
    pub(crate) fn place_vehicle_on_grid(&mut self, id: VehicleId) {
        let Some(vehicle) = self.vehicle(id) else {
            return;
        };
        let cells = vehicle.cells();
        self.grid.clear_vehicle(id);
        self.write_cells(cells, Some(id));
    }

    /// Moves an active vehicle from `old_anchor` to `new_anchor`.
    ///
    /// Out-of-bounds cells are skipped on both the clear and the write.
    #[instrument(skip(self))]
    pub(crate) fn move_vehicle_on_grid(
        &mut self,
        id: VehicleId,
        old_anchor: Cell,
        new_anchor: Cell,
    ) {
        let Some(vehicle) = self.vehicles.iter_mut().find(|v| v.id() == id) else {
            return;
        };
        let old_cells = vehicle.cells_at(old_anchor);
        let new_cells = vehicle.cells_at(new_anchor);
        vehicle.set_anchor(new_anchor);

        for cell in old_cells {
            if self.grid.cell_at(cell) == Ok(Some(id)) {
                let _ = self.grid.set_cell(cell, None);
            }
        }
        self.write_cells(new_cells, Some(id));
    }

    fn write_cells(&mut self, cells: impl Iterator<Item = Cell>, occupant: Option<VehicleId>) {
        let in_bounds: Vec<Cell> = cells.filter(|cell| self.grid.contains(*cell)).collect();
        for cell in in_bounds {
            let _ = self.grid.set_cell(cell, occupant);
        }
    }

    /// Moves every active vehicle matching `exited` to the exited set.
    ///
    /// The new active set is computed before it replaces the old one.
    /// Returns the retired ids in authored order.
    pub(crate) fn retire_exited(&mut self, exited: impl Fn(&Vehicle) -> bool) -> Vec<VehicleId> {
        let (retired, active): (Vec<Vehicle>, Vec<Vehicle>) =
            std::mem::take(&mut self.vehicles).into_iter().partition(|v| exited(v));
        self.vehicles = active;

        let ids: Vec<VehicleId> = retired.iter().map(Vehicle::id).collect();
        for id in &ids {
            self.grid.clear_vehicle(*id);
        }
        self.exited.extend(retired);
        ids
    }

    /// Returns the vehicle occupying a cell.
    pub fn cell_at(&self, cell: Cell) -> Result<Option<VehicleId>, GridError> {
        self.grid.cell_at(cell)
    }

    /// Returns an active vehicle by id.
    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.id() == id)
    }

    /// Active vehicles in authored order.
    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    /// Vehicles that have left the grid, in exit order.
    pub fn exited(&self) -> &[Vehicle] {
        &self.exited
    }

    /// The first authored vehicle, if it is still active.
    pub fn primary(&self) -> Option<&Vehicle> {
        self.vehicle(VehicleId::from(0))
    }

    /// Returns the occupancy grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[cfg(test)]
    pub(crate) fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Grid width.
    pub fn width(&self) -> i32 {
        self.grid.width()
    }

    /// Grid height.
    pub fn height(&self) -> i32 {
        self.grid.height()
    }

    /// Formats the board as text, top row first.
    ///
    /// Empty cells are `.`; occupied cells show the vehicle's label.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for y in (0..self.height()).rev() {
            for x in 0..self.width() {
                let symbol = match self.grid.cell_at(Cell::new(x, y)) {
                    Ok(Some(id)) => self.vehicle(id).map(Vehicle::label).unwrap_or('?'),
                    _ => '.',
                };
                result.push(symbol);
            }
            if y > 0 {
                result.push('\n');
            }
        }
        result
    }
}
