//! Occupancy table for the puzzle grid.

use crate::types::{Cell, VehicleId};
use serde::Serialize;
use tracing::instrument;

/// Errors raised by grid queries and construction.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum GridError {
    /// The coordinate lies outside the grid.
    #[display("Cell ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfRange {
        /// Queried column.
        x: i32,
        /// Queried row.
        y: i32,
        /// Grid width.
        width: i32,
        /// Grid height.
        height: i32,
    },

    /// The grid would have no cells, or more than [`Grid::MAX_CELLS`].
    #[display(
        "Grid dimensions must be positive and at most {} cells, got {width}x{height}",
        Grid::MAX_CELLS
    )]
    InvalidDimensions {
        /// Requested width.
        width: i32,
        /// Requested height.
        height: i32,
    },
}

impl std::error::Error for GridError {}

/// Fixed-size 2-D occupancy table.
///
/// Each in-bounds cell holds at most one vehicle id. Coordinates outside
/// `[0, width) x [0, height)` are never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grid {
    width: i32,
    height: i32,
    /// Cells in row-major order, row 0 first.
    cells: Vec<Option<VehicleId>>,
}

impl Grid {
    /// Largest number of cells a grid may hold.
    pub const MAX_CELLS: usize = 1 << 16;

    /// Checks that `width x height` is a non-empty grid within
    /// [`Grid::MAX_CELLS`], returning the cell count.
    pub fn cell_count(width: i32, height: i32) -> Result<usize, GridError> {
        let invalid = GridError::InvalidDimensions { width, height };
        if width < 1 || height < 1 {
            return Err(invalid);
        }
        (width as usize)
            .checked_mul(height as usize)
            .filter(|&count| count <= Self::MAX_CELLS)
            .ok_or(invalid)
    }

    /// Creates an empty grid.
    #[instrument]
    pub fn new(width: i32, height: i32) -> Result<Self, GridError> {
        let count = Self::cell_count(width, height)?;
        Ok(Self {
            width,
            height,
            cells: vec![None; count],
        })
    }

    /// Grid width in cells.
    pub fn width(&self) -> i32 {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> i32 {
        self.height
    }

    /// Returns true if the cell lies inside the grid.
    pub fn contains(&self, cell: Cell) -> bool {
        (0..self.width).contains(&cell.x) && (0..self.height).contains(&cell.y)
    }

    fn index(&self, cell: Cell) -> Result<usize, GridError> {
        if !self.contains(cell) {
            return Err(GridError::OutOfRange {
                x: cell.x,
                y: cell.y,
                width: self.width,
                height: self.height,
            });
        }
        Ok((cell.y * self.width + cell.x) as usize)
    }

    /// Returns the vehicle occupying a cell, or `None` if it is empty.
    pub fn cell_at(&self, cell: Cell) -> Result<Option<VehicleId>, GridError> {
        let index = self.index(cell)?;
        Ok(self.cells[index])
    }

    /// Overwrites a cell unconditionally.
    pub fn set_cell(&mut self, cell: Cell, occupant: Option<VehicleId>) -> Result<(), GridError> {
        let index = self.index(cell)?;
        self.cells[index] = occupant;
        Ok(())
    }

    /// Empties every cell referencing the given vehicle.
    pub fn clear_vehicle(&mut self, id: VehicleId) {
        self.cells
            .iter_mut()
            .filter(|occupant| **occupant == Some(id))
            .for_each(|occupant| *occupant = None);
    }

    /// Cells currently held by the given vehicle, in row-major order.
    pub fn cells_of(&self, id: VehicleId) -> Vec<Cell> {
        self.occupied()
            .filter(|(_, occupant)| *occupant == id)
            .map(|(cell, _)| cell)
            .collect()
    }

    /// Iterates over every occupied cell and its occupant.
    pub fn occupied(&self) -> impl Iterator<Item = (Cell, VehicleId)> + '_ {
        let width = self.width;
        self.cells.iter().enumerate().filter_map(move |(index, occupant)| {
            occupant.map(|id| {
                let index = index as i32;
                (Cell::new(index % width, index / width), id)
            })
        })
    }

    /// Returns true if no cell is occupied.
    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(Option::is_none)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_grid_is_empty() {
        let grid = Grid::new(6, 4).unwrap();
        assert!(grid.is_empty());
        assert_eq!(grid.cell_at(Cell::new(5, 3)), Ok(None));
    }

    #[test]
    fn test_rejects_empty_dimensions() {
        assert_eq!(
            Grid::new(0, 6),
            Err(GridError::InvalidDimensions { width: 0, height: 6 })
        );
        assert!(Grid::new(3, -1).is_err());
    }

    #[test]
    fn test_rejects_oversized_dimensions() {
        assert_eq!(
            Grid::new(i32::MAX, i32::MAX),
            Err(GridError::InvalidDimensions {
                width: i32::MAX,
                height: i32::MAX
            })
        );
        assert!(Grid::new(100_000, 100_000).is_err());
        assert!(Grid::new(257, 256).is_err());
        assert_eq!(Grid::cell_count(256, 256), Ok(Grid::MAX_CELLS));
    }

    #[test]
    fn test_out_of_range_is_reported_not_clamped() {
        let mut grid = Grid::new(3, 3).unwrap();
        assert!(matches!(
            grid.cell_at(Cell::new(3, 0)),
            Err(GridError::OutOfRange { x: 3, y: 0, .. })
        ));
        assert!(grid.cell_at(Cell::new(-1, 2)).is_err());
        assert!(grid.set_cell(Cell::new(0, 3), Some(VehicleId::from(0))).is_err());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_set_overwrites_and_clear_vehicle() {
        let mut grid = Grid::new(4, 4).unwrap();
        let a = VehicleId::from(0);
        let b = VehicleId::from(1);
        grid.set_cell(Cell::new(1, 1), Some(a)).unwrap();
        grid.set_cell(Cell::new(2, 1), Some(a)).unwrap();
        grid.set_cell(Cell::new(2, 1), Some(b)).unwrap();

        assert_eq!(grid.cells_of(a), vec![Cell::new(1, 1)]);
        assert_eq!(grid.cells_of(b), vec![Cell::new(2, 1)]);

        grid.clear_vehicle(a);
        assert!(grid.cells_of(a).is_empty());
        assert_eq!(grid.cell_at(Cell::new(2, 1)), Ok(Some(b)));
    }

    #[test]
    fn test_occupied_reports_coordinates() {
        let mut grid = Grid::new(5, 2).unwrap();
        grid.set_cell(Cell::new(4, 1), Some(VehicleId::from(3))).unwrap();
        let occupied: Vec<_> = grid.occupied().collect();
        assert_eq!(occupied, vec![(Cell::new(4, 1), VehicleId::from(3))]);
    }
}
