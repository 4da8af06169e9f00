//! Vehicles: fixed-orientation blocks that slide along one axis.

use crate::types::{Cell, Orientation, Step, VehicleId, VehicleKind};
use serde::{Deserialize, Serialize};

/// A vehicle on the board.
///
/// Orientation and length never change after construction. The anchor is
/// the lowest-coordinate cell of the vehicle's span and moves only through
/// the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vehicle {
    id: VehicleId,
    kind: VehicleKind,
    orientation: Orientation,
    length: i32,
    anchor: Cell,
}

impl Vehicle {
    /// Creates a vehicle. Callers guarantee `length >= 1`.
    pub(crate) fn new(
        id: VehicleId,
        kind: VehicleKind,
        orientation: Orientation,
        length: i32,
        anchor: Cell,
    ) -> Self {
        debug_assert!(length >= 1, "vehicle length must be positive");
        Self {
            id,
            kind,
            orientation,
            length,
            anchor,
        }
    }

    /// Returns the vehicle id.
    pub fn id(&self) -> VehicleId {
        self.id
    }

    /// Returns the authored kind.
    pub fn kind(&self) -> VehicleKind {
        self.kind
    }

    /// Returns the fixed direction of travel.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Returns the number of cells the vehicle spans.
    pub fn length(&self) -> i32 {
        self.length
    }

    /// Returns the current anchor.
    pub fn anchor(&self) -> Cell {
        self.anchor
    }

    pub(crate) fn set_anchor(&mut self, anchor: Cell) {
        self.anchor = anchor;
    }

    /// Cells the vehicle occupies at its current anchor.
    pub fn cells(&self) -> Span {
        self.cells_at(self.anchor)
    }

    /// Cells the vehicle would occupy if anchored at `anchor`.
    pub fn cells_at(&self, anchor: Cell) -> Span {
        Span {
            next: anchor,
            step: self.orientation.span_step(),
            remaining: self.length,
        }
    }

    /// Returns true if the span at `anchor` lies entirely beyond the
    /// boundary the vehicle travels towards.
    pub fn is_exited_at(&self, anchor: Cell, width: i32, height: i32) -> bool {
        match self.orientation {
            Orientation::Right => anchor.x >= width,
            Orientation::Left => anchor.x.saturating_add(self.length - 1) < 0,
            Orientation::Up => anchor.y >= height,
            Orientation::Down => anchor.y.saturating_add(self.length - 1) < 0,
        }
    }

    /// Returns true if the span at `anchor` reaches the row or column at its
    /// exit boundary, or has already passed it.
    pub fn reaches_exit_edge(&self, anchor: Cell, width: i32, height: i32) -> bool {
        let last = self.length - 1;
        match self.orientation {
            Orientation::Right => anchor.x.saturating_add(last) >= width - 1,
            Orientation::Left => anchor.x <= 0,
            Orientation::Up => anchor.y.saturating_add(last) >= height - 1,
            Orientation::Down => anchor.y <= 0,
        }
    }

    /// Returns true if the span at `anchor` lies entirely inside the grid.
    pub fn fits_at(&self, anchor: Cell, width: i32, height: i32) -> bool {
        self.cells_at(anchor)
            .all(|cell| (0..width).contains(&cell.x) && (0..height).contains(&cell.y))
    }

    /// Single-character label used in board dumps.
    pub fn label(&self) -> char {
        const LABELS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";
        LABELS
            .get(self.id.index())
            .map(|&b| b as char)
            .unwrap_or('?')
    }
}

/// Iterator over the cells of a vehicle span.
#[derive(Debug, Clone, Copy)]
pub struct Span {
    next: Cell,
    step: Step,
    remaining: i32,
}

impl Iterator for Span {
    type Item = Cell;

    fn next(&mut self) -> Option<Cell> {
        if self.remaining <= 0 {
            return None;
        }
        let cell = self.next;
        self.next = cell + self.step;
        self.remaining -= 1;
        Some(cell)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.remaining.max(0) as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Span {}
