//! Text rendering for the host.

use strictly_unblock::{LevelDescriptor, MoveResult, Puzzle, PuzzleStatus};

/// One-line summary of a level.
pub fn level_summary(level: &LevelDescriptor) -> String {
    format!(
        "Level {}: {}x{} grid, {} vehicles",
        level.level_id(),
        level.grid_size_x(),
        level.grid_size_y(),
        level.vehicles().len()
    )
}

/// Vehicle table, one row per vehicle in authored order.
pub fn vehicle_table(puzzle: &Puzzle) -> String {
    puzzle
        .board()
        .vehicles()
        .iter()
        .map(|v| {
            format!(
                "  {} {} {} len {} at {} heading {}",
                v.label(),
                v.id(),
                v.kind(),
                v.length(),
                v.anchor(),
                v.orientation()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Line printed after a move.
pub fn move_line(index: usize, result: &MoveResult) -> String {
    format!("{:>3}. {}", index + 1, result)
}

/// Closing status line.
pub fn status_line(puzzle: &Puzzle) -> String {
    match puzzle.status() {
        PuzzleStatus::Solved => format!("Solved in {} moves", puzzle.history().len()),
        PuzzleStatus::InProgress => format!(
            "In progress: {} of {} vehicles still on the grid",
            puzzle.board().vehicles().len(),
            puzzle.level().vehicles().len()
        ),
    }
}
