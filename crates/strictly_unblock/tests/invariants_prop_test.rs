//! Property tests for the board invariants.
//!
//! Random move sequences are played against fixed levels; after every move
//! the board must satisfy containment, no-overlap and occupancy, slides
//! must be maximal, bumps must leave the board untouched and a solved
//! puzzle must stay solved.

use proptest::prelude::*;
use strictly_unblock::invariants::{BoardInvariants, InvariantSet};
use strictly_unblock::rules::can_occupy;
use strictly_unblock::{
    ExitRule, LevelDescriptor, Orientation, Puzzle, PuzzleError, VehicleConfig, VehicleId,
};

fn vehicle(kind: &str, x: i32, y: i32, direction: Orientation, length: i32) -> VehicleConfig {
    VehicleConfig::new(kind.to_string(), x, y, direction, length)
}

/// A crowded 6x6 level where most vehicles start blocked and two start
/// partly outside the grid.
fn crowded_level() -> LevelDescriptor {
    LevelDescriptor::new(
        42,
        6,
        6,
        vec![
            vehicle("car", 1, 2, Orientation::Right, 2),
            vehicle("truck", 3, 0, Orientation::Up, 3),
            vehicle("car", 0, 0, Orientation::Left, 2),
            vehicle("bus", 5, 1, Orientation::Down, 3),
            vehicle("car", 2, 5, Orientation::Right, 2),
            vehicle("car", 0, 3, Orientation::Up, 2),
            vehicle("car", 4, 4, Orientation::Left, 2),
            // Spans that start across the edge.
            vehicle("car", -1, 1, Orientation::Right, 2),
            vehicle("car", 5, 5, Orientation::Up, 2),
        ],
        vec![],
    )
}

fn assert_slide_is_maximal(puzzle: &Puzzle, id: VehicleId) {
    // Still on the board means the move ended inside the grid.
    if let Some(vehicle) = puzzle.board().vehicle(id) {
        let next = vehicle.anchor() + vehicle.orientation().step();
        let fits = vehicle.fits_at(next, puzzle.board().width(), puzzle.board().height());
        if puzzle.exit_rule() == ExitRule::Immediate || fits {
            assert!(
                !can_occupy(puzzle.board(), vehicle, next),
                "vehicle {} could still move to {}",
                id,
                next
            );
        }
    }
}

fn play_sequence(rule: ExitRule, picks: &[usize]) {
    let level = crowded_level();
    let count = level.vehicles().len();
    let mut puzzle = Puzzle::with_exit_rule(level, rule).expect("Valid level");

    for pick in picks {
        let id = VehicleId::from(pick % count);
        let before = puzzle.board().clone();
        let was_solved = puzzle.is_solved();

        match puzzle.play(id) {
            Ok(result) => {
                assert!(BoardInvariants::check_all(puzzle.board()).is_ok());
                assert_slide_is_maximal(&puzzle, id);
                if result.is_bump() {
                    assert!(result.blocked);
                    assert_eq!(puzzle.board(), &before);
                }
            }
            Err(PuzzleError::Move(_)) => {
                // Exited vehicles are no longer addressable.
                assert!(before.vehicle(id).is_none());
                assert_eq!(puzzle.board(), &before);
            }
            Err(other) => panic!("unexpected error: {other}"),
        }

        if was_solved {
            assert!(puzzle.is_solved());
        }
    }
}

proptest! {
    #[test]
    fn random_moves_preserve_invariants(picks in proptest::collection::vec(0usize..64, 1..60)) {
        play_sequence(ExitRule::Immediate, &picks);
    }

    #[test]
    fn random_moves_preserve_invariants_when_parking(
        picks in proptest::collection::vec(0usize..64, 1..60)
    ) {
        play_sequence(ExitRule::StopAtEdge, &picks);
    }
}

#[test]
fn crowded_level_is_valid() {
    assert!(crowded_level().validate().is_ok());
}
