//! Every recorded word path stays on the grid.

use super::Invariant;
use crate::typestate::PuzzleInProgress;

/// Invariant: no word path has a coordinate outside `0..size`.
pub struct PathsInBoundsInvariant;

impl Invariant<PuzzleInProgress> for PathsInBoundsInvariant {
    fn holds(game: &PuzzleInProgress) -> bool {
        let size = game.grid().size();
        game.words()
            .iter()
            .all(|w| w.path().iter().all(|c| c.in_bounds(size)))
    }

    fn description() -> &'static str {
        "Word paths lie inside the grid"
    }
}
