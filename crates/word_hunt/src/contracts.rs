//! Contract-based validation for selections.
//!
//! Contracts define correctness through preconditions and postconditions:
//! `{P(state, action)} action {Q(before, after)}`.

use crate::error::PuzzleError;
use crate::geometry;
use crate::invariants::{InvariantSet, PuzzleInvariants};
use crate::matching::MIN_MATCH_LEN;
use crate::phases::Rejection;
use crate::scoring::ScoringPolicy;
use crate::typestate::PuzzleInProgress;
use crate::types::Coord;
use tracing::{error, instrument};

// ─────────────────────────────────────────────────────────────
//  Contract Trait
// ─────────────────────────────────────────────────────────────

/// Preconditions and postconditions for a state transition.
///
/// - Precondition: `{P(state, action)}` must hold before applying the action
/// - Postcondition: `{Q(before, after)}` must hold after applying it
pub trait Contract<S, A: ?Sized> {
    /// What a satisfied precondition hands to the transition.
    type Checked;

    /// Checks preconditions before applying the action.
    fn pre(state: &S, action: &A) -> Result<Self::Checked, Rejection>;

    /// Checks postconditions after applying the action.
    fn post(before: &S, after: &S) -> Result<(), PuzzleError>;
}

// ─────────────────────────────────────────────────────────────
//  Selection Preconditions
// ─────────────────────────────────────────────────────────────

/// Precondition: the selection is one straight line.
pub struct SelectionIsStraight;

impl SelectionIsStraight {
    /// Returns the normalized path, or why it is unusable.
    pub fn check(selection: &[Coord]) -> Result<Vec<Coord>, Rejection> {
        geometry::validate(selection).ok_or(Rejection::NotStraight)
    }
}

/// Precondition: the selection is long enough to spell a word.
pub struct SelectionIsLongEnough;

impl SelectionIsLongEnough {
    /// Fails for selections shorter than two cells.
    pub fn check(path: &[Coord]) -> Result<(), Rejection> {
        if path.len() < MIN_MATCH_LEN {
            Err(Rejection::TooShort)
        } else {
            Ok(())
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Match Contract (Pre + Post)
// ─────────────────────────────────────────────────────────────

/// Contract for submitting a selection.
///
/// Preconditions:
/// - Selection is a straight line
/// - Selection covers at least two cells
///
/// Postconditions:
/// - All puzzle invariants hold
/// - Found words and points never decrease
/// - Words found before stay found
pub struct MatchContract;

impl Contract<PuzzleInProgress, [Coord]> for MatchContract {
    type Checked = Vec<Coord>;

    #[instrument(skip(_game, selection), fields(cells = selection.len()))]
    fn pre(_game: &PuzzleInProgress, selection: &[Coord]) -> Result<Vec<Coord>, Rejection> {
        let path = SelectionIsStraight::check(selection)?;
        SelectionIsLongEnough::check(&path)?;
        Ok(path)
    }

    fn post(before: &PuzzleInProgress, after: &PuzzleInProgress) -> Result<(), PuzzleError> {
        PuzzleInvariants::check_all(after).map_err(|violations| {
            let descriptions = violations
                .iter()
                .map(|v| v.description.as_str())
                .collect::<Vec<_>>()
                .join("; ");
            PuzzleError::InvariantViolation(format!("Postcondition failed: {}", descriptions))
        })?;

        if after.words_found() < before.words_found()
            || after.scoring().total_points() < before.scoring().total_points()
        {
            return Err(PuzzleError::InvariantViolation(
                "Postcondition failed: progress went backwards".to_string(),
            ));
        }

        let reset = before
            .words()
            .iter()
            .zip(after.words())
            .any(|(b, a)| *b.found() && !*a.found());
        if reset {
            return Err(PuzzleError::InvariantViolation(
                "Postcondition failed: a found word was reset".to_string(),
            ));
        }

        Ok(())
    }
}

/// Panics in debug builds if a match broke the contract.
#[instrument(skip(before, after))]
pub fn assert_transition(before: &PuzzleInProgress, after: &PuzzleInProgress) {
    if let Err(err) = MatchContract::post(before, after) {
        error!(%err, "Match postcondition failed");
        debug_assert!(false, "{}", err);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PuzzleConfig, PuzzleSetup};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn c(row: usize, col: usize) -> Coord {
        Coord::new(row, col)
    }

    fn game() -> PuzzleInProgress {
        let mut rng = StdRng::seed_from_u64(13);
        PuzzleSetup::generate(&PuzzleConfig::solo(["rio", "mar"]), &mut rng)
            .expect("valid puzzle")
            .start()
    }

    #[test]
    fn test_precondition_straight_line() {
        assert_eq!(
            MatchContract::pre(&game(), &[c(0, 2), c(0, 0)][..]),
            Ok(vec![c(0, 0), c(0, 1), c(0, 2)])
        );
    }

    #[test]
    fn test_precondition_bent_line() {
        assert_eq!(
            MatchContract::pre(&game(), &[c(0, 0), c(1, 0), c(1, 1)][..]),
            Err(Rejection::NotStraight)
        );
    }

    #[test]
    fn test_precondition_single_cell() {
        assert_eq!(MatchContract::pre(&game(), &[c(3, 3)][..]), Err(Rejection::TooShort));
    }

    #[test]
    fn test_postcondition_detects_reset() {
        let game = game();
        let path = game.words()[0].path().clone();
        let (result, _) = game.submit(&path);
        let before = result.into_in_progress().expect("one word left");

        let mut after = before.clone();
        after.words[0] = before.words()[1].clone();
        assert!(MatchContract::post(&before, &after).is_err());
    }
}
