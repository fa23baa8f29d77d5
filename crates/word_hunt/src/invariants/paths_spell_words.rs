//! Reading the grid along a word's path spells that word.

use super::Invariant;
use crate::typestate::PuzzleInProgress;

/// Invariant: each word's path reads as the word, forward or reversed.
///
/// Reversal is allowed because a found word keeps the player's normalized
/// selection, which may run opposite to the placement.
pub struct PathsSpellWordsInvariant;

impl Invariant<PuzzleInProgress> for PathsSpellWordsInvariant {
    fn holds(game: &PuzzleInProgress) -> bool {
        game.words().iter().all(|w| match game.grid().read(w.path()) {
            Some(read) => {
                let reversed: String = read.chars().rev().collect();
                *w.text() == read || *w.text() == reversed
            }
            None => false,
        })
    }

    fn description() -> &'static str {
        "Word paths spell their words on the grid"
    }
}
