//! Scores agree with the set of found words.

use super::Invariant;
use crate::scoring::Scoring;
use crate::typestate::PuzzleInProgress;

/// Invariant: scoring state matches the words marked found.
///
/// Solo: score is `found × points_per_word`. Duel: the teams' found lists
/// together hold exactly the found words, each credited to the team named
/// in `found_by`, and the active index is a valid team.
pub struct ScoreConsistentInvariant;

impl Invariant<PuzzleInProgress> for ScoreConsistentInvariant {
    fn holds(game: &PuzzleInProgress) -> bool {
        let found: Vec<_> = game.words().iter().filter(|w| *w.found()).collect();

        match game.scoring() {
            Scoring::Solo(solo) => {
                let expected = u32::try_from(found.len())
                    .unwrap_or(u32::MAX)
                    .saturating_mul(solo.points_per_word());
                solo.score() == expected && found.iter().all(|w| w.found_by().is_none())
            }
            Scoring::Duel(duel) => {
                let credited: usize = duel.teams().iter().map(|t| t.found_words().len()).sum();
                duel.active_index() < duel.teams().len()
                    && credited == found.len()
                    && found.iter().all(|w| {
                        duel.teams().iter().any(|t| {
                            Some(t.id()) == w.found_by().as_ref()
                                && t.found_words().contains(w.text())
                        })
                    })
            }
        }
    }

    fn description() -> &'static str {
        "Scores match the found words"
    }
}
