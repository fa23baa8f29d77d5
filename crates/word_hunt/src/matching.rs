//! Matching a selected path against the remaining words.

use crate::grid::Grid;
use crate::types::{Coord, WordSpec};
use tracing::{instrument, trace};

/// Shortest selection that can match a word.
pub const MIN_MATCH_LEN: usize = 2;

/// Finds the first unfound word spelled by `selection`, forward or reversed.
///
/// Returns the word's index in `words`. Ties go to list order. Grid letters
/// and word text are both uppercase, so the comparison is exact.
#[instrument(skip(grid, words, selection), fields(cells = selection.len()))]
pub fn try_match(grid: &Grid, words: &[WordSpec], selection: &[Coord]) -> Option<usize> {
    if selection.len() < MIN_MATCH_LEN {
        return None;
    }

    let candidate = grid.read(selection)?;
    let reversed: String = candidate.chars().rev().collect();
    trace!(%candidate, %reversed, "Checking selection");

    words
        .iter()
        .position(|w| !*w.found() && (*w.text() == candidate || *w.text() == reversed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::{Alphabet, DraftGrid};
    use crate::types::Direction;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    /// 3×3 grid with "CAT" across the top row and "DO" down the middle
    /// column, everything else `Z`.
    fn fixture() -> (Grid, Vec<WordSpec>) {
        let mut draft = DraftGrid::new(3);
        let cat = vec![Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)];
        let dog = vec![Coord::new(1, 1), Coord::new(2, 1)];
        for (coord, letter) in cat.iter().zip("CAT".chars()) {
            draft.set(*coord, letter);
        }
        for (coord, letter) in dog.iter().zip("DO".chars()) {
            draft.set(*coord, letter);
        }
        let mut rng = StdRng::seed_from_u64(0);
        let grid = draft.fill(&Alphabet::new("Z").unwrap(), &mut rng);
        let words = vec![
            WordSpec::placed("CAT", Direction::Horizontal, cat),
            WordSpec::placed("DO", Direction::Vertical, dog),
        ];
        (grid, words)
    }

    #[test]
    fn test_forward_and_reverse_match_identically() {
        let (grid, words) = fixture();
        let forward = [Coord::new(0, 0), Coord::new(0, 1), Coord::new(0, 2)];
        let backward = [Coord::new(0, 2), Coord::new(0, 1), Coord::new(0, 0)];
        assert_eq!(try_match(&grid, &words, &forward), Some(0));
        assert_eq!(try_match(&grid, &words, &backward), Some(0));
    }

    #[test]
    fn test_found_words_never_rematch() {
        let (grid, mut words) = fixture();
        let path = vec![Coord::new(1, 1), Coord::new(2, 1)];
        assert_eq!(try_match(&grid, &words, &path), Some(1));
        words[1].mark_found(path.clone(), None);
        assert_eq!(try_match(&grid, &words, &path), None);
    }

    #[test]
    fn test_non_word_and_short_selections_fail() {
        let (grid, words) = fixture();
        assert_eq!(
            try_match(&grid, &words, &[Coord::new(2, 0), Coord::new(2, 2)]),
            None
        );
        assert_eq!(try_match(&grid, &words, &[Coord::new(0, 0)]), None);
        assert_eq!(
            try_match(&grid, &words, &[Coord::new(0, 0), Coord::new(0, 9)]),
            None
        );
    }
}
