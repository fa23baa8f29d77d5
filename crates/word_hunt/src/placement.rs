//! Randomized word placement with a bounded retry budget.

use crate::grid::DraftGrid;
use crate::types::{Coord, Direction, WordSpec};
use derive_getters::Getters;
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::{debug, instrument, warn};

/// Attempts made per word before it is dropped.
pub const DEFAULT_PLACEMENT_ATTEMPTS: usize = 50;

/// Outcome of placing a word list.
#[derive(Debug, Clone, PartialEq, Eq, Default, Getters)]
pub struct Placement {
    /// Words that were laid onto the grid, in input order.
    words: Vec<WordSpec>,
    /// Words that exhausted their attempts, in input order.
    dropped: Vec<String>,
}

impl Placement {
    /// Splits the placement into placed words and dropped words.
    pub fn into_parts(self) -> (Vec<WordSpec>, Vec<String>) {
        (self.words, self.dropped)
    }
}

/// Places `words` onto `draft`, in order, without backtracking.
///
/// Each word gets up to `attempts` tries of a random direction and a random
/// origin. A try fails if the path leaves the grid or crosses a cell holding
/// a different letter; unset cells and equal letters are shared freely.
/// Words that never fit are dropped and reported in [`Placement::dropped`].
#[instrument(skip(draft, words, rng), fields(size = draft.size(), words = words.len()))]
pub fn place<R: Rng + ?Sized>(
    draft: &mut DraftGrid,
    words: &[String],
    attempts: usize,
    rng: &mut R,
) -> Placement {
    let mut placement = Placement::default();

    for word in words {
        match place_word(draft, word, attempts, rng) {
            Some(spec) => {
                debug!(word = %word, direction = %spec.direction(), origin = %spec.origin(), "Placed word");
                placement.words.push(spec);
            }
            None => {
                warn!(word = %word, attempts, "Word could not be placed, dropping it");
                placement.dropped.push(word.clone());
            }
        }
    }

    placement
}

fn place_word<R: Rng + ?Sized>(
    draft: &mut DraftGrid,
    word: &str,
    attempts: usize,
    rng: &mut R,
) -> Option<WordSpec> {
    let letters: Vec<char> = word.chars().collect();
    let size = draft.size();
    if letters.is_empty() || size == 0 {
        return None;
    }

    for _ in 0..attempts {
        let direction = *Direction::ALL.choose(rng)?;
        let origin = Coord::new(rng.random_range(0..size), rng.random_range(0..size));

        let Some(path) = direction.path(origin, letters.len(), size) else {
            continue;
        };
        if !fits(draft, &path, &letters) {
            continue;
        }

        for (coord, letter) in path.iter().zip(&letters) {
            draft.set(*coord, *letter);
        }
        return Some(WordSpec::placed(word, direction, path));
    }

    None
}

/// Every cell along `path` is unset or already holds the matching letter.
fn fits(draft: &DraftGrid, path: &[Coord], letters: &[char]) -> bool {
    path.iter()
        .zip(letters)
        .all(|(coord, letter)| draft.get(*coord).is_none_or(|existing| existing == *letter))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn words(list: &[&str]) -> Vec<String> {
        list.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn test_placed_paths_spell_their_words() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut draft = DraftGrid::new(12);
        let placement = place(
            &mut draft,
            &words(&["GATO", "PERRO", "CASA", "LIBRO", "FLOR", "AGUA"]),
            DEFAULT_PLACEMENT_ATTEMPTS,
            &mut rng,
        );

        for spec in placement.words() {
            assert!(spec.path().iter().all(|c| c.in_bounds(12)));
            let spelled: String = spec
                .path()
                .iter()
                .map(|c| draft.get(*c).expect("placed cell is set"))
                .collect();
            assert_eq!(&spelled, spec.text());
            assert_eq!(spec.path().len(), spec.letter_count());
            assert_eq!(spec.path()[0], *spec.origin());
        }
    }

    #[test]
    fn test_unplaceable_word_is_dropped() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut draft = DraftGrid::new(3);
        let placement = place(&mut draft, &words(&["ELEPHANT", "OX"]), 50, &mut rng);

        assert_eq!(placement.dropped(), &vec!["ELEPHANT".to_string()]);
        assert!(placement.words().iter().all(|w| w.text() != "ELEPHANT"));
        assert_eq!(placement.words().len(), 1);
    }

    #[test]
    fn test_conflicting_letters_are_rejected() {
        let mut draft = DraftGrid::new(2);
        for row in 0..2 {
            for col in 0..2 {
                draft.set(Coord::new(row, col), 'Z');
            }
        }
        let mut rng = StdRng::seed_from_u64(9);
        let placement = place(&mut draft, &words(&["AB"]), 50, &mut rng);
        assert_eq!(placement.dropped(), &vec!["AB".to_string()]);
        assert!(placement.words().is_empty());
    }

    #[test]
    fn test_shared_letters_are_allowed() {
        let mut draft = DraftGrid::new(2);
        for row in 0..2 {
            for col in 0..2 {
                draft.set(Coord::new(row, col), 'A');
            }
        }
        let mut rng = StdRng::seed_from_u64(9);
        let placement = place(&mut draft, &words(&["AA"]), 50, &mut rng);
        assert_eq!(placement.words().len(), 1);
    }

    #[test]
    fn test_zero_attempts_drops_everything() {
        let mut draft = DraftGrid::new(10);
        let mut rng = StdRng::seed_from_u64(0);
        let (placed, dropped) = place(&mut draft, &words(&["CAT"]), 0, &mut rng).into_parts();
        assert!(placed.is_empty());
        assert_eq!(dropped, vec!["CAT".to_string()]);
        assert_eq!(draft.unset_count(), 100);
    }
}
