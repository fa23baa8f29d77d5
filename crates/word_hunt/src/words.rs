//! Word list preparation: normalization and random sampling.

use crate::error::PuzzleError;
use rand::Rng;
use rand::seq::SliceRandom;
use tracing::{debug, instrument};

/// Trims and uppercases a word.
///
/// Rejects words that are blank or contain anything other than letters.
pub fn normalize(word: &str) -> Result<String, PuzzleError> {
    let word = word.trim().to_uppercase();
    if word.is_empty() || !word.chars().all(char::is_alphabetic) {
        return Err(PuzzleError::InvalidWord(word));
    }
    Ok(word)
}

/// Normalizes every word, dropping later duplicates.
#[instrument(skip(words), fields(words = words.len()))]
pub fn normalize_all(words: &[String]) -> Result<Vec<String>, PuzzleError> {
    let mut normalized: Vec<String> = Vec::with_capacity(words.len());
    for word in words {
        let word = normalize(word)?;
        if normalized.contains(&word) {
            debug!(%word, "Skipping duplicate word");
            continue;
        }
        normalized.push(word);
    }
    Ok(normalized)
}

/// Picks `count` distinct words from `pool` in random order.
#[instrument(skip(pool, rng), fields(pool = pool.len()))]
pub fn sample<R: Rng + ?Sized>(
    pool: &[String],
    count: usize,
    rng: &mut R,
) -> Result<Vec<String>, PuzzleError> {
    if count > pool.len() {
        return Err(PuzzleError::SampleTooLarge {
            requested: count,
            available: pool.len(),
        });
    }
    let mut picked = pool.to_vec();
    picked.shuffle(rng);
    picked.truncate(count);
    Ok(picked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_normalize_uppercases_and_trims() {
        assert_eq!(normalize("  árbol ").unwrap(), "ÁRBOL");
        assert_eq!(normalize("gato").unwrap(), "GATO");
    }

    #[test]
    fn test_normalize_rejects_spaces_and_blanks() {
        assert_eq!(
            normalize("ice cream"),
            Err(PuzzleError::InvalidWord("ICE CREAM".to_string()))
        );
        assert!(normalize("   ").is_err());
    }

    #[test]
    fn test_normalize_rejects_digits_and_punctuation() {
        assert_eq!(
            normalize("r2-d2"),
            Err(PuzzleError::InvalidWord("R2-D2".to_string()))
        );
        assert!(normalize("don't").is_err());
        assert!(normalize("año").is_ok());
    }

    #[test]
    fn test_normalize_all_drops_duplicates() {
        let words = vec!["cat".to_string(), "CAT".to_string(), "dog".to_string()];
        assert_eq!(normalize_all(&words).unwrap(), vec!["CAT", "DOG"]);
    }

    #[test]
    fn test_sample_picks_distinct_words() {
        let pool: Vec<String> = ["GATO", "PERRO", "CASA", "LIBRO", "FLOR", "AGUA", "SOL", "LUNA"]
            .iter()
            .map(|w| w.to_string())
            .collect();
        let mut rng = StdRng::seed_from_u64(11);
        let picked = sample(&pool, 6, &mut rng).unwrap();
        assert_eq!(picked.len(), 6);
        assert!(picked.iter().all(|w| pool.contains(w)));
        let mut unique = picked.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 6);
    }

    #[test]
    fn test_sample_larger_than_pool_fails() {
        let pool = vec!["A".to_string()];
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            sample(&pool, 2, &mut rng),
            Err(PuzzleError::SampleTooLarge {
                requested: 2,
                available: 1
            })
        );
    }
}
