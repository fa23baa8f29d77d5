//! First-class invariants for an in-progress puzzle.
//!
//! Invariants are logical properties that must hold after every transition.
//! They are testable independently and checked as postconditions in debug
//! builds.

/// A logical property that must hold for a given state.
pub trait Invariant<S> {
    /// Checks if the invariant holds for the given state.
    fn holds(state: &S) -> bool;

    /// Human-readable description of the invariant.
    fn description() -> &'static str;
}

/// Violation of an invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub description: String,
}

impl InvariantViolation {
    /// Creates a new invariant violation.
    pub fn new(description: impl Into<String>) -> Self {
        Self {
            description: description.into(),
        }
    }
}

/// A set of invariants that can be checked together.
///
/// Implemented for tuples of invariants.
pub trait InvariantSet<S> {
    /// Checks all invariants in the set, collecting every violation.
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>>;
}

impl<S, I1, I2, I3> InvariantSet<S> for (I1, I2, I3)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
    I3: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let violations: Vec<_> = [
            (I1::holds(state), I1::description()),
            (I2::holds(state), I2::description()),
            (I3::holds(state), I3::description()),
        ]
        .into_iter()
        .filter(|(holds, _)| !holds)
        .map(|(_, description)| InvariantViolation::new(description))
        .collect();

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

impl<S, I1, I2> InvariantSet<S> for (I1, I2)
where
    I1: Invariant<S>,
    I2: Invariant<S>,
{
    fn check_all(state: &S) -> Result<(), Vec<InvariantViolation>> {
        let mut violations = Vec::new();
        if !I1::holds(state) {
            violations.push(InvariantViolation::new(I1::description()));
        }
        if !I2::holds(state) {
            violations.push(InvariantViolation::new(I2::description()));
        }
        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

pub mod paths_in_bounds;
pub mod paths_spell_words;
pub mod score_consistent;

pub use paths_in_bounds::PathsInBoundsInvariant;
pub use paths_spell_words::PathsSpellWordsInvariant;
pub use score_consistent::ScoreConsistentInvariant;

/// All puzzle invariants as a composable set.
pub type PuzzleInvariants = (
    PathsInBoundsInvariant,
    PathsSpellWordsInvariant,
    ScoreConsistentInvariant,
);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PuzzleConfig;
    use crate::typestate::PuzzleSetup;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_invariant_set_holds_for_fresh_puzzle() {
        let mut rng = StdRng::seed_from_u64(4);
        let game = PuzzleSetup::generate(&PuzzleConfig::solo(["cat", "dog"]), &mut rng)
            .expect("valid puzzle")
            .start();
        assert!(PuzzleInvariants::check_all(&game).is_ok());
    }

    #[test]
    fn test_invariant_set_detects_corruption() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut game = PuzzleSetup::generate(&PuzzleConfig::solo(["cat", "dog"]), &mut rng)
            .expect("valid puzzle")
            .start();
        game.words[0].mark_found(vec![crate::Coord::new(99, 99)], None);

        let violations = PuzzleInvariants::check_all(&game).unwrap_err();
        assert!(violations.len() >= 2);
    }

    #[test]
    fn test_two_invariants_as_set() {
        let mut rng = StdRng::seed_from_u64(4);
        let game = PuzzleSetup::generate(&PuzzleConfig::solo(["cat"]), &mut rng)
            .expect("valid puzzle")
            .start();
        type TwoInvariants = (PathsInBoundsInvariant, ScoreConsistentInvariant);
        assert!(TwoInvariants::check_all(&game).is_ok());
    }
}
