//! Error types for puzzle construction and configuration.

use derive_more::{Display, Error};
use tracing::instrument;

/// Error raised while building a puzzle or checking its invariants.
///
/// Everything here is a construction-time rejection: once a session is
/// playing, bad gestures are reported as [`crate::Rejection`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Display, Error)]
pub enum PuzzleError {
    /// No words were supplied.
    #[display("Word list is empty")]
    EmptyWordList,

    /// A word was blank or contained a non-letter after normalization.
    #[display("Invalid word {:?}: words must be non-empty and letters only", _0)]
    InvalidWord(#[error(not(source))] String),

    /// The grid cannot hold the longest word in any direction.
    #[display("Grid size {size} is too small for {word:?} ({length} letters)")]
    GridTooSmall {
        /// Configured grid edge length.
        size: usize,
        /// The offending word.
        word: String,
        /// Its length in letters.
        length: usize,
    },

    /// The grid edge length was zero.
    #[display("Grid size must be positive")]
    ZeroGridSize,

    /// The grid edge length exceeded the supported maximum.
    #[display("Grid size {} exceeds the maximum of {}", size, max)]
    GridTooLarge {
        /// Requested edge length.
        size: usize,
        /// Largest accepted edge length.
        max: usize,
    },

    /// The time limit was zero seconds.
    #[display("Time limit must be at least one second")]
    ZeroTimeLimit,

    /// The timer period was zero milliseconds.
    #[display("Tick period must be positive")]
    ZeroTickPeriod,

    /// The fill alphabet is empty.
    #[display("Alphabet is empty")]
    EmptyAlphabet,

    /// The fill alphabet contains a character that is not an uppercase letter.
    #[display("Alphabet character {:?} is not an uppercase letter", _0)]
    InvalidAlphabet(#[error(not(source))] char),

    /// Duel mode was requested without any teams.
    #[display("Duel mode needs at least one team")]
    NoTeams,

    /// Two teams share an id.
    #[display("Duplicate team id {:?}", _0)]
    DuplicateTeam(#[error(not(source))] String),

    /// The word sample asks for more words than the pool holds.
    #[display("Cannot sample {requested} words from a pool of {available}")]
    SampleTooLarge {
        /// Requested sample size.
        requested: usize,
        /// Distinct words available.
        available: usize,
    },

    /// Every word was dropped by the placer, leaving nothing to find.
    #[display("None of the {} words could be placed", _0)]
    NothingPlaced(#[error(not(source))] usize),

    /// A postcondition failed after a state transition.
    #[display("Invariant violation: {}", _0)]
    InvariantViolation(#[error(not(source))] String),
}

/// Configuration loading error with location tracking.
#[derive(Debug, Clone, Display, Error)]
#[display("Config error: {} at {}:{}", message, file, line)]
pub struct ConfigError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ConfigError {
    /// Creates a new configuration error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<PuzzleError> for ConfigError {
    #[track_caller]
    fn from(err: PuzzleError) -> Self {
        Self::new(format!("Invalid puzzle config: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_too_small_message() {
        let err = PuzzleError::GridTooSmall {
            size: 3,
            word: "ELEPHANT".to_string(),
            length: 8,
        };
        assert_eq!(
            err.to_string(),
            "Grid size 3 is too small for \"ELEPHANT\" (8 letters)"
        );
    }

    #[test]
    fn test_puzzle_errors_have_no_source() {
        use std::error::Error as _;
        assert!(PuzzleError::InvalidWord("R2-D2".to_string()).source().is_none());
        assert!(PuzzleError::InvariantViolation("x".to_string()).source().is_none());
        assert!(PuzzleError::NothingPlaced(3).source().is_none());
        assert!(PuzzleError::GridTooLarge { size: 101, max: 100 }.source().is_none());
    }

    #[test]
    fn test_grid_too_large_message() {
        let err = PuzzleError::GridTooLarge { size: 500, max: 100 };
        assert_eq!(err.to_string(), "Grid size 500 exceeds the maximum of 100");
    }

    #[test]
    fn test_config_error_records_location() {
        let err = ConfigError::new("boom");
        assert!(err.file.ends_with("error.rs"));
        assert!(err.to_string().starts_with("Config error: boom at "));
    }

    #[test]
    fn test_puzzle_error_converts_to_config_error() {
        let err: ConfigError = PuzzleError::EmptyWordList.into();
        assert!(err.message.contains("Word list is empty"));
    }
}
