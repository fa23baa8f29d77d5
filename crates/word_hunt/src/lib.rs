//! Word Hunt - timed word-search puzzles with contract-checked transitions
//!
//! Generates a square letter grid with hidden words, turns pointer gestures
//! into straight-line selections, and scores matches for a single player or
//! for teams taking turns.
//!
//! # Architecture
//!
//! - **Generation**: word placement on a draft grid, then random fill
//! - **Selection**: gesture accumulator and straight-line geometry
//! - **Matching**: forward or reversed reads against the remaining words
//! - **Typestate**: `PuzzleSetup → PuzzleInProgress → PuzzleFinished`
//! - **Session**: observers, narration and the held end summary
//! - **Runner**: async loop feeding ticks and input into a session
//!
//! # Example
//!
//! ```no_run
//! use rand::SeedableRng;
//! use rand::rngs::StdRng;
//! use word_hunt::{PuzzleConfig, PuzzleSession};
//!
//! # fn example() -> Result<(), word_hunt::PuzzleError> {
//! let config = PuzzleConfig::solo(["gato", "perro", "casa"]);
//! let mut rng = StdRng::seed_from_u64(7);
//! let mut session = PuzzleSession::new(&config, &mut rng)?;
//! session.start();
//!
//! let path = session.words()[0].path().clone();
//! assert!(session.submit(&path).is_match());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod contracts;
mod error;
mod geometry;
mod gesture;
mod grid;
mod invariants;
mod matching;
mod narration;
mod phases;
mod placement;
mod runner;
mod scoring;
mod session;
mod typestate;
mod types;
mod words;

// Crate-level exports - Errors and configuration
pub use config::{GameMode, MAX_GRID_SIZE, PuzzleConfig};
pub use error::{ConfigError, PuzzleError};

// Crate-level exports - Core types
pub use types::{Cell, Coord, Direction, Team, TeamConfig, TeamId, WordSpec};

// Crate-level exports - Generation
pub use grid::{Alphabet, DraftGrid, Grid, generate};
pub use placement::{DEFAULT_PLACEMENT_ATTEMPTS, Placement, place};
pub use words::{normalize, normalize_all, sample};

// Crate-level exports - Selection and matching
pub use geometry::{classify, line_between, validate};
pub use gesture::{Gesture, GestureOutcome};
pub use matching::{MIN_MATCH_LEN, try_match};

// Crate-level exports - Scoring
pub use scoring::{
    Credit, DEFAULT_POINTS_PER_LETTER, DEFAULT_POINTS_PER_WORD, DuelScoring, ScoreSummary, Scoring,
    ScoringPolicy, SoloScoring,
};

// Crate-level exports - Phases and typestate
pub use phases::{Attempt, FinishReason, GameSummary, MatchEvent, Phase, Rejection, format_clock};
pub use typestate::{PuzzleFinished, PuzzleInProgress, PuzzleResult, PuzzleSetup};

// Crate-level exports - Contracts and invariants
pub use contracts::{
    Contract, MatchContract, SelectionIsLongEnough, SelectionIsStraight, assert_transition,
};
pub use invariants::{
    Invariant, InvariantSet, InvariantViolation, PathsInBoundsInvariant, PathsSpellWordsInvariant,
    PuzzleInvariants, ScoreConsistentInvariant,
};

// Crate-level exports - Session, narration and runner
pub use narration::{LogNarrator, NarrationError, Narrator, announce_safely, script};
pub use runner::{Input, RunOutcome, Ticker, TickerHandle, run};
pub use session::{NoopObserver, PuzzleObserver, PuzzleSession};
