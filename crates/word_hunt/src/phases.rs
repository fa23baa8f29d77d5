//! Phases, attempt outcomes and the end-of-game summary.

use crate::config::GameMode;
use crate::scoring::ScoreSummary;
use crate::types::{Coord, TeamId};
use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Lifecycle phase of a puzzle session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Phase {
    /// Grid is being generated.
    Waiting,
    /// Accepting ticks and selections.
    Playing,
    /// Terminal; nothing changes any more.
    Finished,
}

/// Why a session finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum FinishReason {
    /// Every placed word was found.
    AllWordsFound,
    /// The clock ran out.
    TimeExpired,
}

/// Why a selection did not score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum Rejection {
    /// Cells are not on one row, column or diagonal.
    NotStraight,
    /// Fewer than two cells.
    TooShort,
    /// A straight line that spells no remaining word.
    NoMatch,
}

/// A successful find, as reported to observers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MatchEvent {
    /// The word found.
    word: String,
    /// Team credited (duel only).
    team: Option<TeamId>,
    /// Points awarded.
    points: u32,
    /// Cells of the selection.
    path: Vec<Coord>,
    /// Words found so far, including this one.
    words_found: usize,
    /// Words placed in the puzzle.
    words_total: usize,
}

impl MatchEvent {
    pub(crate) fn new(
        word: String,
        team: Option<TeamId>,
        points: u32,
        path: Vec<Coord>,
        words_found: usize,
        words_total: usize,
    ) -> Self {
        Self {
            word,
            team,
            points,
            path,
            words_found,
            words_total,
        }
    }
}

/// Result of submitting one selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attempt {
    /// The selection found a word.
    Matched(MatchEvent),
    /// The selection was discarded with no state change.
    Rejected(Rejection),
    /// The session was not accepting input.
    Ignored,
}

impl Attempt {
    /// Returns true for [`Attempt::Matched`].
    pub fn is_match(&self) -> bool {
        matches!(self, Attempt::Matched(_))
    }
}

/// Final results handed to `on_game_end`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameSummary {
    /// Mode that was played.
    mode: GameMode,
    /// Why the game ended.
    reason: FinishReason,
    /// Final scores.
    scores: ScoreSummary,
    /// Words found.
    words_found: usize,
    /// Words placed.
    words_total: usize,
    /// Seconds played.
    time_elapsed_secs: u64,
}

impl GameSummary {
    pub(crate) fn new(
        mode: GameMode,
        reason: FinishReason,
        scores: ScoreSummary,
        words_found: usize,
        words_total: usize,
        time_elapsed_secs: u64,
    ) -> Self {
        Self {
            mode,
            reason,
            scores,
            words_found,
            words_total,
            time_elapsed_secs,
        }
    }

    /// Winning team in a duel.
    pub fn winner(&self) -> Option<&TeamId> {
        match &self.scores {
            ScoreSummary::Duel { winner, .. } => winner.as_ref(),
            ScoreSummary::Solo { .. } => None,
        }
    }
}

/// Formats seconds as `m:ss`.
pub fn format_clock(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}
