//! Phase-specific typestate structs for a puzzle.
//!
//! Each phase is its own type: a [`PuzzleSetup`] cannot tick, a
//! [`PuzzleFinished`] always carries its summary, and nothing can mutate a
//! finished puzzle because no method on it takes `&mut self`.

use crate::config::{GameMode, PuzzleConfig};
use crate::contracts::{Contract, MatchContract};
use crate::error::PuzzleError;
use crate::grid::{DraftGrid, Grid};
use crate::matching;
use crate::phases::{Attempt, FinishReason, GameSummary, MatchEvent, Rejection};
use crate::placement;
use crate::scoring::{DuelScoring, Scoring, ScoringPolicy, SoloScoring};
use crate::types::{Coord, Team, WordSpec};
use crate::words;
use rand::Rng;
use tracing::{debug, info, instrument, warn};

// ─────────────────────────────────────────────────────────────
//  Setup Phase (Waiting)
// ─────────────────────────────────────────────────────────────

/// A generated puzzle waiting to start.
#[derive(Debug, Clone)]
pub struct PuzzleSetup {
    mode: GameMode,
    grid: Grid,
    words: Vec<WordSpec>,
    dropped: Vec<String>,
    scoring: Scoring,
    time_limit_secs: u64,
}

impl PuzzleSetup {
    /// Validates `config`, places the words and fills the grid.
    ///
    /// Words that cannot be placed are dropped (see [`PuzzleSetup::dropped`]);
    /// it is an error only if none can be placed.
    #[instrument(skip(config, rng), fields(mode = %config.mode(), size = config.grid_size()))]
    pub fn generate<R: Rng + ?Sized>(
        config: &PuzzleConfig,
        rng: &mut R,
    ) -> Result<Self, PuzzleError> {
        let pool = config.validate().inspect_err(|e| {
            warn!(error = %e, "Rejecting puzzle config");
        })?;
        let chosen = match config.word_sample() {
            Some(count) => words::sample(&pool, *count, rng)?,
            None => pool,
        };

        let scoring = match config.mode() {
            GameMode::Solo => Scoring::Solo(SoloScoring::new(*config.points_per_word())),
            GameMode::Duel => Scoring::Duel(DuelScoring::new(
                config.teams().clone(),
                *config.points_per_letter(),
            )?),
        };

        let mut draft = DraftGrid::new(config.grid_size());
        let (placed, dropped) =
            placement::place(&mut draft, &chosen, *config.max_placement_attempts(), rng)
                .into_parts();
        if placed.is_empty() {
            return Err(PuzzleError::NothingPlaced(chosen.len()));
        }
        let grid = draft.fill(config.alphabet(), rng);

        debug!(placed = placed.len(), dropped = dropped.len(), "Puzzle generated");
        Ok(Self {
            mode: *config.mode(),
            grid,
            words: placed,
            dropped,
            scoring,
            time_limit_secs: config.time_limit_secs(),
        })
    }

    /// Game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The filled grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placed words.
    pub fn words(&self) -> &[WordSpec] {
        &self.words
    }

    /// Words the placer gave up on.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Starts the clock (consumes setup, returns in-progress).
    #[instrument(skip(self), fields(mode = %self.mode, words = self.words.len()))]
    pub fn start(self) -> PuzzleInProgress {
        info!("Puzzle started");
        PuzzleInProgress {
            mode: self.mode,
            grid: self.grid,
            words: self.words,
            dropped: self.dropped,
            scoring: self.scoring,
            time_elapsed_secs: 0,
            time_limit_secs: self.time_limit_secs,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  InProgress Phase (Playing)
// ─────────────────────────────────────────────────────────────

/// A puzzle being played: accepts ticks and selections.
#[derive(Debug, Clone)]
pub struct PuzzleInProgress {
    pub(crate) mode: GameMode,
    pub(crate) grid: Grid,
    pub(crate) words: Vec<WordSpec>,
    pub(crate) dropped: Vec<String>,
    pub(crate) scoring: Scoring,
    pub(crate) time_elapsed_secs: u64,
    pub(crate) time_limit_secs: u64,
}

impl PuzzleInProgress {
    /// Advances the clock one second, finishing the game at the limit.
    #[instrument(skip(self), fields(elapsed = self.time_elapsed_secs))]
    pub fn tick(mut self) -> PuzzleResult {
        self.time_elapsed_secs += 1;
        if self.time_elapsed_secs >= self.time_limit_secs {
            info!(found = self.words_found(), "Time expired");
            return PuzzleResult::Finished(self.finish(FinishReason::TimeExpired));
        }
        PuzzleResult::InProgress(self)
    }

    /// Submits a selection, consuming self and returning the next state.
    ///
    /// Rejected selections return the game unchanged.
    ///
    /// Contract enforcement:
    /// - Preconditions checked always (straight, long enough)
    /// - Postconditions checked in debug builds only
    #[instrument(skip(self, selection), fields(cells = selection.len()))]
    pub fn submit(self, selection: &[Coord]) -> (PuzzleResult, Attempt) {
        let path = match MatchContract::pre(&self, selection) {
            Ok(path) => path,
            Err(rejection) => return (PuzzleResult::InProgress(self), Attempt::Rejected(rejection)),
        };

        let Some(index) = matching::try_match(&self.grid, &self.words, &path) else {
            debug!("Selection spells no remaining word");
            return (
                PuzzleResult::InProgress(self),
                Attempt::Rejected(Rejection::NoMatch),
            );
        };

        #[cfg(debug_assertions)]
        let before = self.clone();

        let mut game = self;
        let word = game.words[index].text().clone();
        let credit = game.scoring.credit(&word);
        game.words[index].mark_found(path.clone(), credit.team.clone());
        game.grid.highlight(&path, credit.team.as_ref());

        #[cfg(debug_assertions)]
        crate::contracts::assert_transition(&before, &game);

        let event = MatchEvent::new(
            word,
            credit.team,
            credit.points,
            path,
            game.words_found(),
            game.words.len(),
        );
        info!(word = %event.word(), points = event.points(), "Word found");

        if game.words.iter().all(|w| *w.found()) {
            info!("All words found");
            return (
                PuzzleResult::Finished(game.finish(FinishReason::AllWordsFound)),
                Attempt::Matched(event),
            );
        }

        (PuzzleResult::InProgress(game), Attempt::Matched(event))
    }

    /// Game mode.
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// The grid, with found words highlighted.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Placed words and their found state.
    pub fn words(&self) -> &[WordSpec] {
        &self.words
    }

    /// Words the placer gave up on.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }

    /// Scoring state.
    pub fn scoring(&self) -> &Scoring {
        &self.scoring
    }

    /// Team whose turn it is (duel only).
    pub fn active_team(&self) -> Option<&Team> {
        self.scoring.active_team()
    }

    /// Seconds played.
    pub fn time_elapsed_secs(&self) -> u64 {
        self.time_elapsed_secs
    }

    /// Time limit in seconds.
    pub fn time_limit_secs(&self) -> u64 {
        self.time_limit_secs
    }

    /// Seconds left on the clock.
    pub fn time_remaining_secs(&self) -> u64 {
        self.time_limit_secs.saturating_sub(self.time_elapsed_secs)
    }

    /// Number of words found.
    pub fn words_found(&self) -> usize {
        self.words.iter().filter(|w| *w.found()).count()
    }

    fn finish(self, reason: FinishReason) -> PuzzleFinished {
        let summary = GameSummary::new(
            self.mode,
            reason,
            self.scoring.summary(),
            self.words_found(),
            self.words.len(),
            self.time_elapsed_secs,
        );
        PuzzleFinished {
            grid: self.grid,
            words: self.words,
            dropped: self.dropped,
            summary,
        }
    }
}

// ─────────────────────────────────────────────────────────────
//  Finished Phase
// ─────────────────────────────────────────────────────────────

/// A finished puzzle. The summary is always present.
#[derive(Debug, Clone)]
pub struct PuzzleFinished {
    grid: Grid,
    words: Vec<WordSpec>,
    dropped: Vec<String>,
    summary: GameSummary,
}

impl PuzzleFinished {
    /// Final results.
    pub fn summary(&self) -> &GameSummary {
        &self.summary
    }

    /// The final grid.
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Words and their final found state.
    pub fn words(&self) -> &[WordSpec] {
        &self.words
    }

    /// Words left out of the grid at generation.
    pub fn dropped(&self) -> &[String] {
        &self.dropped
    }
}

// ─────────────────────────────────────────────────────────────
//  Result Type
// ─────────────────────────────────────────────────────────────

/// State after a tick or a selection.
#[derive(Debug, Clone)]
pub enum PuzzleResult {
    /// Game continues.
    InProgress(PuzzleInProgress),
    /// Game finished.
    Finished(PuzzleFinished),
}

impl PuzzleResult {
    /// The in-progress game, if the game continues.
    pub fn into_in_progress(self) -> Option<PuzzleInProgress> {
        match self {
            PuzzleResult::InProgress(game) => Some(game),
            PuzzleResult::Finished(_) => None,
        }
    }

    /// The finished game, if the game ended.
    pub fn into_finished(self) -> Option<PuzzleFinished> {
        match self {
            PuzzleResult::InProgress(_) => None,
            PuzzleResult::Finished(game) => Some(game),
        }
    }
}
