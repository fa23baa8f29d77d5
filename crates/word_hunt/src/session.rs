//! Event-driven puzzle session.
//!
//! [`PuzzleSession`] owns every piece of mutable game state: the typestate
//! phase, the gesture accumulator, the observers, and the deferred end
//! notification. Each call is processed to completion before the next, so
//! no locking is needed.

use crate::config::{GameMode, PuzzleConfig};
use crate::error::PuzzleError;
use crate::gesture::{Gesture, GestureOutcome};
use crate::grid::Grid;
use crate::narration::{self, Narrator, script};
use crate::phases::{Attempt, GameSummary, MatchEvent, Phase, Rejection};
use crate::scoring::Scoring;
use crate::typestate::{PuzzleFinished, PuzzleInProgress, PuzzleResult, PuzzleSetup};
use crate::types::{Coord, Team, WordSpec};
use rand::Rng;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// Receives game events. Every method defaults to doing nothing.
pub trait PuzzleObserver {
    /// A word was found.
    fn on_match(&mut self, _event: &MatchEvent) {}

    /// A selection was discarded; the presentation may show a "try again" cue.
    fn on_wrong(&mut self, _rejection: Rejection) {}

    /// The game ended. Called at most once per session.
    fn on_game_end(&mut self, _summary: &GameSummary) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl PuzzleObserver for NoopObserver {}

#[derive(Debug)]
enum State {
    Waiting(PuzzleSetup),
    Playing(PuzzleInProgress),
    Finished(PuzzleFinished),
    /// Placeholder while a transition owns the previous state.
    Vacant,
}

/// A single solo hunt or team duel.
pub struct PuzzleSession {
    state: State,
    gesture: Gesture,
    observer: Box<dyn PuzzleObserver + Send>,
    narrator: Option<Box<dyn Narrator + Send>>,
    narrate: bool,
    finish_hold: Duration,
    tick_period: Duration,
    /// Summary waiting for the finish hold to elapse.
    pending_end: Option<GameSummary>,
    end_emitted: bool,
    exited: bool,
}

impl std::fmt::Debug for PuzzleSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PuzzleSession")
            .field("phase", &self.phase())
            .field("pending_end", &self.pending_end.is_some())
            .field("end_emitted", &self.end_emitted)
            .field("exited", &self.exited)
            .finish_non_exhaustive()
    }
}

impl PuzzleSession {
    /// Generates a puzzle from `config`. The session starts in `Waiting`.
    ///
    /// Configuration problems fail here, before anything is shown.
    #[instrument(skip(config, rng), fields(mode = %config.mode()))]
    pub fn new<R: Rng + ?Sized>(config: &PuzzleConfig, rng: &mut R) -> Result<Self, PuzzleError> {
        let setup = PuzzleSetup::generate(config, rng)?;
        Ok(Self {
            state: State::Waiting(setup),
            gesture: Gesture::new(),
            observer: Box::new(NoopObserver),
            narrator: None,
            narrate: *config.narrate(),
            finish_hold: Duration::from_millis(*config.finish_hold_ms()),
            tick_period: Duration::from_millis(*config.tick_ms()),
            pending_end: None,
            end_emitted: false,
            exited: false,
        })
    }

    /// Attaches the observer that receives match and end events.
    pub fn with_observer(mut self, observer: impl PuzzleObserver + Send + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    /// Attaches a narrator for spoken feedback.
    pub fn with_narrator(mut self, narrator: impl Narrator + Send + 'static) -> Self {
        self.narrator = Some(Box::new(narrator));
        self
    }

    // ─────────────────────────────────────────────────────────
    //  Transitions
    // ─────────────────────────────────────────────────────────

    /// `Waiting → Playing`. Returns false if the session was not waiting.
    #[instrument(skip(self))]
    pub fn start(&mut self) -> bool {
        if self.exited {
            return false;
        }
        match self.take_state() {
            State::Waiting(setup) => {
                let game = setup.start();
                let list = script::word_list(game.words().iter().map(|w| w.text().as_str()));
                self.state = State::Playing(game);
                self.announce(script::INSTRUCTIONS);
                self.announce(&list);
                self.announce_turn();
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }

    /// One-second timer tick. Ignored unless playing.
    #[instrument(skip(self))]
    pub fn tick(&mut self) {
        if self.exited {
            return;
        }
        match self.take_state() {
            State::Playing(game) => match game.tick() {
                PuzzleResult::InProgress(game) => self.state = State::Playing(game),
                PuzzleResult::Finished(finished) => {
                    let summary = finished.summary().clone();
                    self.state = State::Finished(finished);
                    self.gesture.cancel();
                    self.announce(script::TIME_UP);
                    self.emit_end(summary);
                }
            },
            other => self.state = other,
        }
    }

    /// Submits a complete selection for matching.
    #[instrument(skip(self, selection), fields(cells = selection.len()))]
    pub fn submit(&mut self, selection: &[Coord]) -> Attempt {
        if self.exited {
            return Attempt::Ignored;
        }
        let game = match self.take_state() {
            State::Playing(game) => game,
            other => {
                self.state = other;
                debug!("Selection ignored outside play");
                return Attempt::Ignored;
            }
        };

        let (result, attempt) = game.submit(selection);
        match result {
            PuzzleResult::InProgress(game) => self.state = State::Playing(game),
            PuzzleResult::Finished(finished) => {
                self.pending_end = Some(finished.summary().clone());
                self.state = State::Finished(finished);
            }
        }

        match &attempt {
            Attempt::Matched(event) => {
                self.observer.on_match(event);
                self.announce(&script::found(event.word()));
                if self.pending_end.is_some() {
                    self.announce(script::ALL_FOUND);
                } else {
                    self.announce_turn();
                }
            }
            Attempt::Rejected(rejection) => {
                self.observer.on_wrong(*rejection);
                if *rejection != Rejection::TooShort {
                    self.announce(script::WRONG);
                }
            }
            Attempt::Ignored => {}
        }
        attempt
    }

    /// Releases the held end summary once the finish hold has elapsed.
    ///
    /// Returns the summary if it was emitted now. Does nothing after
    /// [`PuzzleSession::exit`].
    #[instrument(skip(self))]
    pub fn release_hold(&mut self) -> Option<GameSummary> {
        if self.exited {
            return None;
        }
        let summary = self.pending_end.take()?;
        self.emit_end(summary.clone());
        Some(summary)
    }

    /// Quits the session: no further events, and a held end is dropped.
    #[instrument(skip(self))]
    pub fn exit(&mut self) {
        if self.exited {
            return;
        }
        self.exited = true;
        self.gesture.cancel();
        if self.pending_end.take().is_some() {
            debug!("Dropping held end notification");
        }
        info!(phase = %self.phase(), "Session exited");
    }

    // ─────────────────────────────────────────────────────────
    //  Pointer input
    // ─────────────────────────────────────────────────────────

    /// Pointer pressed on a cell.
    pub fn press(&mut self, coord: Coord) {
        if self.accepts_input() {
            self.gesture.press(coord);
        }
    }

    /// Pointer dragged onto a cell. Returns the current straight selection.
    pub fn drag(&mut self, coord: Coord) -> &[Coord] {
        if self.accepts_input() {
            self.gesture.drag(coord)
        } else {
            &[]
        }
    }

    /// Pointer released: matches the dragged line.
    pub fn release(&mut self) -> Attempt {
        if !self.accepts_input() {
            return Attempt::Ignored;
        }
        match self.gesture.release() {
            Some(outcome) => self.conclude(outcome),
            None => Attempt::Ignored,
        }
    }

    /// Cell clicked: the first click anchors, the second matches.
    pub fn click(&mut self, coord: Coord) -> Attempt {
        if !self.accepts_input() {
            return Attempt::Ignored;
        }
        match self.gesture.click(coord) {
            Some(outcome) => self.conclude(outcome),
            None => Attempt::Ignored,
        }
    }

    /// Pointer left the grid: the selection is discarded.
    pub fn cancel_selection(&mut self) {
        self.gesture.cancel();
    }

    // ─────────────────────────────────────────────────────────
    //  Queries
    // ─────────────────────────────────────────────────────────

    /// Current phase.
    pub fn phase(&self) -> Phase {
        match &self.state {
            State::Waiting(_) => Phase::Waiting,
            State::Playing(_) => Phase::Playing,
            State::Finished(_) | State::Vacant => Phase::Finished,
        }
    }

    /// Game mode.
    pub fn mode(&self) -> GameMode {
        match &self.state {
            State::Waiting(setup) => setup.mode(),
            State::Playing(game) => game.mode(),
            State::Finished(finished) => *finished.summary().mode(),
            State::Vacant => GameMode::Solo,
        }
    }

    /// The grid, if generated.
    pub fn grid(&self) -> Option<&Grid> {
        match &self.state {
            State::Waiting(setup) => Some(setup.grid()),
            State::Playing(game) => Some(game.grid()),
            State::Finished(finished) => Some(finished.grid()),
            State::Vacant => None,
        }
    }

    /// Placed words and their found state.
    pub fn words(&self) -> &[WordSpec] {
        match &self.state {
            State::Waiting(setup) => setup.words(),
            State::Playing(game) => game.words(),
            State::Finished(finished) => finished.words(),
            State::Vacant => &[],
        }
    }

    /// Words the placer dropped (available until the game ends).
    pub fn dropped(&self) -> &[String] {
        match &self.state {
            State::Waiting(setup) => setup.dropped(),
            State::Playing(game) => game.dropped(),
            State::Finished(game) => game.dropped(),
            State::Vacant => &[],
        }
    }

    /// Number of words found.
    pub fn words_found(&self) -> usize {
        self.words().iter().filter(|w| *w.found()).count()
    }

    /// Fraction of words found, `0.0..=1.0`.
    pub fn progress(&self) -> f64 {
        let total = self.words().len();
        if total == 0 {
            return 0.0;
        }
        self.words_found() as f64 / total as f64
    }

    /// Scoring state while playing.
    pub fn scoring(&self) -> Option<&Scoring> {
        match &self.state {
            State::Playing(game) => Some(game.scoring()),
            _ => None,
        }
    }

    /// Team whose turn it is (duel, while playing).
    pub fn active_team(&self) -> Option<&Team> {
        match &self.state {
            State::Playing(game) => game.active_team(),
            _ => None,
        }
    }

    /// Seconds left on the clock while playing.
    pub fn time_remaining_secs(&self) -> Option<u64> {
        match &self.state {
            State::Playing(game) => Some(game.time_remaining_secs()),
            _ => None,
        }
    }

    /// Seconds played so far.
    pub fn time_elapsed_secs(&self) -> u64 {
        match &self.state {
            State::Playing(game) => game.time_elapsed_secs(),
            State::Finished(finished) => *finished.summary().time_elapsed_secs(),
            State::Waiting(_) | State::Vacant => 0,
        }
    }

    /// Final results once finished.
    pub fn summary(&self) -> Option<&GameSummary> {
        match &self.state {
            State::Finished(finished) => Some(finished.summary()),
            _ => None,
        }
    }

    /// Cells of the in-progress selection.
    pub fn selection(&self) -> &[Coord] {
        self.gesture.selection()
    }

    /// True while a completed puzzle is holding its end summary.
    pub fn has_pending_end(&self) -> bool {
        self.pending_end.is_some() && !self.exited
    }

    /// True once [`PuzzleSession::exit`] has been called.
    pub fn is_exited(&self) -> bool {
        self.exited
    }

    /// Delay before a completed puzzle emits its summary.
    pub fn finish_hold(&self) -> Duration {
        self.finish_hold
    }

    /// Timer period.
    pub fn tick_period(&self) -> Duration {
        self.tick_period
    }

    // ─────────────────────────────────────────────────────────
    //  Internals
    // ─────────────────────────────────────────────────────────

    fn take_state(&mut self) -> State {
        std::mem::replace(&mut self.state, State::Vacant)
    }

    fn accepts_input(&self) -> bool {
        !self.exited && matches!(self.state, State::Playing(_))
    }

    fn conclude(&mut self, outcome: GestureOutcome) -> Attempt {
        match outcome {
            GestureOutcome::Validated(path) => self.submit(&path),
            GestureOutcome::Rejected(rejection) => {
                self.observer.on_wrong(rejection);
                if rejection != Rejection::TooShort {
                    self.announce(script::WRONG);
                }
                Attempt::Rejected(rejection)
            }
        }
    }

    fn emit_end(&mut self, summary: GameSummary) {
        if self.end_emitted {
            return;
        }
        self.end_emitted = true;
        info!(
            reason = %summary.reason(),
            found = summary.words_found(),
            total = summary.words_total(),
            elapsed = summary.time_elapsed_secs(),
            "Game over"
        );
        self.observer.on_game_end(&summary);
    }

    fn announce_turn(&mut self) {
        if let Some(name) = self.active_team().map(|t| t.name().clone()) {
            self.announce(&script::turn(&name));
        }
    }

    fn announce(&mut self, text: &str) {
        if !self.narrate {
            return;
        }
        if let Some(narrator) = self.narrator.as_deref_mut() {
            narration::announce_safely(narrator, text);
        }
    }
}
