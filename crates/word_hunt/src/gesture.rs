//! Pointer gesture accumulator.
//!
//! Turns press/drag/release (or click-click) input into a candidate path:
//! `Idle → Selecting → (Validated | Rejected) → Idle`. Matching is left to
//! the session so gestures can be tested without a grid.

use crate::geometry;
use crate::phases::Rejection;
use crate::types::Coord;
use tracing::{debug, instrument};

/// What a completed gesture produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GestureOutcome {
    /// A straight path of two or more cells, ready for matching.
    Validated(Vec<Coord>),
    /// The gesture did not form a usable line.
    Rejected(Rejection),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
enum State {
    #[default]
    Idle,
    Selecting {
        anchor: Coord,
        cells: Vec<Coord>,
    },
}

/// Gesture state machine for one grid.
#[derive(Debug, Clone, Default)]
pub struct Gesture {
    state: State,
}

impl Gesture {
    /// Creates an idle accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true while a selection is in progress.
    pub fn is_selecting(&self) -> bool {
        matches!(self.state, State::Selecting { .. })
    }

    /// Cells currently selected (empty when idle).
    pub fn selection(&self) -> &[Coord] {
        match &self.state {
            State::Idle => &[],
            State::Selecting { cells, .. } => cells,
        }
    }

    /// Starts a drag at `coord`, discarding any previous selection.
    #[instrument(skip(self))]
    pub fn press(&mut self, coord: Coord) {
        self.state = State::Selecting {
            anchor: coord,
            cells: vec![coord],
        };
    }

    /// Extends a drag to `coord`.
    ///
    /// The line is recomputed from the anchor. If `coord` would bend the
    /// line, the last straight selection is kept.
    pub fn drag(&mut self, coord: Coord) -> &[Coord] {
        if let State::Selecting { anchor, cells } = &mut self.state {
            match geometry::line_between(*anchor, coord) {
                Some(line) => *cells = line,
                None => debug!(%coord, "Drag bends, keeping last straight line"),
            }
        }
        self.selection()
    }

    /// Ends a drag. Returns `None` if no drag was in progress.
    #[instrument(skip(self))]
    pub fn release(&mut self) -> Option<GestureOutcome> {
        match std::mem::take(&mut self.state) {
            State::Idle => None,
            State::Selecting { cells, .. } => Some(Self::conclude(&cells)),
        }
    }

    /// Click-click selection: the first click anchors, the second completes.
    #[instrument(skip(self))]
    pub fn click(&mut self, coord: Coord) -> Option<GestureOutcome> {
        match std::mem::take(&mut self.state) {
            State::Idle => {
                self.press(coord);
                None
            }
            State::Selecting { anchor, .. } => Some(Self::conclude(&[anchor, coord])),
        }
    }

    /// Abandons the current selection (pointer left the grid).
    pub fn cancel(&mut self) {
        self.state = State::Idle;
    }

    fn conclude(cells: &[Coord]) -> GestureOutcome {
        match geometry::validate(cells) {
            Some(path) if path.len() >= 2 => GestureOutcome::Validated(path),
            Some(_) => GestureOutcome::Rejected(Rejection::TooShort),
            None => GestureOutcome::Rejected(Rejection::NotStraight),
        }
    }
}
