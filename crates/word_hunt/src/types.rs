//! Core domain types for the word search.

use derive_getters::Getters;
use derive_more::{Display, From};
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};
use tracing::instrument;

/// A cell coordinate on the grid (row-major, zero-based).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display,
    derive_new::new,
)]
#[display("({row}, {col})")]
pub struct Coord {
    /// Row index, counted from the top.
    pub row: usize,
    /// Column index, counted from the left.
    pub col: usize,
}

impl Coord {
    /// Returns true if the coordinate lies inside a `size`×`size` grid.
    pub fn in_bounds(self, size: usize) -> bool {
        self.row < size && self.col < size
    }

    /// Moves `steps` units along `(d_row, d_col)`, or `None` below zero.
    pub fn offset(self, d_row: isize, d_col: isize, steps: usize) -> Option<Coord> {
        let steps = isize::try_from(steps).ok()?;
        let row = self.row.checked_add_signed(d_row.checked_mul(steps)?)?;
        let col = self.col.checked_add_signed(d_col.checked_mul(steps)?)?;
        Some(Coord { row, col })
    }
}

/// One of the four line orientations a word may occupy.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter,
)]
pub enum Direction {
    /// Left to right along a row.
    Horizontal,
    /// Top to bottom along a column.
    Vertical,
    /// Down and to the right.
    DiagonalDownRight,
    /// Down and to the left.
    DiagonalDownLeft,
}

impl Direction {
    /// All supported directions.
    pub const ALL: [Direction; 4] = [
        Direction::Horizontal,
        Direction::Vertical,
        Direction::DiagonalDownRight,
        Direction::DiagonalDownLeft,
    ];

    /// Unit vector `(d_row, d_col)` for this direction.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Horizontal => (0, 1),
            Direction::Vertical => (1, 0),
            Direction::DiagonalDownRight => (1, 1),
            Direction::DiagonalDownLeft => (1, -1),
        }
    }

    /// Finds the direction whose unit vector is `delta` or its negation.
    #[instrument]
    pub fn from_delta(delta: (isize, isize)) -> Option<Direction> {
        let (d_row, d_col) = delta;
        Direction::iter().find(|dir| {
            let (r, c) = dir.delta();
            (r, c) == (d_row, d_col) || (-r, -c) == (d_row, d_col)
        })
    }

    /// Cells covered by a run of `len` letters starting at `origin`.
    ///
    /// Returns `None` if any cell would leave a `size`×`size` grid.
    pub fn path(self, origin: Coord, len: usize, size: usize) -> Option<Vec<Coord>> {
        let (d_row, d_col) = self.delta();
        (0..len)
            .map(|i| origin.offset(d_row, d_col, i).filter(|c| c.in_bounds(size)))
            .collect()
    }
}

/// Identifier of a duel team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, Display, From)]
#[serde(transparent)]
pub struct TeamId(String);

impl TeamId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TeamId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Team definition supplied when a duel is configured.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, derive_new::new)]
pub struct TeamConfig {
    /// Unique team id.
    pub id: TeamId,
    /// Display name.
    pub name: String,
    /// Highlight color used for the team's found words.
    #[serde(default = "default_color")]
    #[new(value = "default_color()")]
    pub color: String,
    /// Member names, display only.
    #[serde(default)]
    #[new(default)]
    pub members: Vec<String>,
}

fn default_color() -> String {
    "green".to_string()
}

/// A duel team and its running tally.
///
/// `score` only grows and `found_words` is append-only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Team {
    /// Unique team id.
    id: TeamId,
    /// Display name.
    name: String,
    /// Highlight color.
    color: String,
    /// Member names.
    members: Vec<String>,
    /// Points earned so far.
    score: u32,
    /// Words found by this team, in order.
    found_words: Vec<String>,
}

impl From<TeamConfig> for Team {
    fn from(config: TeamConfig) -> Self {
        Self {
            id: config.id,
            name: config.name,
            color: config.color,
            members: config.members,
            score: 0,
            found_words: Vec::new(),
        }
    }
}

impl Team {
    /// Adds `points` and records `word` as found by this team.
    pub(crate) fn credit(&mut self, word: &str, points: u32) {
        self.score = self.score.saturating_add(points);
        self.found_words.push(word.to_string());
    }
}

/// Bookkeeping record for one target word.
///
/// `found`, `path` and `found_by` change exactly once, when the word is
/// matched, and are never reset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct WordSpec {
    /// Uppercase word text.
    text: String,
    /// Whether the word has been matched.
    found: bool,
    /// Where the placer started the word.
    origin: Coord,
    /// Orientation chosen by the placer.
    direction: Direction,
    /// Placed cells, replaced by the player's selection once found.
    path: Vec<Coord>,
    /// Team credited with the find (duel only).
    found_by: Option<TeamId>,
}

impl WordSpec {
    /// Creates an unfound word placed along `path`.
    pub fn placed(text: impl Into<String>, direction: Direction, path: Vec<Coord>) -> Self {
        let origin = path.first().copied().unwrap_or(Coord { row: 0, col: 0 });
        Self {
            text: text.into(),
            found: false,
            origin,
            direction,
            path,
            found_by: None,
        }
    }

    /// Number of letters (not bytes) in the word.
    pub fn letter_count(&self) -> usize {
        self.text.chars().count()
    }

    /// Marks the word found along `selection`.
    pub(crate) fn mark_found(&mut self, selection: Vec<Coord>, found_by: Option<TeamId>) {
        self.found = true;
        self.path = selection;
        self.found_by = found_by;
    }
}

/// A letter on the finished grid.
///
/// `highlighted` and `owner` are presentation annotations only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct Cell {
    /// The uppercase letter shown in this cell.
    letter: char,
    /// Row index.
    row: usize,
    /// Column index.
    col: usize,
    /// Part of a found word.
    highlighted: bool,
    /// Team that found the word covering this cell.
    owner: Option<TeamId>,
}

impl Cell {
    pub(crate) fn new(letter: char, coord: Coord) -> Self {
        Self {
            letter,
            row: coord.row,
            col: coord.col,
            highlighted: false,
            owner: None,
        }
    }

    /// This cell's coordinate.
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }

    pub(crate) fn highlight(&mut self, owner: Option<TeamId>) {
        self.highlighted = true;
        if owner.is_some() {
            self.owner = owner;
        }
    }
}
