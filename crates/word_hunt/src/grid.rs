//! Letter grids: the draft used during placement and the filled grid.
//!
//! Placement writes into a [`DraftGrid`] whose unset cells act as wildcards.
//! [`DraftGrid::fill`] consumes the draft and returns a [`Grid`], so a grid
//! with an unset cell cannot exist once the fill pass has run.

use crate::error::PuzzleError;
use crate::types::{Cell, Coord, TeamId};
use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Letters used to fill cells that no word occupies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Alphabet {
    letters: Vec<char>,
}

impl Alphabet {
    /// Plain `A`–`Z`.
    pub fn latin() -> Self {
        Self {
            letters: ('A'..='Z').collect(),
        }
    }

    /// `A`–`Z` with `Ñ` after `N`.
    pub fn spanish() -> Self {
        let mut letters: Vec<char> = ('A'..='N').collect();
        letters.push('Ñ');
        letters.extend('O'..='Z');
        Self { letters }
    }

    /// Builds an alphabet from a string of uppercase letters.
    ///
    /// Duplicates are kept, which weights the fill toward those letters.
    #[instrument]
    pub fn new(letters: &str) -> Result<Self, PuzzleError> {
        let letters: Vec<char> = letters.chars().filter(|c| !c.is_whitespace()).collect();
        if letters.is_empty() {
            return Err(PuzzleError::EmptyAlphabet);
        }
        if let Some(bad) = letters
            .iter()
            .find(|c| !c.is_alphabetic() || c.is_lowercase())
        {
            return Err(PuzzleError::InvalidAlphabet(*bad));
        }
        Ok(Self { letters })
    }

    /// The letters, in order.
    pub fn letters(&self) -> &[char] {
        &self.letters
    }

    /// Returns true if `letter` belongs to this alphabet.
    pub fn contains(&self, letter: char) -> bool {
        self.letters.contains(&letter)
    }

    /// Draws one letter uniformly at random.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> char {
        // `new` guarantees a non-empty alphabet.
        self.letters.choose(rng).copied().unwrap_or('A')
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::latin()
    }
}

impl TryFrom<String> for Alphabet {
    type Error = PuzzleError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(&value)
    }
}

impl From<Alphabet> for String {
    fn from(alphabet: Alphabet) -> Self {
        alphabet.letters.into_iter().collect()
    }
}

/// Square grid with optional letters, written to by the word placer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DraftGrid {
    size: usize,
    cells: Vec<Option<char>>,
}

impl DraftGrid {
    /// Creates an all-unset `size`×`size` draft.
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![None; size * size],
        }
    }

    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Letter at `coord`, or `None` if unset or out of bounds.
    pub fn get(&self, coord: Coord) -> Option<char> {
        self.index(coord).and_then(|i| self.cells[i])
    }

    /// Writes `letter` at `coord`. Out-of-bounds writes are ignored.
    pub fn set(&mut self, coord: Coord, letter: char) {
        if let Some(i) = self.index(coord) {
            self.cells[i] = Some(letter);
        }
    }

    /// Number of cells still unset.
    pub fn unset_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    /// Fills every unset cell from `alphabet` and freezes the grid.
    #[instrument(skip(self, rng), fields(size = self.size, unset = self.unset_count()))]
    pub fn fill<R: Rng + ?Sized>(self, alphabet: &Alphabet, rng: &mut R) -> Grid {
        let size = self.size;
        let cells = self
            .cells
            .into_iter()
            .enumerate()
            .map(|(i, letter)| {
                let letter = letter.unwrap_or_else(|| alphabet.sample(rng));
                Cell::new(letter, Coord::new(i / size, i % size))
            })
            .collect();
        debug!("Draft grid filled");
        Grid { size, cells }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        coord
            .in_bounds(self.size)
            .then_some(coord.row * self.size + coord.col)
    }
}

/// Filled square grid of letters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    size: usize,
    /// Cells in row-major order.
    cells: Vec<Cell>,
}

impl Grid {
    /// Edge length.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Cell at `coord`, if in bounds.
    pub fn cell(&self, coord: Coord) -> Option<&Cell> {
        self.index(coord).map(|i| &self.cells[i])
    }

    /// Letter at `coord`, if in bounds.
    pub fn letter(&self, coord: Coord) -> Option<char> {
        self.cell(coord).map(|c| *c.letter())
    }

    /// Rows of cells, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks(self.size.max(1))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Reads the letters along `path`, or `None` if a cell is off the grid.
    pub fn read(&self, path: &[Coord]) -> Option<String> {
        path.iter().map(|c| self.letter(*c)).collect()
    }

    /// Marks the cells along `path` as part of a found word.
    pub(crate) fn highlight(&mut self, path: &[Coord], owner: Option<&TeamId>) {
        for coord in path {
            if let Some(i) = self.index(*coord) {
                self.cells[i].highlight(owner.cloned());
            }
        }
    }

    fn index(&self, coord: Coord) -> Option<usize> {
        coord
            .in_bounds(self.size)
            .then_some(coord.row * self.size + coord.col)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (r, row) in self.rows().enumerate() {
            if r > 0 {
                writeln!(f)?;
            }
            for (c, cell) in row.iter().enumerate() {
                if c > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{}", cell.letter())?;
            }
        }
        Ok(())
    }
}

/// Generates a `size`×`size` grid of letters drawn uniformly from `alphabet`.
#[instrument(skip(alphabet, rng))]
pub fn generate<R: Rng + ?Sized>(size: usize, alphabet: &Alphabet, rng: &mut R) -> Grid {
    DraftGrid::new(size).fill(alphabet, rng)
}
