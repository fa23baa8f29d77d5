//! Straight-line interpretation of cell selections.
//!
//! Stateless: every call recomputes the line from the anchor (first cell)
//! and the current cell (last cell).

use crate::types::{Coord, Direction};
use tracing::{instrument, trace};

/// Computes the straight line from `anchor` to `end`.
///
/// Horizontal lines run left to right and vertical lines top to bottom
/// regardless of drag direction. Diagonals run from `anchor` to `end`.
/// Returns `None` when the two cells are not on a shared row, column or
/// 45° diagonal.
pub fn line_between(anchor: Coord, end: Coord) -> Option<Vec<Coord>> {
    if anchor.row == end.row {
        let (start, stop) = (anchor.col.min(end.col), anchor.col.max(end.col));
        return Some((start..=stop).map(|col| Coord::new(anchor.row, col)).collect());
    }

    if anchor.col == end.col {
        let (start, stop) = (anchor.row.min(end.row), anchor.row.max(end.row));
        return Some((start..=stop).map(|row| Coord::new(row, anchor.col)).collect());
    }

    let d_row = signed_delta(anchor.row, end.row)?;
    let d_col = signed_delta(anchor.col, end.col)?;
    if d_row.unsigned_abs() != d_col.unsigned_abs() {
        return None;
    }

    let steps = d_row.unsigned_abs();
    (0..=steps)
        .map(|i| anchor.offset(d_row.signum(), d_col.signum(), i))
        .collect()
}

/// Validates a selection and returns its normalized path.
///
/// The line is taken from the first and last cells; every other supplied
/// cell must lie on it. A single cell is a valid (but unmatchable) anchor.
#[instrument(skip(cells), fields(cells = cells.len()))]
pub fn validate(cells: &[Coord]) -> Option<Vec<Coord>> {
    let (anchor, end) = (*cells.first()?, *cells.last()?);
    let line = line_between(anchor, end)?;

    if cells.iter().all(|c| line.contains(c)) {
        Some(line)
    } else {
        trace!(%anchor, %end, "Selection bends off its line");
        None
    }
}

/// Canonical direction of a straight path of two or more cells.
pub fn classify(path: &[Coord]) -> Option<Direction> {
    let (first, last) = (*path.first()?, *path.last()?);
    if first == last {
        return None;
    }
    let d_row = signed_delta(first.row, last.row)?.signum();
    let d_col = signed_delta(first.col, last.col)?.signum();
    Direction::from_delta((d_row, d_col))
}

fn signed_delta(from: usize, to: usize) -> Option<isize> {
    let from = isize::try_from(from).ok()?;
    let to = isize::try_from(to).ok()?;
    to.checked_sub(from)
}
