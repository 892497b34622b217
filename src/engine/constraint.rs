use std::fmt;

use im::HashSet;
use serde::Serialize;

use crate::engine::cell::Cell;

/// A logical statement about the board: "exactly `count` of these cells are
/// mines".
///
/// A constraint shrinks in place as individual cells become known, which
/// keeps the cell-set/count pair self-consistent without re-deriving it from
/// the observation history. `count` is signed because subset subtraction can
/// transiently produce stale derivations while a propagation pass is in
/// flight; settled knowledge always satisfies `0 <= count <= |cells|`.
///
/// Two constraints are equal iff their cell sets and counts are equal,
/// independent of insertion order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Constraint {
    cells: HashSet<Cell>,
    count: i32,
}

impl Constraint {
    pub fn new(cells: HashSet<Cell>, count: i32) -> Self {
        Self { cells, count }
    }

    pub fn cells(&self) -> &HashSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> i32 {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell here is a mine, if the constraint proves it: all cells are
    /// mines exactly when the count equals the (non-zero) set size.
    pub fn known_mines(&self) -> Option<HashSet<Cell>> {
        if !self.cells.is_empty() && self.count == self.cells.len() as i32 {
            Some(self.cells.clone())
        } else {
            None
        }
    }

    /// Every cell here is safe, if the constraint proves it: a zero count
    /// means none of the cells is a mine. An empty set with a zero count is
    /// vacuously true; callers treat the empty result as "nothing new".
    pub fn known_safes(&self) -> Option<HashSet<Cell>> {
        if self.count == 0 {
            Some(self.cells.clone())
        } else {
            None
        }
    }

    /// Records that `cell` is a mine: removes it and decrements the count,
    /// so "exactly `count` of the remaining cells are mines" stays true.
    /// No-op if `cell` is not a member.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell).is_some() {
            self.count -= 1;
        }
    }

    /// Records that `cell` is safe: removes it, count unchanged. No-op if
    /// `cell` is not a member.
    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// True if this constraint's cells are a strict subset of `other`'s.
    pub fn is_strict_subset_of(&self, other: &Constraint) -> bool {
        self.cells.len() < other.cells.len() && self.cells.is_subset(&other.cells)
    }

    /// Subset subtraction: given `self` ⊂ `other`, the cells unique to
    /// `other` must contain exactly `other.count - self.count` mines.
    pub fn subtract_from(&self, other: &Constraint) -> Constraint {
        let remaining: HashSet<Cell> = other
            .cells
            .iter()
            .filter(|c| !self.cells.contains(c))
            .copied()
            .collect();
        Constraint::new(remaining, other.count - self.count)
    }
}

impl fmt::Display for Constraint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut cells: Vec<Cell> = self.cells.iter().copied().collect();
        cells.sort();
        write!(f, "{{")?;
        for (i, cell) in cells.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", cell)?;
        }
        write!(f, "}} = {}", self.count)
    }
}
