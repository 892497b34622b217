use std::fmt;

use serde::{Deserialize, Serialize};

/// A `(row, column)` coordinate on the board.
///
/// The engine treats this as an opaque, hashable key. Only
/// [`Grid::neighbours`] ever interprets it geometrically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
}

impl Cell {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(u32, u32)> for Cell {
    fn from((row, col): (u32, u32)) -> Self {
        Self::new(row, col)
    }
}

/// The fixed dimensions of a board, shared by the engine and any board
/// collaborator built on top of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    height: u32,
    width: u32,
}

impl Grid {
    pub fn new(height: u32, width: u32) -> Self {
        Self { height, width }
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Total number of cells. `u64` because `height * width` can overflow
    /// `u32` for degenerate inputs.
    pub fn len(&self) -> u64 {
        u64::from(self.height) * u64::from(self.width)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.row < self.height && cell.col < self.width
    }

    /// Iterates every cell of the grid in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        let width = self.width;
        (0..self.height).flat_map(move |row| (0..width).map(move |col| Cell::new(row, col)))
    }

    /// The up-to-8 in-bounds neighbours of `cell`, excluding `cell` itself.
    pub fn neighbours(&self, cell: Cell) -> impl Iterator<Item = Cell> + '_ {
        let grid = *self;
        let row_lo = cell.row.saturating_sub(1);
        let col_lo = cell.col.saturating_sub(1);
        (row_lo..=cell.row + 1)
            .flat_map(move |row| (col_lo..=cell.col + 1).map(move |col| Cell::new(row, col)))
            .filter(move |&n| n != cell && grid.contains(n))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn sorted(iter: impl Iterator<Item = Cell>) -> Vec<Cell> {
        let mut cells: Vec<Cell> = iter.collect();
        cells.sort();
        cells
    }

    #[test]
    fn interior_cell_has_eight_neighbours() {
        let grid = Grid::new(4, 4);
        let neighbours = sorted(grid.neighbours(Cell::new(2, 2)));
        assert_eq!(neighbours.len(), 8);
        assert!(!neighbours.contains(&Cell::new(2, 2)));
        assert!(neighbours.contains(&Cell::new(1, 1)));
        assert!(neighbours.contains(&Cell::new(3, 3)));
    }

    #[test]
    fn corner_cell_has_three_neighbours() {
        let grid = Grid::new(4, 4);
        let neighbours = sorted(grid.neighbours(Cell::new(0, 0)));
        assert_eq!(
            neighbours,
            vec![Cell::new(0, 1), Cell::new(1, 0), Cell::new(1, 1)]
        );
    }

    #[test]
    fn edge_cell_has_five_neighbours() {
        let grid = Grid::new(4, 4);
        assert_eq!(grid.neighbours(Cell::new(0, 2)).count(), 5);
        assert_eq!(grid.neighbours(Cell::new(3, 1)).count(), 5);
    }

    #[test]
    fn neighbours_respect_bounds() {
        let grid = Grid::new(2, 2);
        for cell in grid.cells() {
            for n in grid.neighbours(cell) {
                assert!(grid.contains(n));
            }
        }
    }

    #[test]
    fn single_cell_grid_has_no_neighbours() {
        let grid = Grid::new(1, 1);
        assert_eq!(grid.neighbours(Cell::new(0, 0)).count(), 0);
    }

    #[test]
    fn cells_enumerates_the_whole_grid() {
        let grid = Grid::new(3, 2);
        assert_eq!(grid.cells().count() as u64, grid.len());
        assert!(grid.cells().all(|c| grid.contains(c)));
    }
}
