//! The ground-truth side of a game: where the mines actually are.
//!
//! The engine never touches a [`Board`]. Drivers, tests and benches use it to
//! answer the two questions the engine is not allowed to ask directly: "is
//! this cell a mine?" and "how many mines neighbour this revealed cell?".

use std::fmt;

use im::HashSet;
use rand::Rng;

use crate::{
    engine::cell::{Cell, Grid},
    error::{EngineError, Result},
};

/// A fixed mine field.
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    mines: HashSet<Cell>,
}

impl Board {
    /// A board with `mine_count` mines placed uniformly at random by
    /// rejection sampling. Rejects more mines than the grid has cells.
    pub fn random(
        height: u32,
        width: u32,
        mine_count: u32,
        rng: &mut impl Rng,
    ) -> Result<Board> {
        let grid = Grid::new(height, width);
        if u64::from(mine_count) > grid.len() {
            return Err(EngineError::TooManyMines {
                requested: mine_count,
                capacity: grid.len(),
            }
            .into());
        }

        let mut mines = HashSet::new();
        while (mines.len() as u32) < mine_count {
            let cell = Cell::new(rng.gen_range(0..height), rng.gen_range(0..width));
            mines.insert(cell);
        }
        Ok(Self { grid, mines })
    }

    /// A board with mines at exactly the given cells. Out-of-bounds cells
    /// are rejected.
    pub fn with_mines(
        height: u32,
        width: u32,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Board> {
        let grid = Grid::new(height, width);
        let mut placed = HashSet::new();
        for cell in mines {
            if !grid.contains(cell) {
                return Err(EngineError::OutOfBounds {
                    cell,
                    height,
                    width,
                }
                .into());
            }
            placed.insert(cell);
        }
        Ok(Self {
            grid,
            mines: placed,
        })
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    pub fn mine_count(&self) -> usize {
        self.mines.len()
    }

    pub fn is_mine(&self, cell: Cell) -> bool {
        self.mines.contains(&cell)
    }

    /// The number of mines within one row and column of `cell`, the cell
    /// itself excluded. This is the count a driver feeds back to the engine
    /// after revealing a non-mine cell.
    pub fn nearby_mines(&self, cell: Cell) -> u8 {
        self.grid
            .neighbours(cell)
            .filter(|n| self.mines.contains(n))
            .count() as u8
    }

    /// True once every mine has been identified.
    pub fn won(&self, flagged: &HashSet<Cell>) -> bool {
        *flagged == self.mines
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rule = "--".repeat(self.grid.width() as usize) + "-";
        for row in 0..self.grid.height() {
            writeln!(f, "{}", rule)?;
            for col in 0..self.grid.width() {
                let mark = if self.is_mine(Cell::new(row, col)) {
                    'X'
                } else {
                    ' '
                };
                write!(f, "|{}", mark)?;
            }
            writeln!(f, "|")?;
        }
        write!(f, "{}", rule)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use super::*;

    #[test]
    fn random_board_has_the_requested_mine_count() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let board = Board::random(8, 8, 8, &mut rng).unwrap();
        assert_eq!(board.mine_count(), 8);
        for row in 0..8 {
            for col in 0..8 {
                // Just bounds; the placement itself is random.
                let _ = board.is_mine(Cell::new(row, col));
            }
        }
    }

    #[test]
    fn too_many_mines_is_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = Board::random(2, 2, 5, &mut rng).unwrap_err();
        assert!(matches!(
            err.inner(),
            crate::error::EngineError::TooManyMines {
                requested: 5,
                capacity: 4
            }
        ));
    }

    #[test]
    fn nearby_mines_counts_the_eight_neighbourhood() {
        let board = Board::with_mines(3, 3, [Cell::new(0, 0), Cell::new(2, 2)]).unwrap();
        assert_eq!(board.nearby_mines(Cell::new(1, 1)), 2);
        assert_eq!(board.nearby_mines(Cell::new(0, 2)), 0);
        assert_eq!(board.nearby_mines(Cell::new(2, 1)), 1);
        // The cell itself never counts.
        assert_eq!(board.nearby_mines(Cell::new(0, 0)), 0);
    }

    #[test]
    fn out_of_bounds_mine_is_rejected() {
        let err = Board::with_mines(2, 2, [Cell::new(2, 0)]).unwrap_err();
        assert!(matches!(
            err.inner(),
            crate::error::EngineError::OutOfBounds { .. }
        ));
    }

    #[test]
    fn won_requires_exactly_the_mine_set() {
        let board = Board::with_mines(3, 3, [Cell::new(1, 1)]).unwrap();
        let mut flagged = HashSet::new();
        assert!(!board.won(&flagged));
        flagged.insert(Cell::new(1, 1));
        assert!(board.won(&flagged));
        flagged.insert(Cell::new(0, 0));
        assert!(!board.won(&flagged));
    }

    #[test]
    fn display_marks_mines() {
        let board = Board::with_mines(2, 2, [Cell::new(0, 1)]).unwrap();
        let rendered = board.to_string();
        assert_eq!(rendered, "-----\n| |X|\n-----\n| | |\n-----");
    }
}
