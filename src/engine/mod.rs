//! The inference engine: accumulated knowledge about a Minesweeper board and
//! the fixed-point propagation that grows it.
//!
//! The engine never sees ground truth. Its only input is
//! [`Engine::add_observation`]: a revealed cell plus the number of mines among
//! that cell's neighbours. Each observation becomes a [`Constraint`]
//! ("exactly `count` of these cells are mines"), and propagation repeatedly
//! extracts certainties, shrinks every constraint by what is now known, and
//! derives new constraints by subset subtraction until a full pass changes
//! nothing.

pub mod cell;
pub mod constraint;
pub mod stats;

use im::HashSet;
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, trace};

use crate::{
    engine::{
        cell::{Cell, Grid},
        constraint::Constraint,
        stats::PropagationStats,
    },
    error::{EngineError, Result},
};

/// A knowledge-based Minesweeper player.
///
/// The engine owns three monotonically growing fact sets (`moves_made`,
/// `safe`, `mines`) and a working list of [`Constraint`]s. All mutation of
/// the fact sets is routed through [`Engine::mark_safe`] and
/// [`Engine::mark_mine`], which also cascade into every live constraint;
/// later subset-subtraction steps depend on constraints being pre-shrunk.
///
/// Strictly sequential use: reveal one cell, let the propagation settle,
/// query, reveal the next.
pub struct Engine {
    grid: Grid,
    moves_made: HashSet<Cell>,
    safe: HashSet<Cell>,
    mines: HashSet<Cell>,
    knowledge: Vec<Constraint>,
    rng: ChaCha8Rng,
    total_stats: PropagationStats,
}

impl Engine {
    /// An engine for a `height` x `width` board, with an entropy-seeded RNG
    /// backing [`Engine::make_random_move`].
    pub fn new(height: u32, width: u32) -> Self {
        Self::with_rng(height, width, ChaCha8Rng::from_entropy())
    }

    /// A deterministic engine. Same seed, same board, same driver: same game.
    pub fn with_seed(height: u32, width: u32, seed: u64) -> Self {
        Self::with_rng(height, width, ChaCha8Rng::seed_from_u64(seed))
    }

    fn with_rng(height: u32, width: u32, rng: ChaCha8Rng) -> Self {
        Self {
            grid: Grid::new(height, width),
            moves_made: HashSet::new(),
            safe: HashSet::new(),
            mines: HashSet::new(),
            knowledge: Vec::new(),
            rng,
            total_stats: PropagationStats::default(),
        }
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Cells the driver has already probed.
    pub fn moves_made(&self) -> &HashSet<Cell> {
        &self.moves_made
    }

    /// Cells proven not to contain mines.
    pub fn safe_cells(&self) -> &HashSet<Cell> {
        &self.safe
    }

    /// Cells proven to contain mines.
    pub fn mine_cells(&self) -> &HashSet<Cell> {
        &self.mines
    }

    /// The live constraints. Settled after every public operation: no
    /// constraint references a resolved cell.
    pub fn knowledge(&self) -> &[Constraint] {
        &self.knowledge
    }

    /// Propagation work accumulated over the engine's lifetime.
    pub fn total_stats(&self) -> &PropagationStats {
        &self.total_stats
    }

    /// Marks `cell` as proven safe and shrinks every constraint accordingly.
    /// Idempotent. Rejects cells already proven to be mines: a caller
    /// asserting both is a defect worth surfacing, not overwriting.
    pub fn mark_safe(&mut self, cell: Cell) -> Result<()> {
        if self.mines.contains(&cell) {
            return Err(EngineError::MarkedSafeOverMine { cell }.into());
        }
        self.safe.insert(cell);
        for constraint in &mut self.knowledge {
            constraint.mark_safe(cell);
        }
        Ok(())
    }

    /// Marks `cell` as a proven mine and shrinks every constraint
    /// accordingly. Idempotent. Must only be called for cells that are
    /// actually provable; speculative calls break soundness.
    pub fn mark_mine(&mut self, cell: Cell) -> Result<()> {
        if self.safe.contains(&cell) {
            return Err(EngineError::MarkedMineOverSafe { cell }.into());
        }
        self.mines.insert(cell);
        for constraint in &mut self.knowledge {
            constraint.mark_mine(cell);
        }
        Ok(())
    }

    /// Ingests one observation: `cell` was revealed and has `count` mines
    /// among its up-to-8 neighbours. Folds the observation into a new
    /// constraint and propagates to a fixed point.
    ///
    /// Each cell may be observed at most once, and `count` must be at most 8;
    /// violations are rejected rather than turned into inconsistent
    /// constraints.
    pub fn add_observation(&mut self, cell: Cell, count: u8) -> Result<PropagationStats> {
        if !self.grid.contains(cell) {
            return Err(EngineError::OutOfBounds {
                cell,
                height: self.grid.height(),
                width: self.grid.width(),
            }
            .into());
        }
        if count > 8 {
            return Err(EngineError::CountOutOfRange { cell, count }.into());
        }
        if self.moves_made.contains(&cell) {
            return Err(EngineError::DuplicateObservation { cell }.into());
        }

        self.mark_safe(cell)?;
        self.moves_made.insert(cell);

        // Fold what is already known into the new constraint: resolved-safe
        // neighbours contribute nothing, known mines are already accounted
        // for in `count`.
        let mut adjusted = i32::from(count);
        let mut frontier = HashSet::new();
        let neighbours: Vec<Cell> = self.grid.neighbours(cell).collect();
        for neighbour in neighbours {
            if self.moves_made.contains(&neighbour) || self.safe.contains(&neighbour) {
                continue;
            }
            if self.mines.contains(&neighbour) {
                adjusted -= 1;
            } else {
                frontier.insert(neighbour);
            }
        }

        let observed = Constraint::new(frontier, adjusted);
        debug!(%cell, count, constraint = %observed, "observation ingested");
        self.knowledge.push(observed);

        self.propagate()
    }

    /// Returns a cell proven safe that has not been probed yet. Which one is
    /// unspecified. Does not mutate state.
    pub fn make_safe_move(&self) -> Option<Cell> {
        self.safe
            .iter()
            .find(|cell| !self.moves_made.contains(cell))
            .copied()
    }

    /// Returns a uniformly random cell that has not been probed and is not a
    /// proven mine. Unlike [`Engine::make_safe_move`] the result may be of
    /// unknown safety.
    pub fn make_random_move(&mut self) -> Option<Cell> {
        let candidates: Vec<Cell> = self
            .grid
            .cells()
            .filter(|cell| !self.moves_made.contains(cell) && !self.mines.contains(cell))
            .collect();
        candidates.choose(&mut self.rng).copied()
    }

    /// A serialisable, deterministic view of the settled state.
    pub fn snapshot(&self) -> Snapshot {
        let sorted = |set: &HashSet<Cell>| {
            let mut cells: Vec<Cell> = set.iter().copied().collect();
            cells.sort();
            cells
        };
        Snapshot {
            height: self.grid.height(),
            width: self.grid.width(),
            moves_made: sorted(&self.moves_made),
            safe: sorted(&self.safe),
            mines: sorted(&self.mines),
            knowledge: self.knowledge.clone(),
            stats: self.total_stats.clone(),
        }
    }

    /// Runs propagation passes until one full pass leaves the knowledge base
    /// unchanged. Terminates: every pass either proves a new global fact,
    /// shrinks some constraint, or retires one, and nothing grows the
    /// unresolved cell universe.
    fn propagate(&mut self) -> Result<PropagationStats> {
        let mut stats = PropagationStats::default();
        loop {
            stats.passes += 1;
            let before = self.knowledge.clone();

            self.resolve_certainties(&mut stats)?;
            self.derive_subset_constraints(&mut stats);

            let live = self.knowledge.len();
            self.knowledge.retain(|constraint| !constraint.is_empty());
            stats.constraints_retired += (live - self.knowledge.len()) as u64;

            if knowledge_unchanged(&before, &self.knowledge) {
                break;
            }
        }
        debug!(
            passes = stats.passes,
            safes = stats.safes_learned,
            mines = stats.mines_learned,
            "propagation settled"
        );
        self.total_stats.merge(&stats);
        Ok(stats)
    }

    /// Pass step (a): mark every certainty any constraint yields. Marking
    /// shrinks all other constraints, so a single pass can cascade.
    fn resolve_certainties(&mut self, stats: &mut PropagationStats) -> Result<()> {
        for idx in 0..self.knowledge.len() {
            if let Some(safes) = self.knowledge[idx].known_safes() {
                for cell in safes {
                    if !self.safe.contains(&cell) {
                        trace!(%cell, "proven safe");
                        stats.safes_learned += 1;
                    }
                    self.mark_safe(cell)?;
                }
            }
            if let Some(mines) = self.knowledge[idx].known_mines() {
                for cell in mines {
                    if !self.mines.contains(&cell) {
                        trace!(%cell, "proven mine");
                        stats.mines_learned += 1;
                    }
                    self.mark_mine(cell)?;
                }
            }
        }
        Ok(())
    }

    /// Pass step (b): for every ordered pair (A, B) with A a strict subset of
    /// B, derive `(B.cells - A.cells, B.count - A.count)` and retire B.
    ///
    /// Works on a snapshot of the constraint list and applies all removals
    /// and additions afterwards; the live list is never mutated while being
    /// iterated.
    fn derive_subset_constraints(&mut self, stats: &mut PropagationStats) {
        let snapshot = self.knowledge.clone();
        let mut alive = vec![true; snapshot.len()];
        let mut derived: Vec<Constraint> = Vec::new();

        for (i, a) in snapshot.iter().enumerate() {
            if a.is_empty() {
                continue;
            }
            for (j, b) in snapshot.iter().enumerate() {
                if i == j || !alive[i] || !alive[j] || b.is_empty() {
                    continue;
                }
                if a.is_strict_subset_of(b) {
                    let inferred = a.subtract_from(b);
                    trace!(subset = %a, superset = %b, %inferred, "subset subtraction");
                    derived.push(inferred);
                    alive[j] = false;
                    stats.constraints_derived += 1;
                    stats.constraints_retired += 1;
                }
            }
        }

        if derived.is_empty() {
            return;
        }
        let mut next: Vec<Constraint> = snapshot
            .into_iter()
            .zip(alive)
            .filter_map(|(constraint, keep)| keep.then_some(constraint))
            .collect();
        next.append(&mut derived);
        self.knowledge = next;
    }
}

/// Order-independent value equality over the whole knowledge base, per pass.
fn knowledge_unchanged(before: &[Constraint], after: &[Constraint]) -> bool {
    before.len() == after.len()
        && before.iter().all(|constraint| after.contains(constraint))
        && after.iter().all(|constraint| before.contains(constraint))
}

/// A point-in-time, serialisable view of an [`Engine`]'s state.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub height: u32,
    pub width: u32,
    pub moves_made: Vec<Cell>,
    pub safe: Vec<Cell>,
    pub mines: Vec<Cell>,
    pub knowledge: Vec<Constraint>,
    pub stats: PropagationStats,
}
