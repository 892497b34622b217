//! Minescout is a knowledge-based Minesweeper agent.
//!
//! It plays by pure logical deduction: every revealed neighbour count becomes
//! a [`Constraint`] — "exactly `count` of these cells are mines" — and a
//! fixed-point propagation loop extracts certainties, shrinks constraints by
//! what is now known, and derives new constraints by subset subtraction. The
//! engine only ever asserts facts it can prove; it does no probability
//! estimation.
//!
//! # Core Concepts
//!
//! - **[`Constraint`]**: a statement over a set of cells and a mine count,
//!   able to yield its certainties and to shrink as cells resolve.
//! - **[`Engine`]**: owns the accumulated knowledge (safe cells, mine cells,
//!   probed cells, live constraints), ingests observations, and answers move
//!   queries.
//! - **[`Board`]**: the ground-truth collaborator drivers reveal against.
//!   The engine never sees it.
//!
//! # Example: a zero-count observation clears its neighbourhood
//!
//! ```
//! use minescout::engine::{cell::Cell, Engine};
//!
//! let mut engine = Engine::with_seed(3, 3, 0);
//! engine.add_observation(Cell::new(1, 1), 0)?;
//!
//! // Every neighbour of (1, 1) is now proven safe.
//! assert!(engine.safe_cells().contains(&Cell::new(0, 0)));
//! assert!(engine.safe_cells().contains(&Cell::new(2, 2)));
//!
//! // And the engine can hand one of them to the driver.
//! let next = engine.make_safe_move().expect("a safe cell is available");
//! assert_ne!(next, Cell::new(1, 1));
//! # Ok::<(), minescout::error::Error>(())
//! ```
//!
//! [`Constraint`]: engine::constraint::Constraint
//! [`Engine`]: engine::Engine
//! [`Board`]: board::Board

pub mod board;
pub mod engine;
pub mod error;
