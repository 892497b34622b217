use std::backtrace::Backtrace;

use crate::engine::cell::Cell;

pub type Result<T, E = Error> = core::result::Result<T, E>;

/// Everything that can go wrong while feeding the engine or building a board.
///
/// The engine trusts observations as ground truth, so most of these are
/// precondition violations in the calling driver rather than recoverable
/// runtime failures. The contradiction variants exist so a defective
/// deduction surfaces as an error instead of silently corrupting the
/// knowledge base.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("cell {cell} is outside the {height}x{width} grid")]
    OutOfBounds { cell: Cell, height: u32, width: u32 },

    #[error("neighbour count {count} for {cell} exceeds the 8 possible neighbours")]
    CountOutOfRange { cell: Cell, count: u8 },

    #[error("cell {cell} has already been observed")]
    DuplicateObservation { cell: Cell },

    #[error("cell {cell} is proven to be a mine; it cannot be marked safe")]
    MarkedSafeOverMine { cell: Cell },

    #[error("cell {cell} is proven safe; it cannot be marked as a mine")]
    MarkedMineOverSafe { cell: Cell },

    #[error("cannot place {requested} mines on a grid with {capacity} cells")]
    TooManyMines { requested: u32, capacity: u64 },
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inner: {inner}\n{backtrace}")]
    Inner {
        inner: Box<EngineError>,
        backtrace: Box<Backtrace>,
    },
}

impl Error {
    /// The underlying engine error, without the captured backtrace.
    pub fn inner(&self) -> &EngineError {
        match self {
            Error::Inner { inner, .. } => inner,
        }
    }
}

impl From<EngineError> for Error {
    fn from(inner: EngineError) -> Self {
        Error::Inner {
            inner: Box::new(inner),
            backtrace: Box::new(std::backtrace::Backtrace::capture()),
        }
    }
}
