// error.rs - Errors raised at the fallible edges of the crate

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("grid dimensions must be non-zero (got {rows}x{cols})")]
    ZeroDimension { rows: usize, cols: usize },

    #[error("a {rows}x{cols} grid exceeds the {} cell limit", crate::grid::MAX_CELLS)]
    TooLarge { rows: usize, cols: usize },

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRows { row: usize, expected: usize, found: usize },

    #[error("cell ({row}, {col}) holds {value}, expected 0 or 1")]
    InvalidCell { row: usize, col: usize, value: u8 },

    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfBounds { row: usize, col: usize, rows: usize, cols: usize },

    #[error("step delay must be at least 1 ms")]
    ZeroDelay,

    #[error("unknown start grid {0:?}, expected \"random\" or \"empty\"")]
    UnknownStart(String),

    #[error("pattern {name:?} does not fit a {rows}x{cols} grid")]
    PatternTooLarge { name: &'static str, rows: usize, cols: usize },
}
