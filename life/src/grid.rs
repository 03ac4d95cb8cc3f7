// grid.rs - Grid types for Conway's Game of Life

use std::fmt;

use rand::Rng;
use rand::distributions::Standard;

use crate::error::{Error, Result};

pub const DEFAULT_ROWS: usize = 50;                  // Playing area height
pub const DEFAULT_COLS: usize = 100;                 // Playing area width
pub const MAX_CELLS: usize = 1 << 24;                // Largest board a session may allocate
const ALIVE_THRESHOLD: f64 = 0.5;                    // Random fill: alive when draw > threshold

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Dimensions {
    pub rows: usize,
    pub cols: usize,
}

impl Dimensions {
    pub fn new(rows: usize, cols: usize) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::ZeroDimension { rows, cols });
        }
        match rows.checked_mul(cols) {
            Some(area) if area <= MAX_CELLS => Ok(Self { rows, cols }),
            _ => Err(Error::TooLarge { rows, cols }),
        }
    }

    pub fn area(&self) -> usize {
        self.rows * self.cols
    }

    pub fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    fn check(&self, row: usize, col: usize) -> Result<()> {
        if self.contains(row, col) {
            Ok(())
        } else {
            Err(Error::OutOfBounds { row, col, rows: self.rows, cols: self.cols })
        }
    }
}

impl Default for Dimensions {
    fn default() -> Self {
        Self { rows: DEFAULT_ROWS, cols: DEFAULT_COLS }
    }
}

/// Fixed-size board of alive/dead cells, stored row-major.
///
/// A `Grid` is never edited once handed out: every change (a step, a toggle,
/// a reset) produces a new grid, so a snapshot can be shared freely.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    dims: Dimensions,
    cells: Vec<bool>,
}

impl Grid {
    /// All cells dead.
    pub fn empty(dims: Dimensions) -> Self {
        Self { dims, cells: vec![false; dims.area()] }
    }

    /// Each cell independently alive with probability one half.
    pub fn random(dims: Dimensions) -> Self {
        Self::random_with(dims, &mut rand::thread_rng())
    }

    pub fn random_with<R: Rng + ?Sized>(dims: Dimensions, rng: &mut R) -> Self {
        let cells = (0..dims.area())
            .map(|_| rng.sample::<f64, _>(Standard) > ALIVE_THRESHOLD)
            .collect();
        Self { dims, cells }
    }

    /// Builds a grid from rows of `0`/`1` values.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        let dims = Dimensions::new(height, width)?;

        let mut cells = Vec::with_capacity(dims.area());
        for (row, values) in rows.into_iter().enumerate() {
            if values.len() != width {
                return Err(Error::RaggedRows { row, expected: width, found: values.len() });
            }
            for (col, value) in values.into_iter().enumerate() {
                match value {
                    0 => cells.push(false),
                    1 => cells.push(true),
                    _ => return Err(Error::InvalidCell { row, col, value }),
                }
            }
        }
        Ok(Self { dims, cells })
    }

    pub fn with_live_cells(dims: Dimensions, live: &[(usize, usize)]) -> Result<Self> {
        let mut grid = Self::empty(dims);
        for &(row, col) in live {
            dims.check(row, col)?;
            grid.cells[row * dims.cols + col] = true;
        }
        Ok(grid)
    }

    /// Copy of this grid with the cell at (`row`, `col`) flipped.
    pub fn toggled(&self, row: usize, col: usize) -> Result<Self> {
        self.dims.check(row, col)?;
        let mut next = self.clone();
        let index = self.index(row, col);
        next.cells[index] = !next.cells[index];
        Ok(next)
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn rows(&self) -> usize {
        self.dims.rows
    }

    pub fn cols(&self) -> usize {
        self.dims.cols
    }

    /// `None` when the position lies outside the grid.
    pub fn is_alive(&self, row: usize, col: usize) -> Option<bool> {
        if self.dims.contains(row, col) {
            Some(self.cells[self.index(row, col)])
        } else {
            None
        }
    }

    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    pub fn live_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.dims.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &alive)| alive)
            .map(move |(index, _)| (index / cols, index % cols))
    }

    pub fn rows_iter(&self) -> impl Iterator<Item = &[bool]> + '_ {
        self.cells.chunks(self.dims.cols)
    }

    // Unchecked: callers validate against `dims` first.
    pub(crate) fn get(&self, row: usize, col: usize) -> bool {
        self.cells[self.index(row, col)]
    }

    pub(crate) fn from_cells(dims: Dimensions, cells: Vec<bool>) -> Self {
        debug_assert_eq!(cells.len(), dims.area());
        Self { dims, cells }
    }

    fn index(&self, row: usize, col: usize) -> usize {
        row * self.dims.cols + col
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows_iter() {
            for &alive in row {
                f.write_str(if alive { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
