// config.rs - Session settings: board size, step delay, initial grid

use std::str::FromStr;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::grid::{Dimensions, Grid};

pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(250);
pub const DEFAULT_CELL_SIZE: f32 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StartGrid {
    #[default]
    Random,
    Empty,
}

impl StartGrid {
    pub fn generate(self, dims: Dimensions) -> Grid {
        match self {
            StartGrid::Random => Grid::random(dims),
            StartGrid::Empty => Grid::empty(dims),
        }
    }
}

impl FromStr for StartGrid {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(StartGrid::Random),
            "empty" => Ok(StartGrid::Empty),
            _ => Err(Error::UnknownStart(s.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub dimensions: Dimensions,
    pub step_delay: Duration,
    pub start: StartGrid,
    pub cell_size: f32,               // Side of one painted cell, in points
}

impl Config {
    pub fn new(rows: usize, cols: usize, step_delay_ms: u64) -> Result<Self> {
        if step_delay_ms == 0 {
            return Err(Error::ZeroDelay);
        }
        Ok(Self {
            dimensions: Dimensions::new(rows, cols)?,
            step_delay: Duration::from_millis(step_delay_ms),
            ..Self::default()
        })
    }

    pub fn with_start(mut self, start: StartGrid) -> Self {
        self.start = start;
        self
    }

    pub fn with_cell_size(mut self, cell_size: f32) -> Self {
        self.cell_size = cell_size;
        self
    }

    pub fn initial_grid(&self) -> Grid {
        self.start.generate(self.dimensions)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dimensions: Dimensions::default(),
            step_delay: DEFAULT_STEP_DELAY,
            start: StartGrid::default(),
            cell_size: DEFAULT_CELL_SIZE,
        }
    }
}
