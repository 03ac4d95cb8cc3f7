//! Conway's Game of Life on a bounded grid.
//!
//! [`rules::step`] maps one [`Grid`] to the next without wrapping at the
//! edges. [`Simulation`] drives it from a timer task and publishes each new
//! generation as a [`Snapshot`].

pub mod config;
pub mod driver;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod rules;

pub use config::{Config, StartGrid};
pub use driver::{RunState, Simulation, Snapshot};
pub use error::{Error, Result};
pub use grid::{Dimensions, Grid};
pub use patterns::{PATTERNS, Pattern};
