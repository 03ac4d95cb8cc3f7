// driver.rs - Timer-driven simulation: a spawned step task plus a running flag
//
// The current board lives in a `watch` channel. Every writer (the step task,
// cell toggles, resets) swaps in a whole new `Snapshot` under the channel's
// lock, so subscribers only ever see complete generations. The step itself is
// computed outside the lock.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::watch;

use crate::config::Config;
use crate::error::Result;
use crate::grid::{Dimensions, Grid};
use crate::patterns::Pattern;
use crate::rules;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Stopped,
    Running,
}

/// One published board together with the number of steps since the last reset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub grid: Arc<Grid>,
    pub generation: u64,
}

impl Snapshot {
    fn fresh(grid: Grid) -> Self {
        Self { grid: Arc::new(grid), generation: 0 }
    }

    fn advance(&self) -> Self {
        Self {
            grid: Arc::new(rules::step(&self.grid)),
            generation: self.generation + 1,
        }
    }
}

#[derive(Default)]
struct Control {
    running: AtomicBool,
    epoch: AtomicU64,                 // Bumped on every start; older step tasks retire
}

impl Control {
    fn is_current(&self, epoch: u64) -> bool {
        self.running.load(Ordering::SeqCst) && self.epoch.load(Ordering::SeqCst) == epoch
    }
}

pub struct Simulation {
    runtime: Handle,
    step_delay: Duration,
    dims: Dimensions,
    control: Arc<Control>,
    snapshots: Arc<watch::Sender<Snapshot>>,
}

impl Simulation {
    /// Starts stopped, on the grid `config.start` asks for.
    pub fn new(runtime: Handle, config: &Config) -> Self {
        Self::with_grid(runtime, config, config.initial_grid())
    }

    pub fn with_grid(runtime: Handle, config: &Config, grid: Grid) -> Self {
        let dims = grid.dimensions();
        let (snapshots, _) = watch::channel(Snapshot::fresh(grid));
        Self {
            runtime,
            step_delay: config.step_delay,
            dims,
            control: Arc::new(Control::default()),
            snapshots: Arc::new(snapshots),
        }
    }

    pub fn state(&self) -> RunState {
        if self.control.running.load(Ordering::SeqCst) {
            RunState::Running
        } else {
            RunState::Stopped
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    pub fn step_delay(&self) -> Duration {
        self.step_delay
    }

    pub fn dimensions(&self) -> Dimensions {
        self.dims
    }

    pub fn snapshot(&self) -> Snapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver notified whenever a new snapshot is published.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshots.subscribe()
    }

    /// Stopped -> Running. Stepping continues from the current grid.
    pub fn start(&self) {
        if self.is_running() {
            return;
        }
        let epoch = self.control.epoch.fetch_add(1, Ordering::SeqCst) + 1;
        self.control.running.store(true, Ordering::SeqCst);
        log::info!("simulation started at generation {}", self.snapshots.borrow().generation);

        self.runtime.spawn(run_steps(
            Arc::clone(&self.control),
            Arc::clone(&self.snapshots),
            self.step_delay,
            epoch,
        ));
    }

    /// Running -> Stopped. The step task notices at the top of its next cycle.
    pub fn stop(&self) {
        if self.control.running.swap(false, Ordering::SeqCst) {
            log::info!("simulation stopped at generation {}", self.snapshots.borrow().generation);
        }
    }

    pub fn toggle_running(&self) -> RunState {
        match self.state() {
            RunState::Running => self.stop(),
            RunState::Stopped => self.start(),
        }
        self.state()
    }

    /// Flips one cell in the current grid and publishes the result.
    pub fn toggle_cell(&self, row: usize, col: usize) -> Result<()> {
        let mut outcome = Ok(());
        self.snapshots.send_if_modified(|snapshot| match snapshot.grid.toggled(row, col) {
            Ok(grid) => {
                snapshot.grid = Arc::new(grid);
                true
            }
            Err(err) => {
                outcome = Err(err);
                false
            }
        });
        outcome
    }

    pub fn reset_empty(&self) {
        log::info!("resetting to an empty {}x{} grid", self.dims.rows, self.dims.cols);
        self.replace(Grid::empty(self.dims));
    }

    pub fn reset_random(&self) {
        log::info!("resetting to a random {}x{} grid", self.dims.rows, self.dims.cols);
        self.replace(Grid::random(self.dims));
    }

    pub fn apply_pattern(&self, pattern: &Pattern) -> Result<()> {
        let grid = pattern.place(self.dims)?;
        log::info!("applying pattern {:?}", pattern.name);
        self.replace(grid);
        Ok(())
    }

    fn replace(&self, grid: Grid) {
        self.snapshots.send_replace(Snapshot::fresh(grid));
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        self.control.running.store(false, Ordering::SeqCst);
    }
}

enum Publish {
    Done,
    Stale,                            // Grid replaced while the step was computed
    Retired,
}

// Swaps in `next` only if this run is still current and `base` is still the
// published grid, so a concurrent toggle or reset is never overwritten.
fn publish_step(
    control: &Control,
    snapshots: &watch::Sender<Snapshot>,
    epoch: u64,
    base: &Snapshot,
    next: Snapshot,
) -> Publish {
    let mut outcome = Publish::Retired;
    snapshots.send_if_modified(|snapshot| {
        if !control.is_current(epoch) {
            return false;
        }
        if !Arc::ptr_eq(&snapshot.grid, &base.grid) {
            outcome = Publish::Stale;
            return false;
        }
        *snapshot = next;
        outcome = Publish::Done;
        true
    });
    outcome
}

async fn run_steps(
    control: Arc<Control>,
    snapshots: Arc<watch::Sender<Snapshot>>,
    step_delay: Duration,
    epoch: u64,
) {
    while control.is_current(epoch) {
        // Step outside the channel lock; readers keep the previous generation meanwhile
        let base = snapshots.borrow().clone();
        let next = base.advance();
        match publish_step(&control, &snapshots, epoch, &base, next) {
            Publish::Done => {
                log::debug!("published generation {}", base.generation + 1);
                tokio::time::sleep(step_delay).await;
            }
            Publish::Stale => log::debug!("grid changed during step, recomputing"),
            Publish::Retired => break,
        }
    }
    log::debug!("step task for run {} finished", epoch);
}
