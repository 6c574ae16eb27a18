use std::collections::VecDeque;

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;
use tracing::{debug, trace};

use crate::{engine, generator, Grid, Pos, Scan, World};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    Playing,
    #[default]
    Paused,
}

impl RunMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Playing => Self::Paused,
            Self::Paused => Self::Playing,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    TogglePlay,
    Clear,
    Randomize,
    SeedPattern,
    /// the position must be inside the grid, see [`Controller::submit`].
    ToggleCell(Pos),
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("cell {pos:?} is outside of the {grid} grid")]
    OutOfBounds { pos: Pos, grid: Grid },
}

/// parameters fixed for the lifetime of a controller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SimConfig {
    pub grid: Grid,
    pub ticks_per_generation: u32,
    /// probability in `[0, 1]` for a cell to be alive after `Randomize`.
    pub density: f64,
    pub scan: Scan,
}

impl SimConfig {
    pub const DEFAULT_TICKS_PER_GENERATION: u32 = 2;
    pub const DEFAULT_DENSITY: f64 = 0.5;

    pub fn new(grid: Grid) -> Self {
        Self {
            grid,
            ticks_per_generation: Self::DEFAULT_TICKS_PER_GENERATION,
            density: Self::DEFAULT_DENSITY,
            scan: Scan::default(),
        }
    }
}

/// renderable state after a tick.
#[derive(Debug)]
pub struct Frame<'a, W>
where
    W: World,
{
    pub world: &'a W,
    pub generation: u64,
    pub mode: RunMode,
}

/// owns the live cells and decides, tick after tick, when to advance them.
#[derive(Debug)]
pub struct Controller<W>
where
    W: World,
{
    config: SimConfig,
    world: W,
    mode: RunMode,
    generation: u64,
    ticks: u32,
    pending: VecDeque<Command>,
    running: bool,
    rng: StdRng,
}

impl<W> Controller<W>
where
    W: World,
{
    pub fn new(config: SimConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    pub fn with_rng(config: SimConfig, rng: StdRng) -> Self {
        Self {
            config,
            world: W::default(),
            mode: RunMode::Paused,
            generation: 0,
            ticks: 0,
            pending: VecDeque::new(),
            running: true,
            rng,
        }
    }

    /// replaces the live cells without touching mode or counters.
    ///
    /// positions are wrapped onto the grid before being stored.
    pub fn seed(&mut self, actives: impl IntoIterator<Item = Pos>) {
        let grid = self.config.grid;
        self.world = W::default();
        for pos in actives {
            self.world.set_alive(grid.wrap(pos), true);
        }
    }

    pub fn world(&self) -> &W {
        &self.world
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// queues a command for the next tick.
    ///
    /// `ToggleCell` positions outside of the grid are rejected here, the queue
    /// only ever holds in-bounds positions.
    pub fn submit(&mut self, command: Command) -> Result<(), CommandError> {
        if let Command::ToggleCell(pos) = command {
            let grid = self.config.grid;
            if !grid.contains(pos) {
                return Err(CommandError::OutOfBounds { pos, grid });
            }
        }
        self.pending.push_back(command);
        Ok(())
    }

    /// advances the simulation by one scheduling tick.
    ///
    /// a due generation transition happens first, then every pending command in
    /// submission order. returns `None` once `Quit` has been applied.
    pub fn tick(&mut self) -> Option<Frame<'_, W>> {
        if !self.running {
            return None;
        }

        if self.mode == RunMode::Playing {
            self.ticks += 1;
            self.generation += 1;
        }

        if self.ticks >= self.config.ticks_per_generation {
            self.ticks = 0;
            let next = engine::step(&self.world, self.config.grid, self.config.scan);
            trace!(generation = self.generation, alive = next.len(), "transition");
            self.world = next;
        }

        while let Some(command) = self.pending.pop_front() {
            self.apply(command);
            if !self.running {
                self.pending.clear();
                return None;
            }
        }

        Some(Frame {
            world: &self.world,
            generation: self.generation,
            mode: self.mode,
        })
    }

    fn apply(&mut self, command: Command) {
        debug!(?command, "applying command");
        let grid = self.config.grid;
        match command {
            Command::TogglePlay => self.mode = self.mode.toggled(),
            Command::Clear => {
                self.world.clear();
                self.mode = RunMode::Paused;
                self.reset_counters();
            }
            Command::Randomize => {
                self.world = generator::generate_random(grid, self.config.density, &mut self.rng);
                self.reset_counters();
            }
            Command::SeedPattern => {
                self.world = generator::generate_pattern(grid);
                self.mode = RunMode::Paused;
                self.reset_counters();
            }
            Command::ToggleCell(pos) => {
                debug_assert!(grid.contains(pos), "unchecked toggle at {pos:?}");
                self.world.toggle(pos);
            }
            Command::Quit => self.running = false,
        }
    }

    fn reset_counters(&mut self) {
        self.generation = 0;
        self.ticks = 0;
    }
}
