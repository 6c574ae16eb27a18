use std::{
    fs::File,
    path::Path,
    sync::{mpsc, Mutex},
};

use anyhow::Context;
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

pub use utils::Pos;
mod utils;

pub use world::{Grid, HashedWorld, World};
pub mod world;

pub use engine::Scan;
pub mod engine;

pub mod generator;

pub use controller::{Command, CommandError, Controller, Frame, RunMode, SimConfig};
mod controller;

pub use config::{Args, Config, Start};
mod config;

pub use clock::Clock;
mod clock;

pub use view::View;
mod view;

/// logs only go to a file, the terminal belongs to the view.
fn init_logging(path: Option<&Path>) -> anyhow::Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// hands pending inputs to the controller. a closed input channel quits, since
/// nothing else can stop a terminal in raw mode.
fn forward_inputs<W>(inputs: &mpsc::Receiver<Command>, controller: &mut Controller<W>)
where
    W: World,
{
    loop {
        let command = match inputs.try_recv() {
            Ok(command) => command,
            Err(mpsc::TryRecvError::Empty) => return,
            Err(mpsc::TryRecvError::Disconnected) => {
                warn!("terminal input closed, quitting");
                Command::Quit
            }
        };
        let quit = command == Command::Quit;
        if let Err(err) = controller.submit(command) {
            warn!(%err, "dropping command");
        }
        if quit {
            return;
        }
    }
}

fn run(config: Config) -> anyhow::Result<()> {
    let grid = config.sim.grid;
    let mut controller: Controller<HashedWorld> = Controller::new(config.sim);
    match config.start {
        Start::Empty => (),
        Start::Random => controller.submit(Command::Randomize)?,
        Start::Pattern => controller.submit(Command::SeedPattern)?,
    }

    let mut view = View::open().context("failed to set up the terminal")?;
    let inputs = view::spawn_input(grid);
    let mut clock = Clock::new(config.tick_rate);

    loop {
        clock.tick();
        forward_inputs(&inputs, &mut controller);
        let Some(frame) = controller.tick() else {
            break;
        };
        view.draw(&frame).context("failed to draw the grid")?;
    }
    Ok(())
}

pub fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = Config::resolve(args, termion::terminal_size().ok());
    init_logging(config.log_file.as_deref())?;

    info!(
        grid = %config.sim.grid,
        ticks_per_generation = config.sim.ticks_per_generation,
        density = config.sim.density,
        tick_rate = config.tick_rate,
        scan = ?config.sim.scan,
        start = ?config.start,
        "starting simulation"
    );
    run(config)?;
    info!("simulation stopped");
    Ok(())
}
