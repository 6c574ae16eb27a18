use std::path::PathBuf;

use clap::{value_parser, Parser, ValueEnum};
use thiserror::Error;

use crate::{Grid, Scan, SimConfig};

/// grid used when the terminal size is unknown.
const FALLBACK_ROWS: i32 = 48;
const FALLBACK_COLS: i32 = 120;
/// lines of the terminal taken by the status bar.
const STATUS_LINES: u16 = 1;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("`{0}` is not a number")]
    NotANumber(String),
    #[error("density must be between 0 and 1, got {0}")]
    DensityOutOfRange(f64),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Start {
    #[default]
    Empty,
    Random,
    Pattern,
}

/// conway's game of life on a toroidal grid, in the terminal.
///
/// space plays or pauses, `c` clears, `r` randomizes, `p` seeds a pattern,
/// clicking a cell toggles it and `q` quits.
#[derive(Debug, Parser)]
#[command(author, version, about)]
pub struct Args {
    /// Number of rows of the grid, defaults to the terminal height.
    #[arg(long, value_name = "ROWS", value_parser = value_parser!(u16).range(1..))]
    pub rows: Option<u16>,
    /// Number of columns of the grid, defaults to the terminal width.
    #[arg(long, value_name = "COLUMNS", value_parser = value_parser!(u16).range(1..))]
    pub cols: Option<u16>,
    /// Scheduling ticks between two generations.
    #[arg(
        long,
        value_name = "TICKS",
        default_value_t = SimConfig::DEFAULT_TICKS_PER_GENERATION,
        value_parser = value_parser!(u32).range(1..)
    )]
    pub ticks_per_generation: u32,
    /// Probability for a cell to be alive after randomizing.
    #[arg(long, value_name = "PROBABILITY", default_value_t = SimConfig::DEFAULT_DENSITY, value_parser = parse_density)]
    pub density: f64,
    /// Scheduling ticks per second.
    #[arg(
        long,
        value_name = "HZ",
        default_value_t = 60,
        value_parser = value_parser!(u32).range(1..=1000)
    )]
    pub tick_rate: u32,
    /// How the next generation is computed.
    #[arg(long, value_enum, default_value_t = Scan::Full)]
    pub scan: Scan,
    /// Initial population.
    #[arg(long, value_enum, default_value_t = Start::Empty)]
    pub start: Start,
    /// Write logs to this file, filtered by RUST_LOG.
    #[arg(long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

fn parse_density(value: &str) -> Result<f64, ConfigError> {
    let density: f64 = value
        .trim()
        .parse()
        .map_err(|_| ConfigError::NotANumber(value.to_string()))?;
    if !(0.0..=1.0).contains(&density) {
        return Err(ConfigError::DensityOutOfRange(density));
    }
    Ok(density)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub sim: SimConfig,
    pub tick_rate: u32,
    pub start: Start,
    pub log_file: Option<PathBuf>,
}

impl Config {
    /// missing dimensions are taken from `terminal_size` (columns, lines).
    pub fn resolve(args: Args, terminal_size: Option<(u16, u16)>) -> Self {
        let (default_cols, default_rows) = match terminal_size {
            Some((width, height)) => (
                i32::from(width.max(1)),
                i32::from(height.saturating_sub(STATUS_LINES).max(1)),
            ),
            None => (FALLBACK_COLS, FALLBACK_ROWS),
        };
        let rows = args.rows.map_or(default_rows, i32::from);
        let cols = args.cols.map_or(default_cols, i32::from);

        let sim = SimConfig {
            grid: Grid::new(rows, cols),
            ticks_per_generation: args.ticks_per_generation,
            density: args.density,
            scan: args.scan,
        };
        Self {
            sim,
            tick_rate: args.tick_rate,
            start: args.start,
            log_file: args.log_file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Args, clap::Error> {
        Args::try_parse_from(std::iter::once("lifers").chain(args.iter().copied()))
    }

    #[test]
    fn test_defaults() {
        let config = Config::resolve(parse(&[]).unwrap(), None);
        assert_eq!(config.sim.grid, Grid::new(FALLBACK_ROWS, FALLBACK_COLS));
        assert_eq!(config.sim.ticks_per_generation, 2);
        assert_eq!(config.sim.density, 0.5);
        assert_eq!(config.sim.scan, Scan::Full);
        assert_eq!(config.tick_rate, 60);
        assert_eq!(config.start, Start::Empty);
        assert_eq!(config.log_file, None);
    }

    #[test]
    fn test_terminal_size() {
        let config = Config::resolve(parse(&[]).unwrap(), Some((80, 24)));
        assert_eq!(config.sim.grid, Grid::new(23, 80));
        let config = Config::resolve(parse(&["--rows", "10"]).unwrap(), Some((80, 24)));
        assert_eq!(config.sim.grid, Grid::new(10, 80));
        let config = Config::resolve(parse(&[]).unwrap(), Some((0, 1)));
        assert_eq!(config.sim.grid, Grid::new(1, 1));
    }

    #[test]
    fn test_explicit_values() {
        let args = parse(&[
            "--rows",
            "30",
            "--cols",
            "40",
            "--ticks-per-generation",
            "1",
            "--density",
            "0.25",
            "--tick-rate",
            "30",
            "--scan",
            "sparse",
            "--start",
            "pattern",
            "--log-file",
            "life.log",
        ])
        .unwrap();
        let config = Config::resolve(args, Some((80, 24)));
        assert_eq!(config.sim.grid, Grid::new(30, 40));
        assert_eq!(config.sim.ticks_per_generation, 1);
        assert_eq!(config.sim.density, 0.25);
        assert_eq!(config.sim.scan, Scan::Sparse);
        assert_eq!(config.tick_rate, 30);
        assert_eq!(config.start, Start::Pattern);
        assert_eq!(config.log_file, Some(PathBuf::from("life.log")));
    }

    #[test]
    fn test_rejects_invalid_values() {
        assert!(parse(&["--density", "1.5"]).is_err());
        assert!(parse(&["--density", "half"]).is_err());
        assert!(parse(&["--rows", "0"]).is_err());
        assert!(parse(&["--ticks-per-generation", "0"]).is_err());
        assert!(parse(&["--tick-rate", "0"]).is_err());
        assert!(parse(&["--scan", "diagonal"]).is_err());
    }

    #[test]
    fn test_parse_density() {
        assert_eq!(parse_density("0"), Ok(0.0));
        assert_eq!(parse_density(" 1 "), Ok(1.0));
        assert_eq!(parse_density("-0.1"), Err(ConfigError::DensityOutOfRange(-0.1)));
        assert_eq!(parse_density("x"), Err(ConfigError::NotANumber("x".into())));
    }
}
