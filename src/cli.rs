//! CLI argument parsing for closure-delay

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Output format for the delay report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text format (default)
    Text,
    /// JSON format for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "closure-delay")]
#[command(version)]
#[command(about = "Monte Carlo estimate of the delay caused by a lane closure", long_about = None)]
pub struct Cli {
    /// Engine configuration file (TOML)
    #[arg(short = 'c', long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Scenario file with [measurement] and [closure] tables (TOML)
    #[arg(short = 's', long = "scenario", value_name = "FILE")]
    pub scenario: Option<PathBuf>,

    /// Number of Monte Carlo iterations
    #[arg(short = 'n', long = "iterations", value_name = "N")]
    pub iterations: Option<usize>,

    /// Fractional flex used to build sampling ranges (e.g., 0.2)
    #[arg(long = "flex", value_name = "FRACTION")]
    pub flex: Option<f64>,

    /// Target certainty for the reported range (0 < c <= 1)
    #[arg(long = "certainty", value_name = "SHARE")]
    pub certainty: Option<f64>,

    /// Seed for reproducible runs
    #[arg(long = "seed", value_name = "SEED")]
    pub seed: Option<u64>,

    /// Worker threads for the simulation
    #[arg(short = 'j', long = "workers", value_name = "N")]
    pub workers: Option<usize>,

    /// Override the number of lanes closed
    #[arg(long = "lanes-closed", value_name = "N")]
    pub lanes_closed: Option<u32>,

    /// Override the closure length in metres
    #[arg(long = "closure-length", value_name = "METRES")]
    pub closure_length: Option<f64>,

    /// Override the closure duration in minutes
    #[arg(long = "duration", value_name = "MINUTES")]
    pub duration: Option<f64>,

    /// Override the posted closure speed in mph
    #[arg(long = "closure-speed", value_name = "MPH")]
    pub closure_speed: Option<f64>,

    /// Output format (text or json)
    #[arg(long = "format", value_enum, default_value = "text")]
    pub format: OutputFormat,

    /// Include the full delay distribution in the report
    #[arg(long = "histogram")]
    pub histogram: bool,

    /// Enable debug tracing on stderr
    #[arg(long = "debug")]
    pub debug: bool,
}
