//! # Rodsweep
//!
//! Entry point for the headless sweeper driver.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use rodsweep::app::{self, RunOptions};

/// Run the rod-and-strings pebble sweeper without a window
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Rig configuration (JSON); defaults to the reference rig
    #[arg(long)]
    config: Option<PathBuf>,
    /// Timed input events (JSON list)
    #[arg(long)]
    script: Option<PathBuf>,
    /// Frames to simulate
    #[arg(long, default_value_t = 3600)]
    frames: u64,
    /// Seconds per frame
    #[arg(long, default_value_t = 1.0 / 60.0)]
    dt: f32,
    /// Log progress every N frames (0 disables)
    #[arg(long, default_value_t = 50)]
    report_every: u64,
    /// Reload the config file when it changes
    #[arg(long)]
    watch: bool,
}

impl From<Cli> for RunOptions {
    fn from(cli: Cli) -> Self {
        Self {
            config: cli.config,
            script: cli.script,
            frames: cli.frames,
            dt: cli.dt,
            report_every: cli.report_every,
            watch: cli.watch,
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let options = RunOptions::from(Cli::parse());
    app::run(&options)?;
    Ok(())
}
