//! # Rodsweep Application Logic
//!
//! Drives a [`rig::Session`] headlessly for a fixed number of frames, feeding
//! it scripted input and, when asked, live configuration reloads.

use std::path::PathBuf;

use anyhow::{Context, Result};
use rig::{RigConfig, Session, Stats};

use crate::script::InputScript;
use crate::watcher;

/// Everything a run needs, as parsed from the command line
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    pub config: Option<PathBuf>,
    pub script: Option<PathBuf>,
    pub frames: u64,
    pub dt: f32,
    /// Log progress every this many frames; 0 disables progress logs
    pub report_every: u64,
    pub watch: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            config: None,
            script: None,
            frames: 3600,
            dt: 1.0 / 60.0,
            report_every: 50,
            watch: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Frames actually stepped
    pub frames: u64,
    pub quit_early: bool,
    pub spawned: usize,
    pub live: usize,
    pub stats: Stats,
}

/// Run the sweeper loop.
///
/// # Errors
///
/// Returns configuration, script and watcher set-up errors, and any error
/// produced by the session while stepping.
pub fn run(options: &RunOptions) -> Result<RunSummary> {
    let config = match &options.config {
        Some(path) => RigConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => RigConfig::default(),
    };
    let script = match &options.script {
        Some(path) => InputScript::from_path(path)?,
        None => InputScript::default(),
    };
    run_with(config, &script, options)
}

/// Run the loop with an already loaded config and script
///
/// # Errors
///
/// As [`run`], minus loading.
pub fn run_with(config: RigConfig, script: &InputScript, options: &RunOptions) -> Result<RunSummary> {
    let config_watcher = match (&options.config, options.watch) {
        (Some(path), true) => match watcher::start(path) {
            Ok(watcher_instance) => {
                tracing::info!("Config watcher started successfully.");
                Some(watcher_instance)
            }
            Err(e) => {
                tracing::error!("Failed to start config watcher: {e:?}");
                None
            }
        },
        (None, true) => {
            tracing::warn!("--watch has no effect without --config");
            None
        }
        _ => None,
    };

    tracing::info!("Initializing rig session...");
    let mut session = Session::new(config).context("building session")?;
    let dt = options.dt;

    tracing::info!(
        "Starting simulation loop for {} frames with dt = {}...",
        options.frames,
        dt
    );
    let mut frames = 0;
    let mut quit_early = false;
    while frames < options.frames {
        if let Some(config_watcher) = &config_watcher {
            for update in config_watcher.drain() {
                match update.and_then(|config| session.reconfigure(config)) {
                    Ok(()) => tracing::info!("New config queued for the next frame"),
                    Err(e) => tracing::warn!("Ignoring config update: {e}"),
                }
            }
        }

        let input = script.frame_input(session.elapsed(), dt);
        if input.quit {
            tracing::info!("Quit requested at t = {:.2} s", session.elapsed());
            quit_early = true;
            break;
        }

        let report = session
            .step(&input, dt)
            .with_context(|| format!("frame {}", frames + 1))?;
        frames += 1;

        if options.report_every > 0 && frames % options.report_every == 0 {
            tracing::info!(
                "Simulation frame {} complete. Phase: {:?}, lengths: {:.1}/{:.1}, captured: {}",
                frames,
                report.phase,
                report.lengths[0],
                report.lengths[1],
                session.pebbles().captured()
            );
        }
    }

    let stats = session.snapshot()?.stats();
    tracing::info!("Final statistics after {frames} frames:\n{stats}");

    Ok(RunSummary {
        frames,
        quit_early,
        spawned: session.pebbles().spawned(),
        live: session.pebbles().live(),
        stats,
    })
}
