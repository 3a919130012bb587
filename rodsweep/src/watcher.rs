//! # Config Hot-Reloading
//!
//! Watches the rig configuration file and forwards every change, parsed and
//! validated, over a channel. The session loop drains the channel between
//! frames, so a reload always lands on a frame boundary.
//!
//! The parent directory is watched, so saves that replace the file through a
//! rename are still seen.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, Sender};

use anyhow::{anyhow, Context, Result};
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use rig::{ConfigError, RigConfig};
use tracing::{error, info};

/// Outcome of reading the config after a change
pub type ConfigUpdate = Result<RigConfig, ConfigError>;

/// Keeps the underlying watcher alive; dropping it stops the watch
pub struct ConfigWatcher {
    _watcher: RecommendedWatcher,
    updates: Receiver<ConfigUpdate>,
}

impl ConfigWatcher {
    /// Every update received since the last call, oldest first
    pub fn drain(&self) -> impl Iterator<Item = ConfigUpdate> + '_ {
        self.updates.try_iter()
    }
}

/// Handler for events touching the watched config file
struct ConfigChangeHandler {
    path: PathBuf,
    file_name: OsString,
    updates: Sender<ConfigUpdate>,
}

impl ConfigChangeHandler {
    fn is_config_file(&self, path: &Path) -> bool {
        path.file_name() == Some(self.file_name.as_os_str())
    }

    fn handle_change(&self) {
        let update = RigConfig::from_path(&self.path);
        match &update {
            Ok(_) => info!("Config file {} changed - reloading", self.path.display()),
            Err(e) => error!("Config file {} changed but is invalid: {e}", self.path.display()),
        }
        // The receiver only disappears when the session loop has ended
        let _ = self.updates.send(update);
    }

    fn handle_event(&self, result: notify::Result<Event>) {
        match result {
            Ok(event) => {
                // Only care about file modifications and creations
                if !event.kind.is_modify() && !event.kind.is_create() {
                    return;
                }
                if event.paths.iter().any(|path| self.is_config_file(path)) {
                    self.handle_change();
                }
            }
            Err(e) => error!("File watcher error: {e:?}"),
        }
    }
}

/// Start watching `path`
///
/// # Errors
///
/// Fails if the path has no file name, its directory does not exist, or the
/// platform watcher cannot be created.
pub fn start(path: &Path) -> Result<ConfigWatcher> {
    info!("Initializing config hot-reload watcher...");

    let file_name = path
        .file_name()
        .ok_or_else(|| anyhow!("config path {} has no file name", path.display()))?
        .to_os_string();
    let directory = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    if !directory.exists() {
        return Err(anyhow!("config directory {} not found", directory.display()));
    }

    let (sender, updates) = mpsc::channel();
    let handler = ConfigChangeHandler {
        path: path.to_path_buf(),
        file_name,
        updates: sender,
    };
    let mut watcher =
        notify::recommended_watcher(move |result: notify::Result<Event>| handler.handle_event(result))
            .context("failed to create file watcher")?;
    watcher
        .watch(&directory, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", directory.display()))?;

    info!("Config watcher active - monitoring {}", path.display());
    Ok(ConfigWatcher {
        _watcher: watcher,
        updates,
    })
}
