//! File logging.
//!
//! The terminal is owned by the UI, so logs go to `bgfx.log` in the data
//! directory. `RUST_LOG` controls the filter, defaulting to `info`.

use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use color_eyre::eyre::eyre;
use directories::ProjectDirs;
use tracing_subscriber::EnvFilter;

/// Name of the log file inside the data directory.
const LOG_FILE_NAME: &str = "bgfx.log";

/// Path of the log file, if a data directory exists on this platform.
pub fn log_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "bgfx").map(|dirs| dirs.data_local_dir().join(LOG_FILE_NAME))
}

/// Install the global subscriber. Without a data directory logging is off.
pub fn init() -> color_eyre::Result<()> {
    let Some(path) = log_path() else {
        return Ok(());
    };
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| eyre!(e))?;

    tracing::info!(path = %path.display(), "logging initialized");
    Ok(())
}
