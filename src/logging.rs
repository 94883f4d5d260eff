//! Logging setup for the installer.
//!
//! Log records go to a dated file in the log directory, never to the
//! terminal: the status panel owns the screen while the installer runs.
//! `RUST_LOG` overrides the configured level; debug mode forces `debug`.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::errors::InstallerResult;

/// Log file name for a given day, e.g. `seed-installer-20261016.log`.
pub fn log_file_name(date: chrono::NaiveDate) -> String {
    format!("seed-installer-{}.log", date.format("%Y%m%d"))
}

/// Level directive to use for the given settings.
pub fn effective_level(level: &str, debug_mode: bool) -> String {
    if debug_mode {
        "debug".to_string()
    } else {
        level.to_lowercase()
    }
}

/// Install the global subscriber writing to `<log_directory>/seed-installer-<date>.log`.
///
/// Creates the log directory if needed and returns the log file path. A
/// second call leaves the first subscriber in place.
pub fn init(log_directory: &Path, level: &str, debug_mode: bool) -> InstallerResult<PathBuf> {
    fs::create_dir_all(log_directory)?;

    let path = log_directory.join(log_file_name(chrono::Local::now().date_naive()));
    let file = OpenOptions::new().create(true).append(true).open(&path)?;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(effective_level(level, debug_mode)));

    let installed = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init();

    if let Err(e) = installed {
        debug!(
            error = %e,
            log_file = %path.display(),
            "Global subscriber already installed; keeping the existing one"
        );
    }

    Ok(path)
}
