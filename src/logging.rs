//! Tracing setup.
//!
//! The terminal belongs to the TUI, so log lines go to a file. Level comes
//! from `RUST_LOG` when set, otherwise from the config's `log_level`,
//! otherwise `info`.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::app_dirs::AppDirs;

pub const DEFAULT_LOG_LEVEL: &str = "info";

fn env_filter(level: Option<&str>) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or(DEFAULT_LOG_LEVEL)))
}

/// Install the global subscriber writing to `path` (or the default log
/// location). Returns the file in use, or None if logging could not be set
/// up; the app runs fine without it.
pub fn init_tracing(level: Option<&str>, path: Option<&Path>) -> Option<PathBuf> {
    let path = path.map(Path::to_path_buf).or_else(AppDirs::log_path)?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .with_target(true)
        .with_writer(Mutex::new(file));

    tracing_subscriber::registry()
        .with(env_filter(level))
        .with(fmt_layer)
        .try_init()
        .ok()?;

    Some(path)
}
