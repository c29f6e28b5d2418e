//! File logging.
//!
//! The terminal belongs to the UI, so logs only go to a file and only when
//! one is requested.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable naming the log file.
pub const LOG_FILE_ENV: &str = "GLIMMER_LOG_FILE";

/// Environment variable holding the log filter directives.
pub const LOG_FILTER_ENV: &str = "GLIMMER_LOG";

/// Resolve the log file from the CLI flag or the environment.
pub fn log_path(flag: Option<&Path>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| std::env::var_os(LOG_FILE_ENV).map(PathBuf::from))
}

/// Install the global subscriber writing to `path`.
pub fn init(path: &Path) -> color_eyre::Result<()> {
    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| color_eyre::eyre::eyre!("failed to install logger: {e}"))?;
    Ok(())
}
