use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::error::{GameError, GameResult};

/// Send tracing output to `path`, appending.
///
/// The terminal belongs to the game, so nothing is logged unless a file is
/// given. The filter comes from `RUST_LOG`, defaulting to `info`. Fails if a
/// global subscriber is already installed.
pub fn init_file_logging(path: &Path) -> GameResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let file = OpenOptions::new().create(true).append(true).open(path)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .try_init()
        .map_err(|e| GameError::Logging(e.to_string()))
}
