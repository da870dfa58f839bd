//! File logging.
//!
//! The TUI owns the terminal, so `env_logger` is pointed at a file in the
//! data directory. The filter comes from `RUST_LOG` and defaults to `info`.

use std::fs::OpenOptions;
use std::io;
use std::path::Path;

/// Initialises the global logger, appending to `path`.
///
/// # Errors
///
/// Returns `Err` if the file cannot be opened or a logger is already installed.
pub fn init(path: &Path) -> io::Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Pipe(Box::new(file)))
        .format_timestamp_secs()
        .try_init()
        .map_err(|e| io::Error::new(io::ErrorKind::Other, e))
}
