// Logger setup plus conditional logging macros that are only active in debug builds

use crate::error::LoggingError;
use chrono::Local;
use env_logger::{Builder, Env, Target};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "wordle-game";
const LOG_FILE: &str = "wordle-game.log";

/// `<cache dir>/wordle-game/wordle-game.log`, when the platform has a cache dir.
pub fn default_log_path() -> Option<PathBuf> {
    dirs::cache_dir().map(|dir| dir.join(APP_DIR).join(LOG_FILE))
}

/// Install `env_logger` as the global logger.
///
/// The filter comes from `RUST_LOG` and defaults to `info`. Output goes to
/// `log_file` (appended, parent dirs created) or to stderr when `None`.
pub fn init_logging(log_file: Option<&Path>) -> Result<(), LoggingError> {
    let mut builder = Builder::from_env(Env::default().default_filter_or("info"));
    builder.format(|buf, record| {
        writeln!(
            buf,
            "{} {:<5} {}: {}",
            Local::now().format("%H:%M:%S%.3f"),
            record.level(),
            record.target(),
            record.args()
        )
    });

    if let Some(path) = log_file {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = File::options().create(true).append(true).open(path)?;
        builder.target(Target::Pipe(Box::new(file)));
    }

    builder.try_init()?;
    Ok(())
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}
