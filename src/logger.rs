//! File logging for the `log` facade, configured from [`LoggingConfig`].
//!
//! When logging is disabled nothing is installed and `log` macros are no-ops.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::config::{Config, LoggingConfig};
use crate::constants::LOG_FILE_NAME;

/// Default log file location inside the user data directory
pub fn get_log_file_path() -> Result<PathBuf> {
    Ok(Config::get_data_dir()?.join(LOG_FILE_NAME))
}

/// Build the dispatch for `log_path` without installing it.
///
/// Returns `None` when logging is disabled.
pub fn build_dispatch(config: &LoggingConfig, log_path: &Path) -> Result<Option<fern::Dispatch>> {
    if !config.enabled {
        return Ok(None);
    }

    let level = config.level_filter()?;

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory: {}", parent.display()))?;
    }
    let file = fern::log_file(log_path)
        .with_context(|| format!("Failed to open log file: {}", log_path.display()))?;

    let dispatch = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!(
                "[{} {} {}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S%.3f"),
                record.level(),
                record.target(),
                message
            ))
        })
        .level(level)
        .chain(file);

    Ok(Some(dispatch))
}

/// Install the global logger at the default log file location
pub fn setup_logger(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let log_path = get_log_file_path()?;
    if let Some(dispatch) = build_dispatch(config, &log_path)? {
        dispatch
            .apply()
            .map_err(|e| anyhow::anyhow!("Failed to install logger: {}", e))?;
        log::info!("Logging to {}", log_path.display());
    }
    Ok(())
}
