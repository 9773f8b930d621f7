//! Tracing setup
//!
//! CLI commands log to stderr. The TUI owns the terminal, so it logs to a
//! daily rolling file under the log directory instead. `RUST_LOG` wins over
//! the configured level.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::VaultPaths;
use crate::error::{VaultError, VaultResult};

const LOG_FILE_NAME: &str = "biovault.log";

fn env_filter(default_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level))
}

/// Log to stderr; used by one-shot commands
pub fn init_cli(default_level: &str) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Log to a rolling file. Keep the guard alive until exit or buffered
/// lines are lost.
pub fn init_file(paths: &VaultPaths, default_level: &str) -> VaultResult<WorkerGuard> {
    std::fs::create_dir_all(paths.log_dir())
        .map_err(|e| VaultError::Io(format!("Failed to create log directory: {}", e)))?;

    let appender = tracing_appender::rolling::daily(paths.log_dir(), LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter(default_level))
        .with_ansi(false)
        .with_writer(writer)
        .try_init();

    Ok(guard)
}
