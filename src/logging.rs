//! Tracing setup.
//!
//! Logs go to a rolling-never (single) file `stockpilot.log` in
//! [`Config::log_dir`]. The level is controlled by `RUST_LOG`; when the
//! variable is absent [`Config::log_filter`] is used.

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::Config;
use crate::error::AppError;

pub const LOG_FILE: &str = "stockpilot.log";

/// Install the global subscriber.
///
/// The returned guard flushes buffered lines when dropped; keep it alive for
/// the life of the application. Fails if the log directory cannot be created
/// or a global subscriber is already installed.
pub fn init(config: &Config) -> Result<WorkerGuard, AppError> {
    let log_dir = config.log_dir();

    // tracing_appender::rolling::never panics if it cannot open the log file,
    // so the directory tree must exist first.
    std::fs::create_dir_all(log_dir).map_err(|e| {
        AppError::Io(format!("cannot create log dir {}: {e}", log_dir.display()))
    })?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_filter))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .try_init()
        .map_err(|e| AppError::Io(format!("cannot install tracing subscriber: {e}")))?;

    tracing::info!(log_dir = %log_dir.display(), "StockPilot logging started");
    Ok(guard)
}
