//! File-backed diagnostics
//!
//! The interactive UI owns the terminal, so diagnostics go to a log file
//! under the app data directory instead of stderr. Fetch failures land
//! here with full detail; the UI only ever shows the generic retry
//! message.

use anyhow::Result;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

const LOG_FILE: &str = "ladle.log";

/// Filter override, e.g. `LADLE_LOG=debug`
const LOG_ENV_VAR: &str = "LADLE_LOG";

/// Install the global subscriber writing to the app log file. The returned
/// guard flushes the writer on drop and must live as long as the process.
pub fn init() -> Result<WorkerGuard> {
    let log_dir = crate::config::get_log_dir()?;
    let appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
