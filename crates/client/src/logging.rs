//! File-based logging setup.
//!
//! The terminal is owned by the UI, so tracing output goes to a rolling
//! file under the platform data directory instead of stderr.
use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

/// Initialize the global subscriber. The returned guard must be kept alive
/// for the duration of the process or buffered lines are lost.
pub fn init() -> Result<WorkerGuard> {
    let dirs = directories::ProjectDirs::from("", "", "drill")
        .context("no usable home directory for log files")?;
    let log_dir = dirs.data_local_dir().join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("creating log directory {}", log_dir.display()))?;

    let appender = tracing_appender::rolling::daily(log_dir, "drill.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(guard)
}
