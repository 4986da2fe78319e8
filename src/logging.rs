use anyhow::{anyhow, Context, Result};
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

pub const LOG_FILE_NAME: &str = "pomodesk.log";

fn build_filter(log_level: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_level).context("invalid log level")
}

/// Route tracing output to a daily rolling file; the terminal belongs to the UI.
///
/// The returned guard must be held until exit so buffered lines are flushed.
pub fn init_tracing(log_level: &str, log_dir: &Path) -> Result<WorkerGuard> {
    let filter = build_filter(log_level)?;
    let appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow!(err))
        .context("initialize tracing subscriber")?;
    Ok(guard)
}
