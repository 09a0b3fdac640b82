use std::fs;
use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Sends tracing output to a daily rolling file in `log_dir`.
///
/// The terminal belongs to the UI, so nothing is written to stdout. The
/// returned guard must be held until exit or buffered lines are lost.
pub fn init(log_dir: &Path, level: &str) -> anyhow::Result<WorkerGuard> {
    fs::create_dir_all(log_dir)?;
    let appender = tracing_appender::rolling::daily(log_dir, "smartnotes.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| format!("smartnotes={level},reqwest=warn").into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
        .try_init()?;

    Ok(guard)
}
