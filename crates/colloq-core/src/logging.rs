//! Log initialization.
//!
//! The TUI owns the terminal while it runs, so log output goes to a file
//! under the colloq home directory rather than stderr. Filtering comes from
//! the COLLOQ_LOG environment variable.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

const DEFAULT_FILTER: &str = "colloq=info";
const LOG_FILE_NAME: &str = "colloq.log";

/// Initializes file logging under `dir` and returns the flush guard.
///
/// The guard must stay alive for the process lifetime; dropping it stops the
/// background writer and discards buffered records.
pub fn init(dir: &Path) -> Result<WorkerGuard> {
    fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, LOG_FILE_NAME);
    let (writer, guard) = tracing_appender::non_blocking(appender);

    let filter =
        EnvFilter::try_from_env("COLLOQ_LOG").unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false)
                .compact(),
        )
        .init();

    Ok(guard)
}
