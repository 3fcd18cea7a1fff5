//! Chat command handler.

use anyhow::{Context, Result};
use colloq_core::config::{Config, paths};
use colloq_core::logging;

pub async fn run(config: Config) -> Result<()> {
    // The TUI owns the terminal from here on; logs go to a file. The guard
    // must outlive the session or buffered records are dropped.
    let _log_guard = logging::init(&paths::logs_dir()).context("init logging")?;

    tracing::info!(collection = %config.collection_name, "starting interactive session");

    colloq_tui::run_interactive(config).await.context("interactive chat failed")?;

    Ok(())
}
