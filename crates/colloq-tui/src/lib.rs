//! Full-screen TUI for the colloq document chat.

pub mod bindings;
pub mod common;
pub mod effects;
pub mod events;
pub mod features;
pub mod mutations;
pub mod overlays;
pub mod render;
pub mod runtime;
pub mod state;
pub mod terminal;
pub mod update;

use std::io::{IsTerminal, Write, stderr};

use anyhow::Result;
use colloq_core::config::Config;
use colloq_core::message::Message;
pub use runtime::TuiRuntime;

/// Entry point for chat mode: check for a TTY, seed the transcript, loop.
pub async fn run_interactive(config: Config) -> Result<()> {
    if !stderr().is_terminal() {
        anyhow::bail!("Interactive mode requires a terminal.");
    }

    // Banner to stderr, ahead of the alternate screen taking over
    let mut err = stderr();
    writeln!(err, "Colloq")?;
    writeln!(err, "Collection: {}", config.collection_name)?;
    err.flush()?;

    let mut runtime = TuiRuntime::new(config)?;
    runtime.state.page.messages.push(Message::system(WELCOME_NOTICE));
    runtime.run()?;

    // The terminal is back to normal once run() returns
    writeln!(stderr(), "Bye.")?;
    Ok(())
}

const WELCOME_NOTICE: &str =
    "Upload PDF documents with Ctrl+O, then ask questions about them here.";
