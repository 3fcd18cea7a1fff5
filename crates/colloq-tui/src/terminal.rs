//! Terminal setup and teardown.
//!
//! Raw mode, the alternate screen, and capture modes all get undone no
//! matter how the process leaves: normal exit, Ctrl+C, or panic.

use std::io::{self, Stdout};
use std::panic;

use anyhow::{Context, Result};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

/// Enters raw mode and the alternate screen.
///
/// Call `set_panic_hook()` first so a panic mid-setup still restores the
/// terminal.
pub fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode().context("Failed to enable raw mode")?;
    execute!(io::stdout(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
    Terminal::new(CrosstermBackend::new(io::stdout())).context("Failed to create terminal")
}

/// Turns on bracketed paste and mouse capture.
///
/// Separate from `setup_terminal()` so the normal exit path can turn them
/// off first; `restore_terminal()` also turns them off for the panic and
/// Ctrl+C paths.
pub fn enable_capture() -> Result<()> {
    execute!(io::stdout(), EnableBracketedPaste, EnableMouseCapture)
        .context("Failed to enable mouse and paste capture")
}

/// Turns off what `enable_capture()` turned on.
pub fn disable_capture() -> Result<()> {
    execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste)
        .context("Failed to disable mouse and paste capture")
}

/// Puts the terminal back the way it was. Idempotent.
pub fn restore_terminal() -> Result<()> {
    // Capture modes go first, while still in raw mode. Disabling them is
    // safe even if they were never enabled.
    let _ = execute!(io::stdout(), DisableMouseCapture, DisableBracketedPaste);
    execute!(io::stdout(), LeaveAlternateScreen).context("Failed to leave alternate screen")?;
    disable_raw_mode().context("Failed to disable raw mode")
}

/// Chains terminal restore in front of the default panic output.
///
/// Must run before `setup_terminal()`.
pub fn set_panic_hook() {
    let previous = panic::take_hook();
    panic::set_hook(Box::new(move |info| {
        let _ = restore_terminal();
        previous(info);
    }));
}
