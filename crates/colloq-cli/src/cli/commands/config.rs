//! Handlers for the `config` subcommands.

use anyhow::{Context, Result};
use colloq_core::config::{self, Config};

pub fn path() {
    println!("{}", config::paths::config_path().display());
}

pub fn init() -> Result<()> {
    let target = config::paths::config_path();
    Config::init(&target).with_context(|| format!("initialize {}", target.display()))?;
    println!("Wrote config to {}", target.display());
    Ok(())
}
