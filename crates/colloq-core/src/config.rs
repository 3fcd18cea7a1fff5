//! Configuration: a small TOML file under the colloq home directory.
//!
//! A missing file is not an error; every field has a default.

use std::fs;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Commented starter config, written verbatim by `init`.
const DEFAULT_TEMPLATE: &str = include_str!("../default_config.toml");

pub mod paths {
    //! Where colloq keeps its files.
    //!
    //! Everything hangs off one home directory: `COLLOQ_HOME` when set,
    //! `~/.config/colloq` otherwise.

    use std::path::PathBuf;

    /// The colloq home directory.
    pub fn colloq_home() -> PathBuf {
        match std::env::var("COLLOQ_HOME") {
            Ok(home) => PathBuf::from(home),
            Err(_) => {
                let home = dirs::home_dir().expect("Could not determine home directory");
                home.join(".config").join("colloq")
            }
        }
    }

    /// Where `config.toml` lives.
    pub fn config_path() -> PathBuf {
        colloq_home().join("config.toml")
    }

    /// Where log files are written.
    pub fn logs_dir() -> PathBuf {
        colloq_home().join("logs")
    }
}

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Collection uploaded documents are indexed into.
    pub collection_name: String,

    /// Chunk size for text splitting at upload time.
    pub chunk_size: u32,

    /// Chunk overlap for text splitting at upload time.
    pub chunk_overlap: u32,

    /// Simulated exchange latency in milliseconds (0 disables).
    pub response_delay_ms: u64,
}

impl Config {
    const DEFAULT_COLLECTION_NAME: &str = "documents";
    const DEFAULT_CHUNK_SIZE: u32 = 1000;
    const DEFAULT_CHUNK_OVERLAP: u32 = 200;
    const DEFAULT_RESPONSE_DELAY_MS: u64 = 400;

    /// Loads the config from its default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&paths::config_path())
    }

    /// Loads the config from `path`, or defaults when no file exists.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let raw = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config from {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("Failed to parse config from {}", path.display()))
    }

    /// Simulated latency between request dispatch and response.
    pub fn response_delay(&self) -> Option<Duration> {
        if self.response_delay_ms == 0 {
            None
        } else {
            Some(Duration::from_millis(self.response_delay_ms))
        }
    }

    /// Writes the commented starter config to `path`.
    ///
    /// Refuses to touch a file that already exists.
    pub fn init(path: &Path) -> Result<()> {
        if path.exists() {
            anyhow::bail!("Config file already exists at {}", path.display());
        }
        write_atomic(path, DEFAULT_TEMPLATE)
    }
}

/// Writes via a temp file and rename; `path` is never half-written.
fn write_atomic(path: &Path, content: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory {}", parent.display()))?;
    }
    let tmp = path.with_extension("toml.tmp");
    fs::write(&tmp, content)
        .with_context(|| format!("Failed to write config to {}", tmp.display()))?;
    fs::rename(&tmp, path)
        .with_context(|| format!("Failed to rename {} to {}", tmp.display(), path.display()))
}

impl Default for Config {
    fn default() -> Self {
        Self {
            collection_name: Self::DEFAULT_COLLECTION_NAME.to_string(),
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
            chunk_overlap: Self::DEFAULT_CHUNK_OVERLAP,
            response_delay_ms: Self::DEFAULT_RESPONSE_DELAY_MS,
        }
    }
}
