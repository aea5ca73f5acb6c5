//! Configuration file support
//!
//! An optional TOML file at `~/.config/tex-filter/config.toml` (or the path
//! given with `--config`) sits between the built-in rule defaults and the
//! command-line flags:
//!
//! ```toml
//! detect_error = true
//! texmf_root = "/usr/local/texlive/2020"
//!
//! [filters]
//! citeref = true
//! empty_lines = false
//! ```

mod io;
mod types;

pub use types::*;

use anyhow::Result;
use std::path::{Path, PathBuf};

impl Config {
    /// Get the config file path (~/.config/tex-filter/config.toml)
    pub fn config_path() -> Result<PathBuf> {
        io::config_path()
    }

    /// Load configuration from the default location, or return defaults if
    /// not found
    pub fn load() -> Result<Self> {
        io::load()
    }

    /// Load configuration from an explicit path
    pub fn load_from(path: &Path) -> Result<Self> {
        io::load_from(path)
    }
}
