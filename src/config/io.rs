//! Configuration I/O operations

use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

use super::types::Config;

/// Get the config file path (~/.config/tex-filter/config.toml)
pub fn config_path() -> Result<PathBuf> {
    let config_dir = config_dir()?;
    Ok(config_dir.join("config.toml"))
}

/// Get the config directory path (~/.config/tex-filter)
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".config").join("tex-filter"))
}

/// Load configuration from the default location, or return defaults if
/// the file does not exist
pub fn load() -> Result<Config> {
    let config_path = match config_path() {
        Ok(path) => path,
        Err(e) => {
            tracing::debug!("no config location: {e:#}");
            return Ok(Config::default());
        }
    };

    if config_path.exists() {
        load_from(&config_path)
    } else {
        Ok(Config::default())
    }
}

/// Load configuration from an explicit file, which must exist
pub fn load_from(path: &Path) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {:?}", path))?;
    let config: Config = toml::from_str(&contents)
        .with_context(|| format!("Failed to parse config file: {:?}", path))?;
    config
        .filter_config()
        .with_context(|| format!("Invalid config file: {:?}", path))?;
    tracing::debug!(?path, "loaded config");
    Ok(config)
}
