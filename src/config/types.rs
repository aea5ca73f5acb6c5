//! Configuration type definitions and defaults

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::filter::{ConfigError, FilterConfig};

/// Contents of `config.toml`.
///
/// Every key is optional. Unknown keys, and unknown names in `[filters]`,
/// are rejected rather than ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Map a fatal TeX error to exit status 1
    #[serde(default = "default_detect_error")]
    pub detect_error: bool,
    /// Installation root; skips the `kpsewhich` lookup when set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub texmf_root: Option<String>,
    /// Per-rule overrides, keyed by rule name
    #[serde(default)]
    pub filters: BTreeMap<String, bool>,
}

pub fn default_detect_error() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            detect_error: default_detect_error(),
            texmf_root: None,
            filters: BTreeMap::new(),
        }
    }
}

impl Config {
    /// Registry defaults with this file's `[filters]` applied.
    pub fn filter_config(&self) -> Result<FilterConfig, ConfigError> {
        let mut config = FilterConfig::default();
        config.apply_overrides(&self.filters)?;
        Ok(config)
    }
}
