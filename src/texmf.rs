//! Locating the TeX installation root.
//!
//! Paths are only stubbed under the root that owns the distribution tree,
//! e.g. `/usr/local/texlive/2020` or `/usr/share/texlive`. The default
//! resolver asks `kpsewhich` where `cmr10.pfb` lives and strips the
//! well-known suffix from the answer. A non-standard layout is an error;
//! no other locations are guessed.

use std::process::Command;

use thiserror::Error;

/// File looked up to find the installation.
pub const PROBE_FILE: &str = "cmr10.pfb";

/// Where [`PROBE_FILE`] lives relative to the installation root.
pub const PROBE_SUFFIX: &str = "/texmf-dist/fonts/type1/public/amsfonts/cm/cmr10.pfb";

/// Errors from installation-root resolution.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("Failed to run {program}: {source}. Is TeX installed and in your PATH?")]
    Spawn {
        program: String,
        source: std::io::Error,
    },

    #[error("{program} cmr10.pfb failed ({status}): {stderr}")]
    Failed {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("cmr10.pfb's path is non-standard: {path}")]
    NonStandard { path: String },

    #[error("Invalid installation root '{root}': must be a non-empty absolute path")]
    InvalidRoot { root: String },
}

/// Source of the installation root.
pub trait RootResolver {
    fn resolve(&self) -> Result<String, ResolveError>;
}

/// An explicitly configured root (`--texmf-root` or `texmf_root`).
#[derive(Debug, Clone)]
pub struct FixedRoot(pub String);

impl RootResolver for FixedRoot {
    fn resolve(&self) -> Result<String, ResolveError> {
        checked_root(&self.0).map(str::to_string)
    }
}

/// Resolves the root by running `kpsewhich cmr10.pfb`.
#[derive(Debug, Clone)]
pub struct Kpsewhich {
    program: String,
}

impl Default for Kpsewhich {
    fn default() -> Self {
        Self {
            program: "kpsewhich".to_string(),
        }
    }
}

impl Kpsewhich {
    /// Use a different `kpsewhich` executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl RootResolver for Kpsewhich {
    fn resolve(&self) -> Result<String, ResolveError> {
        let output = Command::new(&self.program)
            .arg(PROBE_FILE)
            .output()
            .map_err(|source| ResolveError::Spawn {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            return Err(ResolveError::Failed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let path = String::from_utf8_lossy(&output.stdout);
        let root = root_from_probe(path.trim())?;
        tracing::debug!(root, "resolved installation root via {}", self.program);
        Ok(root.to_string())
    }
}

/// Strip [`PROBE_SUFFIX`] from the path `kpsewhich` printed.
pub fn root_from_probe(path: &str) -> Result<&str, ResolveError> {
    match path.strip_suffix(PROBE_SUFFIX) {
        Some(root) if !root.is_empty() => checked_root(root),
        _ => Err(ResolveError::NonStandard {
            path: path.to_string(),
        }),
    }
}

/// `root` without trailing slashes. It must be absolute and must not be
/// `/` itself, otherwise the path pattern would match inside unrelated paths.
pub fn checked_root(root: &str) -> Result<&str, ResolveError> {
    let trimmed = root.trim_end_matches('/');
    if trimmed.is_empty() || !trimmed.starts_with('/') {
        return Err(ResolveError::InvalidRoot {
            root: root.to_string(),
        });
    }
    Ok(trimmed)
}
