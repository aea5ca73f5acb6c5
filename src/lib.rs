//! tex-filter library
//!
//! Streaming normalization of TeX console output: drops boilerplate,
//! stubs installation paths, strips page numbers and reports whether TeX
//! hit a fatal error.

pub mod cli;
pub mod config;
pub mod filter;
pub mod texmf;

pub use config::Config;
pub use filter::{FilterConfig, LineFilter, Rule, RunResult};
pub use texmf::{FixedRoot, Kpsewhich, RootResolver};
