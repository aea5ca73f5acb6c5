//! TeX console output filtering.
//!
//! - [`rules`] - Rule registry and resolved toggles ([`FilterConfig`])
//! - [`blacklist`] - Built-in boilerplate tables ([`Blacklist`])
//! - [`paths`] - Installation/project path stubbing ([`PathPatterns`])
//! - [`state`] - Line classification and one-line lookback ([`LineState`])
//! - [`engine`] - The streaming filter ([`LineFilter`])

pub mod blacklist;
pub mod engine;
pub mod error;
pub mod paths;
pub mod rules;
pub mod state;

pub use blacklist::Blacklist;
pub use engine::{FilterStats, LineFilter, LineOutcome, RunResult, Step, FATAL_SENTINEL};
pub use error::FilterError;
pub use paths::{PathPatterns, STUB};
pub use rules::{ConfigError, FilterConfig, Rule, RuleSpec, REGISTRY};
pub use state::{BoxAxis, BoxKind, BoxWarning, LineClass, LineState};
